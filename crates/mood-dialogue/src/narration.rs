//! Spoken renderings of entries.

use mood_config::ResponsesConfig;
use mood_core::entities::Entry;

const ORDINALS: [&str; 3] = ["First", "Second", "Third"];

/// 1-based ordinal word for a position within a page.
#[must_use]
pub fn ordinal(position: usize) -> &'static str {
    ORDINALS
        .get(position.saturating_sub(1))
        .copied()
        .unwrap_or("Next")
}

/// `"<Ordinal>, <name>: feeling <mood>, rated <rating>."`
#[must_use]
pub fn list_item(position: usize, entry: &Entry) -> String {
    format!(
        "{}, {}: feeling {}, rated {}.",
        ordinal(position),
        entry.name,
        entry.mood,
        entry.rating
    )
}

/// Join items as speech: `a`, `a and b`, `a, b and c`.
#[must_use]
pub fn spoken_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Full description of one entry for the view intent, composed around the
/// catalogue's view phrases.
#[must_use]
pub fn describe_entry(entry: &Entry, responses: &ResponsesConfig) -> String {
    let activities = if entry.activities.is_empty() {
        responses.view_no_activities.clone()
    } else {
        format!(
            "{} {}.",
            responses.view_activities,
            spoken_list(&entry.activities)
        )
    };
    format!(
        "{} {}, {} {} {} {}. {activities}",
        responses.view_intro,
        entry.name,
        responses.view_feeling,
        entry.mood,
        responses.view_rating,
        entry.rating
    )
}
