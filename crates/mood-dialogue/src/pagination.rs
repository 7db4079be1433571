//! Fixed-size pages over a cached listing.

use mood_core::entities::Entry;

use crate::narration::list_item;

pub const PAGE_SIZE: usize = 3;

/// Result of rendering one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Narration for the page plus the page number actually rendered.
    Rendered {
        text: String,
        page: u32,
        last_page: u32,
    },
    /// The requested page lies past the end of the listing.
    Empty,
}

/// Number of pages needed for `count` entries.
#[must_use]
pub fn page_count(count: usize) -> u32 {
    u32::try_from(count.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}

/// Render page `requested` (1-based; `0` clamps to `1`) of `entries`.
///
/// Items carry their ordinal within the page. The text ends with the page
/// framing and `continuation`.
#[must_use]
pub fn render_page(entries: &[Entry], requested: u32, continuation: &str) -> Page {
    let page = requested.max(1);
    let last_page = page_count(entries.len());
    if page > last_page {
        return Page::Empty;
    }

    let start = (page as usize - 1) * PAGE_SIZE;
    let items: Vec<String> = entries
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .enumerate()
        .map(|(i, entry)| list_item(i + 1, entry))
        .collect();

    Page::Rendered {
        text: format!(
            "{} Page {page} of {last_page}. {continuation}",
            items.join(" ")
        ),
        page,
        last_page,
    }
}
