//! Spoken response catalogue.
//!
//! Fixed phrases only. Names, moods, page numbers and other dynamic values are
//! composed around these phrases by the dialogue crate.

use serde::{Deserialize, Serialize};

macro_rules! phrase {
    ($fn_name:ident, $text:literal) => {
        fn $fn_name() -> String {
            $text.to_string()
        }
    };
}

phrase!(default_launch, "Welcome to your mood journal. You can create an entry, list your entries, or view an entry.");
phrase!(default_help, "You can say create an entry, list my entries, view an entry, or delete an entry. What would you like to do?");
phrase!(default_unknown_request, "Sorry, I didn't get that. What would you like to do?");
phrase!(default_pin_prompt, "Please tell me your PIN.");
phrase!(default_incorrect_pin, "That PIN is incorrect. Please try again.");
phrase!(default_ready, "Thanks, you're all set. What would you like to do?");
phrase!(default_name_prompt, "What would you like to call this entry?");
phrase!(default_mood_prompt, "How are you feeling?");
phrase!(default_rating_prompt, "On a scale of one to ten, how strong is that feeling?");
phrase!(default_first_activity_prompt, "What have you been doing?");
phrase!(default_more_activities_prompt, "Is there anything else you've been doing?");
phrase!(default_activity_prompt, "What else have you been doing?");
phrase!(default_entry_created, "Your entry has been saved.");
phrase!(default_entry_create_failed, "Sorry, I couldn't save your entry. Say no to try again.");
phrase!(default_duplicate_name, "You already have an entry with that name. Please choose a different name.");
phrase!(default_no_entries, "You don't have any entries yet.");
phrase!(default_no_more_entries, "There are no more entries.");
phrase!(default_page_prompt, "Say next or previous to move between pages, or ask to view an entry.");
phrase!(default_entry_not_found, "I couldn't find an entry with that name.");
phrase!(default_view_intro, "In");
phrase!(default_view_feeling, "you were feeling");
phrase!(default_view_rating, "with a rating of");
phrase!(default_view_activities, "You were");
phrase!(default_view_no_activities, "You didn't record any activities.");
phrase!(default_delete_confirm, "Are you sure you want to delete the entry");
phrase!(default_entry_deleted, "The entry has been deleted.");
phrase!(default_entry_not_deleted, "Okay, the entry has not been deleted.");
phrase!(default_entry_delete_failed, "Sorry, I couldn't delete that entry.");
phrase!(default_goodbye, "Goodbye.");
phrase!(default_failure, "Sorry, something went wrong. Please try again.");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponsesConfig {
    #[serde(default = "default_launch")]
    pub launch: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_unknown_request")]
    pub unknown_request: String,
    #[serde(default = "default_pin_prompt")]
    pub pin_prompt: String,
    #[serde(default = "default_incorrect_pin")]
    pub incorrect_pin: String,
    #[serde(default = "default_ready")]
    pub ready: String,
    #[serde(default = "default_name_prompt")]
    pub name_prompt: String,
    #[serde(default = "default_mood_prompt")]
    pub mood_prompt: String,
    #[serde(default = "default_rating_prompt")]
    pub rating_prompt: String,
    #[serde(default = "default_first_activity_prompt")]
    pub first_activity_prompt: String,
    #[serde(default = "default_more_activities_prompt")]
    pub more_activities_prompt: String,
    #[serde(default = "default_activity_prompt")]
    pub activity_prompt: String,
    #[serde(default = "default_entry_created")]
    pub entry_created: String,
    #[serde(default = "default_entry_create_failed")]
    pub entry_create_failed: String,
    #[serde(default = "default_duplicate_name")]
    pub duplicate_name: String,
    #[serde(default = "default_no_entries")]
    pub no_entries: String,
    #[serde(default = "default_no_more_entries")]
    pub no_more_entries: String,
    #[serde(default = "default_page_prompt")]
    pub page_prompt: String,
    #[serde(default = "default_entry_not_found")]
    pub entry_not_found: String,
    /// Followed by the entry name and a question mark.
    /// Lead word before the entry name when viewing an entry.
    #[serde(default = "default_view_intro")]
    pub view_intro: String,
    #[serde(default = "default_view_feeling")]
    pub view_feeling: String,
    #[serde(default = "default_view_rating")]
    pub view_rating: String,
    /// Precedes the spoken activity list.
    #[serde(default = "default_view_activities")]
    pub view_activities: String,
    #[serde(default = "default_view_no_activities")]
    pub view_no_activities: String,
    #[serde(default = "default_delete_confirm")]
    pub delete_confirm: String,
    #[serde(default = "default_entry_deleted")]
    pub entry_deleted: String,
    #[serde(default = "default_entry_not_deleted")]
    pub entry_not_deleted: String,
    #[serde(default = "default_entry_delete_failed")]
    pub entry_delete_failed: String,
    #[serde(default = "default_goodbye")]
    pub goodbye: String,
    /// Spoken when a turn fails for a reason the user cannot fix.
    #[serde(default = "default_failure")]
    pub failure: String,
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            launch: default_launch(),
            help: default_help(),
            unknown_request: default_unknown_request(),
            pin_prompt: default_pin_prompt(),
            incorrect_pin: default_incorrect_pin(),
            ready: default_ready(),
            name_prompt: default_name_prompt(),
            mood_prompt: default_mood_prompt(),
            rating_prompt: default_rating_prompt(),
            first_activity_prompt: default_first_activity_prompt(),
            more_activities_prompt: default_more_activities_prompt(),
            activity_prompt: default_activity_prompt(),
            entry_created: default_entry_created(),
            entry_create_failed: default_entry_create_failed(),
            duplicate_name: default_duplicate_name(),
            no_entries: default_no_entries(),
            no_more_entries: default_no_more_entries(),
            page_prompt: default_page_prompt(),
            entry_not_found: default_entry_not_found(),
            view_intro: default_view_intro(),
            view_feeling: default_view_feeling(),
            view_rating: default_view_rating(),
            view_activities: default_view_activities(),
            view_no_activities: default_view_no_activities(),
            delete_confirm: default_delete_confirm(),
            entry_deleted: default_entry_deleted(),
            entry_not_deleted: default_entry_not_deleted(),
            entry_delete_failed: default_entry_delete_failed(),
            goodbye: default_goodbye(),
            failure: default_failure(),
        }
    }
}
