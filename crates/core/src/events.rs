//! Event field rules and image-change resolution.
//!
//! Everything here is pure so the API handlers stay thin and the rules can
//! be exercised without a database or filesystem.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Entity name used in not-found errors.
pub const ENTITY_EVENT: &str = "Event";

/// Wire format of the `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Message returned when either required field is blank.
pub const MSG_REQUIRED_FIELDS: &str = "Title and date are required";

/// Check the required `title` and `date` fields and parse the date.
///
/// Blank (empty or whitespace-only) values fail with
/// [`MSG_REQUIRED_FIELDS`]; a present but malformed date fails with a
/// format hint.
pub fn validate_event_fields(title: &str, date: &str) -> Result<NaiveDate, CoreError> {
    if title.trim().is_empty() || date.trim().is_empty() {
        return Err(CoreError::Validation(MSG_REQUIRED_FIELDS.into()));
    }

    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!("Invalid date '{date}'. Expected format YYYY-MM-DD"))
    })
}

/// What an update does to the event's image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    /// A new file was stored: drop the previous file, point `url` at the new one.
    Replace,
    /// No new file, removal requested: drop the previous file, null `url`.
    Remove,
    /// Leave `url` untouched.
    Keep,
}

/// Resolve the image action for an update.
///
/// A fresh upload always wins over the removal flag.
pub fn resolve_image_action(has_new_upload: bool, remove_requested: bool) -> ImageAction {
    if has_new_upload {
        ImageAction::Replace
    } else if remove_requested {
        ImageAction::Remove
    } else {
        ImageAction::Keep
    }
}
