//! The `events` table.

use chrono::NaiveDate;
use eventboard_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `events` table.
///
/// Serializes to the public Event JSON shape
/// `{id, title, description, date, url}` with `date` as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// Relative path of the stored image, e.g. `event-image/img_….png`.
    pub url: Option<String>,
}

/// Input for inserting an event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub url: Option<String>,
}

/// Input for overwriting an event. Every column is replaced wholesale.
#[derive(Debug, Clone)]
pub struct UpdateEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub url: Option<String>,
}
