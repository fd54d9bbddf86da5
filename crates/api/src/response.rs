//! Response bodies that are not a bare model.
//!
//! Events are returned as-is (`Json<Event>` / `Json<Vec<Event>>`); these
//! types cover the message-bearing responses.

use eventboard_db::models::event::Event;
use serde::Serialize;

/// `{ "message": ... }` acknowledgement, e.g. after a delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// An updated event with an acknowledgement message alongside its fields:
/// `{ "message", "id", "title", "description", "date", "url" }`.
#[derive(Debug, Serialize)]
pub struct UpdatedEventResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub event: Event,
}
