use eventboard_core::types::DbId;
use serde::{Deserialize, Serialize};

/// An event as returned by the API.
///
/// Extra response fields (such as the `message` on updates) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventItem {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// `{ "error": ... }` body of a failed API call.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}
