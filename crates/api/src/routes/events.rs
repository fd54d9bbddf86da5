//! Route definitions for the `/events` resource.

use axum::routing::any;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// All methods land on one handler, which classifies the request itself.
pub fn router() -> Router<AppState> {
    Router::new().route("/events", any(events::dispatch))
}
