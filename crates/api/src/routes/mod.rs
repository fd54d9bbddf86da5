pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /events                 every verb, see handlers::events::dispatch
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(events::router())
}
