//! `GET /health`: database reachability, stored event count and whether the
//! image storage root is usable. Always answers 200; problems show up as
//! `"status": "degraded"`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use eventboard_db::repositories::EventRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    database: DatabaseHealth,
    storage: StorageHealth,
}

#[derive(Debug, Serialize)]
struct DatabaseHealth {
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<i64>,
}

#[derive(Debug, Serialize)]
struct StorageHealth {
    available: bool,
}

async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let events = match EventRepo::count(&state.pool).await {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };

    let available = tokio::fs::metadata(&state.config.storage_root)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !available {
        tracing::warn!(
            storage_root = %state.config.storage_root.display(),
            "Image storage root is missing"
        );
    }

    let healthy = events.is_some() && available;
    Json(HealthReport {
        status: if healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            reachable: events.is_some(),
            events,
        },
        storage: StorageHealth { available },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
