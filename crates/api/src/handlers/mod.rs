//! Request handlers.
//!
//! Handlers delegate persistence to the repositories in `eventboard_db`,
//! file handling to the [`FileStore`](crate::file_store::FileStore) in
//! [`AppState`](crate::state::AppState), and map errors via
//! [`AppError`](crate::error::AppError).

pub mod events;
