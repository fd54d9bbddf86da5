//! Domain types and rules shared by the Eventboard server and client.

pub mod error;
pub mod events;
pub mod images;
pub mod types;
