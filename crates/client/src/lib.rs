//! Terminal client for the Eventboard API.
//!
//! A single-screen form + list UI: the list mirrors `GET /api/v1/events`,
//! the form is a [`draft::DraftState`] driven by a pure reducer, and the
//! [`session::Session`] wires typed commands to both.

pub mod api;
pub mod command;
pub mod config;
pub mod draft;
pub mod model;
pub mod session;
pub mod view;
