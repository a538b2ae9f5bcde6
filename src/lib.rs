//! Action Gateway
//!
//! Routes client-named actions to third-party HTTP APIs, attaching
//! credentials the client never sees, and hands multimedia messages off to
//! the platform's messaging app.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod handoff;
pub mod logging;

use crate::gateway::ActionRouter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The action router.
    pub router: Arc<ActionRouter>,
}
