//! Web layer for the metro network server.
//!
//! Exposes the network queries as JSON endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, NetworkHandle, ReloadError};
