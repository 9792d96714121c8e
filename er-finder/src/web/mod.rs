//! Web layer for the emergency room finder.
//!
//! Exposes the ranked hospital list as JSON.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
