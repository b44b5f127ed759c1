mod dto;
pub mod error;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod model;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
