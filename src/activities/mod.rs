pub mod client;
#[cfg(test)]
pub mod fake_upstream;
pub mod handlers;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::activities_routes()
}
