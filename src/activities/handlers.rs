use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, instrument};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub activities: Value,
}

pub fn activities_routes() -> Router<AppState> {
    Router::new().route("/users/:id/activities", get(get_user_activities))
}

/// Relays the upstream feed; any upstream failure is a plain 500.
#[instrument(skip(state))]
pub async fn get_user_activities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActivitiesResponse>, ApiError> {
    let activities = state.activities.fetch(&id).await.map_err(|e| {
        error!(error = %e, user_id = %id, "fetch activities failed");
        ApiError::Internal("Error fetching user activities")
    })?;
    Ok(Json(ActivitiesResponse { activities }))
}
