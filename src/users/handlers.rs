use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{error::ApiError, state::AppState};

use super::{
    dto::{CreatedUserResponse, UserPayload},
    error::{StoreError, UserServiceError},
    repo_types::UserRecord,
    services::{create_user, update_user},
};

const USER_NOT_FOUND: &str = "User not found";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create))
        .route("/users/:id", get(get_user).put(update).delete(delete_user))
}

/// Unique violations become 409; everything else is logged and hidden behind
/// `message`.
fn store_failure(e: StoreError, message: &'static str) -> ApiError {
    if e.is_unique_violation() {
        warn!(code = ?e.code(), "user already exists");
        return ApiError::Conflict("User already exists");
    }
    error!(error = %e, code = ?e.code(), kind = %e.kind(), "{message}");
    ApiError::Internal(message)
}

/// A body sent without a JSON content type reads as an empty payload, so the
/// validator names the first missing field. Unparsable JSON is a 400.
fn payload_or_empty(body: Result<Json<UserPayload>, JsonRejection>) -> Result<UserPayload, ApiError> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(UserPayload::default()),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected request body");
            Err(ApiError::BadRequest("Invalid JSON body".into()))
        }
    }
}

fn service_failure(e: UserServiceError, message: &'static str) -> ApiError {
    match e {
        UserServiceError::Validation(v) => v.into(),
        UserServiceError::Store(s) => store_failure(s, message),
    }
}

#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedUserResponse>), ApiError> {
    let payload = payload_or_empty(body)?;
    let user = create_user(
        state.users.as_ref(),
        payload.name.as_deref(),
        payload.email.as_deref(),
    )
    .await
    .map_err(|e| service_failure(e, "Error creating user"))?;

    let link = format!("/users/{}", user.id);
    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&link) {
        headers.insert(header::LOCATION, location);
    }

    info!(user_id = %user.id, "user created");
    Ok((
        StatusCode::CREATED,
        headers,
        Json(CreatedUserResponse {
            message: "User created successfully",
            user,
            link,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| store_failure(e, "Error fetching users"))?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>, ApiError> {
    state
        .users
        .get_by_id(&id)
        .await
        .map_err(|e| store_failure(e, "Error fetching user"))?
        .map(Json)
        .ok_or(ApiError::NotFound(USER_NOT_FOUND))
}

#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<UserRecord>, ApiError> {
    let payload = payload_or_empty(body)?;
    let updated = update_user(
        state.users.as_ref(),
        &id,
        payload.name.as_deref(),
        payload.email.as_deref(),
    )
    .await
    .map_err(|e| service_failure(e, "Error updating user"))?
    .ok_or(ApiError::NotFound(USER_NOT_FOUND))?;

    info!(user_id = %updated.id, "user updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .users
        .delete_by_id(&id)
        .await
        .map_err(|e| store_failure(e, "Error deleting user"))?
        .ok_or(ApiError::NotFound(USER_NOT_FOUND))?;

    info!(user_id = %deleted, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
