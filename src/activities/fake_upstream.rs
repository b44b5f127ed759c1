use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

/// Ids with special behavior; anything else gets a one-item feed.
pub const DOWN_ID: &str = "down";
pub const TEXT_ID: &str = "text";

async fn user_activities(Path(id): Path<String>) -> Response {
    match id.as_str() {
        DOWN_ID => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
        TEXT_ID => "swimming, running".into_response(),
        _ => Json(json!([{ "activity": format!("run by {id}") }])).into_response(),
    }
}

/// Serves `/user_activities/:id` on an ephemeral port and returns its base url.
pub async fn spawn() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    let app = Router::new().route("/user_activities/:id", get(user_activities));
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}
