use axum::http::Uri;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Fallback handler for routes not registered in the app
pub async fn global_404_handler(uri: Uri) -> impl IntoResponse {
    let msg = format!("Route `{}` does not exist", uri);
    tracing::debug!(msg);
    let json_val = json!({"success": false, "message": msg});
    (StatusCode::NOT_FOUND, Json(json_val))
}
