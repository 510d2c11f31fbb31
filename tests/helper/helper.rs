use axum::routing::MethodRouter;
use axum::{body::Body, http::Request, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use birthdaybuzz_backend_rust::database::AppDatabase;

#[derive(Debug, Serialize, Deserialize)]
pub struct GenericResponse {
    pub success: bool,
    pub message: String,
}

/// Builds a single-route app backed by a lazily connecting database client.
/// The validation tests exercising this app never reach the database.
pub async fn get_app(path: &str, method_router: MethodRouter<Arc<AppDatabase>>) -> Router {
    if std::env::var("MONGODB_URI").is_err() {
        std::env::set_var("MONGODB_URI", "mongodb://127.0.0.1:27017");
    }
    let db_client = AppDatabase::new()
        .await
        .expect("Unable to accquire database client");
    let db_client = Arc::new(db_client);
    Router::new()
        .route(path, method_router)
        .with_state(db_client)
}

pub fn build_post_request(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn build_put_request(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method("PUT")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn build_delete_request(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method("DELETE")
        .body(Body::empty())
        .unwrap()
}
