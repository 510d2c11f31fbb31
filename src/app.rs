use axum::routing::{get, post, put, IntoMakeService};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::database::AppDatabase;
use crate::handlers::*;
use crate::swagger::ApiDoc;

/// Builds the app with all routes, the swagger UI and the global 404 handler
pub fn build_app(db_client: Arc<AppDatabase>) -> IntoMakeService<Router> {
    tracing::debug!("Initializing the app");
    let user_routes = Router::new()
        .route("/", post(create_user_handler))
        .route("/:id", put(update_user_handler).delete(delete_user_handler));
    let app = Router::new()
        .route("/", get(default_route_handler))
        .nest("/api/v1/user", user_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(global_404_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(db_client);
    app.into_make_service()
}
