//! REST API layer: route handlers, DTOs, OpenAPI, and router composition.
//!
//! Ticket routes are mounted at the root (`/tickets`, `/tickets/{id}`, ...)
//! next to `/health`.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the complete application: routes, middleware, state, and the
/// OpenAPI document.
pub fn build_app(state: AppState) -> Router {
    let app = build_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state);

    with_api_docs(app)
}

#[cfg(feature = "swagger-ui")]
fn with_api_docs(app: Router) -> Router {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

#[cfg(not(feature = "swagger-ui"))]
fn with_api_docs(app: Router) -> Router {
    use axum::Json;
    use axum::routing::get;
    use utoipa::OpenApi;

    app.route(
        "/api-docs/openapi.json",
        get(|| async { Json(openapi::ApiDoc::openapi()) }),
    )
}
