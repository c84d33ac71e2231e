use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::handlers::{self, AppState};

/// Builds the full HTTP surface: lead routes, API docs and health check.
pub fn app(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    let lead_routes = Router::new()
        .route("/createLead", post(handlers::create_lead))
        .route("/showLeads", get(handlers::show_leads))
        .route("/:id/updateLead", put(handlers::update_lead))
        .route("/:id/deleteLead", delete(handlers::delete_lead))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(max_body_bytes)));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/lead", lead_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The form is served from a different origin than the API.
        .layer(CorsLayer::permissive())
}
