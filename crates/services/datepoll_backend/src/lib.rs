// File: services/datepoll_backend/src/lib.rs
pub mod app_state;
pub mod service_factory;

use axum::{routing::get, Router};
use datepoll_events::routes as event_routes;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Assemble the full application router: the event API under `/api`, plus
/// Swagger UI when built with the `openapi` feature.
pub fn build_router(state: &AppState) -> Router {
    // Nested under `/api`, so this answers `/api` and not `/api/`.
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Datepoll API!" }))
        .merge(event_routes::routes(state.events.clone()));

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use datepoll_events::doc::EventsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Datepoll API",
                version = "0.1.0",
                description = "Scheduling poll service"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(EventsApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
