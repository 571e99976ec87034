// File: services/salonbook_backend/src/main.rs
use axum::{routing::get, Router};
use salonbook_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    salonbook_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let root_router = Router::new().route("/", get(|| async { "Welcome to the Salonbook API!" }));

    let booking_router =
        salonbook_booking::routes(config.clone()).expect("Failed to build booking routes");

    #[allow(unused_mut)] // mutated when the openapi feature is enabled
    let mut app = Router::new()
        .nest("/api", root_router.merge(booking_router))
        .layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use salonbook_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Salonbook API",
                version = "0.1.0",
                description = "Appointment scheduling service API docs"
            ),
            components(),
            tags( (name = "Salonbook", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
