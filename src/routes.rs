use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::docs::ApiDoc;
use crate::infrastructure::storage::local::PUBLIC_PREFIX;
use axum::Router;
use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

pub fn configure_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes())
        .nest("/api/auth", crate::modules::auth::router(state.clone()))
        .nest("/api/settings", crate::modules::settings::router(state.clone()))
        .nest("/api/users", crate::modules::users::router(state.clone()))
        .nest("/api/upload", crate::modules::upload::router(state.clone()))
        .nest("/api", crate::modules::anime::router(state.clone()))
        .nest("/api", crate::modules::episode::router(state.clone()))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.storage.root()));

    // Built frontend, with client-side routes falling back to index.html
    let router = match &state.config.public_directory {
        Some(public) => router.fallback_service(
            ServeDir::new(public).fallback(ServeFile::new(public.join("index.html"))),
        ),
        None => router,
    };

    router.layer(cors)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
}
