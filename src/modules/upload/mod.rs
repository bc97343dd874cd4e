use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use crate::middleware::body::UploadBodyLimit;
use crate::middleware::role::Capability;
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let limit = UploadBodyLimit::new(state.config.max_upload_bytes);

    let site_routes = Router::new()
        .route("/site-logo", post(handler::upload_site_logo))
        .route_layer(middleware::from_fn_with_state(
            Capability::ManageSite,
            crate::middleware::role::require_capability,
        ));

    let media_routes = Router::new()
        .route("/anime-cover", post(handler::upload_anime_cover))
        .route("/episode-thumbnail", post(handler::upload_episode_thumbnail))
        .route("/episode-video", post(handler::upload_episode_video))
        .route_layer(middleware::from_fn_with_state(
            Capability::UploadMedia,
            crate::middleware::role::require_capability,
        ));

    // The file size check happens while streaming; axum's 2 MB default would
    // cut videos off long before that. The body guard sits outside auth so
    // that 401/403 rejections also drain the body.
    site_routes
        .merge(media_routes)
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            limit,
            crate::middleware::body::guard_upload_body,
        ))
        .layer(DefaultBodyLimit::disable())
}
