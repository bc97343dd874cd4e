use axum::Router;
use axum::routing::get;
use crate::middleware::role::Capability;
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let public_routes = Router::new()
        .route("/anime", get(handler::list_anime))
        .route("/anime/{id}", get(handler::get_anime));

    let protected_routes = Router::new()
        .route("/anime", axum::routing::post(handler::create_anime))
        .route("/anime/{id}", axum::routing::put(handler::update_anime).delete(handler::delete_anime))
        .route_layer(middleware::from_fn_with_state(
            Capability::ManageCatalog,
            crate::middleware::role::require_capability,
        ))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ));

    public_routes.merge(protected_routes)
}
