use axum::Router;
use axum::routing::{get, post};
use crate::middleware::role::Capability;
use crate::state::AppState;
use axum::middleware;

pub mod cache;
pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let public_routes = Router::new()
        .route("/", get(handler::get_settings));

    let protected_routes = Router::new()
        .route("/", post(handler::update_settings))
        .route_layer(middleware::from_fn_with_state(
            Capability::ManageSite,
            crate::middleware::role::require_capability,
        ))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ));

    public_routes.merge(protected_routes)
}
