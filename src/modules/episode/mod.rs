use axum::Router;
use axum::routing::{get, post, put};
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
        .route("/anime/{id}/episodes", get(handler::list_episodes))
        .route("/anime/{id}/episodes/next-number", get(handler::next_episode_number))
        .route("/episodes/{id}", get(handler::get_episode));

    let protected_routes = Router::new()
        .route("/anime/{id}/episodes", post(handler::create_episode))
        .route("/episodes/{id}", put(handler::update_episode).delete(handler::delete_episode))
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
