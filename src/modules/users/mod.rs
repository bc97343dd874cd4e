use axum::Router;
use axum::routing::{get, put};
use crate::middleware::role::Capability;
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    Router::new()
        .route("/", get(handler::list_users))
        .route("/{id}", put(handler::update_user_role))
        .route_layer(middleware::from_fn_with_state(
            Capability::ManageUsers,
            crate::middleware::role::require_capability,
        ))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
