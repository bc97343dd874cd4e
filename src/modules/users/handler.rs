use super::dto::{UpdateRoleRequest, UserSummary};
use super::service::UserService;
use crate::common::extract::IdPath;
use crate::common::response::{ApiError, ApiSuccess, MessageResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users, newest first", body = Vec<UserSummary>),
        (status = 403, description = "Forbidden", body = MessageResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = UserService::list(state).await?;
    Ok(ApiSuccess(users, StatusCode::OK))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = MessageResponse),
        (status = 400, description = "Invalid role", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthUser>,
    IdPath(id): IdPath<i64>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    UserService::update_role(state, id, payload, admin.id).await?;
    Ok(ApiSuccess(
        MessageResponse::new("User role updated successfully"),
        StatusCode::OK,
    ))
}
