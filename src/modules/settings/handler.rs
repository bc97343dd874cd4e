use super::dto::UpdateSettingsRequest;
use super::service::SettingsService;
use crate::common::response::{ApiError, ApiSuccess, MessageResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Site settings as a flat key/value map
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Site settings", body = std::collections::BTreeMap<String, String>)
    ),
    tag = "Settings"
)]
pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let settings = SettingsService::get(state).await?;
    Ok(ApiSuccess(settings, StatusCode::OK))
}

/// Update some or all site settings
#[utoipa::path(
    post,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Site settings updated", body = MessageResponse),
        (status = 400, description = "Bad Request", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    SettingsService::update(state, payload, user.id).await?;
    Ok(ApiSuccess(
        MessageResponse::new("Site settings updated successfully"),
        StatusCode::OK,
    ))
}
