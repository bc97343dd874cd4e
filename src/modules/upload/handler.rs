use super::dto::UploadResponse;
use crate::common::response::{ApiError, ApiSuccess, MessageResponse};
use crate::common::upload::{receive_file, UploadKind};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Extension, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};

async fn handle_upload(
    state: AppState,
    user: AuthUser,
    kind: UploadKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiSuccess<UploadResponse>, ApiError> {
    info!(kind = kind.slug(), user_id = user.id, "Upload request received");

    let mut multipart = multipart.map_err(|e| ApiError::Validation(e.body_text()))?;

    let asset = receive_file(
        &state.storage,
        &mut multipart,
        kind,
        state.config.max_upload_bytes,
    )
    .await
    .map_err(|rejection| {
        warn!(kind = kind.slug(), user_id = user.id, "Upload rejected: {}", rejection);
        ApiError::from(rejection)
    })?;

    Ok(ApiSuccess(
        UploadResponse {
            message: kind.success_message().to_string(),
            filename: asset.filename,
            url: asset.url,
        },
        StatusCode::OK,
    ))
}

/// Upload the site logo (admin only)
#[utoipa::path(
    post,
    path = "/api/upload/site-logo",
    request_body(content = String, description = "Multipart form with a `logo` file field", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload successful", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 413, description = "File too large", body = MessageResponse),
        (status = 415, description = "Not an image or video", body = MessageResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn upload_site_logo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    handle_upload(state, user, UploadKind::SiteLogo, multipart).await
}

/// Upload an anime cover image
#[utoipa::path(
    post,
    path = "/api/upload/anime-cover",
    request_body(content = String, description = "Multipart form with a `cover` file field", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload successful", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 413, description = "File too large", body = MessageResponse),
        (status = 415, description = "Not an image or video", body = MessageResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn upload_anime_cover(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    handle_upload(state, user, UploadKind::AnimeCover, multipart).await
}

/// Upload an episode thumbnail
#[utoipa::path(
    post,
    path = "/api/upload/episode-thumbnail",
    request_body(content = String, description = "Multipart form with a `thumbnail` file field", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload successful", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 413, description = "File too large", body = MessageResponse),
        (status = 415, description = "Not an image or video", body = MessageResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn upload_episode_thumbnail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    handle_upload(state, user, UploadKind::EpisodeThumbnail, multipart).await
}

/// Upload an episode video
/// Streamed to disk; never buffered in memory
#[utoipa::path(
    post,
    path = "/api/upload/episode-video",
    request_body(content = String, description = "Multipart form with a `video` file field", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload successful", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 413, description = "File too large", body = MessageResponse),
        (status = 415, description = "Not an image or video", body = MessageResponse)
    ),
    tag = "Upload",
    security(("bearer_auth" = []))
)]
pub async fn upload_episode_video(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    handle_upload(state, user, UploadKind::EpisodeVideo, multipart).await
}
