use super::dto::AnimeRequest;
use super::model::Anime;
use super::service::AnimeService;
use crate::common::extract::{IdPath, ValidatedJson};
use crate::common::response::{ApiError, ApiSuccess, CreatedResponse, MessageResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};

/// List all anime, newest first
#[utoipa::path(
    get,
    path = "/api/anime",
    responses(
        (status = 200, description = "List of anime", body = Vec<Anime>)
    ),
    tag = "Anime"
)]
pub async fn list_anime(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let anime = AnimeService::find_all(state).await?;
    Ok(ApiSuccess(anime, StatusCode::OK))
}

/// Get anime by ID
#[utoipa::path(
    get,
    path = "/api/anime/{id}",
    params(
        ("id" = i64, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Anime details", body = Anime),
        (status = 404, description = "Anime not found", body = MessageResponse)
    ),
    tag = "Anime"
)]
pub async fn get_anime(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let anime = AnimeService::find_by_id(state, id).await?;
    Ok(ApiSuccess(anime, StatusCode::OK))
}

/// Create a new anime
#[utoipa::path(
    post,
    path = "/api/anime",
    request_body = AnimeRequest,
    responses(
        (status = 201, description = "Anime created", body = CreatedResponse),
        (status = 400, description = "Bad Request", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse)
    ),
    tag = "Anime",
    security(("bearer_auth" = []))
)]
pub async fn create_anime(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<AnimeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AnimeService::create(state, payload, user.id).await?;
    Ok(ApiSuccess(
        CreatedResponse::new("Anime created successfully", id),
        StatusCode::CREATED,
    ))
}

/// Replace an anime
#[utoipa::path(
    put,
    path = "/api/anime/{id}",
    params(
        ("id" = i64, Path, description = "Anime ID")
    ),
    request_body = AnimeRequest,
    responses(
        (status = 200, description = "Anime updated", body = MessageResponse),
        (status = 400, description = "Bad Request", body = MessageResponse),
        (status = 404, description = "Anime not found", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse)
    ),
    tag = "Anime",
    security(("bearer_auth" = []))
)]
pub async fn update_anime(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
    ValidatedJson(payload): ValidatedJson<AnimeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    AnimeService::update(state, id, payload).await?;
    Ok(ApiSuccess(
        MessageResponse::new("Anime updated successfully"),
        StatusCode::OK,
    ))
}

/// Delete an anime and its episodes
#[utoipa::path(
    delete,
    path = "/api/anime/{id}",
    params(
        ("id" = i64, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Anime deleted", body = MessageResponse),
        (status = 404, description = "Anime not found", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse)
    ),
    tag = "Anime",
    security(("bearer_auth" = []))
)]
pub async fn delete_anime(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    AnimeService::delete(state, id).await?;
    Ok(ApiSuccess(
        MessageResponse::new("Anime deleted successfully"),
        StatusCode::OK,
    ))
}
