use super::dto::{EpisodeRequest, NextEpisodeNumberResponse};
use super::model::Episode;
use super::service::EpisodeService;
use crate::common::extract::{IdPath, ValidatedJson};
use crate::common::response::{ApiError, ApiSuccess, CreatedResponse, MessageResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};

/// List episodes of an anime by episode number
#[utoipa::path(
    get,
    path = "/api/anime/{id}/episodes",
    params(
        ("id" = i64, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Episodes in order", body = Vec<Episode>),
        (status = 404, description = "Anime not found", body = MessageResponse)
    ),
    tag = "Episodes"
)]
pub async fn list_episodes(
    State(state): State<AppState>,
    IdPath(anime_id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let episodes = EpisodeService::list_for_anime(state, anime_id).await?;
    Ok(ApiSuccess(episodes, StatusCode::OK))
}

/// Suggested number for the next episode of an anime
#[utoipa::path(
    get,
    path = "/api/anime/{id}/episodes/next-number",
    params(
        ("id" = i64, Path, description = "Anime ID")
    ),
    responses(
        (status = 200, description = "Next episode number", body = NextEpisodeNumberResponse),
        (status = 404, description = "Anime not found", body = MessageResponse)
    ),
    tag = "Episodes"
)]
pub async fn next_episode_number(
    State(state): State<AppState>,
    IdPath(anime_id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let next_episode_number = EpisodeService::next_episode_number(state, anime_id).await?;
    Ok(ApiSuccess(
        NextEpisodeNumberResponse { next_episode_number },
        StatusCode::OK,
    ))
}

/// Get episode by ID
#[utoipa::path(
    get,
    path = "/api/episodes/{id}",
    params(
        ("id" = i64, Path, description = "Episode ID")
    ),
    responses(
        (status = 200, description = "Episode details", body = Episode),
        (status = 404, description = "Episode not found", body = MessageResponse)
    ),
    tag = "Episodes"
)]
pub async fn get_episode(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let episode = EpisodeService::find_by_id(state, id).await?;
    Ok(ApiSuccess(episode, StatusCode::OK))
}

/// Add an episode to an anime
#[utoipa::path(
    post,
    path = "/api/anime/{id}/episodes",
    params(
        ("id" = i64, Path, description = "Anime ID")
    ),
    request_body = EpisodeRequest,
    responses(
        (status = 201, description = "Episode created", body = CreatedResponse),
        (status = 400, description = "Bad Request", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 404, description = "Anime not found", body = MessageResponse)
    ),
    tag = "Episodes",
    security(("bearer_auth" = []))
)]
pub async fn create_episode(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    IdPath(anime_id): IdPath<i64>,
    ValidatedJson(payload): ValidatedJson<EpisodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = EpisodeService::create(state, anime_id, payload, user.id).await?;
    Ok(ApiSuccess(
        CreatedResponse::new("Episode created successfully", id),
        StatusCode::CREATED,
    ))
}

/// Replace an episode
#[utoipa::path(
    put,
    path = "/api/episodes/{id}",
    params(
        ("id" = i64, Path, description = "Episode ID")
    ),
    request_body = EpisodeRequest,
    responses(
        (status = 200, description = "Episode updated", body = MessageResponse),
        (status = 400, description = "Bad Request", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 404, description = "Episode not found", body = MessageResponse)
    ),
    tag = "Episodes",
    security(("bearer_auth" = []))
)]
pub async fn update_episode(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
    ValidatedJson(payload): ValidatedJson<EpisodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    EpisodeService::update(state, id, payload).await?;
    Ok(ApiSuccess(
        MessageResponse::new("Episode updated successfully"),
        StatusCode::OK,
    ))
}

/// Delete an episode
#[utoipa::path(
    delete,
    path = "/api/episodes/{id}",
    params(
        ("id" = i64, Path, description = "Episode ID")
    ),
    responses(
        (status = 200, description = "Episode deleted", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 404, description = "Episode not found", body = MessageResponse)
    ),
    tag = "Episodes",
    security(("bearer_auth" = []))
)]
pub async fn delete_episode(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    EpisodeService::delete(state, id).await?;
    Ok(ApiSuccess(
        MessageResponse::new("Episode deleted successfully"),
        StatusCode::OK,
    ))
}
