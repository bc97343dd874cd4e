use super::dto::EpisodeRequest;
use super::model::Episode;
use super::repository::EpisodeRepository;
use crate::common::response::ApiError;
use crate::modules::anime::repository::AnimeRepository;
use crate::state::AppState;
use tracing::info;

pub struct EpisodeService;

impl EpisodeService {
    pub async fn create(
        state: AppState,
        anime_id: i64,
        req: EpisodeRequest,
        created_by: i64,
    ) -> Result<i64, ApiError> {
        if !AnimeRepository::exists(&state.db, anime_id).await? {
            return Err(ApiError::not_found("Anime"));
        }

        let episode = EpisodeRepository::create(&state.db, anime_id, &req, created_by).await?;
        info!(
            anime_id,
            episode_id = episode.id,
            episode_number = episode.episode_number,
            "Episode created"
        );
        Ok(episode.id)
    }

    pub async fn list_for_anime(state: AppState, anime_id: i64) -> Result<Vec<Episode>, ApiError> {
        if !AnimeRepository::exists(&state.db, anime_id).await? {
            return Err(ApiError::not_found("Anime"));
        }
        Ok(EpisodeRepository::find_by_anime(&state.db, anime_id).await?)
    }

    pub async fn find_by_id(state: AppState, id: i64) -> Result<Episode, ApiError> {
        EpisodeRepository::find_by_id(&state.db, id)
            .await?
            .ok_or_else(|| ApiError::not_found("Episode"))
    }

    pub async fn next_episode_number(state: AppState, anime_id: i64) -> Result<i64, ApiError> {
        if !AnimeRepository::exists(&state.db, anime_id).await? {
            return Err(ApiError::not_found("Anime"));
        }
        let max = EpisodeRepository::max_episode_number(&state.db, anime_id).await?;
        Ok(max.unwrap_or(0) + 1)
    }

    pub async fn update(state: AppState, id: i64, req: EpisodeRequest) -> Result<(), ApiError> {
        if !EpisodeRepository::update(&state.db, id, &req).await? {
            return Err(ApiError::not_found("Episode"));
        }
        info!(episode_id = id, episode_number = req.episode_number, "Episode updated");
        Ok(())
    }

    pub async fn delete(state: AppState, id: i64) -> Result<(), ApiError> {
        if !EpisodeRepository::delete(&state.db, id).await? {
            return Err(ApiError::not_found("Episode"));
        }
        info!(episode_id = id, "Episode deleted");
        Ok(())
    }
}
