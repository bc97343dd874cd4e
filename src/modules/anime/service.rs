use super::dto::AnimeRequest;
use super::model::Anime;
use super::repository::AnimeRepository;
use crate::common::response::ApiError;
use crate::state::AppState;
use tracing::info;

pub struct AnimeService;

impl AnimeService {
    pub async fn create(state: AppState, req: AnimeRequest, created_by: i64) -> Result<i64, ApiError> {
        let anime = AnimeRepository::create(&state.db, &req, created_by).await?;
        info!(anime_id = anime.id, title = %anime.title, "Anime created");
        Ok(anime.id)
    }

    pub async fn find_all(state: AppState) -> Result<Vec<Anime>, ApiError> {
        Ok(AnimeRepository::find_all(&state.db).await?)
    }

    pub async fn find_by_id(state: AppState, id: i64) -> Result<Anime, ApiError> {
        AnimeRepository::find_by_id(&state.db, id)
            .await?
            .ok_or_else(|| ApiError::not_found("Anime"))
    }

    pub async fn update(state: AppState, id: i64, req: AnimeRequest) -> Result<(), ApiError> {
        if !AnimeRepository::update(&state.db, id, &req).await? {
            return Err(ApiError::not_found("Anime"));
        }
        info!(anime_id = id, "Anime updated");
        Ok(())
    }

    pub async fn delete(state: AppState, id: i64) -> Result<(), ApiError> {
        if !AnimeRepository::delete(&state.db, id).await? {
            return Err(ApiError::not_found("Anime"));
        }
        info!(anime_id = id, "Anime deleted");
        Ok(())
    }
}
