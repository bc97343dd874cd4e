use super::dto::EpisodeRequest;
use super::model::Episode;
use crate::infrastructure::db::pool::DbPool;
use anyhow::Result;
use time::OffsetDateTime;

const EPISODE_COLUMNS: &str = "id, anime_id, episode_number, title, description, video_url, \
                               download_url, duration, subtitle_type, created_by, created_at, updated_at";

pub struct EpisodeRepository;

impl EpisodeRepository {
    pub async fn create(
        pool: &DbPool,
        anime_id: i64,
        req: &EpisodeRequest,
        created_by: i64,
    ) -> Result<Episode> {
        let now = OffsetDateTime::now_utc();
        let episode = sqlx::query_as::<_, Episode>(&format!(
            r#"
            INSERT INTO episodes (anime_id, episode_number, title, description, video_url,
                                  download_url, duration, subtitle_type, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {EPISODE_COLUMNS}
            "#
        ))
        .bind(anime_id)
        .bind(req.episode_number)
        .bind(req.title.trim())
        .bind(&req.description)
        .bind(&req.video_url)
        .bind(req.effective_download_url())
        .bind(req.duration)
        .bind(req.subtitle_type.unwrap_or_default())
        .bind(created_by)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(episode)
    }

    pub async fn find_by_anime(pool: &DbPool, anime_id: i64) -> Result<Vec<Episode>> {
        let episodes = sqlx::query_as::<_, Episode>(&format!(
            "SELECT {EPISODE_COLUMNS} FROM episodes WHERE anime_id = ? ORDER BY episode_number ASC, id ASC"
        ))
        .bind(anime_id)
        .fetch_all(pool)
        .await?;

        Ok(episodes)
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Episode>> {
        let episode = sqlx::query_as::<_, Episode>(&format!(
            "SELECT {EPISODE_COLUMNS} FROM episodes WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(episode)
    }

    pub async fn max_episode_number(pool: &DbPool, anime_id: i64) -> Result<Option<i64>> {
        let max: Option<i64> =
            sqlx::query_scalar("SELECT MAX(episode_number) FROM episodes WHERE anime_id = ?")
                .bind(anime_id)
                .fetch_one(pool)
                .await?;

        Ok(max)
    }

    /// Full replacement. Sibling episodes may already use the same number.
    pub async fn update(pool: &DbPool, id: i64, req: &EpisodeRequest) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE episodes
            SET episode_number = ?, title = ?, description = ?, video_url = ?,
                download_url = ?, duration = ?, subtitle_type = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(req.episode_number)
        .bind(req.title.trim())
        .bind(&req.description)
        .bind(&req.video_url)
        .bind(req.effective_download_url())
        .bind(req.duration)
        .bind(req.subtitle_type.unwrap_or_default())
        .bind(OffsetDateTime::now_utc())
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM episodes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
