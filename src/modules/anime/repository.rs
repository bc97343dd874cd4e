use super::dto::AnimeRequest;
use super::model::Anime;
use crate::infrastructure::db::pool::DbPool;
use anyhow::Result;
use time::OffsetDateTime;

const ANIME_COLUMNS: &str = "id, title, description, genre, studio, tags, release_year, status, \
                             logo_url, cover_image_url, created_by, created_at, updated_at";

pub struct AnimeRepository;

impl AnimeRepository {
    pub async fn create(pool: &DbPool, req: &AnimeRequest, created_by: i64) -> Result<Anime> {
        let now = OffsetDateTime::now_utc();
        let anime = sqlx::query_as::<_, Anime>(&format!(
            r#"
            INSERT INTO anime (title, description, genre, studio, tags, release_year, status,
                               logo_url, cover_image_url, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {ANIME_COLUMNS}
            "#
        ))
        .bind(req.title.trim())
        .bind(&req.description)
        .bind(&req.genre)
        .bind(&req.studio)
        .bind(&req.tags)
        .bind(req.release_year)
        .bind(req.status.unwrap_or_default())
        .bind(&req.logo_url)
        .bind(&req.cover_image_url)
        .bind(created_by)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(anime)
    }

    pub async fn find_all(pool: &DbPool) -> Result<Vec<Anime>> {
        let anime = sqlx::query_as::<_, Anime>(&format!(
            "SELECT {ANIME_COLUMNS} FROM anime ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(anime)
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Anime>> {
        let anime = sqlx::query_as::<_, Anime>(&format!(
            "SELECT {ANIME_COLUMNS} FROM anime WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(anime)
    }

    pub async fn exists(pool: &DbPool, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM anime WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(found.is_some())
    }

    /// Full replacement. Returns `false` when the row does not exist.
    pub async fn update(pool: &DbPool, id: i64, req: &AnimeRequest) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE anime
            SET title = ?, description = ?, genre = ?, studio = ?, tags = ?,
                release_year = ?, status = ?, logo_url = ?, cover_image_url = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(req.title.trim())
        .bind(&req.description)
        .bind(&req.genre)
        .bind(&req.studio)
        .bind(&req.tags)
        .bind(req.release_year)
        .bind(req.status.unwrap_or_default())
        .bind(&req.logo_url)
        .bind(&req.cover_image_url)
        .bind(OffsetDateTime::now_utc())
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Episodes go with it through `ON DELETE CASCADE`.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM anime WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
