use super::model::{SettingKey, SiteSettings};
use crate::infrastructure::db::pool::DbPool;
use anyhow::Result;
use time::OffsetDateTime;

pub struct SettingsRepository;

impl SettingsRepository {
    pub async fn load_all(pool: &DbPool) -> Result<SiteSettings> {
        let rows: Vec<(String, Option<String>)> =
            sqlx::query_as("SELECT key, value FROM site_settings ORDER BY key")
                .fetch_all(pool)
                .await?;

        Ok(rows.into_iter().collect())
    }

    /// Writes every update in one transaction, inserting rows that were never seeded.
    pub async fn update_many(
        pool: &DbPool,
        updates: &[(SettingKey, Option<String>)],
        updated_by: i64,
    ) -> Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut tx = pool.begin().await?;

        for (key, value) in updates {
            sqlx::query(
                r#"
                INSERT INTO site_settings (key, value, updated_by, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT (key) DO UPDATE
                SET value = excluded.value,
                    updated_by = excluded.updated_by,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key.as_str())
            .bind(value)
            .bind(updated_by)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
