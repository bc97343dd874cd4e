use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubtitleType {
    #[default]
    Subbed,
    Dubbed,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Episode {
    pub id: i64,
    pub anime_id: i64,
    pub episode_number: i64,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub download_url: Option<String>,
    pub duration: Option<i64>,
    pub subtitle_type: SubtitleType,
    pub created_by: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}
