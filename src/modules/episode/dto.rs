use super::model::SubtitleType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EpisodeRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "Episode number must be a positive number"))]
    pub episode_number: i64,
    #[serde(default)]
    #[validate(custom(function = "crate::common::validation::not_blank", message = "Episode title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub download_url: Option<String>,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration: Option<i64>,
    pub subtitle_type: Option<SubtitleType>,
}

impl EpisodeRequest {
    /// Falls back to the video URL when no separate download is given.
    pub fn effective_download_url(&self) -> Option<&str> {
        self.download_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .or(self.video_url.as_deref())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NextEpisodeNumberResponse {
    pub next_episode_number: i64,
}
