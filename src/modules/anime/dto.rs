use super::model::AnimeStatus;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Body for both create and full-replacement update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnimeRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::common::validation::not_blank", message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub studio: Option<String>,
    pub tags: Option<String>,
    #[validate(range(min = 1900, max = 2100, message = "Release year must be between 1900 and 2100"))]
    pub release_year: Option<i32>,
    pub status: Option<AnimeStatus>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
}
