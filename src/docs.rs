use utoipa::OpenApi;
use crate::common::response::{CreatedResponse, MessageResponse};
use crate::modules::auth::dto::*;
use crate::modules::auth::model::UserRole;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::handler::register,
        crate::modules::auth::handler::login,
        crate::modules::auth::handler::get_me,
        crate::modules::anime::handler::list_anime,
        crate::modules::anime::handler::get_anime,
        crate::modules::anime::handler::create_anime,
        crate::modules::anime::handler::update_anime,
        crate::modules::anime::handler::delete_anime,
        crate::modules::episode::handler::list_episodes,
        crate::modules::episode::handler::next_episode_number,
        crate::modules::episode::handler::get_episode,
        crate::modules::episode::handler::create_episode,
        crate::modules::episode::handler::update_episode,
        crate::modules::episode::handler::delete_episode,
        crate::modules::settings::handler::get_settings,
        crate::modules::settings::handler::update_settings,
        crate::modules::users::handler::list_users,
        crate::modules::users::handler::update_user_role,
        crate::modules::upload::handler::upload_site_logo,
        crate::modules::upload::handler::upload_anime_cover,
        crate::modules::upload::handler::upload_episode_thumbnail,
        crate::modules::upload::handler::upload_episode_video,
    ),
    components(
        schemas(
            RegisterRequest, LoginRequest, AuthResponse, UserResponse, UserRole,
            MessageResponse, CreatedResponse,
            crate::modules::anime::model::Anime,
            crate::modules::anime::model::AnimeStatus,
            crate::modules::anime::dto::AnimeRequest,
            crate::modules::episode::model::Episode,
            crate::modules::episode::model::SubtitleType,
            crate::modules::episode::dto::EpisodeRequest,
            crate::modules::episode::dto::NextEpisodeNumberResponse,
            crate::modules::settings::dto::UpdateSettingsRequest,
            crate::modules::settings::model::SettingKey,
            crate::modules::users::dto::UserSummary,
            crate::modules::users::dto::UpdateRoleRequest,
            crate::modules::upload::dto::UploadResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Anime", description = "Anime catalog"),
        (name = "Episodes", description = "Episodes of an anime"),
        (name = "Settings", description = "Site branding"),
        (name = "Users", description = "Role management"),
        (name = "Upload", description = "Image and video uploads")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
