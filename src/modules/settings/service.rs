use super::dto::UpdateSettingsRequest;
use super::model::SiteSettings;
use super::repository::SettingsRepository;
use crate::common::response::ApiError;
use crate::state::AppState;
use tracing::info;

pub struct SettingsService;

impl SettingsService {
    pub async fn get(state: AppState) -> Result<SiteSettings, ApiError> {
        let settings = state.settings.get(&state.db).await?;
        Ok(settings.as_ref().clone())
    }

    pub async fn update(
        state: AppState,
        req: UpdateSettingsRequest,
        updated_by: i64,
    ) -> Result<(), ApiError> {
        let updates = req.into_updates()?;

        SettingsRepository::update_many(&state.db, &updates, updated_by).await?;
        state.settings.invalidate().await;

        let keys: Vec<&str> = updates.iter().map(|(k, _)| k.as_str()).collect();
        info!(updated_by, ?keys, "Site settings updated");
        Ok(())
    }
}
