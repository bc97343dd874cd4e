use super::model::SiteSettings;
use super::repository::SettingsRepository;
use crate::infrastructure::db::pool::DbPool;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Lazily loaded copy of the site settings.
///
/// The first read loads from the store; `invalidate` drops the copy so the
/// next read reloads. Settings updates call `invalidate` after committing.
#[derive(Clone, Default)]
pub struct SettingsCache {
    inner: Arc<RwLock<Option<Arc<SiteSettings>>>>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, pool: &DbPool) -> Result<Arc<SiteSettings>> {
        if let Some(settings) = self.inner.read().await.as_ref() {
            return Ok(settings.clone());
        }

        let mut slot = self.inner.write().await;
        // Another reader may have filled it while we waited for the lock
        if let Some(settings) = slot.as_ref() {
            return Ok(settings.clone());
        }

        debug!("Loading site settings into cache");
        let settings = Arc::new(SettingsRepository::load_all(pool).await?);
        *slot = Some(settings.clone());
        Ok(settings)
    }

    pub async fn invalidate(&self) {
        self.inner.write().await.take();
    }

    pub async fn is_loaded(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
