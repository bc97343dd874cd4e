use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::{connect_to_db, run_migrations};
use crate::infrastructure::storage::local::LocalStorage;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use anyhow::{Context, Result};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Connects to the database, applies migrations, prepares the upload
/// directory and seeds the admin account when one is configured.
pub async fn build_state(config: AppConfig) -> Result<AppState> {
    let db = connect_to_db(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db).await.context("Failed to run migrations")?;

    let storage = LocalStorage::new(config.uploads_directory())
        .await
        .context("Failed to prepare upload directory")?;

    if let Some(seed) = &config.admin_seed {
        AuthService::ensure_admin(&db, seed)
            .await
            .context("Failed to seed admin account")?;
    }

    Ok(AppState::new(config, db, storage))
}

pub fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
