use dotenvy::dotenv;
use shinigami::config::settings::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shinigami=info,tower_http=info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new().map_err(|e| anyhow::anyhow!("JWT_SECRET must be set: {}", e))?;
    let port = config.server_port;
    info!("Uploads directory: {}", config.uploads_directory().display());

    let state = shinigami::app::build_state(config).await?;
    let app = shinigami::app::create_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
