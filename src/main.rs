use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoho_lead_api::config::Config;
use zoho_lead_api::form_handler::{router, AppState};
use zoho_lead_api::zoho_client::ZohoClient;

/// Main entry point for the application.
///
/// Initializes tracing, loads and validates the configuration (failing fast
/// on missing credentials), constructs the Zoho client, and starts the Axum
/// server with the intake routes.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zoho_lead_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize Zoho client
    let zoho = ZohoClient::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize Zoho client: {}", e))?;
    tracing::info!("Zoho client initialized: {}", config.zoho_accounts_url);

    // Build application state
    let app_state = Arc::new(AppState {
        config: config.clone(),
        zoho,
    });

    let app = router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
