use serde::Deserialize;

/// Default Zoho accounts host, used when `ZOHO_ACCOUNTS_URL` is not set.
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.zoho.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub zoho_client_id: String,
    pub zoho_client_secret: String,
    pub zoho_refresh_token: String,
    pub zoho_accounts_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            zoho_client_id: std::env::var("ZOHO_CLIENT_ID")
                .map_err(|_| anyhow::anyhow!("ZOHO_CLIENT_ID environment variable required"))
                .and_then(|id| {
                    if id.trim().is_empty() {
                        anyhow::bail!("ZOHO_CLIENT_ID cannot be empty");
                    }
                    Ok(id)
                })?,
            zoho_client_secret: std::env::var("ZOHO_CLIENT_SECRET")
                .map_err(|_| anyhow::anyhow!("ZOHO_CLIENT_SECRET environment variable required"))
                .and_then(|secret| {
                    if secret.trim().is_empty() {
                        anyhow::bail!("ZOHO_CLIENT_SECRET cannot be empty");
                    }
                    Ok(secret)
                })?,
            zoho_refresh_token: std::env::var("ZOHO_REFRESH_TOKEN")
                .map_err(|_| anyhow::anyhow!("ZOHO_REFRESH_TOKEN environment variable required"))
                .and_then(|token| {
                    if token.trim().is_empty() {
                        anyhow::bail!("ZOHO_REFRESH_TOKEN cannot be empty");
                    }
                    Ok(token)
                })?,
            zoho_accounts_url: {
                // ZOHO_DOMAIN is the legacy name for the same setting
                let url = std::env::var("ZOHO_ACCOUNTS_URL")
                    .or_else(|_| std::env::var("ZOHO_DOMAIN"))
                    .unwrap_or_else(|_| DEFAULT_ACCOUNTS_URL.to_string());
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("ZOHO_ACCOUNTS_URL must start with http:// or https://");
                }
                url.trim_end_matches('/').to_string()
            },
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Zoho accounts URL: {}", config.zoho_accounts_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
