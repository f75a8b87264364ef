use crate::config::Config;
use crate::errors::AppError;
use crate::form_models::ZohoLead;
use serde_json::json;
use std::time::Duration;

/// Client for the Zoho accounts (OAuth) and CRM APIs.
///
/// Holds the process-wide credentials; every request re-authenticates by
/// exchanging the refresh token, no access token is cached between calls.
#[derive(Clone)]
pub struct ZohoClient {
    client: reqwest::Client,
    accounts_base_url: String,
    crm_base_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl ZohoClient {
    /// Creates a new `ZohoClient` from the application configuration.
    ///
    /// Zoho serves CRM traffic from a different host than the accounts
    /// (OAuth) host, so the CRM base URL is derived here once. Regional or
    /// custom accounts hosts that don't match the standard host are reused
    /// unchanged.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create Zoho client: {}", e)))?;

        let crm_base_url = config
            .zoho_accounts_url
            .replace("accounts.zoho.com", "www.zohoapis.com");

        Ok(Self {
            client,
            accounts_base_url: config.zoho_accounts_url.clone(),
            crm_base_url,
            client_id: config.zoho_client_id.clone(),
            client_secret: config.zoho_client_secret.clone(),
            refresh_token: config.zoho_refresh_token.clone(),
        })
    }

    /// Exchanges the long-lived refresh token for a short-lived access token.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - The access token for CRM calls.
    pub async fn refresh_access_token(&self) -> Result<String, AppError> {
        let url = format!("{}/oauth/v2/token", self.accounts_base_url);
        tracing::debug!("Requesting Zoho access token from {}", url);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("refresh_token", self.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::AuthenticationFailed(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::AuthenticationFailed(format!(
                "Token endpoint returned {}: {}",
                status, error_text
            )));
        }

        let token_data: serde_json::Value = response.json().await.map_err(|e| {
            AppError::AuthenticationFailed(format!("Failed to parse token response: {}", e))
        })?;

        // A 200 with an error body (e.g. invalid_code) carries no access_token
        match token_data.get("access_token").and_then(|t| t.as_str()) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(AppError::AuthenticationFailed(format!(
                "Token response missing access_token: {}",
                token_data
            ))),
        }
    }

    /// Creates a lead record in Zoho CRM.
    ///
    /// # Arguments
    ///
    /// * `access_token` - Access token from `refresh_access_token`.
    /// * `lead` - The lead record to create.
    ///
    /// # Returns
    ///
    /// * `Result<Option<String>, AppError>` - The id of the created record,
    ///   when the CRM response carries one.
    pub async fn create_lead(
        &self,
        access_token: &str,
        lead: &ZohoLead,
    ) -> Result<Option<String>, AppError> {
        let url = format!("{}/crm/v2/Leads", self.crm_base_url);
        tracing::info!("Creating lead in Zoho CRM: {}", url);

        let body = json!({ "data": [lead] });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Zoho-oauthtoken {}", access_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LeadCreationFailed(format!("CRM request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::LeadCreationFailed(format!(
                "CRM returned {}: {}",
                status, error_text
            )));
        }

        let response_data: serde_json::Value = response.json().await.map_err(|e| {
            AppError::LeadCreationFailed(format!("Failed to parse CRM response: {}", e))
        })?;

        // The record id lives at data[0].details.id; some tenants return it
        // as a number instead of a string. A missing id is not an error.
        let lead_id = response_data
            .get("data")
            .and_then(|d| d.get(0))
            .and_then(|record| record.get("details"))
            .and_then(|details| details.get("id"))
            .and_then(|id| {
                id.as_str()
                    .map(|s| s.to_string())
                    .or_else(|| id.as_i64().map(|n| n.to_string()))
            });

        if lead_id.is_none() {
            tracing::warn!("CRM response carried no record id: {:?}", response_data);
        }

        Ok(lead_id)
    }
}
