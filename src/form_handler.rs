use crate::config::Config;
use crate::errors::AppError;
use crate::form_models::{is_valid_email, FormResponse, FormSubmission, ZohoLead};
use crate::zoho_client::ZohoClient;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the Zoho accounts and CRM APIs.
    pub zoho: ZohoClient,
}

/// Builds the application router.
///
/// The intake route accepts POST submissions, answers OPTIONS preflights
/// with an empty 200, and rejects every other method with a JSON 405.
/// Permissive CORS headers are attached to all responses so the endpoint
/// can be called directly from website frontends.
pub fn router(state: Arc<AppState>) -> Router {
    let intake_routes = Router::new()
        .route(
            "/api/v1/webhooks/forms",
            post(form_webhook)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(
            ServiceBuilder::new()
                // 64KB is plenty for a contact form payload
                .layer(RequestBodyLimitLayer::new(64 * 1024)),
        );

    Router::new()
        .route("/health", get(health))
        .merge(intake_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "zoho-lead-api",
            "version": "0.1.0"
        })),
    )
}

/// Form Submission Webhook Handler
///
/// Receives contact/newsletter form submissions from website frontends and
/// forwards them to Zoho CRM as leads.
///
/// Flow:
/// 1. Validate the submission (email is the only required field).
/// 2. Build the CRM lead payload (name placeholder + lead source mapping).
/// 3. Exchange the refresh token for an access token.
/// 4. Create the lead in Zoho CRM.
/// 5. Return the created record id to the caller.
///
/// Each invocation is independent: two sequential upstream calls, no retry,
/// no state shared between requests.
pub async fn form_webhook(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<FormSubmission>,
) -> Result<(StatusCode, Json<FormResponse>), AppError> {
    tracing::info!(
        "Received form submission: form_type={:?}",
        submission.form_type
    );
    tracing::debug!("Submission payload: {:?}", submission);

    let email = submission.email.as_deref().map(str::trim).unwrap_or("");
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    if !is_valid_email(email) {
        tracing::warn!("Rejected submission with invalid email: {}", email);
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let lead = ZohoLead::from_submission(&submission);

    let access_token = state.zoho.refresh_access_token().await?;

    let start = std::time::Instant::now();
    let lead_id = state.zoho.create_lead(&access_token, &lead).await?;
    let latency_ms = start.elapsed().as_millis() as i32;

    match &lead_id {
        Some(id) => tracing::info!("Lead created in Zoho CRM: {} ({}ms)", id, latency_ms),
        None => tracing::info!(
            "Lead created in Zoho CRM without a record id ({}ms)",
            latency_ms
        ),
    }

    Ok((
        StatusCode::OK,
        Json(FormResponse {
            success: true,
            message: "Form submitted successfully".to_string(),
            lead_id,
        }),
    ))
}

/// Empty 200 for CORS preflight requests that reach the route handler.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// JSON 405 for unsupported methods on the intake route.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
