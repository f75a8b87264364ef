use regex::Regex;
use serde::{Deserialize, Serialize};

/// Form submission received from a website contact or newsletter form.
///
/// Every field is optional at the wire level; the handler enforces which
/// ones are actually required. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    /// Which form the submission came from (e.g. "newsletter").
    #[serde(default)]
    pub form_type: Option<String>,
}

impl FormSubmission {
    /// Maps the submitted form type to the CRM lead source label.
    ///
    /// Only the exact value "newsletter" selects the newsletter channel;
    /// everything else (including an absent form type) is a contact form.
    pub fn lead_source(&self) -> &'static str {
        match self.form_type.as_deref() {
            Some("newsletter") => "Newsletter",
            _ => "Website Contact Form",
        }
    }
}

/// Lead record in the shape the Zoho CRM v2 API expects.
///
/// Field names follow Zoho's module field API names.
#[derive(Debug, Clone, Serialize)]
pub struct ZohoLead {
    #[serde(rename = "Last_Name")]
    pub last_name: String,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "Phone")]
    pub phone: String,

    #[serde(rename = "Company")]
    pub company: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Lead_Source")]
    pub lead_source: String,
}

impl ZohoLead {
    /// Builds the CRM payload from a validated submission.
    ///
    /// Zoho requires Last_Name, so anonymous submissions fall back to a
    /// fixed placeholder. The remaining optional fields default to empty.
    pub fn from_submission(submission: &FormSubmission) -> Self {
        let name = submission.name.as_deref().unwrap_or("").trim();

        Self {
            last_name: if name.is_empty() {
                "Website Lead".to_string()
            } else {
                name.to_string()
            },
            email: submission.email.clone().unwrap_or_default(),
            phone: submission.phone.clone().unwrap_or_default(),
            company: submission.company.clone().unwrap_or_default(),
            description: submission.message.clone().unwrap_or_default(),
            lead_source: submission.lead_source().to_string(),
        }
    }
}

/// Response sent back to the form frontend.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "leadId", skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
}

/// Validate an email address before it is forwarded to the CRM.
pub fn is_valid_email(email: &str) -> bool {
    // Basic checks
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // RFC 5322 simplified email regex
    // Matches: local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    email_regex.is_match(email)
}
