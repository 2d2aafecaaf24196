//! Lead form validation and delivery to the CRM endpoint
//!
//! Validation mirrors the CRM form's own rules: a fixed list of required
//! fields (empty or the `-None-` sentinel both count as missing) and a
//! positional email-shape check. Delivery goes through the
//! [`SubmissionTransport`] seam so tests can substitute a mock for the
//! multipart HTTP transport.

use crate::render::{FormField, RenderTarget, SENTINEL_NONE};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Fixed CRM web-to-contact endpoint
pub const CRM_ENDPOINT: &str = "https://crm.zoho.com/crm/WebToContactForm";

/// Fields that must be populated before submission, in validation order
pub const REQUIRED_FIELDS: [FormField; 6] = [
    FormField::FirstName,
    FormField::LastName,
    FormField::Email,
    FormField::Phone,
    FormField::HearAbout,
    FormField::Hackerspaces,
];

const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CRM endpoint returned status {0}")]
    Status(u16),
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("{} is required", .0.wire_name())]
    MissingField(FormField),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SubmissionError {
    /// The field that should receive focus after a validation failure
    pub fn offending_field(&self) -> Option<FormField> {
        match self {
            SubmissionError::MissingField(field) => Some(*field),
            SubmissionError::InvalidEmail => Some(FormField::Email),
            SubmissionError::Transport(_) => None,
        }
    }
}

/// Positional email-shape check: an `@` at index >= 1, a `.` after it with
/// at least one character in between, and at least one character after the
/// final `.` plus the position for one more.
pub fn email_shape_ok(value: &str) -> bool {
    let Some(at) = value.find('@') else {
        return false;
    };
    let Some(dot) = value.rfind('.') else {
        return false;
    };
    at >= 1 && dot >= at + 2 && dot + 2 < value.len()
}

/// First validation violation in the current form state, if any.
///
/// Fields absent from the form markup are skipped, matching the CRM form's
/// own behavior; only present-but-unpopulated fields block submission.
pub fn first_violation<P: RenderTarget + ?Sized>(page: &P) -> Option<SubmissionError> {
    for field in REQUIRED_FIELDS {
        if let Some(value) = page.field_value(field) {
            if value.is_empty() || value == SENTINEL_NONE {
                return Some(SubmissionError::MissingField(field));
            }
        }
    }

    if let Some(email) = page.field_value(FormField::Email) {
        if !email_shape_ok(&email) {
            return Some(SubmissionError::InvalidEmail);
        }
    }

    None
}

/// Delivery seam for the validated form payload.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn deliver(
        &self,
        endpoint: &str,
        entries: &[(String, String)],
    ) -> Result<(), TransportError>;
}

/// Multipart HTTP POST transport, field names matching the CRM form's.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(TRANSPORT_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn deliver(
        &self,
        endpoint: &str,
        entries: &[(String, String)],
    ) -> Result<(), TransportError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in entries {
            form = form.text(name.clone(), value.clone());
        }

        let response = self.client.post(endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(())
    }
}
