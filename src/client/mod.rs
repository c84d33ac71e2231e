//! Client side of the lead workflow.
//!
//! [`LeadClient`] speaks the four lead endpoints; [`LeadForm`] and
//! [`LeadListView`] hold the submission-form and staff list-view state on top
//! of it.

mod form;
mod list_view;

pub use form::{LeadForm, SubmitOutcome};
pub use list_view::LeadListView;

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::models::{CreateLeadResponse, LeadActionResponse, LeadInput, LeadPage, LeadStatus};
use crate::validation::LeadField;

/// Page size the list view requests.
pub const LIST_PAGE_SIZE: i64 = 10;

/// A transient user-facing message (what the browser UI shows as a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Errors raised while talking to the lead service.
#[derive(Debug)]
pub enum ClientError {
    /// The service answered with a non-success status.
    Rejected {
        status: StatusCode,
        message: String,
        field: Option<LeadField>,
    },
    /// The request never produced a usable response.
    Transport(reqwest::Error),
}

impl ClientError {
    /// The field the server blamed, if any.
    pub fn field(&self) -> Option<LeadField> {
        match self {
            ClientError::Rejected { field, .. } => *field,
            ClientError::Transport(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ClientError::Rejected { message, .. } => message.clone(),
            ClientError::Transport(e) => e.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Rejected {
                status, message, ..
            } => write!(f, "Lead service returned {}: {}", status, message),
            ClientError::Transport(e) => write!(f, "Lead service request failed: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::Rejected { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err)
    }
}

/// Failure body; the service uses `message`, older endpoints used `error`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    field: Option<String>,
}

/// HTTP client for the lead endpoints.
#[derive(Clone)]
pub struct LeadClient {
    client: reqwest::Client,
    base_url: String,
}

impl LeadClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_lead(&self, input: &LeadInput) -> Result<CreateLeadResponse, ClientError> {
        let url = format!("{}/lead/createLead", self.base_url);
        tracing::debug!("Submitting lead to {}", url);

        let response = self.client.post(&url).json(input).send().await?;
        Self::parse(response).await
    }

    pub async fn show_leads(&self, page: i64, limit: i64) -> Result<LeadPage, ClientError> {
        let url = format!("{}/lead/showLeads", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: LeadStatus,
    ) -> Result<LeadActionResponse, ClientError> {
        let url = format!("{}/lead/{}/updateLead", self.base_url, id);

        let response = self
            .client
            .put(&url)
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_lead(&self, id: &str) -> Result<LeadActionResponse, ClientError> {
        let url = format!("{}/lead/{}/deleteLead", self.base_url, id);

        let response = self.client.delete(&url).send().await?;
        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body
            .message
            .or(body.error)
            .unwrap_or_else(|| if text.is_empty() { status.to_string() } else { text });

        Err(ClientError::Rejected {
            status,
            message,
            field: body.field.as_deref().and_then(LeadField::parse),
        })
    }
}
