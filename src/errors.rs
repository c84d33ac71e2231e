use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;

use crate::validation::LeadField;

/// The unique field a write collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Phone,
}

impl DuplicateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateField::Email => "email",
            DuplicateField::Phone => "phone",
        }
    }
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DuplicateField> for LeadField {
    fn from(field: DuplicateField) -> Self {
        match field {
            DuplicateField::Email => LeadField::Email,
            DuplicateField::Phone => LeadField::Phone,
        }
    }
}

/// Failures reported by a [`crate::store::LeadStore`].
#[derive(Debug)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    Duplicate(DuplicateField),
    /// Database-related errors.
    Database(sqlx::Error),
    /// A stored row could not be mapped back to a lead.
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Duplicate(field) => write!(f, "{} already exists", field),
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::Corrupt(msg) => write!(f, "Corrupt lead record: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Outcome of a failed lead operation, one variant per failure class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadError {
    /// Bad or missing input caught before persistence.
    Validation {
        message: String,
        field: Option<LeadField>,
    },
    /// A unique field already belongs to another lead.
    Conflict(DuplicateField),
    /// The id does not resolve to a lead.
    NotFound,
    /// Unexpected store or server failure.
    Internal(String),
}

impl LeadError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeadError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn invalid_field(field: LeadField, message: impl Into<String>) -> Self {
        LeadError::Validation {
            message: message.into(),
            field: Some(field),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            LeadError::Validation { .. } | LeadError::Conflict(_) => StatusCode::BAD_REQUEST,
            LeadError::NotFound => StatusCode::NOT_FOUND,
            LeadError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to clients; `message` is always present.
    pub fn body(&self) -> Value {
        match self {
            LeadError::Validation {
                message,
                field: Some(field),
            } => json!({ "success": 0, "message": message, "field": field.as_str() }),
            LeadError::Validation {
                message,
                field: None,
            } => json!({ "success": 0, "message": message }),
            LeadError::Conflict(field) => json!({
                "success": 0,
                "message": format!("{} already exists", field),
                "field": field.as_str(),
            }),
            LeadError::NotFound => json!({
                "success": 0,
                "message": "Lead not found",
                "error": "Lead not found",
            }),
            LeadError::Internal(message) => json!({
                "success": 0,
                "message": message,
                "error": message,
            }),
        }
    }
}

impl fmt::Display for LeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadError::Validation { message, .. } => write!(f, "Validation error: {}", message),
            LeadError::Conflict(field) => write!(f, "Conflict: {} already exists", field),
            LeadError::NotFound => write!(f, "Not found: lead"),
            LeadError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for LeadError {}

impl From<StoreError> for LeadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => LeadError::Conflict(field),
            other => {
                tracing::error!("Store error: {}", other);
                LeadError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for LeadError {
    fn into_response(self) -> Response {
        match &self {
            LeadError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            LeadError::Conflict(field) => tracing::warn!("Duplicate lead {}", field),
            LeadError::Validation { message, .. } => tracing::debug!("Rejected input: {}", message),
            LeadError::NotFound => tracing::debug!("Lead not found"),
        }

        (self.status_code(), Json(self.body())).into_response()
    }
}
