use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// ============ Domain Models ============

/// Lifecycle marker on a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the enumerated statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid lead status: {:?}", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

impl FromStr for LeadStatus {
    type Err = InvalidStatus;

    /// Exact, case-sensitive match on the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(LeadStatus::New),
            "Contacted" => Ok(LeadStatus::Contacted),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// A prospective customer's contact submission.
///
/// Serialized with `_id` and camelCase timestamps, the shape the lead list UI reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Store-assigned identifier; never changes after creation.
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A lead ready to be persisted; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub feedback: Option<String>,
    pub status: LeadStatus,
}

impl NewLead {
    /// Builds a `New` lead from submitted form input.
    ///
    /// Text is trimmed; an empty phone or feedback is stored as absent so the
    /// phone uniqueness rule only applies to provided values.
    pub fn from_input(input: &LeadInput) -> Self {
        Self {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: non_empty(&input.phone),
            feedback: non_empty(&input.feedback),
            status: LeadStatus::New,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ============ Request Models ============

/// Create-lead body as submitted by the form.
///
/// Every field is optional on the wire and accepts strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeadInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub feedback: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
}

/// Raw pagination query; coerced by [`crate::pagination::PageRequest`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListLeadsQuery {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 5).
    pub limit: Option<String>,
}

// ============ Response Models ============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLeadResponse {
    pub success: u8,
    pub message: String,
}

/// One window of leads, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadPage {
    pub total_leads: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub leads: Vec<Lead>,
}

/// Response for status updates and deletions, carrying the affected lead.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeadActionResponse {
    pub success: u8,
    pub message: String,
    pub lead: Lead,
}

/// Accepts a JSON string, number, bool or null and yields its text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parsing_is_exact() {
        assert_eq!("New".parse::<LeadStatus>(), Ok(LeadStatus::New));
        assert_eq!("Contacted".parse::<LeadStatus>(), Ok(LeadStatus::Contacted));
        assert!("contacted".parse::<LeadStatus>().is_err());
        assert!("Closed".parse::<LeadStatus>().is_err());
        assert!("".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn test_lead_serializes_with_wire_names() {
        let now = Utc::now();
        let lead = Lead {
            id: Uuid::nil(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: Some("1234567890".to_string()),
            feedback: None,
            status: LeadStatus::Contacted,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(value["_id"], json!(Uuid::nil()));
        assert_eq!(value["status"], json!("Contacted"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("feedback").is_none());

        let back: Lead = serde_json::from_value(value).unwrap();
        assert_eq!(back, lead);
    }

    #[test]
    fn test_lead_input_accepts_numbers_and_missing_fields() {
        let input: LeadInput =
            serde_json::from_value(json!({"name": "A", "phone": 1234567890u64})).unwrap();
        assert_eq!(input.phone, "1234567890");
        assert_eq!(input.email, "");
        assert_eq!(input.feedback, "");
    }

    #[test]
    fn test_new_lead_trims_and_drops_empty_optionals() {
        let lead = NewLead::from_input(&LeadInput {
            name: "  Ana ".to_string(),
            email: " ana@x.com".to_string(),
            phone: "   ".to_string(),
            feedback: String::new(),
        });
        assert_eq!(lead.name, "Ana");
        assert_eq!(lead.email, "ana@x.com");
        assert_eq!(lead.phone, None);
        assert_eq!(lead.feedback, None);
        assert_eq!(lead.status, LeadStatus::New);
    }
}
