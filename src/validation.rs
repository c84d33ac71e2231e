//! Field validation for lead submissions.
//!
//! The same rules back the server-side create path and the client form, so a
//! malformed lead is rejected no matter which side it reaches first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::models::LeadInput;

/// A user-editable lead field, ordered as the form presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Feedback,
}

impl LeadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::Phone => "phone",
            LeadField::Feedback => "feedback",
        }
    }

    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "name" => Some(LeadField::Name),
            "email" => Some(LeadField::Email),
            "phone" => Some(LeadField::Phone),
            "feedback" => Some(LeadField::Feedback),
            _ => None,
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field error messages, iterated in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<LeadField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: LeadField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: LeadField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: LeadField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The first failing field in form order.
    pub fn first(&self) -> Option<(LeadField, &str)> {
        self.0.iter().next().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeadField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"))
}

/// Loose `text@text.text` shape check.
///
/// Unanchored on purpose: the browser form has always accepted anything that
/// contains such a run.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Exactly ten ASCII digits, no separators.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// Validates a submission, collecting every failing field.
pub fn validate_lead(input: &LeadInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if input.name.trim().is_empty() {
        errors.insert(LeadField::Name, "Name is required");
    }

    if input.email.trim().is_empty() {
        errors.insert(LeadField::Email, "Email is required");
    } else if !is_valid_email(&input.email) {
        errors.insert(LeadField::Email, "Invalid email address");
    }

    if input.phone.trim().is_empty() {
        errors.insert(LeadField::Phone, "Phone is required");
    } else if !is_valid_phone(&input.phone) {
        errors.insert(LeadField::Phone, "Phone must be 10 digits");
    }

    if input.feedback.trim().is_empty() {
        errors.insert(LeadField::Feedback, "Feedback is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
