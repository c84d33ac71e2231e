use super::{ClientError, LeadClient, Notice};
use crate::models::LeadInput;
use crate::validation::{validate_lead, FieldErrors, LeadField};

/// What happened to a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Blocked,
    /// The lead was stored and the draft cleared.
    Submitted(Notice),
    /// The service refused the lead or could not be reached.
    Failed(Notice),
}

/// Draft state of the public lead form.
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    draft: LeadInput,
    errors: FieldErrors,
}

impl LeadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &LeadInput {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: LeadField) -> Option<&str> {
        self.errors.get(field)
    }

    /// Updates one field and clears its error message.
    pub fn set_field(&mut self, field: LeadField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LeadField::Name => self.draft.name = value,
            LeadField::Email => self.draft.email = value,
            LeadField::Phone => self.draft.phone = value,
            LeadField::Feedback => self.draft.feedback = value,
        }
        self.errors.remove(field);
    }

    /// Runs local validation, replacing the error map. Returns true when clean.
    pub fn validate(&mut self) -> bool {
        match validate_lead(&self.draft) {
            Ok(()) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.draft = LeadInput::default();
        self.errors.clear();
    }

    /// Validates and, if clean, submits the draft.
    ///
    /// A server-side field failure (duplicate or invalid) is written into that
    /// field's error slot so it shows the same way as a local one.
    pub async fn submit(&mut self, client: &LeadClient) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Blocked;
        }

        match client.create_lead(&self.draft).await {
            Ok(response) if response.success == 1 => {
                self.reset();
                SubmitOutcome::Submitted(Notice::Success(response.message))
            }
            Ok(response) => SubmitOutcome::Failed(Notice::Error(response.message)),
            Err(err) => {
                tracing::warn!("Lead submission failed: {}", err);
                if let ClientError::Rejected {
                    field: Some(field),
                    message,
                    ..
                } = &err
                {
                    self.errors.insert(*field, message.clone());
                }
                SubmitOutcome::Failed(Notice::Error(err.message()))
            }
        }
    }
}
