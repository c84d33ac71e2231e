use std::sync::Arc;
use uuid::Uuid;

use crate::errors::LeadError;
use crate::models::{Lead, LeadInput, LeadPage, LeadStatus, NewLead};
use crate::pagination::{total_pages, PageRequest};
use crate::store::LeadStore;
use crate::validation::validate_lead;

/// Lead operations over an injected [`LeadStore`].
#[derive(Clone)]
pub struct LeadService {
    store: Arc<dyn LeadStore>,
    enforce_validation: bool,
}

impl LeadService {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self {
            store,
            enforce_validation: false,
        }
    }

    /// Runs the form validator on create before the store is touched.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.enforce_validation = enabled;
        self
    }

    /// Persists a new lead with status `New`.
    ///
    /// Field formats are the form's concern; phone and feedback may be absent.
    /// With validation enabled the first invalid field (form order) is reported.
    /// Duplicates come back as [`LeadError::Conflict`] naming `email` or `phone`.
    pub async fn create(&self, input: &LeadInput) -> Result<Lead, LeadError> {
        if self.enforce_validation {
            if let Err(errors) = validate_lead(input) {
                if let Some((field, message)) = errors.first() {
                    tracing::info!("Rejected lead submission: {} ({})", message, field);
                    return Err(LeadError::invalid_field(field, message));
                }
            }
        }

        let lead = self.store.insert(NewLead::from_input(input)).await?;
        tracing::info!("Lead {} created", lead.id);

        Ok(lead)
    }

    /// Returns one window of leads, newest first.
    ///
    /// Pages past the end yield an empty list with correct totals.
    pub async fn list(&self, request: PageRequest) -> Result<LeadPage, LeadError> {
        let leads = self.store.list(request.skip(), request.take()).await?;
        let total_leads = self.store.count().await?;

        tracing::debug!(
            "Listed {} lead(s) for page {} (limit {}), {} total",
            leads.len(),
            request.page,
            request.limit,
            total_leads
        );

        Ok(LeadPage {
            total_leads,
            total_pages: total_pages(total_leads, request.limit),
            current_page: request.page,
            leads,
        })
    }

    /// Sets a lead's status. Any transition, including a no-op, is allowed.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<Lead, LeadError> {
        let status = status
            .parse::<LeadStatus>()
            .map_err(|_| LeadError::validation("Invalid status value"))?;

        let id = parse_lead_id(id)?;
        let lead = self
            .store
            .update_status(id, status)
            .await?
            .ok_or(LeadError::NotFound)?;

        tracing::info!("Lead {} status set to {}", lead.id, lead.status);
        Ok(lead)
    }

    /// Removes a lead and returns it. Deleting twice is a not-found the second time.
    pub async fn delete(&self, id: &str) -> Result<Lead, LeadError> {
        let id = parse_lead_id(id)?;
        let lead = self.store.delete(id).await?.ok_or(LeadError::NotFound)?;

        tracing::info!("Lead {} deleted", lead.id);
        Ok(lead)
    }
}

/// An id that is not a UUID cannot name a stored lead.
fn parse_lead_id(id: &str) -> Result<Uuid, LeadError> {
    Uuid::parse_str(id.trim()).map_err(|_| {
        tracing::debug!("Malformed lead id: {:?}", id);
        LeadError::NotFound
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DuplicateField;
    use crate::memory_store::MemoryLeadStore;
    use crate::validation::LeadField;

    fn service() -> LeadService {
        LeadService::new(Arc::new(MemoryLeadStore::new()))
    }

    fn input(email: &str, phone: &str) -> LeadInput {
        LeadInput {
            name: "A".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            feedback: "ok".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_new() {
        let service = service();
        let lead = service.create(&input("a@x.com", "1234567890")).await.unwrap();
        assert_eq!(lead.status, LeadStatus::New);

        let page = service.list(PageRequest::new(1, 5)).await.unwrap();
        assert_eq!(page.leads, vec![lead]);
    }

    #[tokio::test]
    async fn test_create_accepts_unvalidated_input_by_default() {
        let service = service();
        let lead = service
            .create(&LeadInput {
                name: "A".to_string(),
                email: "not-an-email".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(lead.phone, None);
        assert_eq!(lead.feedback, None);

        // Absent phones never collide with each other.
        service
            .create(&LeadInput {
                name: "B".to_string(),
                email: "b@x.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(service.list(PageRequest::default()).await.unwrap().total_leads, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields_before_store() {
        let service = service().with_validation(true);
        let err = service.create(&input("a@x.com", "12")).await.unwrap_err();
        assert_eq!(
            err,
            LeadError::invalid_field(LeadField::Phone, "Phone must be 10 digits")
        );
        assert_eq!(service.list(PageRequest::default()).await.unwrap().total_leads, 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_then_phone() {
        let service = service();
        service.create(&input("a@x.com", "1234567890")).await.unwrap();

        let err = service.create(&input("a@x.com", "0987654321")).await.unwrap_err();
        assert_eq!(err, LeadError::Conflict(DuplicateField::Email));

        let err = service.create(&input("b@x.com", "1234567890")).await.unwrap_err();
        assert_eq!(err, LeadError::Conflict(DuplicateField::Phone));
    }

    #[tokio::test]
    async fn test_invalid_status_does_not_mutate() {
        let service = service();
        let lead = service.create(&input("a@x.com", "1234567890")).await.unwrap();

        let err = service
            .update_status(&lead.id.to_string(), "Closed")
            .await
            .unwrap_err();
        assert_eq!(err, LeadError::validation("Invalid status value"));

        let page = service.list(PageRequest::default()).await.unwrap();
        assert_eq!(page.leads[0].status, LeadStatus::New);
    }

    #[tokio::test]
    async fn test_status_transitions_are_unrestricted() {
        let service = service();
        let lead = service.create(&input("a@x.com", "1234567890")).await.unwrap();
        let id = lead.id.to_string();

        for status in ["Contacted", "Contacted", "New"] {
            let updated = service.update_status(&id, status).await.unwrap();
            assert_eq!(updated.status.as_str(), status);
            assert_eq!(updated.id, lead.id);
        }
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids_are_not_found() {
        let service = service();
        let missing = Uuid::new_v4().to_string();

        assert_eq!(
            service.update_status(&missing, "New").await.unwrap_err(),
            LeadError::NotFound
        );
        assert_eq!(service.delete(&missing).await.unwrap_err(), LeadError::NotFound);
        assert_eq!(service.delete("not-an-id").await.unwrap_err(), LeadError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let lead = service.create(&input("a@x.com", "1234567890")).await.unwrap();
        let id = lead.id.to_string();

        assert_eq!(service.delete(&id).await.unwrap(), lead);
        assert_eq!(service.delete(&id).await.unwrap_err(), LeadError::NotFound);
        assert!(service.list(PageRequest::default()).await.unwrap().leads.is_empty());
    }
}
