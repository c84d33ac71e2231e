use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{DuplicateField, StoreError};
use crate::models::{Lead, LeadStatus, NewLead};
use crate::store::LeadStore;

/// In-process lead storage.
///
/// Leads are kept in insertion order; the uniqueness check and the insert run
/// under one write lock, so racing creates on the same email leave one winner.
#[derive(Default)]
pub struct MemoryLeadStore {
    leads: RwLock<Vec<Lead>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError> {
        let mut leads = self.leads.write().await;

        if leads.iter().any(|l| l.email == lead.email) {
            return Err(StoreError::Duplicate(DuplicateField::Email));
        }
        if let Some(phone) = &lead.phone {
            if leads.iter().any(|l| l.phone.as_ref() == Some(phone)) {
                return Err(StoreError::Duplicate(DuplicateField::Phone));
            }
        }

        let now = Utc::now();
        let stored = Lead {
            id: Uuid::new_v4(),
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            feedback: lead.feedback,
            status: lead.status,
            created_at: now,
            updated_at: now,
        };
        leads.push(stored.clone());

        Ok(stored)
    }

    async fn list(&self, skip: i64, take: i64) -> Result<Vec<Lead>, StoreError> {
        let leads = self.leads.read().await;

        // Newest first; equal timestamps keep the later insert first.
        let mut ordered: Vec<&Lead> = leads.iter().rev().collect();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let skip = usize::try_from(skip.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(take.max(0)).unwrap_or(usize::MAX);

        Ok(ordered.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let leads = self.leads.read().await;
        Ok(leads.len() as i64)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: LeadStatus,
    ) -> Result<Option<Lead>, StoreError> {
        let mut leads = self.leads.write().await;

        Ok(leads.iter_mut().find(|l| l.id == id).map(|lead| {
            lead.status = status;
            lead.updated_at = Utc::now();
            lead.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Lead>, StoreError> {
        let mut leads = self.leads.write().await;

        Ok(leads
            .iter()
            .position(|l| l.id == id)
            .map(|index| leads.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_lead(email: &str, phone: Option<&str>) -> NewLead {
        NewLead {
            name: "Test".to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            feedback: None,
            status: LeadStatus::New,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = MemoryLeadStore::new();
        let lead = store
            .insert(new_lead("a@x.com", Some("1234567890")))
            .await
            .unwrap();

        assert_ne!(lead.id, Uuid::nil());
        assert_eq!(lead.created_at, lead.updated_at);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_email_and_phone() {
        let store = MemoryLeadStore::new();
        store
            .insert(new_lead("a@x.com", Some("1234567890")))
            .await
            .unwrap();

        let err = store
            .insert(new_lead("a@x.com", Some("0000000000")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(DuplicateField::Email)));

        let err = store
            .insert(new_lead("b@x.com", Some("1234567890")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(DuplicateField::Phone)));

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_absent_phone_is_not_unique() {
        let store = MemoryLeadStore::new();
        store.insert(new_lead("a@x.com", None)).await.unwrap();
        store.insert(new_lead("b@x.com", None)).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryLeadStore::new();
        for i in 0..4 {
            store
                .insert(new_lead(&format!("{}@x.com", i), None))
                .await
                .unwrap();
        }

        let page = store.list(0, 3).await.unwrap();
        let emails: Vec<&str> = page.iter().map(|l| l.email.as_str()).collect();
        assert_eq!(emails, vec!["3@x.com", "2@x.com", "1@x.com"]);

        let rest = store.list(3, 3).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].email, "0@x.com");

        assert!(store.list(10, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_leave_one_winner() {
        let store = Arc::new(MemoryLeadStore::new());

        let mut handles = vec![];
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert(new_lead("race@x.com", Some(&format!("555000000{}", i))))
                    .await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_update_and_delete_never_both_apply() {
        for round in 0..20 {
            let store = Arc::new(MemoryLeadStore::new());
            let lead = store
                .insert(new_lead(&format!("race{}@x.com", round), None))
                .await
                .unwrap();

            let updater = {
                let store = store.clone();
                tokio::spawn(async move { store.update_status(lead.id, LeadStatus::Contacted).await })
            };
            let deleter = {
                let store = store.clone();
                tokio::spawn(async move { store.delete(lead.id).await })
            };

            let updated = updater.await.unwrap().unwrap();
            let deleted = deleter.await.unwrap().unwrap().expect("delete always finds the lead");

            match updated {
                // Update ran first: the deleted record carries the new status.
                Some(updated) => {
                    assert_eq!(updated.status, LeadStatus::Contacted);
                    assert_eq!(deleted.status, LeadStatus::Contacted);
                }
                // Delete ran first: the update saw nothing.
                None => assert_eq!(deleted.status, LeadStatus::New),
            }
            assert_eq!(store.count().await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let store = MemoryLeadStore::new();
        let missing = Uuid::new_v4();
        assert!(store
            .update_status(missing, LeadStatus::Contacted)
            .await
            .unwrap()
            .is_none());
        assert!(store.delete(missing).await.unwrap().is_none());
    }
}
