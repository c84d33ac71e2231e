//! The persistence seam for leads.
//!
//! Every method touches at most one lead. Implementations must enforce the
//! email/phone uniqueness rules atomically at write time.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Lead, LeadStatus, NewLead};

#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Persists a lead, assigning its id and timestamps.
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError>;

    /// Returns up to `take` leads after skipping `skip`, newest first.
    async fn list(&self, skip: i64, take: i64) -> Result<Vec<Lead>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Replaces the status; `None` when the id does not exist.
    async fn update_status(&self, id: Uuid, status: LeadStatus)
        -> Result<Option<Lead>, StoreError>;

    /// Removes the lead and returns it; `None` when the id does not exist.
    async fn delete(&self, id: Uuid) -> Result<Option<Lead>, StoreError>;
}
