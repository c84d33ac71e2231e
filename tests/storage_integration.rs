use std::env;
use uuid::Uuid;

use lead_capture_api::db::Database;
use lead_capture_api::db_storage::PgLeadStore;
use lead_capture_api::errors::{DuplicateField, StoreError};
use lead_capture_api::models::{LeadStatus, NewLead};
use lead_capture_api::store::LeadStore;

/// Integration smoke test for Postgres lead storage.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn pg_lead_store_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL to run this test"))?;

    let db = Database::connect(&db_url, 2).await?;
    let store = PgLeadStore::new(db.pool.clone());

    // Unique email/phone so repeated runs do not collide.
    let tag = Uuid::new_v4().as_u128() % 1_000_000_000;
    let new_lead = NewLead {
        name: "Smoke Test".to_string(),
        email: format!("smoke{}@example.com", tag),
        phone: Some(format!("8{:09}", tag)),
        feedback: Some("storage smoke test".to_string()),
        status: LeadStatus::New,
    };

    let lead = store.insert(new_lead.clone()).await?;
    assert_ne!(lead.id, Uuid::nil());
    assert_eq!(lead.status, LeadStatus::New);

    let dup = store
        .insert(NewLead {
            phone: Some(format!("7{:09}", tag)),
            ..new_lead.clone()
        })
        .await;
    assert!(matches!(dup, Err(StoreError::Duplicate(DuplicateField::Email))));

    let dup = store
        .insert(NewLead {
            email: format!("other{}@example.com", tag),
            ..new_lead
        })
        .await;
    assert!(matches!(dup, Err(StoreError::Duplicate(DuplicateField::Phone))));

    let newest = store.list(0, 1).await?;
    assert_eq!(newest.first().map(|l| l.id), Some(lead.id));

    let updated = store
        .update_status(lead.id, LeadStatus::Contacted)
        .await?
        .ok_or_else(|| anyhow::anyhow!("lead vanished"))?;
    assert_eq!(updated.status, LeadStatus::Contacted);
    assert!(updated.updated_at >= lead.updated_at);

    let deleted = store.delete(lead.id).await?;
    assert_eq!(deleted.map(|l| l.id), Some(lead.id));
    assert!(store.delete(lead.id).await?.is_none());

    db.close().await;
    Ok(())
}
