use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::{DuplicateField, StoreError};
use crate::models::{Lead, LeadStatus, NewLead};
use crate::store::LeadStore;

const LEAD_COLUMNS: &str = "id, name, email, phone, feedback, status, created_at, updated_at";

/// Row shape of the `leads` table.
#[derive(Debug, FromRow)]
struct LeadRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    feedback: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeadRow> for Lead {
    type Error = StoreError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<LeadStatus>()
            .map_err(|e| StoreError::Corrupt(format!("lead {}: {}", row.id, e)))?;

        Ok(Lead {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            feedback: row.feedback,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed lead storage
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique violation onto the field whose constraint fired.
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            let field = if constraint.contains("phone") || db_err.message().contains("phone") {
                DuplicateField::Phone
            } else {
                DuplicateField::Email
            };
            return StoreError::Duplicate(field);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError> {
        let row = sqlx::query_as::<_, LeadRow>(&format!(
            r#"
            INSERT INTO leads (name, email, phone, feedback, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LEAD_COLUMNS}
            "#
        ))
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.feedback)
        .bind(lead.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.try_into()
    }

    async fn list(&self, skip: i64, take: i64) -> Result<Vec<Lead>, StoreError> {
        let rows = sqlx::query_as::<_, LeadRow>(&format!(
            r#"
            SELECT {LEAD_COLUMNS}
            FROM leads
            ORDER BY created_at DESC, seq DESC
            OFFSET $1
            LIMIT $2
            "#
        ))
        .bind(skip)
        .bind(take)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Lead::try_from).collect()
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: LeadStatus,
    ) -> Result<Option<Lead>, StoreError> {
        let row = sqlx::query_as::<_, LeadRow>(&format!(
            r#"
            UPDATE leads
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {LEAD_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Lead::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Lead>, StoreError> {
        let row = sqlx::query_as::<_, LeadRow>(&format!(
            "DELETE FROM leads WHERE id = $1 RETURNING {LEAD_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Lead::try_from).transpose()
    }
}
