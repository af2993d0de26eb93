//! SQLite lead outbox
//!
//! Self-hosted sink used when no webhook is configured. Mirrors what the
//! contact-form backend does with a submission: upsert the contact by email,
//! then record the lead against it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Transaction;
use std::path::Path;
use std::str::FromStr;

use super::{LeadSink, SubmissionError};
use crate::core::Lead;

/// A lead as stored in the outbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLead {
    pub id: i64,
    pub contact_id: i64,
    pub lead: Lead,
    pub created_at: DateTime<Utc>,
}

pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    /// Open (or create) the outbox at the given database path
    pub async fn new(db_path: &Path) -> Result<Self, sqlx::Error> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let sink = Self { pool };
        sink.init_schema().await?;
        Ok(sink)
    }

    /// In-memory outbox for tests
    pub async fn new_in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let sink = Self { pool };
        sink.init_schema().await?;
        Ok(sink)
    }

    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts_users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                phone TEXT,
                business_name TEXT,
                last_contact_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS leads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                contact_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                business_name TEXT NOT NULL,
                service TEXT NOT NULL,
                details TEXT NOT NULL,
                budget TEXT NOT NULL,
                timeline TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (contact_id) REFERENCES contacts_users(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_leads_contact
            ON leads(contact_id, created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or refresh the contact for this lead's email, returning its id
    async fn upsert_contact(
        tx: &mut Transaction<'_, Sqlite>,
        lead: &Lead,
        now: &str,
    ) -> Result<i64, sqlx::Error> {
        let business_name = Some(lead.business_name.as_str()).filter(|b| !b.is_empty());

        sqlx::query(
            r#"
            INSERT INTO contacts_users (email, name, phone, business_name, last_contact_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(email) DO UPDATE SET
                name = excluded.name,
                phone = excluded.phone,
                business_name = excluded.business_name,
                last_contact_at = excluded.last_contact_at
            "#,
        )
        .bind(&lead.email)
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(business_name)
        .bind(now)
        .execute(&mut **tx)
        .await?;

        let (id,): (i64,) = sqlx::query_as("SELECT id FROM contacts_users WHERE email = ?")
            .bind(&lead.email)
            .fetch_one(&mut **tx)
            .await?;

        Ok(id)
    }

    /// Store a lead, returning the new lead id. The contact and the lead are
    /// written together or not at all.
    pub async fn record(&self, lead: &Lead) -> Result<i64, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;
        let contact_id = Self::upsert_contact(&mut tx, lead, &now).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO leads
                (contact_id, name, email, phone, business_name, service, details, budget, timeline, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(contact_id)
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.business_name)
        .bind(&lead.service)
        .bind(&lead.details)
        .bind(&lead.budget)
        .bind(&lead.timeline)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Most recent leads first
    pub async fn recent_leads(&self, limit: usize) -> Result<Vec<StoredLead>, sqlx::Error> {
        let rows: Vec<(i64, i64, String, String, String, String, String, String, String, String, String)> =
            sqlx::query_as(
                r#"
                SELECT id, contact_id, name, email, phone, business_name, service, details,
                       budget, timeline, created_at
                FROM leads
                ORDER BY id DESC
                LIMIT ?
                "#,
            )
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, contact_id, name, email, phone, business_name, service, details, budget, timeline, created_at)| {
                    StoredLead {
                        id,
                        contact_id,
                        lead: Lead {
                            name,
                            business_name,
                            service,
                            budget,
                            timeline,
                            phone,
                            email,
                            details,
                        },
                        created_at: DateTime::parse_from_rfc3339(&created_at)
                            .map(|dt| dt.with_timezone(&Utc))
                            .unwrap_or_else(|_| Utc::now()),
                    }
                },
            )
            .collect())
    }

    pub async fn contact_count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl LeadSink for SqliteSink {
    async fn submit(&self, lead: &Lead) -> Result<(), SubmissionError> {
        let id = self.record(lead).await?;
        tracing::info!("📨 Lead #{} stored for {}", id, lead.email);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(email: &str, name: &str) -> Lead {
        Lead {
            name: name.into(),
            business_name: "N/A".into(),
            service: "AI Agent".into(),
            budget: "$5k".into(),
            timeline: "ASAP".into(),
            phone: "5551234567".into(),
            email: email.into(),
            details: "Support bot".into(),
        }
    }

    #[tokio::test]
    async fn test_record_and_read_back() {
        let sink = SqliteSink::new_in_memory().await.unwrap();

        sink.submit(&lead("ada@example.com", "Ada")).await.unwrap();

        let leads = sink.recent_leads(10).await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].lead, lead("ada@example.com", "Ada"));
    }

    #[tokio::test]
    async fn test_contact_upserted_by_email() {
        let sink = SqliteSink::new_in_memory().await.unwrap();

        sink.submit(&lead("ada@example.com", "Ada")).await.unwrap();
        sink.submit(&lead("ada@example.com", "Ada L.")).await.unwrap();
        sink.submit(&lead("grace@example.com", "Grace")).await.unwrap();

        assert_eq!(sink.contact_count().await.unwrap(), 2);

        let leads = sink.recent_leads(10).await.unwrap();
        assert_eq!(leads.len(), 3);
        // newest first, and both of Ada's leads share a contact
        assert_eq!(leads[0].lead.name, "Grace");
        assert_eq!(leads[1].contact_id, leads[2].contact_id);
    }

    #[tokio::test]
    async fn test_failed_lead_insert_leaves_no_contact() {
        let sink = SqliteSink::new_in_memory().await.unwrap();
        sqlx::query(
            r#"
            CREATE TRIGGER reject_leads BEFORE INSERT ON leads
            BEGIN
                SELECT RAISE(ABORT, 'leads are read-only');
            END
            "#,
        )
        .execute(&sink.pool)
        .await
        .unwrap();

        let err = sink.submit(&lead("ada@example.com", "Ada")).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Storage(_)));
        assert_eq!(sink.contact_count().await.unwrap(), 0);
    }
}
