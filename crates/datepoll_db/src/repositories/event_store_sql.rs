//! SQL implementation of the event store
//!
//! Four tables back the three record sets: `events`, `date_candidates`,
//! `participants` and `participant_availability`. Timestamps are stored as
//! fixed-width RFC 3339 text so ordering by the column is chronological.
//!
//! The `Any` driver can't decode a NULL into `Option<String>`, so optional
//! text is written as `''` and read back through `COALESCE`. A "no opinion"
//! availability value is not stored at all.

use crate::error::DbError;
use crate::DbClient;
use chrono::{DateTime, SecondsFormat, Utc};
use datepoll_common::models::{
    Availability, AvailabilityRecord, CandidateRecord, EventRecord, ResponseRecord, StoredResponse,
};
use datepoll_common::services::{BoxFuture, EventStore, StoreError};
use sqlx::any::AnyRow;
use sqlx::Row;
use std::collections::HashMap;
use tracing::{debug, error, info};

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        memo TEXT NOT NULL,
        contact TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS date_candidates (
        id TEXT PRIMARY KEY,
        event_id TEXT NOT NULL,
        label TEXT NOT NULL,
        sort_position INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS participants (
        id TEXT PRIMARY KEY,
        event_id TEXT NOT NULL,
        name TEXT NOT NULL,
        comment TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS participant_availability (
        response_id TEXT NOT NULL,
        candidate_id TEXT NOT NULL,
        availability TEXT,
        PRIMARY KEY (response_id, candidate_id)
    )
    "#,
];

/// SQL implementation of [`EventStore`]
#[derive(Debug, Clone)]
pub struct SqlEventStore {
    db_client: DbClient,
}

impl SqlEventStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the tables if they don't already exist.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing event store schema");
        for statement in SCHEMA {
            self.db_client.execute(statement).await?;
        }
        info!("Event store schema initialized successfully");
        Ok(())
    }
}

fn timestamp_to_text(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn text_to_timestamp(text: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::DecodeError(format!("invalid timestamp {:?}: {}", text, e)))
}

fn query_error(context: &str, e: sqlx::Error) -> DbError {
    error!("{}: {}", context, e);
    DbError::QueryError(e.to_string())
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

fn event_from_row(row: &AnyRow) -> Result<EventRecord, DbError> {
    let created_at: String = row.try_get("created_at")?;
    let contact: String = row.try_get("contact")?;
    Ok(EventRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        memo: row.try_get("memo")?,
        contact: non_empty(contact),
        created_at: text_to_timestamp(&created_at)?,
    })
}

fn candidate_from_row(row: &AnyRow) -> Result<CandidateRecord, DbError> {
    Ok(CandidateRecord {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        label: row.try_get("label")?,
        sort_position: row.try_get("sort_position")?,
    })
}

fn response_from_row(row: &AnyRow) -> Result<ResponseRecord, DbError> {
    let created_at: String = row.try_get("created_at")?;
    Ok(ResponseRecord {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        name: row.try_get("name")?,
        comment: row.try_get("comment")?,
        created_at: text_to_timestamp(&created_at)?,
    })
}

fn availability_from_row(row: &AnyRow) -> Result<AvailabilityRecord, DbError> {
    let value: String = row.try_get("availability")?;
    let value = non_empty(value)
        .map(|v| v.parse::<Availability>().map_err(DbError::DecodeError))
        .transpose()?;
    Ok(AvailabilityRecord {
        response_id: row.try_get("response_id")?,
        candidate_id: row.try_get("candidate_id")?,
        value,
    })
}

impl EventStore for SqlEventStore {
    fn insert_event(&self, event: EventRecord) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            debug!("Inserting event: {}", event.id);
            sqlx::query(
                "INSERT INTO events (id, title, memo, contact, created_at) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&event.id)
            .bind(&event.title)
            .bind(&event.memo)
            .bind(event.contact.clone().unwrap_or_default())
            .bind(timestamp_to_text(&event.created_at))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| query_error("Failed to insert event", e))?;
            Ok(())
        })
    }

    fn insert_candidates(&self, candidates: Vec<CandidateRecord>) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            debug!("Inserting {} date candidates", candidates.len());
            let mut tx = self.db_client.begin().await?;
            for candidate in &candidates {
                sqlx::query(
                    "INSERT INTO date_candidates (id, event_id, label, sort_position) VALUES ($1, $2, $3, $4)",
                )
                .bind(&candidate.id)
                .bind(&candidate.event_id)
                .bind(&candidate.label)
                .bind(candidate.sort_position)
                .execute(&mut *tx)
                .await
                .map_err(|e| query_error("Failed to insert date candidate", e))?;
            }
            tx.commit()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            Ok(())
        })
    }

    fn insert_response(&self, response: ResponseRecord) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            debug!("Inserting response {} for event {}", response.id, response.event_id);
            sqlx::query(
                "INSERT INTO participants (id, event_id, name, comment, created_at) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&response.id)
            .bind(&response.event_id)
            .bind(&response.name)
            .bind(&response.comment)
            .bind(timestamp_to_text(&response.created_at))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| query_error("Failed to insert response", e))?;
            Ok(())
        })
    }

    fn update_response(&self, response: ResponseRecord) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            debug!("Updating response {}", response.id);
            let result = sqlx::query("UPDATE participants SET name = $1, comment = $2 WHERE id = $3")
                .bind(&response.name)
                .bind(&response.comment)
                .bind(&response.id)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| query_error("Failed to update response", e))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!("response {}", response.id)));
            }
            Ok(())
        })
    }

    fn delete_response(&self, response_id: &str) -> BoxFuture<'_, (), StoreError> {
        let response_id = response_id.to_string();
        Box::pin(async move {
            debug!("Deleting response {}", response_id);
            let result = sqlx::query("DELETE FROM participants WHERE id = $1")
                .bind(&response_id)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| query_error("Failed to delete response", e))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!("response {}", response_id)));
            }
            Ok(())
        })
    }

    fn insert_availability(
        &self,
        records: Vec<AvailabilityRecord>,
    ) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            debug!("Inserting {} availability records", records.len());
            let mut tx = self.db_client.begin().await?;
            for record in &records {
                let Some(value) = record.value else {
                    continue;
                };
                sqlx::query(
                    "INSERT INTO participant_availability (response_id, candidate_id, availability) VALUES ($1, $2, $3)",
                )
                .bind(&record.response_id)
                .bind(&record.candidate_id)
                .bind(value.as_str().to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| query_error("Failed to insert availability", e))?;
            }
            tx.commit()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            Ok(())
        })
    }

    fn delete_availability(&self, response_id: &str) -> BoxFuture<'_, (), StoreError> {
        let response_id = response_id.to_string();
        Box::pin(async move {
            debug!("Deleting availability of response {}", response_id);
            sqlx::query("DELETE FROM participant_availability WHERE response_id = $1")
                .bind(&response_id)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| query_error("Failed to delete availability", e))?;
            Ok(())
        })
    }

    fn fetch_event(&self, event_id: &str) -> BoxFuture<'_, EventRecord, StoreError> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            debug!("Fetching event {}", event_id);
            let row = sqlx::query(
                "SELECT id, title, memo, COALESCE(contact, '') AS contact, created_at FROM events WHERE id = $1",
            )
            .bind(&event_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| query_error("Failed to fetch event", e))?;

            match row {
                Some(row) => Ok(event_from_row(&row)?),
                None => Err(StoreError::NotFound(format!("event {}", event_id))),
            }
        })
    }

    fn fetch_candidates(&self, event_id: &str) -> BoxFuture<'_, Vec<CandidateRecord>, StoreError> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            let rows = sqlx::query(
                r#"
                SELECT id, event_id, label, sort_position
                FROM date_candidates
                WHERE event_id = $1
                ORDER BY sort_position ASC
                "#,
            )
            .bind(&event_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| query_error("Failed to fetch date candidates", e))?;

            let candidates = rows
                .iter()
                .map(candidate_from_row)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(candidates)
        })
    }

    fn fetch_responses(&self, event_id: &str) -> BoxFuture<'_, Vec<StoredResponse>, StoreError> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            let rows = sqlx::query(
                r#"
                SELECT id, event_id, name, comment, created_at
                FROM participants
                WHERE event_id = $1
                ORDER BY created_at ASC
                "#,
            )
            .bind(&event_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| query_error("Failed to fetch responses", e))?;

            let availability_rows = sqlx::query(
                r#"
                SELECT a.response_id, a.candidate_id, COALESCE(a.availability, '') AS availability
                FROM participant_availability a
                JOIN participants p ON p.id = a.response_id
                WHERE p.event_id = $1
                "#,
            )
            .bind(&event_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| query_error("Failed to fetch availability", e))?;

            let mut by_response: HashMap<String, Vec<AvailabilityRecord>> = HashMap::new();
            for row in &availability_rows {
                let record = availability_from_row(row)?;
                by_response
                    .entry(record.response_id.clone())
                    .or_default()
                    .push(record);
            }

            let mut responses = Vec::with_capacity(rows.len());
            for row in &rows {
                let record = response_from_row(row)?;
                let availability = by_response.remove(&record.id).unwrap_or_default();
                responses.push(StoredResponse {
                    record,
                    availability,
                });
            }
            Ok(responses)
        })
    }
}
