//! Slot repository: availability listings and lookups.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use medimeet_core::{SlotId, UserId};

use super::RepositoryError;
use crate::models::appointment::Slot;

#[derive(sqlx::FromRow)]
struct SlotRow {
    id: Uuid,
    doctor_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    created_at: DateTime<Utc>,
}

impl From<SlotRow> for Slot {
    fn from(row: SlotRow) -> Self {
        Self {
            id: SlotId::new(row.id),
            doctor_id: UserId::new(row.doctor_id),
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

/// Repository for slot database operations.
pub struct SlotRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SlotRepository<'a> {
    /// Create a new slot repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A doctor's availability slots, earliest date first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_doctor(&self, doctor_id: UserId) -> Result<Vec<Slot>, RepositoryError> {
        let rows: Vec<SlotRow> = sqlx::query_as(
            "SELECT id, doctor_id, date, start_time, end_time, created_at \
             FROM slots \
             WHERE doctor_id = $1 \
             ORDER BY date ASC, start_time ASC",
        )
        .bind(doctor_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Slot::from).collect())
    }

    /// Get a slot by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, slot_id: SlotId) -> Result<Option<Slot>, RepositoryError> {
        let row: Option<SlotRow> = sqlx::query_as(
            "SELECT id, doctor_id, date, start_time, end_time, created_at \
             FROM slots WHERE id = $1",
        )
        .bind(slot_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Slot::from))
    }

    /// Create a slot for a doctor (seeding and operations tooling).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        doctor_id: UserId,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Slot, RepositoryError> {
        let row: SlotRow = sqlx::query_as(
            "INSERT INTO slots (doctor_id, date, start_time, end_time) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, doctor_id, date, start_time, end_time, created_at",
        )
        .bind(doctor_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(self.pool)
        .await?;

        Ok(Slot::from(row))
    }
}
