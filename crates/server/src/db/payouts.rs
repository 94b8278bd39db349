//! Payout repository: doctor payout listings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use medimeet_core::{PayoutId, PayoutStatus, UserId};

use super::RepositoryError;
use crate::models::payout::Payout;

#[derive(sqlx::FromRow)]
struct PayoutRow {
    id: Uuid,
    doctor_id: Uuid,
    amount: Decimal,
    credits: i32,
    platform_fee: Decimal,
    net_amount: Decimal,
    paypal_email: String,
    status: PayoutStatus,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl From<PayoutRow> for Payout {
    fn from(row: PayoutRow) -> Self {
        Self {
            id: PayoutId::new(row.id),
            doctor_id: UserId::new(row.doctor_id),
            amount: row.amount,
            credits: row.credits,
            platform_fee: row.platform_fee,
            net_amount: row.net_amount,
            paypal_email: row.paypal_email,
            status: row.status,
            created_at: row.created_at,
            processed_at: row.processed_at,
        }
    }
}

const PAYOUT_COLUMNS: &str = "id, doctor_id, amount, credits, platform_fee, net_amount, \
     paypal_email, status, created_at, processed_at";

/// Repository for payout database operations.
pub struct PayoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PayoutRepository<'a> {
    /// Create a new payout repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A doctor's payout records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_doctor(&self, doctor_id: UserId) -> Result<Vec<Payout>, RepositoryError> {
        let rows: Vec<PayoutRow> = sqlx::query_as(&format!(
            "SELECT {PAYOUT_COLUMNS} FROM payouts \
             WHERE doctor_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(doctor_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Payout::from).collect())
    }

    /// Record a payout request (seeding and operations tooling).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        doctor_id: UserId,
        amount: Decimal,
        credits: i32,
        platform_fee: Decimal,
        net_amount: Decimal,
        paypal_email: &str,
    ) -> Result<Payout, RepositoryError> {
        let row: PayoutRow = sqlx::query_as(&format!(
            "INSERT INTO payouts (doctor_id, amount, credits, platform_fee, net_amount, paypal_email) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PAYOUT_COLUMNS}"
        ))
        .bind(doctor_id)
        .bind(amount)
        .bind(credits)
        .bind(platform_fee)
        .bind(net_amount)
        .bind(paypal_email)
        .fetch_one(self.pool)
        .await?;

        Ok(Payout::from(row))
    }
}
