//! Doctor payout domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use medimeet_core::{PayoutId, PayoutStatus, UserId};

/// A payout request made by a doctor against earned credits.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: PayoutId,
    pub doctor_id: UserId,
    /// Gross amount for the credits cashed out.
    pub amount: Decimal,
    /// Credits covered by this payout.
    pub credits: i32,
    pub platform_fee: Decimal,
    /// Amount actually sent to the doctor.
    pub net_amount: Decimal,
    pub paypal_email: String,
    pub status: PayoutStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}
