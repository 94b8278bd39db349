//! Doctor earnings and payout API routes.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;

use medimeet_core::Role;

use crate::db::{AppointmentRepository, PayoutRepository};
use crate::error::Result;
use crate::middleware::{VerifiedCaller, ensure_claimed_id};
use crate::models::Payout;
use crate::services::{Earnings, summarize};
use crate::state::AppState;

use super::UserScopedRequest;
use super::appointments::require_role;

/// Response envelope for the earnings summary.
#[derive(Debug, Serialize)]
pub struct EarningsResponse {
    pub earnings: Earnings,
}

/// Summarize the caller's earnings as a doctor.
///
/// POST /api/doctor/earnings
///
/// # Errors
///
/// Returns `AppError::AccessDenied` unless the caller's stored role is
/// DOCTOR.
pub async fn doctor_earnings(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<UserScopedRequest>,
) -> Result<Json<EarningsResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;
    let user = require_role(&state, &identity.id, Role::Doctor).await?;

    let completed = AppointmentRepository::new(state.pool())
        .completed_for_doctor(user.id)
        .await?;

    let earnings = summarize(&completed, Utc::now());

    Ok(Json(EarningsResponse { earnings }))
}

/// Response envelope for payout listings.
#[derive(Debug, Serialize)]
pub struct PayoutsResponse {
    pub payouts: Vec<Payout>,
}

/// List the caller's payout records as a doctor, newest first.
///
/// POST /api/doctor/payouts
///
/// # Errors
///
/// Returns `AppError::AccessDenied` unless the caller's stored role is
/// DOCTOR.
pub async fn doctor_payouts(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<UserScopedRequest>,
) -> Result<Json<PayoutsResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;
    let user = require_role(&state, &identity.id, Role::Doctor).await?;

    let payouts = PayoutRepository::new(state.pool())
        .list_for_doctor(user.id)
        .await?;

    Ok(Json(PayoutsResponse { payouts }))
}
