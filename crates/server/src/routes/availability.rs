//! Doctor availability API route.

use axum::{Json, extract::State};
use serde::Serialize;

use medimeet_core::Role;

use crate::db::SlotRepository;
use crate::error::Result;
use crate::middleware::{VerifiedCaller, ensure_claimed_id};
use crate::models::Slot;
use crate::state::AppState;

use super::UserScopedRequest;
use super::appointments::require_role;

/// Response envelope for slot listings.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<Slot>,
}

/// List the caller's availability slots as a doctor, earliest date first.
///
/// POST /api/doctor/availability
///
/// # Errors
///
/// Returns `AppError::AccessDenied` unless the caller's stored role is
/// DOCTOR.
pub async fn doctor_availability(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<UserScopedRequest>,
) -> Result<Json<AvailabilityResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;
    let user = require_role(&state, &identity.id, Role::Doctor).await?;

    let slots = SlotRepository::new(state.pool())
        .list_for_doctor(user.id)
        .await?;

    Ok(Json(AvailabilityResponse { slots }))
}
