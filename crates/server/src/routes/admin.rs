//! Admin verification gate API routes.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use medimeet_core::{Role, UserId, VerificationStatus};

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::{VerifiedCaller, ensure_claimed_id};
use crate::models::User;
use crate::state::AppState;

use super::UserScopedRequest;
use super::appointments::require_role;

/// Response envelope for the pending-doctor queue.
#[derive(Debug, Serialize)]
pub struct PendingDoctorsResponse {
    pub doctors: Vec<User>,
}

/// List doctors awaiting verification, oldest submission first.
///
/// POST /api/admin/pending-doctors
///
/// # Errors
///
/// Returns `AppError::AccessDenied` unless the caller's stored role is
/// ADMIN.
pub async fn pending_doctors(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<UserScopedRequest>,
) -> Result<Json<PendingDoctorsResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;
    require_role(&state, &identity.id, Role::Admin).await?;

    let doctors = UserRepository::new(state.pool())
        .list_pending_doctors()
        .await?;

    Ok(Json(PendingDoctorsResponse { doctors }))
}

/// Request to decide a doctor's verification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorStatusRequest {
    pub identity_user_id: medimeet_core::IdentityId,
    pub doctor_id: UserId,
    /// Target status: VERIFIED or REJECTED.
    pub status: String,
}

/// Response from a verification decision.
#[derive(Debug, Serialize)]
pub struct UpdateDoctorStatusResponse {
    pub success: bool,
}

/// Decide a doctor's verification: VERIFIED or REJECTED.
///
/// POST /api/admin/update-doctor-status
///
/// # Errors
///
/// Returns `AppError::AccessDenied` unless the caller is an ADMIN,
/// `AppError::BadRequest` for a non-decision status or a target that is not
/// a doctor, and `AppError::NotFound` for an unknown user.
pub async fn update_doctor_status(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<UpdateDoctorStatusRequest>,
) -> Result<Json<UpdateDoctorStatusResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;
    require_role(&state, &identity.id, Role::Admin).await?;

    let users = UserRepository::new(state.pool());

    let doctor = users
        .get_by_id(request.doctor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found in database".to_string()))?;

    if doctor.role != Role::Doctor {
        return Err(AppError::BadRequest("User is not a doctor".to_string()));
    }

    let target = VerificationStatus::from_str(&request.status)
        .map_err(|_| AppError::BadRequest("Invalid verification status".to_string()))?;

    // PENDING is rejected here; only the doctor's own resubmission re-queues
    let decided = doctor
        .verification_status
        .unwrap_or_default()
        .decide(target)?;

    users
        .set_verification_status(request.doctor_id, decided)
        .await?;

    tracing::info!(
        doctor_id = %request.doctor_id,
        status = %decided,
        "verification decision applied"
    );

    Ok(Json(UpdateDoctorStatusResponse { success: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_status_request_wire_shape() {
        let json = r#"{
            "identityUserId": "idp_admin",
            "doctorId": "7b9ea13c-3392-4ce0-9da5-8f4c2d63931e",
            "status": "VERIFIED"
        }"#;

        let request: UpdateDoctorStatusRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, "VERIFIED");
    }
}
