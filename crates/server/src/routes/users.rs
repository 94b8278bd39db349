//! User bridge and onboarding API routes.
//!
//! JSON API endpoints for bridging the external identity into a local user
//! record and for one-time role selection.

use axum::{Json, extract::State};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use medimeet_core::{Email, IdentityId, Role};

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::{VerifiedCaller, ensure_claimed_id};
use crate::models::{DoctorProfile, Transaction, User};
use crate::state::AppState;

/// Request carrying the caller's claimed identity id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUserRequest {
    pub identity_user_id: IdentityId,
}

/// Response from the identity bridge.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUserResponse {
    pub user: User,
    /// At most one credit purchase from the current calendar month,
    /// newest first.
    pub transactions: Vec<Transaction>,
}

/// First instant of the month `now` falls in.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    // now.year()/now.month() always form a valid first-of-month
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Bridge the verified identity into a local user record.
///
/// POST /api/user/check
///
/// Creates the record (with its signup credit transaction) on first sight;
/// afterwards a pure lookup.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when the claimed id does not match the
/// verified identity.
pub async fn check_user(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<CheckUserRequest>,
) -> Result<Json<CheckUserResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;

    let users = UserRepository::new(state.pool());

    if let Some(user) = users.get_by_identity_id(&identity.id).await? {
        let transactions = users
            .latest_credit_purchase_since(user.id, month_start(Utc::now()))
            .await?;
        return Ok(Json(CheckUserResponse { user, transactions }));
    }

    let email = Email::parse(&identity.email)
        .map_err(|e| AppError::Internal(format!("provider returned invalid email: {e}")))?;

    let user = users
        .create_provisioned(
            &identity.id,
            &identity.full_name(),
            &email,
            identity.image_url.as_deref(),
        )
        .await?;

    tracing::info!(user_id = %user.id, "provisioned new user");

    Ok(Json(CheckUserResponse {
        user,
        transactions: Vec::new(),
    }))
}

/// Response listing the specialty catalog for the onboarding form.
#[derive(Debug, Serialize)]
pub struct SpecialtiesResponse {
    pub specialties: &'static [&'static str],
}

/// The specialty catalog a doctor registers under.
///
/// GET /api/specialties
pub async fn specialties() -> Json<SpecialtiesResponse> {
    Json(SpecialtiesResponse {
        specialties: medimeet_core::SPECIALTIES,
    })
}

/// Request to select a role during onboarding.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRoleRequest {
    pub role: String,
    pub specialty: Option<String>,
    pub experience: Option<i32>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

/// Response from role selection, with where the client should go next.
#[derive(Debug, Serialize)]
pub struct SetRoleResponse {
    pub success: bool,
    pub redirect: &'static str,
}

/// Select PATIENT or DOCTOR during onboarding.
///
/// POST /api/user/set-role
///
/// Doctors must submit all four profile fields and re-enter PENDING review;
/// resubmitting after a rejection goes through this same operation.
///
/// # Errors
///
/// Returns `AppError::NotFound` when the caller has not been provisioned,
/// and `AppError::BadRequest` for an invalid role or incomplete profile.
pub async fn set_role(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<SetRoleResponse>> {
    let users = UserRepository::new(state.pool());

    let user = users
        .get_by_identity_id(&identity.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found in database".to_string()))?;

    let requested = Role::from_str(&request.role)
        .map_err(|_| AppError::BadRequest("Invalid role selection".to_string()))?;

    // Rejects ADMIN/UNASSIGNED selections and role switches
    let assigned = user.role.assign(requested)?;

    match assigned {
        Role::Patient => {
            users.set_patient_role(&identity.id).await?;
            tracing::info!(user_id = %user.id, "assigned PATIENT role");

            Ok(Json(SetRoleResponse {
                success: true,
                redirect: "/doctors",
            }))
        }
        Role::Doctor => {
            let profile = DoctorProfile::validate(
                request.specialty,
                request.experience,
                request.credential_url,
                request.description,
            )
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

            users.set_doctor_profile(&identity.id, &profile).await?;
            tracing::info!(user_id = %user.id, specialty = %profile.specialty, "assigned DOCTOR role, pending verification");

            Ok(Json(SetRoleResponse {
                success: true,
                redirect: "/doctor/verification",
            }))
        }
        // assign() only returns PATIENT or DOCTOR
        other => Err(AppError::Internal(format!(
            "unreachable role assignment: {other}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 15, 30, 0).unwrap();
        let start = month_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_set_role_request_accepts_wire_shape() {
        let json = r#"{
            "role": "DOCTOR",
            "specialty": "Cardiology",
            "experience": 10,
            "credentialUrl": "https://credentials.example/doc.pdf",
            "description": "Cardiologist"
        }"#;

        let request: SetRoleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.role, "DOCTOR");
        assert_eq!(request.credential_url.as_deref(), Some("https://credentials.example/doc.pdf"));
    }

    #[test]
    fn test_set_role_response_shape() {
        let response = SetRoleResponse {
            success: true,
            redirect: "/doctors",
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["redirect"], "/doctors");
    }
}
