//! Appointment API routes: role-scoped listings and booking.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use medimeet_core::{IdentityId, Role, SlotId, UserId};

use crate::db::{AppointmentRepository, SlotRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::{VerifiedCaller, ensure_claimed_id};
use crate::models::{Appointment, DoctorAppointment, PatientAppointment, User};
use crate::state::AppState;

use super::UserScopedRequest;

/// Flat per-visit price charged at booking.
fn visit_price() -> Decimal {
    Decimal::new(2000, 2) // 20.00
}

/// Resolve the caller to a bridged user holding `role`.
///
/// Listing endpoints treat an unprovisioned caller the same as a role
/// mismatch: access denied.
pub(super) async fn require_role(
    state: &AppState,
    identity_id: &IdentityId,
    role: Role,
) -> Result<User> {
    let user = UserRepository::new(state.pool())
        .get_by_identity_id(identity_id)
        .await?;

    match user {
        Some(user) if user.role == role => Ok(user),
        _ => Err(AppError::AccessDenied),
    }
}

/// Response envelope for patient appointment listings.
#[derive(Debug, Serialize)]
pub struct PatientAppointmentsResponse {
    pub appointments: Vec<PatientAppointment>,
}

/// List the caller's appointments as a patient.
///
/// POST /api/appointments/patient
///
/// # Errors
///
/// Returns `AppError::AccessDenied` unless the caller's stored role is
/// PATIENT.
pub async fn patient_appointments(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<UserScopedRequest>,
) -> Result<Json<PatientAppointmentsResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;
    let user = require_role(&state, &identity.id, Role::Patient).await?;

    let appointments = AppointmentRepository::new(state.pool())
        .list_for_patient(user.id)
        .await?;

    Ok(Json(PatientAppointmentsResponse { appointments }))
}

/// Response envelope for doctor appointment listings.
#[derive(Debug, Serialize)]
pub struct DoctorAppointmentsResponse {
    pub appointments: Vec<DoctorAppointment>,
}

/// List the caller's appointments as a doctor.
///
/// POST /api/doctor/appointments
///
/// # Errors
///
/// Returns `AppError::AccessDenied` unless the caller's stored role is
/// DOCTOR.
pub async fn doctor_appointments(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<UserScopedRequest>,
) -> Result<Json<DoctorAppointmentsResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;
    let user = require_role(&state, &identity.id, Role::Doctor).await?;

    let appointments = AppointmentRepository::new(state.pool())
        .list_for_doctor(user.id)
        .await?;

    Ok(Json(DoctorAppointmentsResponse { appointments }))
}

/// Request to book a slot with a doctor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub identity_user_id: IdentityId,
    pub doctor_id: UserId,
    pub slot_id: SlotId,
    pub notes: Option<String>,
}

/// Response from booking a slot.
#[derive(Debug, Serialize)]
pub struct BookAppointmentResponse {
    pub appointment: Appointment,
}

/// Book a slot with a doctor.
///
/// POST /api/appointments/book
///
/// The slot's UNIQUE constraint resolves races: of two concurrent bookings
/// for the same slot exactly one succeeds, the other receives 409.
///
/// # Errors
///
/// Returns `AppError::AccessDenied` unless the caller is a PATIENT,
/// `AppError::NotFound` for an unknown slot, `AppError::BadRequest` when
/// the slot belongs to a different doctor, and a conflict error when the
/// slot is already booked.
pub async fn book_appointment(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<BookAppointmentResponse>> {
    ensure_claimed_id(&identity, &request.identity_user_id)?;
    let patient = require_role(&state, &identity.id, Role::Patient).await?;

    let slot = SlotRepository::new(state.pool())
        .get(request.slot_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Slot not found".to_string()))?;

    if slot.doctor_id != request.doctor_id {
        return Err(AppError::BadRequest(
            "Slot does not belong to this doctor".to_string(),
        ));
    }

    let appointment = AppointmentRepository::new(state.pool())
        .book(
            patient.id,
            request.doctor_id,
            request.slot_id,
            visit_price(),
            request.notes.as_deref(),
        )
        .await?;

    tracing::info!(
        appointment_id = %appointment.id,
        slot_id = %request.slot_id,
        "booked appointment"
    );

    Ok(Json(BookAppointmentResponse { appointment }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_price_is_two_decimal_dollars() {
        assert_eq!(visit_price().to_string(), "20.00");
    }

    #[test]
    fn test_book_request_wire_shape() {
        let json = r#"{
            "identityUserId": "idp_1",
            "doctorId": "7b9ea13c-3392-4ce0-9da5-8f4c2d63931e",
            "slotId": "9cb1ff4e-41f2-4b5e-8a32-c6f3eb1a2d97"
        }"#;

        let request: BookAppointmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.identity_user_id.as_str(), "idp_1");
        assert!(request.notes.is_none());
    }
}
