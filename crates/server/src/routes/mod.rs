//! HTTP route handlers for the platform.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database)
//!
//! # User bridge & onboarding
//! GET  /api/specialties               - Specialty catalog (public)
//! POST /api/user/check                - Bridge identity -> local user record
//! POST /api/user/set-role             - One-time PATIENT/DOCTOR selection
//!
//! # Patient API
//! POST /api/appointments/patient      - Patient's appointments (created desc)
//! POST /api/appointments/book         - Book a slot (409 when taken)
//!
//! # Doctor API
//! POST /api/doctor/appointments       - Doctor's appointments (created desc)
//! POST /api/doctor/availability       - Doctor's slots (date asc)
//! POST /api/doctor/earnings           - Earnings summary
//! POST /api/doctor/payouts            - Payout records (created desc)
//!
//! # Admin API
//! POST /api/admin/pending-doctors     - Verification queue
//! POST /api/admin/update-doctor-status - VERIFIED/REJECTED decision
//!
//! # Gated views (redirect to the caller's destination when not allowed)
//! GET  /onboarding                    - Sign-in / role selection
//! GET  /doctors                       - Patient landing (verified doctors)
//! GET  /appointments                  - Patient appointment list
//! GET  /doctor                        - Doctor dashboard (verified only)
//! GET  /doctor/verification           - Doctor review state
//! GET  /admin                         - Admin verification queue
//! ```

pub mod admin;
pub mod appointments;
pub mod availability;
pub mod earnings;
pub mod users;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use medimeet_core::IdentityId;

use crate::state::AppState;

/// Request body shared by the user-scoped read endpoints: the caller's
/// claimed identity id, cross-checked against the verified identity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScopedRequest {
    pub identity_user_id: IdentityId,
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/specialties", get(users::specialties))
        .route("/user/check", post(users::check_user))
        .route("/user/set-role", post(users::set_role))
        .route("/appointments/patient", post(appointments::patient_appointments))
        .route("/appointments/book", post(appointments::book_appointment))
        .route("/doctor/appointments", post(appointments::doctor_appointments))
        .route("/doctor/availability", post(availability::doctor_availability))
        .route("/doctor/earnings", post(earnings::doctor_earnings))
        .route("/doctor/payouts", post(earnings::doctor_payouts))
        .route("/admin/pending-doctors", post(admin::pending_doctors))
        .route("/admin/update-doctor-status", post(admin::update_doctor_status))
}

/// Create the gated view router.
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/onboarding", get(views::onboarding))
        .route("/doctors", get(views::doctors))
        .route("/appointments", get(views::appointments))
        .route("/doctor", get(views::doctor_dashboard))
        .route("/doctor/verification", get(views::doctor_verification))
        .route("/admin", get(views::admin))
}

/// Create the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(view_routes())
}
