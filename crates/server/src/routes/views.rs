//! Gated view routes.
//!
//! Server-side counterparts of the protected pages: each bridges the
//! caller's identity, runs the route guard, and either redirects to the
//! caller's destination or returns the page's view model as JSON. The
//! redirect rules live in one place ([`AuthState`]) instead of being
//! re-derived per page.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Serialize;

use crate::db::{AppointmentRepository, PayoutRepository, SlotRepository, UserRepository};
use crate::error::Result;
use crate::middleware::{AuthState, OptionalCaller, Page, VerifiedCaller};
use crate::models::{DoctorAppointment, PatientAppointment, Payout, Slot, User};
use crate::services::{Earnings, summarize};
use crate::state::AppState;

/// Onboarding view: the bridged user, if any.
#[derive(Debug, Serialize)]
pub struct OnboardingView {
    pub user: Option<User>,
}

/// GET /onboarding
///
/// Anonymous and unprovisioned visitors see the sign-in/role prompt; users
/// who already completed onboarding are redirected to their destination.
///
/// # Errors
///
/// Returns `AppError::Database` if the bridge lookup fails.
pub async fn onboarding(
    State(state): State<AppState>,
    OptionalCaller(identity): OptionalCaller,
) -> Result<Response> {
    let Some(identity) = identity else {
        return Ok(Json(OnboardingView { user: None }).into_response());
    };

    let user = UserRepository::new(state.pool())
        .get_by_identity_id(&identity.id)
        .await?;

    let Some(user) = user else {
        return Ok(Json(OnboardingView { user: None }).into_response());
    };

    match AuthState::of(&user).check(Page::Onboarding) {
        Ok(()) => Ok(Json(OnboardingView { user: Some(user) }).into_response()),
        Err(redirect) => Ok(redirect.into_response()),
    }
}

/// Patient landing view: verified doctors available for booking.
#[derive(Debug, Serialize)]
pub struct DoctorsView {
    pub user: User,
    pub doctors: Vec<User>,
}

/// GET /doctors
///
/// # Errors
///
/// Returns `AppError::Database` if a lookup fails.
pub async fn doctors(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
) -> Result<Response> {
    let users = UserRepository::new(state.pool());

    let Some(user) = users.get_by_identity_id(&identity.id).await? else {
        return Ok(Redirect::to(Page::Onboarding.path()).into_response());
    };

    if let Err(redirect) = AuthState::of(&user).check(Page::Doctors) {
        return Ok(redirect.into_response());
    }

    let doctors = users.list_verified_doctors().await?;

    Ok(Json(DoctorsView { user, doctors }).into_response())
}

/// Patient appointments view.
#[derive(Debug, Serialize)]
pub struct AppointmentsView {
    pub user: User,
    pub appointments: Vec<PatientAppointment>,
}

/// GET /appointments
///
/// # Errors
///
/// Returns `AppError::Database` if a lookup fails.
pub async fn appointments(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
) -> Result<Response> {
    let Some(user) = UserRepository::new(state.pool())
        .get_by_identity_id(&identity.id)
        .await?
    else {
        return Ok(Redirect::to(Page::Onboarding.path()).into_response());
    };

    if let Err(redirect) = AuthState::of(&user).check(Page::Appointments) {
        return Ok(redirect.into_response());
    }

    let appointments = AppointmentRepository::new(state.pool())
        .list_for_patient(user.id)
        .await?;

    Ok(Json(AppointmentsView { user, appointments }).into_response())
}

/// Doctor dashboard view model.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDashboardView {
    pub user: User,
    pub appointments: Vec<DoctorAppointment>,
    pub slots: Vec<Slot>,
    pub earnings: Earnings,
    pub payouts: Vec<Payout>,
}

/// GET /doctor
///
/// Loads the four dashboard resources concurrently, best-effort: a failed
/// sub-fetch leaves its section empty rather than blocking the dashboard.
/// Only the guard blocks rendering.
///
/// # Errors
///
/// Returns `AppError::Database` if the bridge lookup fails.
pub async fn doctor_dashboard(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
) -> Result<Response> {
    let Some(user) = UserRepository::new(state.pool())
        .get_by_identity_id(&identity.id)
        .await?
    else {
        return Ok(Redirect::to(Page::Onboarding.path()).into_response());
    };

    if let Err(redirect) = AuthState::of(&user).check(Page::DoctorDashboard) {
        return Ok(redirect.into_response());
    }

    let appointment_repo = AppointmentRepository::new(state.pool());
    let slot_repo = SlotRepository::new(state.pool());
    let payout_repo = PayoutRepository::new(state.pool());

    let (appointments, slots, completed, payouts) = tokio::join!(
        appointment_repo.list_for_doctor(user.id),
        slot_repo.list_for_doctor(user.id),
        appointment_repo.completed_for_doctor(user.id),
        payout_repo.list_for_doctor(user.id),
    );

    let appointments = appointments.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dashboard appointments fetch failed");
        Vec::new()
    });
    let slots = slots.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dashboard slots fetch failed");
        Vec::new()
    });
    let earnings = completed
        .map(|c| summarize(&c, Utc::now()))
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "dashboard earnings fetch failed");
            Earnings::default()
        });
    let payouts = payouts.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dashboard payouts fetch failed");
        Vec::new()
    });

    Ok(Json(DoctorDashboardView {
        user,
        appointments,
        slots,
        earnings,
        payouts,
    })
    .into_response())
}

/// Doctor verification view: the profile under review.
#[derive(Debug, Serialize)]
pub struct VerificationView {
    pub user: User,
}

/// GET /doctor/verification
///
/// Unverified doctors see their review state; verified doctors are
/// forwarded to the dashboard.
///
/// # Errors
///
/// Returns `AppError::Database` if the bridge lookup fails.
pub async fn doctor_verification(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
) -> Result<Response> {
    let Some(user) = UserRepository::new(state.pool())
        .get_by_identity_id(&identity.id)
        .await?
    else {
        return Ok(Redirect::to(Page::Onboarding.path()).into_response());
    };

    if let Err(redirect) = AuthState::of(&user).check(Page::DoctorVerification) {
        return Ok(redirect.into_response());
    }

    Ok(Json(VerificationView { user }).into_response())
}

/// Admin view model.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub user: User,
    pub pending_doctors: Vec<User>,
}

/// GET /admin
///
/// # Errors
///
/// Returns `AppError::Database` if a lookup fails.
pub async fn admin(
    State(state): State<AppState>,
    VerifiedCaller(identity): VerifiedCaller,
) -> Result<Response> {
    let users = UserRepository::new(state.pool());

    let Some(user) = users.get_by_identity_id(&identity.id).await? else {
        return Ok(Redirect::to(Page::Onboarding.path()).into_response());
    };

    if let Err(redirect) = AuthState::of(&user).check(Page::Admin) {
        return Ok(redirect.into_response());
    }

    let pending_doctors = users.list_pending_doctors().await?;

    Ok(Json(AdminView {
        user,
        pending_doctors,
    })
    .into_response())
}
