//! Demo data seeding command.
//!
//! Provisions a small, coherent world for local development: an admin, a
//! verified doctor with availability and history, a doctor still pending
//! review, and a patient with one booked and one completed appointment.

use chrono::{Duration, NaiveTime, Utc};
use rust_decimal::Decimal;

use medimeet_core::{AppointmentStatus, Email, IdentityId, VerificationStatus};
use medimeet_server::db::{
    AppointmentRepository, PayoutRepository, SlotRepository, UserRepository,
};
use medimeet_server::models::DoctorProfile;

use super::{CommandError, connect};

const VISIT_PRICE_CENTS: i64 = 2000;

/// Seed the database with demo data.
///
/// Idempotence is not attempted: run against a freshly migrated database.
///
/// # Errors
///
/// Returns `CommandError` when any insert fails.
#[allow(clippy::too_many_lines)]
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let users = UserRepository::new(&pool);
    let slots = SlotRepository::new(&pool);
    let appointments = AppointmentRepository::new(&pool);
    let payouts = PayoutRepository::new(&pool);

    // Admin
    let admin_identity = IdentityId::new("idp_seed_admin");
    users
        .create_provisioned(
            &admin_identity,
            "Avery Quinn",
            &parse_email("avery.quinn@medimeet.health"),
            None,
        )
        .await?;
    users.grant_admin(&admin_identity).await?;
    tracing::info!("seeded admin");

    // Verified doctor with availability, history, and a payout
    let doctor_identity = IdentityId::new("idp_seed_doctor_verified");
    let doctor = users
        .create_provisioned(
            &doctor_identity,
            "Imani Okafor",
            &parse_email("imani.okafor@medimeet.health"),
            Some("https://img.medimeet.health/imani.png"),
        )
        .await?;
    users
        .set_doctor_profile(
            &doctor_identity,
            &DoctorProfile {
                specialty: "General Medicine".to_string(),
                experience: 11,
                credential_url: "https://credentials.medimeet.health/okafor.pdf".to_string(),
                description: "General practitioner focused on preventive care.".to_string(),
            },
        )
        .await?;
    users
        .set_verification_status(doctor.id, VerificationStatus::Verified)
        .await?;

    let today = Utc::now().date_naive();
    let morning = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
    let afternoon = NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default();
    let evening = NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default();

    let open_slot = slots
        .create(doctor.id, today + Duration::days(2), morning, noon)
        .await?;
    let booked_slot = slots
        .create(doctor.id, today + Duration::days(3), afternoon, evening)
        .await?;
    let past_slot = slots
        .create(doctor.id, today - Duration::days(7), morning, noon)
        .await?;
    tracing::info!(open_slot = %open_slot.id, "seeded availability");

    // Pending doctor for the verification queue
    let pending_identity = IdentityId::new("idp_seed_doctor_pending");
    users
        .create_provisioned(
            &pending_identity,
            "Lucas Meyer",
            &parse_email("lucas.meyer@medimeet.health"),
            None,
        )
        .await?;
    users
        .set_doctor_profile(
            &pending_identity,
            &DoctorProfile {
                specialty: "Dermatology".to_string(),
                experience: 4,
                credential_url: "https://credentials.medimeet.health/meyer.pdf".to_string(),
                description: "Dermatologist, recently relocated.".to_string(),
            },
        )
        .await?;
    tracing::info!("seeded pending doctor");

    // Patient with one upcoming and one completed appointment
    let patient_identity = IdentityId::new("idp_seed_patient");
    let patient = users
        .create_provisioned(
            &patient_identity,
            "Noa Berg",
            &parse_email("noa.berg@medimeet.health"),
            None,
        )
        .await?;
    users.set_patient_role(&patient_identity).await?;

    let price = Decimal::new(VISIT_PRICE_CENTS, 2);
    appointments
        .book(patient.id, doctor.id, booked_slot.id, price, Some("Follow-up"))
        .await?;

    let completed = appointments
        .book(patient.id, doctor.id, past_slot.id, price, None)
        .await?;
    sqlx::query("UPDATE appointments SET status = $1, updated_at = now() WHERE id = $2")
        .bind(AppointmentStatus::Completed)
        .bind(completed.id)
        .execute(&pool)
        .await?;
    tracing::info!("seeded appointments");

    payouts
        .create(
            doctor.id,
            Decimal::new(1600, 2),
            2,
            Decimal::new(320, 2),
            Decimal::new(1280, 2),
            "imani.okafor@paypal.example",
        )
        .await?;
    tracing::info!("seeded payout");

    tracing::info!("Seed complete!");
    Ok(())
}

fn parse_email(raw: &str) -> Email {
    Email::parse(raw).expect("seed email addresses are well-formed")
}
