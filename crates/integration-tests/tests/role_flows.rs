//! Integration tests for the authenticated role flows.
//!
//! These tests require:
//! - A running `PostgreSQL` database, migrated and seeded
//! - The server running (cargo run -p medimeet-server)
//! - Identity-provider session tokens in `MEDIMEET_TEST_PATIENT_TOKEN` /
//!   `MEDIMEET_TEST_DOCTOR_TOKEN` matching the seeded users
//!
//! Run with: cargo test -p medimeet-integration-tests -- --include-ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use medimeet_integration_tests::{base_url, client, doctor_token, patient_token};

async fn check_user(token: &str) -> Value {
    let resp = client()
        .post(format!("{}/api/user/check", base_url()))
        .bearer_auth(token)
        .json(&json!({ "identityUserId": patient_identity_id() }))
        .send()
        .await
        .expect("Failed to call user check");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse user check body")
}

/// The identity id the patient token was issued for; defaults to the seeded
/// patient.
fn patient_identity_id() -> String {
    std::env::var("MEDIMEET_TEST_IDENTITY_ID")
        .unwrap_or_else(|_| "idp_seed_patient".to_string())
}

#[tokio::test]
#[ignore = "Requires running server and identity-provider test tokens"]
async fn test_bridge_is_idempotent() {
    let Some(token) = patient_token() else {
        panic!("MEDIMEET_TEST_PATIENT_TOKEN not set");
    };

    let first = check_user(&token).await;
    let second = check_user(&token).await;

    assert_eq!(first["user"]["id"], second["user"]["id"]);
    assert_eq!(first["user"]["role"], second["user"]["role"]);
}

#[tokio::test]
#[ignore = "Requires running server and identity-provider test tokens"]
async fn test_mismatched_claimed_id_is_unauthorized() {
    let Some(token) = patient_token() else {
        panic!("MEDIMEET_TEST_PATIENT_TOKEN not set");
    };

    let resp = client()
        .post(format!("{}/api/user/check", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "identityUserId": "idp_someone_else" }))
        .send()
        .await
        .expect("Failed to call user check");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and identity-provider test tokens"]
async fn test_patient_cannot_read_doctor_appointments() {
    let Some(token) = patient_token() else {
        panic!("MEDIMEET_TEST_PATIENT_TOKEN not set");
    };
    let claimed = patient_identity_id();

    let resp = client()
        .post(format!("{}/api/doctor/appointments", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "identityUserId": claimed }))
        .send()
        .await
        .expect("Failed to call doctor appointments");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
#[ignore = "Requires running server and identity-provider test tokens"]
async fn test_doctor_earnings_shape() {
    let Some(token) = doctor_token() else {
        panic!("MEDIMEET_TEST_DOCTOR_TOKEN not set");
    };
    let claimed = std::env::var("MEDIMEET_TEST_DOCTOR_IDENTITY_ID")
        .unwrap_or_else(|_| "idp_seed_doctor_verified".to_string());

    let resp = client()
        .post(format!("{}/api/doctor/earnings", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "identityUserId": claimed }))
        .send()
        .await
        .expect("Failed to call earnings");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse earnings body");

    let earnings = &body["earnings"];
    assert!(earnings.get("total").is_some());
    assert!(earnings.get("thisMonth").is_some());
    assert!(earnings["totalAppointments"].is_u64());
}

#[tokio::test]
#[ignore = "Requires running server and identity-provider test tokens"]
async fn test_double_booking_is_rejected() {
    let Some(token) = patient_token() else {
        panic!("MEDIMEET_TEST_PATIENT_TOKEN not set");
    };
    let claimed = patient_identity_id();
    let doctor_id = std::env::var("MEDIMEET_TEST_DOCTOR_ID")
        .expect("MEDIMEET_TEST_DOCTOR_ID not set (seeded doctor's user id)");
    let slot_id = std::env::var("MEDIMEET_TEST_OPEN_SLOT_ID")
        .expect("MEDIMEET_TEST_OPEN_SLOT_ID not set (seeded open slot id)");

    let book = || async {
        client()
            .post(format!("{}/api/appointments/book", base_url()))
            .bearer_auth(&token)
            .json(&json!({
                "identityUserId": claimed,
                "doctorId": doctor_id,
                "slotId": slot_id,
            }))
            .send()
            .await
            .expect("Failed to call book")
    };

    let first = book().await;
    let second = book().await;

    let statuses = [first.status(), second.status()];
    assert!(statuses.contains(&StatusCode::OK));
    assert!(statuses.contains(&StatusCode::CONFLICT));
}
