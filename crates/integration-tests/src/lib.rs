//! Integration tests for MediMeet.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations + seed
//! cargo run -p medimeet-cli -- migrate
//! cargo run -p medimeet-cli -- seed
//!
//! # Start the server
//! cargo run -p medimeet-server
//!
//! # Run integration tests
//! cargo test -p medimeet-integration-tests -- --include-ignored
//! ```
//!
//! # Environment Variables
//!
//! - `MEDIMEET_BASE_URL` - Server under test (default: http://localhost:3000)
//! - `MEDIMEET_TEST_PATIENT_TOKEN` - Identity-provider session token for a
//!   seeded patient (needed by the authenticated flows)
//! - `MEDIMEET_TEST_DOCTOR_TOKEN` - Session token for a seeded verified
//!   doctor

use reqwest::Client;

/// Base URL for the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("MEDIMEET_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client that does not follow redirects, so the gated view
/// redirects stay observable.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Session token for a seeded patient, when provided.
#[must_use]
pub fn patient_token() -> Option<String> {
    std::env::var("MEDIMEET_TEST_PATIENT_TOKEN").ok()
}

/// Session token for a seeded verified doctor, when provided.
#[must_use]
pub fn doctor_token() -> Option<String> {
    std::env::var("MEDIMEET_TEST_DOCTOR_TOKEN").ok()
}
