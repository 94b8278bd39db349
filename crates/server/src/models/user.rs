//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use medimeet_core::{Email, IdentityId, Role, TransactionId, TransactionType, UserId, VerificationStatus};

/// A platform user bridged from the external identity provider.
///
/// Doctor-only fields stay `None` until the user submits a doctor profile
/// during onboarding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Identity-provider id this record is bridged from.
    pub identity_id: IdentityId,
    /// Display name, assembled from the provider's name parts.
    pub name: String,
    /// Email address attested by the provider.
    pub email: Email,
    /// Avatar URL attested by the provider.
    pub image_url: Option<String>,
    /// Platform role.
    pub role: Role,
    pub specialty: Option<String>,
    /// Years of experience.
    pub experience: Option<i32>,
    /// Reference to the uploaded credential document.
    pub credential_url: Option<String>,
    pub description: Option<String>,
    /// Approval state; set once the user becomes a doctor.
    pub verification_status: Option<VerificationStatus>,
    /// Current credit balance.
    pub credits: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this doctor may enter the doctor dashboard.
    #[must_use]
    pub fn is_verified_doctor(&self) -> bool {
        self.role == Role::Doctor
            && self.verification_status == Some(VerificationStatus::Verified)
    }
}

/// A credit-ledger event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Credit package purchased, when applicable (e.g. `free_user`).
    pub package_id: Option<String>,
    /// Credits moved by this event.
    pub amount: i32,
    pub created_at: DateTime<Utc>,
}

/// Error returned when a submitted doctor profile is incomplete.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("All fields are required")]
pub struct ProfileValidationError;

/// The four profile fields a doctor must submit for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorProfile {
    pub specialty: String,
    pub experience: i32,
    pub credential_url: String,
    pub description: String,
}

impl DoctorProfile {
    /// Assemble a profile from optional form fields.
    ///
    /// All four fields must be present and non-blank; blank strings are what
    /// an empty form submission looks like after JSON decoding.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileValidationError`] when any field is missing or blank.
    pub fn validate(
        specialty: Option<String>,
        experience: Option<i32>,
        credential_url: Option<String>,
        description: Option<String>,
    ) -> Result<Self, ProfileValidationError> {
        let specialty = non_blank(specialty)?;
        let experience = experience.ok_or(ProfileValidationError)?;
        let credential_url = non_blank(credential_url)?;
        let description = non_blank(description)?;

        Ok(Self {
            specialty,
            experience,
            credential_url,
            description,
        })
    }
}

fn non_blank(field: Option<String>) -> Result<String, ProfileValidationError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ProfileValidationError),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_profile() -> (Option<String>, Option<i32>, Option<String>, Option<String>) {
        (
            Some("Cardiology".to_string()),
            Some(12),
            Some("https://credentials.example/dr-yu.pdf".to_string()),
            Some("Interventional cardiologist.".to_string()),
        )
    }

    #[test]
    fn test_complete_profile_validates() {
        let (s, e, c, d) = full_profile();
        let profile = DoctorProfile::validate(s, e, c, d).unwrap();
        assert_eq!(profile.specialty, "Cardiology");
        assert_eq!(profile.experience, 12);
    }

    #[test]
    fn test_each_missing_field_rejects() {
        let (s, e, c, d) = full_profile();
        assert!(DoctorProfile::validate(None, e, c.clone(), d.clone()).is_err());

        let (s2, _, c2, d2) = (s.clone(), e, c.clone(), d.clone());
        assert!(DoctorProfile::validate(s2, None, c2, d2).is_err());

        assert!(DoctorProfile::validate(s.clone(), e, None, d.clone()).is_err());
        assert!(DoctorProfile::validate(s, e, c, None).is_err());
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let (_, e, c, d) = full_profile();
        assert!(DoctorProfile::validate(Some("   ".to_string()), e, c, d).is_err());
    }

    #[test]
    fn test_verified_doctor_gate() {
        let mut user = sample_user();
        assert!(!user.is_verified_doctor());

        user.role = Role::Doctor;
        user.verification_status = Some(VerificationStatus::Pending);
        assert!(!user.is_verified_doctor());

        user.verification_status = Some(VerificationStatus::Verified);
        assert!(user.is_verified_doctor());
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("identityId").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("verificationStatus").is_some());
        assert_eq!(json["role"], "UNASSIGNED");
    }

    fn sample_user() -> User {
        User {
            id: UserId::generate(),
            identity_id: IdentityId::new("idp_1"),
            name: "Sam Yu".to_string(),
            email: Email::parse("sam@example.com").unwrap(),
            image_url: None,
            role: Role::Unassigned,
            specialty: None,
            experience: None,
            credential_url: None,
            description: None,
            verification_status: None,
            credits: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
