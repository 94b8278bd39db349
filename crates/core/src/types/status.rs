//! Role and status enums with their transition rules.
//!
//! Roles and verification states were free-form strings in earlier
//! iterations of the platform. They are modeled here as closed enums, and
//! every mutation path goes through a transition function so that an invalid
//! move is a typed error rather than a silently stored string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a role or verification transition is not allowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The requested role can never be self-assigned (e.g. ADMIN).
    #[error("invalid role selection: {0}")]
    InvalidRoleSelection(String),

    /// The user already holds a role that cannot change to the requested one.
    #[error("role already assigned: {current}")]
    RoleAlreadyAssigned {
        /// The role currently held.
        current: Role,
    },

    /// Admin decisions can only land on VERIFIED or REJECTED.
    #[error("PENDING is not a valid verification decision")]
    PendingIsNotADecision,
}

/// Platform role of a user.
///
/// Every user starts as [`Role::Unassigned`] when the bridge provisions the
/// record and picks PATIENT or DOCTOR exactly once during onboarding.
/// ADMIN is never self-assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Freshly provisioned, onboarding not completed.
    #[default]
    Unassigned,
    Patient,
    Doctor,
    Admin,
}

impl Role {
    /// Check whether a user holding `self` may take `requested` through the
    /// onboarding role-assignment operation.
    ///
    /// Allowed moves:
    /// - `UNASSIGNED -> PATIENT`
    /// - `UNASSIGNED -> DOCTOR`
    /// - `DOCTOR -> DOCTOR` (profile resubmission after rejection)
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidRoleSelection`] when `requested` is
    /// not PATIENT or DOCTOR, and [`TransitionError::RoleAlreadyAssigned`]
    /// for any other disallowed move.
    pub fn assign(self, requested: Self) -> Result<Self, TransitionError> {
        if !matches!(requested, Self::Patient | Self::Doctor) {
            return Err(TransitionError::InvalidRoleSelection(requested.to_string()));
        }

        match (self, requested) {
            (Self::Unassigned, _) | (Self::Doctor, Self::Doctor) => Ok(requested),
            (current, _) => Err(TransitionError::RoleAlreadyAssigned { current }),
        }
    }

    /// Whether onboarding is still outstanding for this role.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        matches!(self, Self::Unassigned)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unassigned => write!(f, "UNASSIGNED"),
            Self::Patient => write!(f, "PATIENT"),
            Self::Doctor => write!(f, "DOCTOR"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNASSIGNED" => Ok(Self::Unassigned),
            "PATIENT" => Ok(Self::Patient),
            "DOCTOR" => Ok(Self::Doctor),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Admin-controlled approval state gating doctor dashboard access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "verification_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    /// The state a doctor profile enters on (re)submission.
    ///
    /// Submitting again after REJECTED returns the profile to PENDING; this
    /// is the only path back into review.
    #[must_use]
    pub const fn submitted() -> Self {
        Self::Pending
    }

    /// Apply an admin verification decision.
    ///
    /// Decisions are idempotent: confirming an already VERIFIED doctor is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::PendingIsNotADecision`] when the target is
    /// PENDING - admins decide, they do not re-queue.
    pub fn decide(self, target: Self) -> Result<Self, TransitionError> {
        match target {
            Self::Verified | Self::Rejected => Ok(target),
            Self::Pending => Err(TransitionError::PendingIsNotADecision),
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Verified => write!(f, "VERIFIED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "VERIFIED" => Ok(Self::Verified),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(format!("invalid verification status: {s}")),
        }
    }
}

/// Lifecycle state of a booked appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "appointment_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Kind of credit-ledger event recorded for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "transaction_type", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Credits purchased (or granted, for the zero-amount signup record).
    CreditPurchase,
    /// Credits consumed by booking an appointment.
    AppointmentDeduction,
}

/// Processing state of a doctor payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payout_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutStatus {
    #[default]
    Processing,
    Processed,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_unassigned_can_become_patient_or_doctor() {
        assert_eq!(Role::Unassigned.assign(Role::Patient), Ok(Role::Patient));
        assert_eq!(Role::Unassigned.assign(Role::Doctor), Ok(Role::Doctor));
    }

    #[test]
    fn test_doctor_can_resubmit() {
        assert_eq!(Role::Doctor.assign(Role::Doctor), Ok(Role::Doctor));
    }

    #[test]
    fn test_admin_is_never_self_assigned() {
        let err = Role::Unassigned.assign(Role::Admin).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidRoleSelection(_)));

        let err = Role::Unassigned.assign(Role::Unassigned).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidRoleSelection(_)));
    }

    #[test]
    fn test_assigned_roles_cannot_switch() {
        assert_eq!(
            Role::Patient.assign(Role::Doctor),
            Err(TransitionError::RoleAlreadyAssigned {
                current: Role::Patient
            })
        );
        assert_eq!(
            Role::Doctor.assign(Role::Patient),
            Err(TransitionError::RoleAlreadyAssigned {
                current: Role::Doctor
            })
        );
        assert_eq!(
            Role::Admin.assign(Role::Patient),
            Err(TransitionError::RoleAlreadyAssigned {
                current: Role::Admin
            })
        );
    }

    #[test]
    fn test_resubmission_returns_to_pending() {
        assert_eq!(VerificationStatus::submitted(), VerificationStatus::Pending);
    }

    #[test]
    fn test_admin_decisions() {
        for from in [
            VerificationStatus::Pending,
            VerificationStatus::Verified,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(
                from.decide(VerificationStatus::Verified),
                Ok(VerificationStatus::Verified)
            );
            assert_eq!(
                from.decide(VerificationStatus::Rejected),
                Ok(VerificationStatus::Rejected)
            );
            assert_eq!(
                from.decide(VerificationStatus::Pending),
                Err(TransitionError::PendingIsNotADecision)
            );
        }
    }

    #[test]
    fn test_wire_format_is_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Patient).unwrap(), "\"PATIENT\"");
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::CreditPurchase).unwrap(),
            "\"CREDIT_PURCHASE\""
        );
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );

        let role: Role = serde_json::from_str("\"DOCTOR\"").unwrap();
        assert_eq!(role, Role::Doctor);
    }

    #[test]
    fn test_from_str_matches_display() {
        for role in [Role::Unassigned, Role::Patient, Role::Doctor, Role::Admin] {
            assert_eq!(Role::from_str(&role.to_string()), Ok(role));
        }
        assert!(Role::from_str("patient").is_err());
    }
}
