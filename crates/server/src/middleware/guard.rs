//! Route guard over a typed authorization state.
//!
//! Protected views used to each fetch the bridged user and hand-roll their
//! own redirect rules. The guard centralizes that: [`AuthState`] captures
//! role + verification, [`AuthState::destination`] is the single mapping
//! from state to home page, and [`AuthState::check`] answers whether a page
//! may render or where to send the caller instead.

use axum::response::Redirect;

use medimeet_core::{Role, VerificationStatus};

use crate::models::User;

/// The protected pages of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Onboarding,
    /// Patient landing: browse doctors.
    Doctors,
    /// Patient appointment list.
    Appointments,
    DoctorDashboard,
    DoctorVerification,
    Admin,
}

impl Page {
    /// URL path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Onboarding => "/onboarding",
            Self::Doctors => "/doctors",
            Self::Appointments => "/appointments",
            Self::DoctorDashboard => "/doctor",
            Self::DoctorVerification => "/doctor/verification",
            Self::Admin => "/admin",
        }
    }
}

/// Typed authorization state of a bridged user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthState {
    pub role: Role,
    pub verification: Option<VerificationStatus>,
}

impl AuthState {
    /// Capture the authorization state of a bridged user.
    #[must_use]
    pub const fn of(user: &User) -> Self {
        Self {
            role: user.role,
            verification: user.verification_status,
        }
    }

    /// The page this state lands on after onboarding redirects settle.
    #[must_use]
    pub const fn destination(self) -> Page {
        match self.role {
            Role::Unassigned => Page::Onboarding,
            Role::Patient => Page::Doctors,
            Role::Doctor => match self.verification {
                Some(VerificationStatus::Verified) => Page::DoctorDashboard,
                _ => Page::DoctorVerification,
            },
            Role::Admin => Page::Admin,
        }
    }

    /// Whether this state may render the given page.
    #[must_use]
    pub fn allows(self, page: Page) -> bool {
        match page {
            // Patients have two pages; everyone else only their destination.
            Page::Appointments => self.role == Role::Patient,
            _ => self.destination() == page,
        }
    }

    /// Guard a page: `Ok` to render, or the redirect to follow.
    ///
    /// # Errors
    ///
    /// Returns the redirect to this state's destination when the page is not
    /// allowed.
    pub fn check(self, page: Page) -> Result<(), Redirect> {
        if self.allows(page) {
            Ok(())
        } else {
            Err(Redirect::to(self.destination().path()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn state(role: Role, verification: Option<VerificationStatus>) -> AuthState {
        AuthState { role, verification }
    }

    #[test]
    fn test_destination_mapping() {
        assert_eq!(state(Role::Unassigned, None).destination(), Page::Onboarding);
        assert_eq!(state(Role::Patient, None).destination(), Page::Doctors);
        assert_eq!(
            state(Role::Doctor, Some(VerificationStatus::Verified)).destination(),
            Page::DoctorDashboard
        );
        assert_eq!(
            state(Role::Doctor, Some(VerificationStatus::Pending)).destination(),
            Page::DoctorVerification
        );
        assert_eq!(
            state(Role::Doctor, Some(VerificationStatus::Rejected)).destination(),
            Page::DoctorVerification
        );
        // A doctor row without a status is treated as not yet verified
        assert_eq!(
            state(Role::Doctor, None).destination(),
            Page::DoctorVerification
        );
        assert_eq!(state(Role::Admin, None).destination(), Page::Admin);
    }

    #[test]
    fn test_patient_pages() {
        let patient = state(Role::Patient, None);
        assert!(patient.allows(Page::Doctors));
        assert!(patient.allows(Page::Appointments));
        assert!(!patient.allows(Page::DoctorDashboard));
        assert!(!patient.allows(Page::Admin));
        assert!(!patient.allows(Page::Onboarding));
    }

    #[test]
    fn test_unverified_doctor_is_held_at_verification() {
        let doctor = state(Role::Doctor, Some(VerificationStatus::Pending));
        assert!(doctor.allows(Page::DoctorVerification));
        assert!(!doctor.allows(Page::DoctorDashboard));
    }

    #[test]
    fn test_verified_doctor_skips_verification_page() {
        let doctor = state(Role::Doctor, Some(VerificationStatus::Verified));
        assert!(doctor.allows(Page::DoctorDashboard));
        // Forwarded onward, mirroring the verification page's redirect
        assert!(!doctor.allows(Page::DoctorVerification));
        assert!(doctor.check(Page::DoctorVerification).is_err());
    }

    #[test]
    fn test_assigned_roles_leave_onboarding() {
        for s in [
            state(Role::Patient, None),
            state(Role::Doctor, Some(VerificationStatus::Pending)),
            state(Role::Admin, None),
        ] {
            assert!(!s.allows(Page::Onboarding));
        }
        assert!(state(Role::Unassigned, None).allows(Page::Onboarding));
    }
}
