//! The fixed catalog of medical specialties offered on the platform.

/// Specialties a doctor can register under, in display order.
pub const SPECIALTIES: &[&str] = &[
    "General Medicine",
    "Cardiology",
    "Dermatology",
    "Endocrinology",
    "Gastroenterology",
    "Neurology",
    "Obstetrics & Gynecology",
    "Oncology",
    "Ophthalmology",
    "Orthopedics",
    "Pediatrics",
    "Psychiatry",
    "Pulmonology",
    "Radiology",
    "Urology",
    "Other",
];

/// Check whether a specialty name is part of the catalog.
#[must_use]
pub fn is_known_specialty(name: &str) -> bool {
    SPECIALTIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_membership() {
        assert!(is_known_specialty("Cardiology"));
        assert!(is_known_specialty("Other"));
        assert!(!is_known_specialty("cardiology"));
        assert!(!is_known_specialty("Astrology"));
    }
}
