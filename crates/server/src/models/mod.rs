//! Domain types for the appointment platform.
//!
//! These types represent validated domain objects separate from database row
//! types; repositories convert rows into them and handlers serialize them
//! onto the wire.

pub mod appointment;
pub mod payout;
pub mod user;

pub use appointment::{
    Appointment, CompletedAppointment, DoctorAppointment, DoctorSummary, PatientAppointment,
    PatientSummary, Slot, SlotTiming,
};
pub use payout::Payout;
pub use user::{DoctorProfile, ProfileValidationError, Transaction, User};
