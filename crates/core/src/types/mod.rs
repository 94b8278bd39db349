//! Core types for MediMeet.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod specialty;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use specialty::SPECIALTIES;
pub use status::*;
