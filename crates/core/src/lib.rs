//! MediMeet Core - Shared domain types.
//!
//! This crate provides common types used across all MediMeet components:
//! - `server` - Appointment platform API and gated view routes
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and transition rules - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, role and verification state machines, emails,
//!   and the specialty catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
