//! Appointment and slot domain types, including the joined views the
//! listing endpoints return.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use medimeet_core::{AppointmentId, AppointmentStatus, SlotId, UserId};

/// A doctor-defined bookable time interval.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: SlotId,
    pub doctor_id: UserId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

/// An appointment as stored, without joined counterpart data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: UserId,
    pub doctor_id: UserId,
    pub slot_id: SlotId,
    pub status: AppointmentStatus,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Slot timing fields included with every appointment listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotTiming {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// The doctor identity fields a patient sees on their appointments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSummary {
    pub name: String,
    pub specialty: Option<String>,
    pub image_url: Option<String>,
}

/// The patient identity fields a doctor sees on their appointments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub name: String,
    pub image_url: Option<String>,
}

/// An appointment row shaped for the patient listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAppointment {
    pub id: AppointmentId,
    pub status: AppointmentStatus,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub doctor: DoctorSummary,
    pub slot: SlotTiming,
}

/// An appointment row shaped for the doctor listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAppointment {
    pub id: AppointmentId,
    pub status: AppointmentStatus,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub patient: PatientSummary,
    pub slot: SlotTiming,
}

/// The two fields earnings aggregation needs from a completed appointment.
#[derive(Debug, Clone, Copy)]
pub struct CompletedAppointment {
    pub amount: Decimal,
    pub updated_at: DateTime<Utc>,
}
