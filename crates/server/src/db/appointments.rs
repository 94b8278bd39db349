//! Appointment repository: role-scoped listings, earnings input, booking.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use medimeet_core::{AppointmentId, AppointmentStatus, SlotId, UserId};

use super::RepositoryError;
use crate::models::appointment::{
    Appointment, CompletedAppointment, DoctorAppointment, DoctorSummary, PatientAppointment,
    PatientSummary, SlotTiming,
};

#[derive(sqlx::FromRow)]
struct PatientAppointmentRow {
    id: Uuid,
    status: AppointmentStatus,
    amount: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    doctor_name: String,
    doctor_specialty: Option<String>,
    doctor_image_url: Option<String>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl From<PatientAppointmentRow> for PatientAppointment {
    fn from(row: PatientAppointmentRow) -> Self {
        Self {
            id: AppointmentId::new(row.id),
            status: row.status,
            amount: row.amount,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            doctor: DoctorSummary {
                name: row.doctor_name,
                specialty: row.doctor_specialty,
                image_url: row.doctor_image_url,
            },
            slot: SlotTiming {
                date: row.date,
                start_time: row.start_time,
                end_time: row.end_time,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct DoctorAppointmentRow {
    id: Uuid,
    status: AppointmentStatus,
    amount: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    patient_name: String,
    patient_image_url: Option<String>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl From<DoctorAppointmentRow> for DoctorAppointment {
    fn from(row: DoctorAppointmentRow) -> Self {
        Self {
            id: AppointmentId::new(row.id),
            status: row.status,
            amount: row.amount,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            patient: PatientSummary {
                name: row.patient_name,
                image_url: row.patient_image_url,
            },
            slot: SlotTiming {
                date: row.date,
                start_time: row.start_time,
                end_time: row.end_time,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    patient_id: Uuid,
    doctor_id: Uuid,
    slot_id: Uuid,
    status: AppointmentStatus,
    amount: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Self {
            id: AppointmentId::new(row.id),
            patient_id: UserId::new(row.patient_id),
            doctor_id: UserId::new(row.doctor_id),
            slot_id: SlotId::new(row.slot_id),
            status: row.status,
            amount: row.amount,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CompletedRow {
    amount: Decimal,
    updated_at: DateTime<Utc>,
}

/// Repository for appointment database operations.
pub struct AppointmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AppointmentRepository<'a> {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All appointments of a patient with doctor identity and slot timing,
    /// newest-created first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_patient(
        &self,
        patient_id: UserId,
    ) -> Result<Vec<PatientAppointment>, RepositoryError> {
        let rows: Vec<PatientAppointmentRow> = sqlx::query_as(
            "SELECT a.id, a.status, a.amount, a.notes, a.created_at, a.updated_at, \
                    d.name AS doctor_name, d.specialty AS doctor_specialty, \
                    d.image_url AS doctor_image_url, \
                    s.date, s.start_time, s.end_time \
             FROM appointments a \
             JOIN users d ON d.id = a.doctor_id \
             JOIN slots s ON s.id = a.slot_id \
             WHERE a.patient_id = $1 \
             ORDER BY a.created_at DESC",
        )
        .bind(patient_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PatientAppointment::from).collect())
    }

    /// All appointments of a doctor with patient identity and slot timing,
    /// newest-created first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_doctor(
        &self,
        doctor_id: UserId,
    ) -> Result<Vec<DoctorAppointment>, RepositoryError> {
        let rows: Vec<DoctorAppointmentRow> = sqlx::query_as(
            "SELECT a.id, a.status, a.amount, a.notes, a.created_at, a.updated_at, \
                    p.name AS patient_name, p.image_url AS patient_image_url, \
                    s.date, s.start_time, s.end_time \
             FROM appointments a \
             JOIN users p ON p.id = a.patient_id \
             JOIN slots s ON s.id = a.slot_id \
             WHERE a.doctor_id = $1 \
             ORDER BY a.created_at DESC",
        )
        .bind(doctor_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(DoctorAppointment::from).collect())
    }

    /// Amount and last-update time of every COMPLETED appointment of a
    /// doctor, for earnings aggregation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn completed_for_doctor(
        &self,
        doctor_id: UserId,
    ) -> Result<Vec<CompletedAppointment>, RepositoryError> {
        let rows: Vec<CompletedRow> = sqlx::query_as(
            "SELECT amount, updated_at FROM appointments \
             WHERE doctor_id = $1 AND status = $2",
        )
        .bind(doctor_id)
        .bind(AppointmentStatus::Completed)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CompletedAppointment {
                amount: r.amount,
                updated_at: r.updated_at,
            })
            .collect())
    }

    /// Book a slot for a patient.
    ///
    /// The UNIQUE constraint on `slot_id` is the double-booking guard: when
    /// two bookings race, exactly one insert succeeds and the other maps to
    /// `Conflict` here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slot is already booked.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn book(
        &self,
        patient_id: UserId,
        doctor_id: UserId,
        slot_id: SlotId,
        amount: Decimal,
        notes: Option<&str>,
    ) -> Result<Appointment, RepositoryError> {
        let row: AppointmentRow = sqlx::query_as(
            "INSERT INTO appointments (patient_id, doctor_id, slot_id, status, amount, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, patient_id, doctor_id, slot_id, status, amount, notes, \
                       created_at, updated_at",
        )
        .bind(patient_id)
        .bind(doctor_id)
        .bind(slot_id)
        .bind(AppointmentStatus::Scheduled)
        .bind(amount)
        .bind(notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("This slot has already been booked".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Appointment::from(row))
    }
}
