//! User repository for database operations.
//!
//! Queries use the runtime `query_as` API with explicit row structs; rows
//! are converted into domain types before leaving this module.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use medimeet_core::{
    Email, IdentityId, Role, TransactionId, TransactionType, UserId, VerificationStatus,
};

use super::RepositoryError;
use crate::models::user::{DoctorProfile, Transaction, User};

/// Database row for a user, prior to domain validation.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    identity_id: String,
    name: String,
    email: String,
    image_url: Option<String>,
    role: Role,
    specialty: Option<String>,
    experience: Option<i32>,
    credential_url: Option<String>,
    description: Option<String>,
    verification_status: Option<VerificationStatus>,
    credits: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            identity_id: IdentityId::new(self.identity_id),
            name: self.name,
            email,
            image_url: self.image_url,
            role: self.role,
            specialty: self.specialty,
            experience: self.experience,
            credential_url: self.credential_url,
            description: self.description,
            verification_status: self.verification_status,
            credits: self.credits,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    #[sqlx(rename = "type")]
    kind: TransactionType,
    package_id: Option<String>,
    amount: i32,
    created_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: TransactionId::new(row.id),
            user_id: UserId::new(row.user_id),
            kind: row.kind,
            package_id: row.package_id,
            amount: row.amount,
            created_at: row.created_at,
        }
    }
}

const USER_COLUMNS: &str = "id, identity_id, name, email, image_url, role, specialty, \
     experience, credential_url, description, verification_status, credits, \
     created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by the identity-provider id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_identity_id(
        &self,
        identity_id: &IdentityId,
    ) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE identity_id = $1"
        ))
        .bind(identity_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Provision a user record on first authenticated contact.
    ///
    /// Creates the user together with a zero-amount `free_user`
    /// credit-purchase transaction, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the identity id is already
    /// provisioned (e.g. two concurrent first calls).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_provisioned(
        &self,
        identity_id: &IdentityId,
        name: &str,
        email: &Email,
        image_url: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (identity_id, name, email, image_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(identity_id.as_str())
        .bind(name)
        .bind(email.as_str())
        .bind(image_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("identity already provisioned".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        sqlx::query(
            "INSERT INTO transactions (user_id, type, package_id, amount) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(row.id)
        .bind(TransactionType::CreditPurchase)
        .bind("free_user")
        .bind(0_i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_user()
    }

    /// Get the user's most recent credit purchase since `since`.
    ///
    /// The bridge includes at most one transaction, newest first, from the
    /// start of the current calendar month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest_credit_purchase_since(
        &self,
        user_id: UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            "SELECT id, user_id, type, package_id, amount, created_at \
             FROM transactions \
             WHERE user_id = $1 AND type = $2 AND created_at >= $3 \
             ORDER BY created_at DESC \
             LIMIT 1",
        )
        .bind(user_id)
        .bind(TransactionType::CreditPurchase)
        .bind(since)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    /// Assign the PATIENT role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_patient_role(&self, identity_id: &IdentityId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET role = $1, updated_at = now() WHERE identity_id = $2",
        )
        .bind(Role::Patient)
        .bind(identity_id.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Assign the DOCTOR role with the submitted profile.
    ///
    /// A full-field overwrite: all four profile fields are written and the
    /// verification status returns to PENDING, which is what allows a
    /// REJECTED doctor to resubmit through this same operation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_doctor_profile(
        &self,
        identity_id: &IdentityId,
        profile: &DoctorProfile,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users \
             SET role = $1, specialty = $2, experience = $3, credential_url = $4, \
                 description = $5, verification_status = $6, updated_at = now() \
             WHERE identity_id = $7",
        )
        .bind(Role::Doctor)
        .bind(&profile.specialty)
        .bind(profile.experience)
        .bind(&profile.credential_url)
        .bind(&profile.description)
        .bind(VerificationStatus::submitted())
        .bind(identity_id.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Apply an admin verification decision to a doctor.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no doctor with that id exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_verification_status(
        &self,
        doctor_id: UserId,
        status: VerificationStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET verification_status = $1, updated_at = now() \
             WHERE id = $2 AND role = $3",
        )
        .bind(status)
        .bind(doctor_id)
        .bind(Role::Doctor)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Doctors awaiting verification, oldest submission first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn list_pending_doctors(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE role = $1 AND verification_status = $2 \
             ORDER BY created_at ASC"
        ))
        .bind(Role::Doctor)
        .bind(VerificationStatus::Pending)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Verified doctors available for booking, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn list_verified_doctors(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE role = $1 AND verification_status = $2 \
             ORDER BY name ASC"
        ))
        .bind(Role::Doctor)
        .bind(VerificationStatus::Verified)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Promote a user to ADMIN.
    ///
    /// Admins are never self-assigned; this is reachable only through the
    /// operations CLI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn grant_admin(&self, identity_id: &IdentityId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET role = $1, updated_at = now() WHERE identity_id = $2",
        )
        .bind(Role::Admin)
        .bind(identity_id.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
