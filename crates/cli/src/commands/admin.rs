//! Admin management command.
//!
//! Admins are never self-assigned through the onboarding flow; promotion
//! happens here, against an already-provisioned user.

use medimeet_core::IdentityId;
use medimeet_server::db::UserRepository;

use super::{CommandError, connect};

/// Promote an existing user to ADMIN.
///
/// # Errors
///
/// Returns `CommandError::Repository` when the user does not exist or the
/// update fails.
pub async fn grant(identity_id: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    let identity_id = IdentityId::new(identity_id);

    UserRepository::new(&pool).grant_admin(&identity_id).await?;

    tracing::info!(%identity_id, "user promoted to ADMIN");
    Ok(())
}
