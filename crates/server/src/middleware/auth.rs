//! Authentication extractors.
//!
//! Requests carry a bearer session token issued by the external identity
//! provider; the extractors below resolve it into a [`VerifiedIdentity`]
//! through the provider client on [`AppState`].

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use medimeet_core::IdentityId;

use crate::error::AppError;
use crate::identity::VerifiedIdentity;
use crate::state::AppState;

/// Extractor that requires a verified identity.
///
/// API requests without a valid token get `401`; view requests are sent to
/// `/onboarding`, where the sign-in prompt lives.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     VerifiedCaller(identity): VerifiedCaller,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.full_name())
/// }
/// ```
pub struct VerifiedCaller(pub VerifiedIdentity);

/// Error returned when identity verification is required but fails.
pub enum AuthRejection {
    /// Redirect to the onboarding page (for view requests).
    RedirectToOnboarding,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToOnboarding => Redirect::to("/onboarding").into_response(),
            Self::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })))
                    .into_response()
            }
        }
    }
}

fn rejection_for(parts: &Parts) -> AuthRejection {
    if parts.uri.path().starts_with("/api/") {
        AuthRejection::Unauthorized
    } else {
        AuthRejection::RedirectToOnboarding
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for VerifiedCaller {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Err(rejection_for(parts));
        };

        let identity = state
            .identity()
            .verify_token(token)
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "identity verification failed");
                rejection_for(parts)
            })?;

        crate::error::set_sentry_user(&identity.id, Some(&identity.email));

        Ok(Self(identity))
    }
}

/// Extractor that optionally resolves the caller's identity.
///
/// Unlike `VerifiedCaller`, this does not reject the request when no valid
/// token is presented; the onboarding view uses it to show a sign-in prompt
/// to anonymous visitors.
pub struct OptionalCaller(pub Option<VerifiedIdentity>);

impl FromRequestParts<AppState> for OptionalCaller {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match bearer_token(parts) {
            Some(token) => state.identity().verify_token(token).await.ok(),
            None => None,
        };

        Ok(Self(identity))
    }
}

/// Cross-check the claimed identity id against the verified identity.
///
/// Every user-scoped API call carries the caller's claimed id in the body;
/// a mismatch with the token's identity is an authentication failure, not an
/// authorization one.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] when the ids differ.
pub fn ensure_claimed_id(
    identity: &VerifiedIdentity,
    claimed: &IdentityId,
) -> Result<(), AppError> {
    if &identity.id == claimed {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity(id: &str) -> VerifiedIdentity {
        VerifiedIdentity {
            id: IdentityId::new(id),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_matching_claimed_id_passes() {
        let caller = identity("idp_1");
        assert!(ensure_claimed_id(&caller, &IdentityId::new("idp_1")).is_ok());
    }

    #[test]
    fn test_mismatched_claimed_id_is_unauthorized() {
        let caller = identity("idp_1");
        let err = ensure_claimed_id(&caller, &IdentityId::new("idp_2")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
