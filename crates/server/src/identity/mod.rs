//! Identity provider API client.
//!
//! Authentication is delegated to an external identity provider: the browser
//! obtains a session token from the provider, sends it as a bearer token,
//! and this client resolves it server-side into a [`VerifiedIdentity`].
//! The platform never stores credentials of its own.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use medimeet_core::IdentityId;

use crate::config::IdentityConfig;

/// Errors from the identity provider client.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No bearer token was presented with the request.
    #[error("no bearer token presented")]
    MissingToken,

    /// The provider rejected the session token.
    #[error("session token rejected by identity provider")]
    InvalidToken,

    /// Transport-level failure talking to the provider.
    #[error("identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a status we do not expect.
    #[error("unexpected identity provider status: {0}")]
    UnexpectedStatus(u16),

    /// The provider's response body did not match the documented shape.
    #[error("malformed identity provider response: {0}")]
    InvalidResponse(String),
}

/// The identity attributes the provider attests for a verified session.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedIdentity {
    /// Provider-issued unique user id.
    pub id: IdentityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_url: Option<String>,
}

impl VerifiedIdentity {
    /// Display name assembled the way the provider's dashboard shows it.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Client for the identity provider's server-side verification API.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    api_url: String,
    secret_key: String,
}

#[derive(serde::Serialize)]
struct VerifyTokenRequest<'a> {
    token: &'a str,
}

impl IdentityClient {
    /// Create a new identity provider client.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            inner: Arc::new(IdentityClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.trim_end_matches('/').to_string(),
                secret_key: config.secret_key.expose_secret().to_string(),
            }),
        }
    }

    /// Resolve a session token into the identity it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidToken`] when the provider rejects the
    /// token (expired, revoked, or forged), [`IdentityError::Http`] on
    /// transport failure, and [`IdentityError::UnexpectedStatus`] /
    /// [`IdentityError::InvalidResponse`] when the provider misbehaves.
    pub async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let url = format!("{}/v1/tokens/verify", self.inner.api_url);

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.secret_key)
            .json(&VerifyTokenRequest { token })
            .send()
            .await?;

        match response.status().as_u16() {
            200 => response
                .json::<VerifiedIdentity>()
                .await
                .map_err(|e| IdentityError::InvalidResponse(e.to_string())),
            401 | 404 => Err(IdentityError::InvalidToken),
            status => Err(IdentityError::UnexpectedStatus(status)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let identity = VerifiedIdentity {
            id: IdentityId::new("idp_1"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            image_url: None,
        };
        assert_eq!(identity.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_verified_identity_deserializes_provider_shape() {
        let json = r#"{
            "id": "idp_2f9Kd81s",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "image_url": "https://img.identity.test/ada.png"
        }"#;

        let identity: VerifiedIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id.as_str(), "idp_2f9Kd81s");
        assert_eq!(identity.image_url.as_deref(), Some("https://img.identity.test/ada.png"));
    }
}
