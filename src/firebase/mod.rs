//! Client for the Firebase Auth identity service.
//!
//! The rest of the crate talks to the provider through the
//! [`IdentityProvider`] seam; [`FirebaseAuthService`] is the production
//! implementation over the identitytoolkit REST surface.

pub mod endpoints;
pub mod service;

pub use service::FirebaseAuthService;

use crate::error::VeridianError;
use async_trait::async_trait;
use serde::Deserialize;

/// An identity record as the provider reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    #[serde(rename = "localId")]
    pub uid: String,
    pub email: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// Operations the flows need from the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new email/password identity.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<ProviderUser, VeridianError>;

    /// Look up an identity by email. `Ok(None)` when the provider has no
    /// user with that address.
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ProviderUser>, VeridianError>;

    /// Verify a bearer ID token and return the identity it belongs to.
    async fn verify_token(&self, id_token: &str) -> Result<ProviderUser, VeridianError>;

    /// Delete the identity with the given uid.
    async fn delete_user(&self, uid: &str) -> Result<(), VeridianError>;
}
