use super::endpoints::FirebaseEndpoints;
use super::{IdentityProvider, ProviderUser};
use crate::config::CONFIG;
use crate::error::VeridianError;
use async_trait::async_trait;
use std::time::Duration;

/// Production [`IdentityProvider`] over the Firebase Auth REST surface.
pub struct FirebaseAuthService {
    client: reqwest::Client,
}

impl FirebaseAuthService {
    /// Create a new service with a preconfigured HTTP client.
    pub fn new() -> Self {
        let mut builder = reqwest::Client::builder()
            .user_agent("veridian-auth/1.0".to_string())
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15));
        if let Some(proxy_url) = CONFIG.proxy.clone() {
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .expect("invalid PROXY url for reqwest client");
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .expect("FATAL: initialize FirebaseAuthService HTTP client failed");
        Self { client }
    }
}

impl Default for FirebaseAuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthService {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<ProviderUser, VeridianError> {
        FirebaseEndpoints::sign_up(email, password, display_name, self.client.clone()).await
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ProviderUser>, VeridianError> {
        FirebaseEndpoints::lookup_by_email(email, self.client.clone()).await
    }

    async fn verify_token(&self, id_token: &str) -> Result<ProviderUser, VeridianError> {
        FirebaseEndpoints::lookup_by_token(id_token, self.client.clone()).await
    }

    async fn delete_user(&self, uid: &str) -> Result<(), VeridianError> {
        FirebaseEndpoints::delete_account(uid, self.client.clone()).await
    }
}
