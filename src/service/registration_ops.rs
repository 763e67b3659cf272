use crate::db::models::CredentialWithAccount;
use crate::db::sqlite::AccountsStorage;
use crate::error::VeridianError;
use crate::firebase::IdentityProvider;
use crate::types::requests::CreateAccountRequest;
use std::sync::Arc;
use tracing::info;

/// Registration flow: uniqueness checks, identity creation at the
/// provider, then the nested credential/account persist.
pub struct RegistrationOps {
    storage: AccountsStorage,
    identity: Arc<dyn IdentityProvider>,
}

impl RegistrationOps {
    pub fn new(storage: AccountsStorage, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { storage, identity }
    }

    pub async fn register(
        &self,
        req: CreateAccountRequest,
    ) -> Result<CredentialWithAccount, VeridianError> {
        self.ensure_available(&req.email_address, &req.username)
            .await?;

        // Advisory provider-side duplicate check. Lookup failures are
        // ignored; creation reports EMAIL_EXISTS if the lookup raced.
        if let Ok(Some(_)) = self.identity.find_user_by_email(&req.email_address).await {
            return Err(VeridianError::Conflict(
                "This email address is already taken.".to_string(),
            ));
        }

        let provider_user = self
            .identity
            .create_user(&req.email_address, &req.password, &req.name)
            .await?;

        let created = self
            .storage
            .create_registration(
                &provider_user.uid,
                &req.email_address,
                &req.username,
                &req.name,
            )
            .await?;

        info!(
            uid = %provider_user.uid,
            username = %created.account.username,
            "account registered"
        );
        Ok(created)
    }

    /// Email uniqueness is checked before username uniqueness.
    async fn ensure_available(
        &self,
        email_address: &str,
        username: &str,
    ) -> Result<(), VeridianError> {
        if self
            .storage
            .find_credential_by_email(email_address)
            .await?
            .is_some()
        {
            return Err(VeridianError::Conflict(
                "This email address is already taken.".to_string(),
            ));
        }

        if self
            .storage
            .find_account_by_username(username)
            .await?
            .is_some()
        {
            return Err(VeridianError::Conflict(
                "This username is already taken.".to_string(),
            ));
        }

        Ok(())
    }
}
