use crate::db::models::{Account, Credential, ProfileImage, UserProfile};
use crate::db::sqlite::AccountsStorage;
use crate::error::VeridianError;
use crate::firebase::IdentityProvider;
use crate::types::requests::{UpdateEmailRequest, UpdateProfileImageRequest, UpdateUserRequest};
use std::sync::Arc;
use tracing::{info, warn};

/// Profile management flow: reads and mutations of the account, email and
/// profile-image records, each behind its existence/uniqueness guard.
pub struct ProfileOps {
    storage: AccountsStorage,
    identity: Arc<dyn IdentityProvider>,
}

impl ProfileOps {
    pub fn new(storage: AccountsStorage, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { storage, identity }
    }

    /// The full credential with nested account and optional image.
    pub async fn get_profile(&self, credential: &Credential) -> Result<UserProfile, VeridianError> {
        self.storage.get_profile(credential.id).await
    }

    /// Update username/name. An unchanged username updates the display
    /// name only; a changed one must not belong to any other account.
    pub async fn update_account(
        &self,
        credential: &Credential,
        req: UpdateUserRequest,
    ) -> Result<Account, VeridianError> {
        let current = self.storage.get_account(credential.account_id).await?;

        if current.username == req.username {
            return self
                .storage
                .update_account(credential.account_id, None, &req.name)
                .await;
        }

        if self
            .storage
            .find_account_by_username(&req.username)
            .await?
            .is_some()
        {
            return Err(VeridianError::Conflict(
                "User with that username already exists".to_string(),
            ));
        }

        self.storage
            .update_account(credential.account_id, Some(&req.username), &req.name)
            .await
    }

    /// Update the login email. Conflict when another credential already
    /// holds the target address.
    pub async fn update_email(
        &self,
        credential: &Credential,
        req: UpdateEmailRequest,
    ) -> Result<Credential, VeridianError> {
        if let Some(existing) = self
            .storage
            .find_credential_by_email(&req.email_address)
            .await?
            && existing.id != credential.id
        {
            return Err(VeridianError::Conflict(
                "User with that email address already exists".to_string(),
            ));
        }

        self.storage
            .update_credential_email(credential.id, &req.email_address)
            .await
    }

    /// Create the account's profile image on first upload, update it on
    /// subsequent ones.
    pub async fn upsert_profile_image(
        &self,
        credential: &Credential,
        req: UpdateProfileImageRequest,
    ) -> Result<ProfileImage, VeridianError> {
        match self
            .storage
            .find_profile_image_by_account(credential.account_id)
            .await?
        {
            Some(existing) => {
                self.storage
                    .update_profile_image(existing.account_id, &req.image_link, &req.storage_uuid)
                    .await
            }
            None => {
                let account = self.storage.get_account(credential.account_id).await?;
                self.storage
                    .create_profile_image(account.id, &req.image_link, &req.storage_uuid)
                    .await
            }
        }
    }

    /// Delete the account, its credential and image. The provider identity
    /// is removed best-effort first; a missing identity is skipped and a
    /// failed provider delete does not abort the local removal.
    pub async fn delete_account(&self, credential: &Credential) -> Result<Account, VeridianError> {
        let current = self.storage.get_credential(credential.id).await?;
        let account = self.storage.get_account(current.account_id).await?;

        if let Ok(Some(provider_user)) = self
            .identity
            .find_user_by_email(&current.email_address)
            .await
        {
            if let Err(err) = self.identity.delete_user(&provider_user.uid).await {
                warn!(
                    uid = %provider_user.uid,
                    error = %err,
                    "provider identity delete failed; continuing with local delete"
                );
            }
        }

        let deleted = self.storage.delete_account(account.id).await?;
        info!(username = %deleted.username, "account deleted");
        Ok(deleted)
    }
}
