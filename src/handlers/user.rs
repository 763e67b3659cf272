use crate::db::models::{Account, Credential, ProfileImage, UserProfile};
use crate::error::VeridianError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::validate::ValidatedJson;
use crate::router::VeridianState;
use crate::service::profile_ops::ProfileOps;
use crate::types::requests::{UpdateEmailRequest, UpdateProfileImageRequest, UpdateUserRequest};
use axum::{Json, extract::State};

/// GET /api/v1/user -> the caller's full profile.
pub async fn get_user(
    State(state): State<VeridianState>,
    CurrentUser(credential): CurrentUser,
) -> Result<Json<UserProfile>, VeridianError> {
    let ops = ProfileOps::new(state.storage.clone(), state.identity.clone());
    Ok(Json(ops.get_profile(&credential).await?))
}

/// PUT /api/v1/user -> update username/name.
pub async fn update_user(
    State(state): State<VeridianState>,
    CurrentUser(credential): CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<Account>, VeridianError> {
    let ops = ProfileOps::new(state.storage.clone(), state.identity.clone());
    Ok(Json(ops.update_account(&credential, payload).await?))
}

/// PUT /api/v1/user/email -> update the login email.
pub async fn update_email(
    State(state): State<VeridianState>,
    CurrentUser(credential): CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateEmailRequest>,
) -> Result<Json<Credential>, VeridianError> {
    let ops = ProfileOps::new(state.storage.clone(), state.identity.clone());
    Ok(Json(ops.update_email(&credential, payload).await?))
}

/// PUT /api/v1/user/profile-image -> create or update the profile image.
pub async fn update_profile_image(
    State(state): State<VeridianState>,
    CurrentUser(credential): CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileImageRequest>,
) -> Result<Json<ProfileImage>, VeridianError> {
    let ops = ProfileOps::new(state.storage.clone(), state.identity.clone());
    Ok(Json(ops.upsert_profile_image(&credential, payload).await?))
}

/// DELETE /api/v1/user -> delete the account (cascading).
pub async fn delete_account(
    State(state): State<VeridianState>,
    CurrentUser(credential): CurrentUser,
) -> Result<Json<Account>, VeridianError> {
    let ops = ProfileOps::new(state.storage.clone(), state.identity.clone());
    Ok(Json(ops.delete_account(&credential).await?))
}
