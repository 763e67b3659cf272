use crate::db::models::CredentialWithAccount;
use crate::error::VeridianError;
use crate::middleware::validate::ValidatedJson;
use crate::router::VeridianState;
use crate::service::registration_ops::RegistrationOps;
use crate::types::requests::CreateAccountRequest;
use axum::{Json, extract::State};

/// POST /api/v1/auth -> register a new account.
pub async fn create_account(
    State(state): State<VeridianState>,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> Result<Json<CredentialWithAccount>, VeridianError> {
    let ops = RegistrationOps::new(state.storage.clone(), state.identity.clone());
    let created = ops.register(payload).await?;
    Ok(Json(created))
}
