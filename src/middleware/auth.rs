use crate::db::models::Credential;
use crate::error::{ApiErrorBody, ApiErrorResponse, VeridianError};
use crate::router::VeridianState;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

/// The identity resolved for the in-flight request. Handlers receive it as
/// an explicit argument; nothing is stashed on the request.
pub struct CurrentUser(pub Credential);

impl FromRequestParts<VeridianState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &VeridianState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        // Syntax first: the header must be `Bearer <token>`, exactly.
        let Some(token) = header_value.and_then(|auth| auth.trim().strip_prefix("Bearer ")) else {
            return Err(unauthorized("Invalid Token"));
        };

        match resolve_credential(state, token).await {
            Ok(credential) => Ok(Self(credential)),
            Err(VeridianError::IdentityProvider { code, message }) => {
                debug!(code = %code, message = %message, "identity provider rejected token");
                Err(unauthorized("User is unauthorized"))
            }
            Err(err) => {
                error!(error = %err, "token verification failed");
                Err(unauthorized("Unauthorized"))
            }
        }
    }
}

/// Delegate verification to the identity provider, then load the persisted
/// credential matching the verified subject.
async fn resolve_credential(
    state: &VeridianState,
    token: &str,
) -> Result<Credential, VeridianError> {
    let provider_user = state.identity.verify_token(token).await?;
    state
        .storage
        .find_credential_by_firebase_id(&provider_user.uid)
        .await?
        .ok_or_else(|| VeridianError::NotFound("Credentials not found".to_string()))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiErrorResponse {
            error: ApiErrorBody {
                code: "UNAUTHORIZED".to_string(),
                message: message.to_string(),
            },
        }),
    )
        .into_response()
}
