use super::ProviderUser;
use crate::config::CONFIG;
use crate::error::VeridianError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;
use url::Url;

/// Stateless identitytoolkit endpoints.
pub(super) struct FirebaseEndpoints;

impl FirebaseEndpoints {
    /// Create an email/password identity via `accounts:signUp`.
    pub(super) async fn sign_up(
        email: &str,
        password: &str,
        display_name: &str,
        http_client: reqwest::Client,
    ) -> Result<ProviderUser, VeridianError> {
        let resp = http_client
            .post(endpoint_url("accounts:signUp")?)
            .json(&json!({
                "email": email,
                "password": password,
                "displayName": display_name,
                "returnSecureToken": false,
            }))
            .send()
            .await?;
        let user: ProviderUser = into_payload(resp).await?;
        info!(uid = %user.uid, "identity created");
        Ok(user)
    }

    /// Look up an identity by email via `accounts:lookup`.
    pub(super) async fn lookup_by_email(
        email: &str,
        http_client: reqwest::Client,
    ) -> Result<Option<ProviderUser>, VeridianError> {
        let resp = http_client
            .post(endpoint_url("accounts:lookup")?)
            .json(&json!({ "email": [email] }))
            .send()
            .await?;
        match into_payload::<LookupResponse>(resp).await {
            Ok(body) => Ok(body.first_user()),
            // The provider answers an empty lookup with a not-found code.
            Err(VeridianError::IdentityProvider { code, .. })
                if code == "EMAIL_NOT_FOUND" || code == "USER_NOT_FOUND" =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Verify an ID token via `accounts:lookup` and return its identity.
    pub(super) async fn lookup_by_token(
        id_token: &str,
        http_client: reqwest::Client,
    ) -> Result<ProviderUser, VeridianError> {
        let resp = http_client
            .post(endpoint_url("accounts:lookup")?)
            .json(&json!({ "idToken": id_token }))
            .send()
            .await?;
        let body: LookupResponse = into_payload(resp).await?;
        body.first_user()
            .ok_or_else(|| VeridianError::IdentityProvider {
                code: "USER_NOT_FOUND".to_string(),
                message: "no identity matches the verified token".to_string(),
            })
    }

    /// Delete an identity via `accounts:delete`.
    pub(super) async fn delete_account(
        uid: &str,
        http_client: reqwest::Client,
    ) -> Result<(), VeridianError> {
        let resp = http_client
            .post(endpoint_url("accounts:delete")?)
            .json(&json!({ "localId": uid }))
            .send()
            .await?;
        into_payload::<serde_json::Value>(resp).await?;
        info!(uid = %uid, "identity deleted");
        Ok(())
    }
}

/// Build `<base>/<method>?key=<api key>`. The method segment contains a
/// colon, so `Url::join` would misread it as a scheme; format instead.
fn endpoint_url(method: &str) -> Result<Url, VeridianError> {
    let base = CONFIG.firebase_base_url.as_str().trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}/{method}"))?;
    url.query_pairs_mut()
        .append_pair("key", CONFIG.firebase_api_key.as_str());
    Ok(url)
}

async fn into_payload<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, VeridianError> {
    if resp.status().is_success() {
        Ok(resp.json::<T>().await?)
    } else {
        let api_err: FirebaseApiError = resp.json().await?;
        Err(api_err.into_error())
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Option<Vec<ProviderUser>>,
}

impl LookupResponse {
    fn first_user(self) -> Option<ProviderUser> {
        self.users.and_then(|mut users| {
            if users.is_empty() {
                None
            } else {
                Some(users.remove(0))
            }
        })
    }
}

/// Google-style error response body.
#[derive(Debug, Deserialize)]
pub(super) struct FirebaseApiError {
    pub error: FirebaseApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct FirebaseApiErrorBody {
    pub message: String,
}

impl FirebaseApiError {
    /// The `message` field carries the machine code, optionally followed by
    /// detail (`"WEAK_PASSWORD : Password should be ..."`).
    fn into_error(self) -> VeridianError {
        let code = self
            .error
            .message
            .split([' ', ':'])
            .next()
            .unwrap_or("")
            .to_string();
        VeridianError::IdentityProvider {
            code,
            message: self.error.message,
        }
    }
}
