#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use veridian::VeridianError;
use veridian::db::sqlite::AccountsStorage;
use veridian::firebase::{IdentityProvider, ProviderUser};
use veridian::router::{VeridianState, veridian_router};

/// In-memory identity provider double. Tokens are issued explicitly by
/// tests; created and deleted identities are recorded for assertions.
#[derive(Default)]
pub struct StubIdentity {
    state: Mutex<StubState>,
}

#[derive(Default)]
struct StubState {
    users: Vec<ProviderUser>,
    tokens: HashMap<String, String>,
    deleted: Vec<String>,
    created: Vec<String>,
    next_uid: u64,
    fail_lookups: bool,
}

impl StubIdentity {
    pub fn issue_token(&self, uid: &str, token: &str) {
        let mut state = self.state.lock().unwrap();
        state.tokens.insert(token.to_string(), uid.to_string());
    }

    /// Make the provider know an email without any local registration.
    pub fn seed_user(&self, uid: &str, email: &str) {
        let mut state = self.state.lock().unwrap();
        state.users.push(ProviderUser {
            uid: uid.to_string(),
            email: Some(email.to_string()),
            display_name: None,
        });
    }

    pub fn last_created_uid(&self) -> Option<String> {
        self.state.lock().unwrap().created.last().cloned()
    }

    pub fn deleted_uids(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    /// Make every email lookup fail with a provider-domain error.
    pub fn fail_lookups(&self) {
        self.state.lock().unwrap().fail_lookups = true;
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn create_user(
        &self,
        email: &str,
        _password: &str,
        display_name: &str,
    ) -> Result<ProviderUser, VeridianError> {
        let mut state = self.state.lock().unwrap();
        state.next_uid += 1;
        let user = ProviderUser {
            uid: format!("uid-{}", state.next_uid),
            email: Some(email.to_string()),
            display_name: Some(display_name.to_string()),
        };
        state.users.push(user.clone());
        state.created.push(user.uid.clone());
        Ok(user)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ProviderUser>, VeridianError> {
        let state = self.state.lock().unwrap();
        if state.fail_lookups {
            return Err(VeridianError::IdentityProvider {
                code: "INTERNAL_ERROR".to_string(),
                message: "lookup failed".to_string(),
            });
        }
        Ok(state
            .users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn verify_token(&self, id_token: &str) -> Result<ProviderUser, VeridianError> {
        let state = self.state.lock().unwrap();
        let Some(uid) = state.tokens.get(id_token) else {
            return Err(VeridianError::IdentityProvider {
                code: "INVALID_ID_TOKEN".to_string(),
                message: "INVALID_ID_TOKEN".to_string(),
            });
        };
        Ok(state
            .users
            .iter()
            .find(|u| &u.uid == uid)
            .cloned()
            .unwrap_or(ProviderUser {
                uid: uid.clone(),
                email: None,
                display_name: None,
            }))
    }

    async fn delete_user(&self, uid: &str) -> Result<(), VeridianError> {
        let mut state = self.state.lock().unwrap();
        state.users.retain(|u| u.uid != uid);
        state.deleted.push(uid.to_string());
        Ok(())
    }
}

/// A router over a throwaway on-disk SQLite database plus the stub
/// identity provider, with the state wired the way `main` does it.
pub struct TestApp {
    pub router: Router,
    pub storage: AccountsStorage,
    pub identity: Arc<StubIdentity>,
    db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "veridian-test-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", db_path.display());
        let storage = AccountsStorage::connect(&database_url)
            .await
            .expect("failed to open test database");

        let identity = Arc::new(StubIdentity::default());
        let state = VeridianState::new(storage.clone(), identity.clone());
        let router = veridian_router(state);

        Self {
            router,
            storage,
            identity,
            db_path,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("failed to build request"),
            None => builder.body(Body::empty()).expect("failed to build request"),
        };
        self.send(request).await
    }

    /// Like `request`, but with a verbatim Authorization header value.
    pub async fn request_with_raw_auth(
        &self,
        method: &str,
        uri: &str,
        auth_header: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", auth_header)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let resp = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };
        (status, value)
    }

    pub async fn register(&self, email: &str, username: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/v1/auth",
            None,
            Some(json!({
                "emailAddress": email,
                "username": username,
                "password": "secret123",
                "name": "Test Person",
            })),
        )
        .await
    }

    /// Register and log in: returns the bearer token for the new account.
    pub async fn register_and_issue_token(&self, email: &str, username: &str) -> String {
        let (status, _) = self.register(email, username).await;
        assert_eq!(status, StatusCode::OK, "registration failed in setup");
        let uid = self
            .identity
            .last_created_uid()
            .expect("no identity created");
        let token = format!("token-for-{uid}");
        self.identity.issue_token(&uid, &token);
        token
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.db_path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(PathBuf::from(side));
        }
    }
}

pub fn error_message(body: &Value) -> String {
    body["error"]["message"].as_str().unwrap_or_default().to_string()
}
