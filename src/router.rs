use crate::db::sqlite::AccountsStorage;
use crate::firebase::IdentityProvider;
use crate::handlers;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Shared per-process dependencies, built explicitly in `main` (or a test
/// harness) and injected into the router.
#[derive(Clone)]
pub struct VeridianState {
    pub storage: AccountsStorage,
    pub identity: Arc<dyn IdentityProvider>,
}

impl VeridianState {
    pub fn new(storage: AccountsStorage, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { storage, identity }
    }
}

/// The versioned HTTP surface.
pub fn veridian_router(state: VeridianState) -> Router {
    let api = Router::new()
        .route("/auth", post(handlers::auth::create_account))
        .route(
            "/user",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_account),
        )
        .route("/user/email", put(handlers::user::update_email))
        .route(
            "/user/profile-image",
            put(handlers::user::update_profile_image),
        );

    Router::new().nest("/api/v1", api).with_state(state)
}
