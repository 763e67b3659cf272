use crate::error::VeridianError;
use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Request bodies that carry boundary validation rules.
pub trait ValidateRequest {
    fn validate(&self) -> Result<(), VeridianError>;
}

/// JSON extractor that runs the body's validation rules before the handler
/// is invoked, rejecting with the structured validation error.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + ValidateRequest,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = match Json::<T>::from_request(req, state).await {
            Ok(v) => v,
            Err(rejection) => return Err(rejection.into_response()),
        };
        if let Err(err) = value.validate() {
            return Err(err.into_response());
        }
        Ok(Self(value))
    }
}
