//! Session extractor - one database session per request.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::errors::AppError;
use crate::infra::{Session, SessionFactory};

/// Handlers taking a `Session` get a fresh transaction. They commit it
/// explicitly; any other exit rolls it back when the session is dropped.
/// Acquisition failures reject the request with 503.
#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    SessionFactory: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        SessionFactory::from_ref(state).acquire().await
    }
}
