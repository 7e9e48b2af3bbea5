//! Decoded credential attachments
//!
//! On successful authentication the middleware inserts [`PasetoToken`] and
//! [`PasetoFooter`] into the request's extensions, always as a pair. Both
//! implement [`FromRequestParts`] so protected handlers can take them as
//! extractor arguments; handlers behind `credentials_optional` should take
//! `Option<PasetoToken>` instead, since unauthenticated requests carry
//! neither attachment.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AuthError;

/// Claims decoded from a verified credential.
///
/// The middleware does not interpret the claims; they are whatever JSON value
/// the decryptor produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasetoToken(pub Value);

/// Footer decoded alongside the claims.
///
/// Empty when the credential format carries no footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasetoFooter(pub String);

impl<S> FromRequestParts<S> for PasetoToken
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<PasetoToken>()
            .cloned()
            .ok_or(AuthError::MissingCredential)
    }
}

impl<S> FromRequestParts<S> for PasetoFooter
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<PasetoFooter>()
            .cloned()
            .ok_or(AuthError::MissingCredential)
    }
}

impl<S> OptionalFromRequestParts<S> for PasetoToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<PasetoToken>().cloned())
    }
}

impl<S> OptionalFromRequestParts<S> for PasetoFooter
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<PasetoFooter>().cloned())
    }
}
