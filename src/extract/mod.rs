//! Stock credential extractors
//!
//! Ready-made extractors for the places deployments usually carry a PASETO
//! credential: the `Authorization` header, an arbitrary header, a query
//! parameter, or a cookie. Each returns `Ok(None)` when the request simply
//! carries no credential and an error only when the carrier is present but
//! malformed; the middleware resolves the absent case against its
//! `credentials_optional` policy.

use axum::{
    body::Body,
    http::{header, Request},
};
use thiserror::Error;

use crate::error::BoxError;

/// Errors produced by the stock extractors.
///
/// Custom error handlers can downcast the cause of
/// [`AuthError::Extract`](crate::AuthError::Extract) to this type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// Header value is not valid visible ASCII.
    #[error("invalid header encoding")]
    InvalidEncoding,

    /// Authorization header present but not using the Bearer scheme.
    #[error("authorization header must use Bearer scheme")]
    InvalidScheme,

    /// Bearer scheme present but the credential after it is empty.
    #[error("empty bearer credential")]
    EmptyCredential,

    /// Query parameter value is not valid percent-encoded UTF-8.
    #[error("invalid query parameter encoding")]
    InvalidQueryEncoding,
}

/// Extract the credential from `Authorization: Bearer <credential>`.
///
/// A missing header means no credential; a header with another scheme or an
/// empty credential is an extraction failure.
pub fn from_auth_header(
) -> impl Fn(&Request<Body>) -> Result<Option<String>, BoxError> + Send + Sync + 'static {
    |request: &Request<Body>| {
        let Some(value) = request.headers().get(header::AUTHORIZATION) else {
            return Ok(None);
        };

        let value = value.to_str().map_err(|_| ExtractError::InvalidEncoding)?;
        let credential = value
            .strip_prefix("Bearer ")
            .ok_or(ExtractError::InvalidScheme)?;

        if credential.is_empty() {
            return Err(ExtractError::EmptyCredential.into());
        }

        Ok(Some(credential.to_string()))
    }
}

/// Extract the credential from the whole value of an arbitrary header.
pub fn from_header(
    name: impl Into<String>,
) -> impl Fn(&Request<Body>) -> Result<Option<String>, BoxError> + Send + Sync + 'static {
    let name = name.into();
    move |request: &Request<Body>| {
        let Some(value) = request.headers().get(name.as_str()) else {
            return Ok(None);
        };

        let value = value.to_str().map_err(|_| ExtractError::InvalidEncoding)?;
        Ok(Some(value.to_string()))
    }
}

/// Extract the credential from a query-string parameter.
pub fn from_query(
    param: impl Into<String>,
) -> impl Fn(&Request<Body>) -> Result<Option<String>, BoxError> + Send + Sync + 'static {
    let param = param.into();
    move |request: &Request<Body>| {
        let Some(query) = request.uri().query() else {
            return Ok(None);
        };

        for pair in query.split('&') {
            let mut parts = pair.splitn(2, '=');
            let Some(key) = parts.next() else { continue };
            if key != param {
                continue;
            }

            let value = parts.next().unwrap_or("");
            let value =
                urlencoding::decode(value).map_err(|_| ExtractError::InvalidQueryEncoding)?;
            return Ok(Some(value.into_owned()));
        }

        Ok(None)
    }
}

/// Extract the credential from a cookie.
pub fn from_cookie(
    name: impl Into<String>,
) -> impl Fn(&Request<Body>) -> Result<Option<String>, BoxError> + Send + Sync + 'static {
    let name = name.into();
    move |request: &Request<Body>| {
        let Some(value) = request.headers().get(header::COOKIE) else {
            return Ok(None);
        };

        let value = value.to_str().map_err(|_| ExtractError::InvalidEncoding)?;
        for pair in value.split(';') {
            let Some((key, cookie_value)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() == name {
                return Ok(Some(cookie_value.trim().to_string()));
            }
        }

        Ok(None)
    }
}
