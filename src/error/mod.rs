//! Unified error handling for Pasetoware

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub use tower::BoxError;

/// Configuration errors raised while building the middleware.
///
/// Construction is the only place these can arise; a middleware instance that
/// was built successfully never produces them again.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No extractor was supplied to the builder.
    #[error("extractor not defined")]
    MissingExtractor,

    /// No decryptor was supplied to the builder.
    #[error("decryptor not defined")]
    MissingDecryptor,
}

/// Per-request authentication errors.
///
/// `Extract` and `Decrypt` carry the collaborator's own error and display its
/// message unchanged, so the configured error handler (and the default 401
/// body) always see the real cause rather than an internal wrap.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The extractor failed, e.g. on a malformed header.
    #[error("{0}")]
    Extract(BoxError),

    /// No credential was present and credentials are required.
    #[error("required auth credential not found")]
    MissingCredential,

    /// The decryptor rejected the credential.
    #[error("{0}")]
    Decrypt(BoxError),
}

impl AuthError {
    /// The underlying extractor/decryptor error, if this variant carries one.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            AuthError::Extract(err) | AuthError::Decrypt(err) => Some(err.as_ref()),
            AuthError::MissingCredential => None,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}
