//! Middleware configuration
//!
//! Options are assembled once at startup through [`OptionsBuilder`] and are
//! read-only afterwards; the middleware shares them across all concurrent
//! requests. Defaults are pre-applied and later setter calls override earlier
//! ones, so only the two collaborators without a sensible default (the
//! extractor and the decryptor) are validated at build time.

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response};
use serde_json::Value;

use crate::error::{AuthError, BoxError, ConfigError};
use crate::middleware::{default_error_handler, PasetoMiddleware};

/// Pulls the raw credential out of a request.
///
/// `Ok(None)` means the request carries no credential; `Err` is reserved for
/// actual extraction failures such as a malformed header.
pub type TokenExtractor =
    Arc<dyn Fn(&Request<Body>) -> Result<Option<String>, BoxError> + Send + Sync>;

/// Verifies and decrypts the credential into claims and a footer.
///
/// The footer may be empty when the credential format carries none.
pub type TokenDecryptor =
    Arc<dyn Fn(&str) -> Result<(Value, String), BoxError> + Send + Sync>;

/// Renders an authentication failure as the complete HTTP response.
pub type ErrorHandler = Arc<dyn Fn(&Request<Body>, &AuthError) -> Response + Send + Sync>;

/// Finished middleware configuration.
pub(crate) struct Options {
    pub(crate) extractor: TokenExtractor,
    pub(crate) decryptor: TokenDecryptor,
    pub(crate) error_handler: ErrorHandler,
    pub(crate) credentials_optional: bool,
    pub(crate) debug: bool,
}

/// Builder for [`PasetoMiddleware`].
///
/// Obtained from [`PasetoMiddleware::builder`]. All fields except the
/// extractor and decryptor have defaults: the built-in plain-text 401 error
/// handler, `credentials_optional = false` and `debug = false`.
pub struct OptionsBuilder {
    extractor: Option<TokenExtractor>,
    decryptor: Option<TokenDecryptor>,
    error_handler: ErrorHandler,
    credentials_optional: bool,
    debug: bool,
}

impl OptionsBuilder {
    pub(crate) fn new() -> Self {
        Self {
            extractor: None,
            decryptor: None,
            error_handler: Arc::new(default_error_handler),
            credentials_optional: false,
            debug: false,
        }
    }

    /// Set the credential extractor. Required.
    ///
    /// See [`crate::extract`] for stock extractors.
    pub fn extractor<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&Request<Body>) -> Result<Option<String>, BoxError> + Send + Sync + 'static,
    {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// Set the credential decryptor. Required.
    pub fn decryptor<F>(mut self, decryptor: F) -> Self
    where
        F: Fn(&str) -> Result<(Value, String), BoxError> + Send + Sync + 'static,
    {
        self.decryptor = Some(Arc::new(decryptor));
        self
    }

    /// Replace the default error handler.
    ///
    /// The handler owns the entire failure response; the middleware writes
    /// nothing after invoking it.
    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Request<Body>, &AuthError) -> Response + Send + Sync + 'static,
    {
        self.error_handler = Arc::new(handler);
        self
    }

    /// Allow requests without a credential to continue unauthenticated.
    pub fn credentials_optional(mut self, optional: bool) -> Self {
        self.credentials_optional = optional;
        self
    }

    /// Emit verbose per-request `tracing` events (extracted credential,
    /// decoded claims, failure causes).
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate the configuration and produce the middleware.
    pub fn build(self) -> Result<PasetoMiddleware, ConfigError> {
        let extractor = self.extractor.ok_or(ConfigError::MissingExtractor)?;
        let decryptor = self.decryptor.ok_or(ConfigError::MissingDecryptor)?;

        Ok(PasetoMiddleware::from_options(Options {
            extractor,
            decryptor,
            error_handler: self.error_handler,
            credentials_optional: self.credentials_optional,
            debug: self.debug,
        }))
    }
}
