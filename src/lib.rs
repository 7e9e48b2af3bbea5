//! Pasetoware - PASETO authentication middleware for axum
//!
//! This crate provides a [middleware for `axum`](https://docs.rs/axum/latest/axum/middleware/index.html)
//! that authenticates requests carrying a PASETO bearer credential. The
//! middleware extracts the raw credential from the request, hands it to a
//! decryptor you supply, and on success makes the decoded claims and footer
//! available to downstream handlers through request extensions. On failure the
//! request never reaches the downstream handler; a configurable error handler
//! renders the response instead.
//!
//! The credential format and its cryptography stay entirely on your side of
//! the boundary: the middleware only orchestrates
//! extraction, verification, propagation and chain continuation. Wire it to
//! any PASETO (or PASETO-like) implementation through the two closures it is
//! built from.
//!
//! # Getting Started
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use pasetoware::{extract, paseto_middleware, PasetoMiddleware, PasetoToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let paseto = PasetoMiddleware::builder()
//!         .extractor(extract::from_auth_header())
//!         .decryptor(|credential| {
//!             // Verify and decrypt with your PASETO implementation here.
//!             let claims = serde_json::json!({ "sub": "user-1" });
//!             Ok((claims, String::new()))
//!         })
//!         .build()?;
//!
//!     let app: Router = Router::new()
//!         .route("/protected", get(protected))
//!         .layer(middleware::from_fn_with_state(paseto, paseto_middleware));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//!
//! async fn protected(PasetoToken(claims): PasetoToken) -> String {
//!     format!("hello, {}", claims["sub"])
//! }
//! ```
//!
//! # Accessing claims
//!
//! After successful authentication the decoded claims and footer are attached
//! to the request as the [`PasetoToken`] and [`PasetoFooter`] extensions.
//! Handlers can take either directly as an extractor argument; with
//! [`credentials_optional`](options::OptionsBuilder::credentials_optional)
//! enabled, use `Option<PasetoToken>` since unauthenticated requests carry no
//! attachment.
//!
//! # Error Handling
//!
//! Authentication failures are rendered by the configured error handler. The
//! default responds with a plain-text `401 Unauthorized` whose body is the
//! error's message. A custom handler receives the request head and the
//! [`AuthError`], whose variants carry the original extractor/decryptor error
//! for inspection.

pub mod error;
pub mod extract;
pub mod middleware;
pub mod options;
pub mod token;

// Re-export commonly used types
pub use error::{AuthError, BoxError, ConfigError};
pub use middleware::{default_error_handler, paseto_middleware, PasetoMiddleware};
pub use options::{ErrorHandler, OptionsBuilder, TokenDecryptor, TokenExtractor};
pub use token::{PasetoFooter, PasetoToken};
