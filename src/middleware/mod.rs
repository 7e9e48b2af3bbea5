//! PASETO authentication middleware
//!
//! The middleware runs every request through a single-pass authentication
//! procedure: extract the credential, resolve the missing-credential policy,
//! decrypt, then attach the decoded claims and footer to the request. The
//! first failure is terminal for the request; the configured error handler
//! renders the response and the downstream handler is never invoked.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AuthError;
use crate::options::{Options, OptionsBuilder};
use crate::token::{PasetoFooter, PasetoToken};

/// Shared state for the authentication middleware.
///
/// Holds the configuration assembled by [`PasetoMiddleware::builder`];
/// read-only after construction and cheap to clone across requests.
#[derive(Clone)]
pub struct PasetoMiddleware {
    options: Arc<Options>,
}

impl PasetoMiddleware {
    /// Start building a middleware instance.
    ///
    /// `build()` fails with a [`ConfigError`](crate::error::ConfigError)
    /// unless both an extractor and a decryptor are supplied.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    pub(crate) fn from_options(options: Options) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// Run the authentication procedure against `request`.
    ///
    /// On success the decoded claims and footer are attached to the request's
    /// extensions (unless the request is proceeding unauthenticated under
    /// `credentials_optional`). On failure the configured error handler has
    /// already produced the response returned in `Err`; the caller only
    /// short-circuits the chain.
    fn authenticate(&self, request: &mut Request<Body>) -> Result<(), Response> {
        let opts = &self.options;

        let credential = match (opts.extractor)(request) {
            Ok(credential) => credential,
            Err(err) => {
                if opts.debug {
                    tracing::debug!(error = %err, "error extracting credential");
                }
                let err = AuthError::Extract(err);
                return Err((opts.error_handler)(request, &err));
            }
        };

        let credential = match credential {
            // An empty string from a custom extractor counts as absent.
            Some(credential) if !credential.is_empty() => credential,
            _ => {
                if opts.credentials_optional {
                    if opts.debug {
                        tracing::debug!("no credential found, continuing unauthenticated");
                    }
                    return Ok(());
                }

                if opts.debug {
                    tracing::debug!("no credential found and credentials are required");
                }
                let err = AuthError::MissingCredential;
                return Err((opts.error_handler)(request, &err));
            }
        };

        if opts.debug {
            tracing::debug!(credential = %credential, "credential extracted");
        }

        match (opts.decryptor)(&credential) {
            Ok((claims, footer)) => {
                if opts.debug {
                    tracing::debug!(claims = ?claims, footer = %footer, "credential decrypted");
                }

                // Both attachments are inserted together, and only here.
                request.extensions_mut().insert(PasetoToken(claims));
                request.extensions_mut().insert(PasetoFooter(footer));
                Ok(())
            }
            Err(err) => {
                if opts.debug {
                    tracing::debug!(error = %err, "error decrypting credential");
                }
                let err = AuthError::Decrypt(err);
                Err((opts.error_handler)(request, &err))
            }
        }
    }
}

/// Chain entry point, for use with [`axum::middleware::from_fn_with_state`].
///
/// ```rust,no_run
/// # use axum::{middleware, Router};
/// # use pasetoware::{paseto_middleware, PasetoMiddleware};
/// # fn wire(paseto: PasetoMiddleware, router: Router) -> Router {
/// router.layer(middleware::from_fn_with_state(paseto, paseto_middleware))
/// # }
/// ```
pub async fn paseto_middleware(
    State(middleware): State<PasetoMiddleware>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match middleware.authenticate(&mut request) {
        Ok(()) => next.run(request).await,
        Err(response) => response,
    }
}

/// The built-in error handler: plain-text 401 with the error's message.
pub fn default_error_handler(_request: &Request<Body>, err: &AuthError) -> Response {
    (StatusCode::UNAUTHORIZED, err.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, routing::get, Router};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::extract;

    async fn protected_handler(PasetoToken(claims): PasetoToken) -> String {
        claims["sub"].as_str().unwrap_or("unknown").to_string()
    }

    fn test_middleware() -> PasetoMiddleware {
        PasetoMiddleware::builder()
            .extractor(extract::from_auth_header())
            .decryptor(|credential| {
                if credential == "valid" {
                    Ok((json!({ "sub": "u1" }), "v1".to_string()))
                } else {
                    Err("bad signature".into())
                }
            })
            .build()
            .unwrap()
    }

    fn protected_app(middleware: PasetoMiddleware) -> Router {
        Router::new()
            .route("/protected", get(protected_handler))
            .layer(axum::middleware::from_fn_with_state(
                middleware,
                paseto_middleware,
            ))
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_credential_reaches_handler_with_claims() {
        let app = protected_app(test_middleware());

        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", "Bearer valid")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "u1");
    }

    #[tokio::test]
    async fn test_missing_credential_returns_401() {
        let app = protected_app(test_middleware());

        let request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            "required auth credential not found"
        );
    }

    #[tokio::test]
    async fn test_rejected_credential_returns_401_with_cause() {
        let app = protected_app(test_middleware());

        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", "Bearer forged")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, "bad signature");
    }

    #[tokio::test]
    async fn test_malformed_header_returns_401() {
        let app = protected_app(test_middleware());

        let request = Request::builder()
            .uri("/protected")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            "authorization header must use Bearer scheme"
        );
    }

    #[tokio::test]
    async fn test_credentials_optional_lets_anonymous_request_through() {
        let middleware = PasetoMiddleware::builder()
            .extractor(extract::from_auth_header())
            .decryptor(|_| Ok((json!({}), String::new())))
            .credentials_optional(true)
            .build()
            .unwrap();

        let app = Router::new()
            .route(
                "/maybe",
                get(|claims: Option<PasetoToken>| async move {
                    match claims {
                        Some(PasetoToken(claims)) => format!("user {}", claims["sub"]),
                        None => "anonymous".to_string(),
                    }
                }),
            )
            .layer(axum::middleware::from_fn_with_state(
                middleware,
                paseto_middleware,
            ));

        let request = Request::builder().uri("/maybe").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "anonymous");
    }

    #[tokio::test]
    async fn test_footer_attached_alongside_claims() {
        let middleware = test_middleware();

        let app = Router::new()
            .route(
                "/footer",
                get(|PasetoFooter(footer): PasetoFooter| async move { footer }),
            )
            .layer(axum::middleware::from_fn_with_state(
                middleware,
                paseto_middleware,
            ));

        let request = Request::builder()
            .uri("/footer")
            .header("Authorization", "Bearer valid")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "v1");
    }
}
