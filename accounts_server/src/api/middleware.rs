//! Authentication middleware for protected endpoints.
//!
//! The middleware extracts the bearer token from the `Authorization` header,
//! verifies it, loads the acting user and injects it into request extensions
//! for downstream handlers.
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::{Router, routing::put, middleware};
//! # use accounts_server::api::middleware::auth_middleware;
//! # use accounts_server::api::AppState;
//! # async fn handler() {}
//! # let state: AppState = unimplemented!();
//!
//! let protected_routes: Router = Router::new()
//!     .route("/edit", put(handler))
//!     .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
//!     .with_state(state);
//! # let _ = protected_routes;
//! ```
//!
//! # Extracting the User
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use accounts_server::api::middleware::AuthenticatedUser;
//!
//! async fn protected_handler(Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>) -> String {
//!     format!("Authenticated as {}", user.email)
//! }
//! # let _ = protected_handler;
//! ```

use accounts::User;
use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use super::{AppState, ErrorResponse, error_response, request_id::RequestId};
use crate::logging::log_security_event;

const FORBIDDEN_MESSAGE: &str = "Forbidden, JWT token not entered / expired";
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized!";

/// Identity attached to a request once its token has been accepted
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Pull the token out of an `Authorization` value of the form
/// `Bearer <token>`. The scheme is matched case-insensitively.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    if !scheme.eq_ignore_ascii_case("Bearer") || parts.next().is_some() {
        return None;
    }
    Some(token)
}

/// Authentication middleware that validates the session token and injects
/// the acting user.
///
/// # Behavior
///
/// - **Missing header**: `403 Forbidden`
/// - **Wrong scheme or no token**: `401 Unauthorized`
/// - **Invalid/expired token**: `401 Unauthorized`
/// - **User no longer exists**: `401 Unauthorized`
/// - **Store failure during lookup**: `500 Internal Server Error`
/// - **Success**: inserts [`AuthenticatedUser`] and calls the next handler
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_owned());

    let Some(header_value) = request.headers().get(AUTHORIZATION) else {
        return Err(error_response(StatusCode::FORBIDDEN, FORBIDDEN_MESSAGE));
    };

    let token = match header_value.to_str().ok().and_then(bearer_token) {
        Some(t) => t.to_owned(),
        None => {
            log_security_event(
                "malformed_authorization",
                request_id.as_deref(),
                "Bad Authorization header",
            );
            return Err(error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE));
        }
    };

    match state.auth_manager.authenticate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            Ok(next.run(request).await)
        }
        Err(e) if e.is_unauthorized() => {
            log_security_event("rejected_token", request_id.as_deref(), &e.to_string());
            Err(error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE))
        }
        Err(e) => {
            tracing::error!(request_id = ?request_id, "Identity lookup failed: {e}");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.client_message(),
            ))
        }
    }
}
