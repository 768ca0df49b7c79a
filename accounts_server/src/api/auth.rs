//! Registration and login handlers.
//!
//! # Examples
//!
//! Register a new user:
//! ```bash
//! curl -X POST http://localhost:3000/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Jane Doe", "email": "jane@example.com", "password": "SecurePass1",
//!        "phone": "5551234567", "address": "1 Main St"}'
//! ```
//!
//! Login:
//! ```bash
//! curl -X POST http://localhost:3000/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"email": "jane@example.com", "password": "SecurePass1"}'
//! ```

use accounts::{
    AuthError, User,
    auth::{LoginRequest, RegisterRequest},
};
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use super::{AppState, ErrorResponse, JsonBody, PhoneValue, UserMessageResponse, error_response};
use crate::logging::log_security_event;

/// Registration body. Missing fields are reported by validation rather than
/// by the JSON extractor.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<PhoneValue>,
    pub address: Option<String>,
}

impl From<RegisterPayload> for RegisterRequest {
    fn from(payload: RegisterPayload) -> Self {
        RegisterRequest {
            name: payload.name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            password: payload.password.unwrap_or_default(),
            phone: payload
                .phone
                .map(PhoneValue::into_string)
                .unwrap_or_default(),
            address: payload.address.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Register a new user account.
///
/// # Response
///
/// `201 Created` with the stored user (never the password) and a message.
///
/// # Errors
///
/// - `400 Bad Request`: malformed body, missing or invalid field, or email already registered
/// - `500 Internal Server Error`: persistence failure
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterPayload>,
) -> Result<(StatusCode, Json<UserMessageResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.register(payload.into()).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(UserMessageResponse {
                user,
                message: "user saved successfully".to_string(),
            }),
        )),
        Err(e) if e.is_client_error() => Err(error_response(StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.client_message(),
            ))
        }
    }
}

/// Authenticate a user and issue a session token.
///
/// # Response
///
/// `200 OK` with `{ "token": "...", "user": { ... } }`. The token expires
/// one hour after issue by default.
///
/// # Errors
///
/// - `400 Bad Request`: malformed body, missing fields, malformed email, or bad credentials
/// - `500 Internal Server Error`: persistence failure
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginPayload>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = LoginRequest {
        email: payload.email.unwrap_or_default(),
        password: payload.password.unwrap_or_default(),
    };

    match state.auth_manager.login(request).await {
        Ok((user, token)) => Ok(Json(LoginResponse { token, user })),
        Err(e @ AuthError::InvalidCredentials) => {
            log_security_event("failed_login", None, "Invalid email or password");
            Err(error_response(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) if e.is_client_error() => Err(error_response(StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            tracing::error!("Login failed: {e}");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.client_message(),
            ))
        }
    }
}
