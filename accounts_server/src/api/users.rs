//! Profile edit and user listing handlers.
//!
//! Edit a profile (requires a token from `/login`):
//! ```bash
//! curl -X PUT http://localhost:3000/edit \
//!   -H "Authorization: Bearer TOKEN" \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Jane Roe", "phone": "5559876543", "address": "2 Side St"}'
//! ```

use accounts::{User, auth::ProfileUpdate};
use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::{
    AppState, ErrorResponse, JsonBody, PhoneValue, UserMessageResponse, error_response,
    middleware::AuthenticatedUser,
};

/// Editable profile fields. Any `email` or `password` in the body is
/// ignored.
#[derive(Debug, Deserialize)]
pub struct EditPayload {
    pub name: Option<String>,
    pub phone: Option<PhoneValue>,
    pub address: Option<String>,
}

impl From<EditPayload> for ProfileUpdate {
    fn from(payload: EditPayload) -> Self {
        ProfileUpdate {
            name: payload.name,
            phone: payload.phone.map(PhoneValue::into_string),
            address: payload.address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Update the caller's own name, phone and address.
///
/// # Errors
///
/// - `400 Bad Request`: malformed body, or a present field is invalid
/// - `401 Unauthorized`: the user vanished or the store failed
pub async fn edit_profile(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    JsonBody(payload): JsonBody<EditPayload>,
) -> Result<Json<UserMessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .auth_manager
        .update_profile(user.id, payload.into())
        .await
    {
        Ok(updated) => {
            tracing::info!(user_id = %updated.id, "Profile updated");
            Ok(Json(UserMessageResponse {
                user: updated,
                message: "profile updated successfully".to_string(),
            }))
        }
        Err(e) if e.is_client_error() => Err(error_response(StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            tracing::error!(user_id = %user.id, "Profile update failed: {e}");
            Err(error_response(StatusCode::UNAUTHORIZED, e.client_message()))
        }
    }
}

/// List every user. Password hashes are never part of [`User`].
///
/// # Errors
///
/// - `404 Not Found`: the store failed
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UsersResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.list_users().await {
        Ok(users) => Ok(Json(UsersResponse { users })),
        Err(e) => {
            tracing::error!("Listing users failed: {e}");
            Err(error_response(StatusCode::NOT_FOUND, e.client_message()))
        }
    }
}
