//! HTTP API for the accounts server.
//!
//! # Modules
//!
//! - [`auth`]: registration and login
//! - [`users`]: profile edit and user listing
//! - [`middleware`]: bearer-token guard for protected endpoints
//! - [`request_id`]: request correlation and access logging
//!
//! # Endpoints Overview
//!
//! ```text
//! POST /register   - Register user (public)
//! POST /login      - Login, returns a session token (public)
//! PUT  /edit       - Edit own name/phone/address (auth required)
//! GET  /users      - List users (public)
//! GET  /health     - Health check (public)
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use accounts::auth::{AuthManager, AuthSettings};
//! use accounts::db::InMemoryUserRepository;
//! use accounts_server::api::{AppState, create_router};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let users = Arc::new(InMemoryUserRepository::new());
//! let auth_manager = AuthManager::new(users.clone(), AuthSettings::new("x".repeat(32)));
//! let state = AppState {
//!     auth_manager: Arc::new(auth_manager),
//!     users,
//! };
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod middleware;
pub mod request_id;
pub mod users;

use accounts::{AuthManager, User, db::UserRepository};
use axum::{
    Router,
    extract::{FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; both fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub auth_manager: Arc<AuthManager>,
    pub users: Arc<dyn UserRepository>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// User plus a human-readable status message
#[derive(Debug, Serialize)]
pub struct UserMessageResponse {
    #[serde(flatten)]
    pub user: User,
    pub message: String,
}

pub(crate) fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// JSON body extractor whose rejections use the `{ "error": ... }` shape.
///
/// Wrong-typed fields, syntax errors and a missing `Content-Type` all
/// answer `400 Bad Request` instead of axum's plain-text 4xx responses.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {rejection}");
                Err(error_response(StatusCode::BAD_REQUEST, rejection.body_text()))
            }
        }
    }
}

/// Phone numbers arrive either as JSON strings or JSON numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PhoneValue {
    Text(String),
    Number(u64),
}

impl PhoneValue {
    pub fn into_string(self) -> String {
        match self {
            PhoneValue::Text(s) => s.trim().to_string(),
            PhoneValue::Number(n) => n.to_string(),
        }
    }
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Endpoint Summary
///
/// ```text
/// GET  /health      - Health check (public)
/// POST /register    - Register user (public)
/// POST /login       - Login (public)
/// GET  /users       - List users (public)
/// PUT  /edit        - Edit profile (auth required)
/// ```
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/users", get(users::list_users));

    let protected_routes = Router::new()
        .route("/edit", put(users::edit_profile))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the user store answers, `503 Service Unavailable`
/// otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_healthy = match state.users.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Health check failed: {e}");
            false
        }
    };

    let status_code = if store_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if store_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": store_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
