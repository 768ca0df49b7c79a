//! # Accounts
//!
//! User account management for a small web service: registration, login,
//! profile editing and listing, with salted password hashing and stateless
//! bearer-token sessions.
//!
//! ## Core Modules
//!
//! - [`auth`]: credential handling, token issue/verify, and the account use cases
//! - [`db`]: PostgreSQL pool wrapper and the [`db::UserRepository`] persistence seam
//!
//! ## Example
//!
//! ```no_run
//! use accounts::auth::{AuthManager, AuthSettings, LoginRequest, RegisterRequest};
//! use accounts::db::InMemoryUserRepository;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), accounts::auth::AuthError> {
//! let users = Arc::new(InMemoryUserRepository::new());
//! let auth = AuthManager::new(users, AuthSettings::new("a-very-long-signing-secret-value-123"));
//!
//! auth.register(RegisterRequest {
//!     name: "Jane Doe".to_string(),
//!     email: "jane@example.com".to_string(),
//!     password: "hunter22".to_string(),
//!     phone: "5551234567".to_string(),
//!     address: "1 Main St".to_string(),
//! })
//! .await?;
//!
//! let (user, token) = auth
//!     .login(LoginRequest {
//!         email: "jane@example.com".to_string(),
//!         password: "hunter22".to_string(),
//!     })
//!     .await?;
//! let claims = auth.verify_token(&token)?;
//! assert_eq!(claims.sub, user.id);
//! # Ok(())
//! # }
//! ```

/// Credential management, token handling and account use cases.
pub mod auth;

/// Persistence for user records.
pub mod db;

pub use auth::{AuthError, AuthManager, AuthResult, AuthSettings, User, UserId};
