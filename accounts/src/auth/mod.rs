//! Authentication module providing registration, login and session tokens.
//!
//! This module implements:
//! - Salted password hashing (bcrypt by default, Argon2id optional)
//! - Stateless HS256 JWT session tokens (1-hour expiry by default)
//! - Field validation for registration and profile edits
//!
//! ## Example
//!
//! ```no_run
//! use accounts::auth::{AuthManager, AuthSettings, RegisterRequest};
//! use accounts::db::{Database, PgUserRepository};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let users = Arc::new(PgUserRepository::new(db.pool().clone()));
//!     let auth = AuthManager::new(users, AuthSettings::new("jwt_secret_that_is_long_enough_!!"));
//!
//!     let request = RegisterRequest {
//!         name: "Jane Doe".to_string(),
//!         email: "jane@example.com".to_string(),
//!         password: "SecurePass123".to_string(),
//!         phone: "5551234567".to_string(),
//!         address: "1 Main St".to_string(),
//!     };
//!
//!     let user = auth.register(request).await?;
//!     println!("Registered user: {}", user.email);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod password;
pub mod token;
pub mod validation;

pub use errors::{AuthError, AuthResult};
pub use manager::{AuthManager, AuthSettings};
pub use models::{
    LoginRequest, NewUser, ProfileUpdate, RegisterRequest, StoredUser, TokenClaims, User, UserId,
};
pub use password::PasswordAlgorithm;
