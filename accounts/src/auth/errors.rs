//! Authentication error types.

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Email already registered
    #[error("a user with \"{0}\" already exists, so please try with different email")]
    EmailTaken(String),

    /// Unknown email or wrong password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Token signature, structure or claims are not valid
    #[error("Invalid token")]
    TokenInvalid,

    /// Token is past its expiry
    #[error("Token expired")]
    TokenExpired,
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and hashing errors are sanitized to prevent information
    /// disclosure about the internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) | AuthError::HashingFailed => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::Validation(_) | AuthError::EmailTaken(_) | AuthError::InvalidCredentials
        )
    }

    /// Whether the error is a token or identity failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::TokenInvalid | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
