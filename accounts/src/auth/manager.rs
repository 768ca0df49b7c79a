//! Authentication manager implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{LoginRequest, NewUser, ProfileUpdate, RegisterRequest, TokenClaims, User, UserId},
    password::{self, PasswordAlgorithm},
    token::{DEFAULT_TOKEN_TTL_SECS, TokenKeys},
    validation,
};
use crate::db::UserRepository;
use chrono::Duration;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Plaintext behind the hash that unknown-email logins are checked against
const DUMMY_PASSWORD: &str = "accounts-dummy-password";

/// Settings handed to [`AuthManager`] at construction.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Secret key for JWT signing
    pub jwt_secret: String,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// Hashing scheme for new passwords
    pub password_algorithm: PasswordAlgorithm,
}

impl AuthSettings {
    /// Settings with the default 1-hour token lifetime and bcrypt cost 12.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            password_algorithm: PasswordAlgorithm::default(),
        }
    }
}

/// Authentication manager
#[derive(Clone)]
pub struct AuthManager {
    users: Arc<dyn UserRepository>,
    tokens: TokenKeys,
    password_algorithm: PasswordAlgorithm,
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `users` - User persistence
    /// * `settings` - Signing secret, token lifetime and hashing scheme
    pub fn new(users: Arc<dyn UserRepository>, settings: AuthSettings) -> Self {
        Self {
            users,
            tokens: TokenKeys::new(settings.jwt_secret.as_bytes(), settings.token_ttl),
            password_algorithm: settings.password_algorithm,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// * `AuthError::Validation` - A field is missing or malformed
    /// * `AuthError::EmailTaken` - Email already exists
    /// * `AuthError::Database` - Persistence failed
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        validation::validate_registration(&request)?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::EmailTaken(request.email));
        }

        let password_hash = self.hash_password(&request.password).await?;

        // The repository re-checks uniqueness at write time, so a concurrent
        // registration with the same email still fails with EmailTaken.
        let user = self
            .users
            .insert_user(NewUser {
                name: request.name,
                email: request.email,
                password_hash,
                phone: request.phone,
                address: request.address,
            })
            .await?;

        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Login a user
    ///
    /// # Returns
    ///
    /// * `AuthResult<(User, String)>` - User and a signed session token
    ///
    /// # Errors
    ///
    /// * `AuthError::Validation` - Email or password missing, or email malformed
    /// * `AuthError::InvalidCredentials` - Unknown email or wrong password
    pub async fn login(&self, request: LoginRequest) -> AuthResult<(User, String)> {
        validation::validate_login(&request)?;

        let Some(stored) = self.users.find_by_email(&request.email).await? else {
            // Pay for one verification so unknown emails cost as much as wrong passwords.
            let dummy = self.dummy_hash().await?;
            self.verify_password(&request.password, dummy).await;
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .verify_password(&request.password, &stored.password_hash)
            .await
        {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(stored.user.id)?;
        debug!(user_id = %stored.user.id, "Issued session token");

        Ok((stored.user, token))
    }

    /// Apply a self-service profile edit for `user_id`.
    ///
    /// Only name, phone and address can change.
    pub async fn update_profile(&self, user_id: UserId, update: ProfileUpdate) -> AuthResult<User> {
        validation::validate_profile_update(&update)?;

        if update.is_empty() {
            return self
                .users
                .find_by_id(user_id)
                .await?
                .ok_or(AuthError::UserNotFound);
        }

        self.users
            .update_profile(user_id, &update)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// All users, without password material
    pub async fn list_users(&self) -> AuthResult<Vec<User>> {
        self.users.list_users().await
    }

    /// Resolve the user behind a session token.
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenInvalid` / `AuthError::TokenExpired` - Token rejected
    /// * `AuthError::UserNotFound` - Token is valid but the user is gone
    /// * `AuthError::Database` - Lookup failed
    pub async fn authenticate(&self, token: &str) -> AuthResult<User> {
        let claims = self.verify_token(token)?;
        self.users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Issue a signed session token for `user_id`
    pub fn issue_token(&self, user_id: UserId) -> AuthResult<String> {
        self.tokens.issue(user_id)
    }

    /// Verify a session token
    pub fn verify_token(&self, token: &str) -> AuthResult<TokenClaims> {
        self.tokens.verify(token)
    }

    /// Signing keys, for callers that need to mint tokens at a fixed time
    pub fn token_keys(&self) -> &TokenKeys {
        &self.tokens
    }

    /// Hash a password on the blocking pool
    pub async fn hash_password(&self, password: &str) -> AuthResult<String> {
        let password = password.to_owned();
        let algorithm = self.password_algorithm;
        tokio::task::spawn_blocking(move || password::hash_password(&password, algorithm))
            .await
            .map_err(|_| AuthError::HashingFailed)?
    }

    /// Hash of [`DUMMY_PASSWORD`] under the configured algorithm, built once
    async fn dummy_hash(&self) -> AuthResult<&str> {
        self.dummy_hash
            .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD))
            .await
            .map(String::as_str)
    }

    /// Verify a password against a stored hash on the blocking pool
    pub async fn verify_password(&self, password: &str, hash: &str) -> bool {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
            .await
            .unwrap_or(false)
    }
}
