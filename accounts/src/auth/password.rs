//! Salted password hashing.
//!
//! New hashes are produced with the configured [`PasswordAlgorithm`].
//! Verification reads the scheme from the stored hash itself, so records
//! written under a different setting keep working.

use std::fmt;
use std::str::FromStr;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::errors::{AuthError, AuthResult};

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Hashing scheme used for new passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordAlgorithm {
    /// bcrypt with the given cost (4..=31)
    Bcrypt { cost: u32 },
    /// Argon2id with library defaults, PHC string output
    Argon2,
}

impl Default for PasswordAlgorithm {
    fn default() -> Self {
        PasswordAlgorithm::Bcrypt {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordAlgorithm::Bcrypt { cost } => write!(f, "bcrypt (cost {cost})"),
            PasswordAlgorithm::Argon2 => write!(f, "argon2id"),
        }
    }
}

impl FromStr for PasswordAlgorithm {
    type Err = String;

    /// Parses `bcrypt` or `argon2`; bcrypt gets the default cost.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bcrypt" => Ok(PasswordAlgorithm::default()),
            "argon2" | "argon2id" => Ok(PasswordAlgorithm::Argon2),
            other => Err(format!("unknown password hash algorithm `{other}`")),
        }
    }
}

/// Hash a password with a fresh random salt.
///
/// This is CPU bound; async callers should run it on a blocking thread.
pub fn hash_password(password: &str, algorithm: PasswordAlgorithm) -> AuthResult<String> {
    match algorithm {
        PasswordAlgorithm::Bcrypt { cost } => {
            bcrypt::hash(password, cost).map_err(|_| AuthError::HashingFailed)
        }
        PasswordAlgorithm::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            Ok(Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map_err(|_| AuthError::HashingFailed)?
                .to_string())
        }
    }
}

/// Check a password against a stored hash.
///
/// Returns `false` for a mismatch and for a hash that cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if hash.starts_with("$argon2") {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    } else if is_bcrypt_hash(hash) {
        bcrypt::verify(password, hash).unwrap_or(false)
    } else {
        false
    }
}

fn is_bcrypt_hash(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
}
