//! Field validation for account input.
//!
//! Checks run in a fixed order and stop at the first failure, so a caller
//! always sees one message.

use std::sync::LazyLock;

use regex::Regex;

use super::{
    errors::{AuthError, AuthResult},
    models::{LoginRequest, ProfileUpdate, RegisterRequest},
};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 25;
/// Passwords must be strictly longer than this
pub const PASSWORD_MIN_EXCLUSIVE: usize = 6;
pub const PHONE_MIN_DIGITS: usize = 10;

const REQUIRED_FIELDS: &str = "please enter all the required fields";
const INVALID_EMAIL: &str = "please enter a valid email address.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email regex is valid")
});

fn invalid(message: impl Into<String>) -> AuthError {
    AuthError::Validation(message.into())
}

/// Validate a registration request.
pub fn validate_registration(request: &RegisterRequest) -> AuthResult<()> {
    let fields = [
        &request.name,
        &request.email,
        &request.password,
        &request.phone,
        &request.address,
    ];
    if fields.iter().any(|f| f.is_empty()) {
        return Err(invalid(REQUIRED_FIELDS));
    }

    validate_name(&request.name)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    validate_phone(&request.phone)
}

/// Validate a login request.
pub fn validate_login(request: &LoginRequest) -> AuthResult<()> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(invalid(REQUIRED_FIELDS));
    }
    validate_email(&request.email)
}

/// Validate the fields present in a profile edit.
pub fn validate_profile_update(update: &ProfileUpdate) -> AuthResult<()> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(phone) = &update.phone {
        validate_phone(phone)?;
    }
    if let Some(address) = &update.address {
        if address.trim().is_empty() {
            return Err(invalid("address must not be empty"));
        }
    }
    Ok(())
}

pub fn validate_name(name: &str) -> AuthResult<()> {
    let len = name.chars().count();
    if len < NAME_MIN_CHARS {
        return Err(invalid("name should have at least 3 characters"));
    }
    if len > NAME_MAX_CHARS {
        return Err(invalid("name can only be 25 characters long."));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> AuthResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(invalid(INVALID_EMAIL))
    }
}

pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.chars().count() <= PASSWORD_MIN_EXCLUSIVE {
        return Err(invalid("password must be longer than 6 characters"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> AuthResult<()> {
    if phone.len() < PHONE_MIN_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("phone must contain at least 10 digits"));
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "longenough".to_string(),
            phone: "5551234567".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    fn message(result: AuthResult<()>) -> String {
        match result {
            Err(AuthError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&valid_request()).is_ok());
    }

    #[test]
    fn test_missing_field() {
        let mut request = valid_request();
        request.address.clear();
        assert_eq!(message(validate_registration(&request)), REQUIRED_FIELDS);
    }

    #[test]
    fn test_name_bounds() {
        let mut request = valid_request();
        request.name = "ab".to_string();
        assert!(message(validate_registration(&request)).contains("at least 3"));

        request.name = "a".repeat(26);
        assert!(message(validate_registration(&request)).contains("25 characters"));

        request.name = "abc".to_string();
        assert!(validate_registration(&request).is_ok());
        request.name = "a".repeat(25);
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
        assert!(is_valid_email("\"quoted name\"@example.com"));
        assert!(is_valid_email("user@[192.168.0.1]"));

        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("jane@@example.com"));
        assert!(!is_valid_email("ja ne@example.com"));
        assert!(!is_valid_email(".jane@example.com"));
        assert!(!is_valid_email("jane@example.c"));
    }

    #[test]
    fn test_password_length() {
        let mut request = valid_request();
        request.password = "abcdef".to_string();
        assert!(message(validate_registration(&request)).contains("password"));

        request.password = "abcdefg".to_string();
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn test_phone_rules() {
        let mut request = valid_request();
        request.phone = "12345".to_string();
        assert!(message(validate_registration(&request)).contains("phone"));

        request.phone = "555-123-4567".to_string();
        assert!(validate_registration(&request).is_err());

        request.phone = "15551234567".to_string();
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            email: "jane@example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(validate_login(&ok).is_ok());

        let missing = LoginRequest {
            email: "jane@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(message(validate_login(&missing)), REQUIRED_FIELDS);

        let bad_email = LoginRequest {
            email: "nope".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(message(validate_login(&bad_email)), INVALID_EMAIL);
    }

    #[test]
    fn test_profile_update_only_checks_present_fields() {
        assert!(validate_profile_update(&ProfileUpdate::default()).is_ok());

        let update = ProfileUpdate {
            name: Some("ab".to_string()),
            ..Default::default()
        };
        assert!(validate_profile_update(&update).is_err());

        let update = ProfileUpdate {
            phone: Some("0123456789".to_string()),
            address: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(message(validate_profile_update(&update)).contains("address"));
    }
}
