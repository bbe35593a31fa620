//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Registration input validation

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use thiserror::Error;

/// Validation errors for registration input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Username is missing or empty.
    #[error("Username is required")]
    EmptyUsername,

    /// Password is missing or empty.
    #[error("Password is required")]
    EmptyPassword,
}

/// Validates registration input before any hashing work is done.
///
/// # Errors
///
/// Returns an error if the username or password is empty.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), CredentialValidationError> {
    if username.trim().is_empty() {
        return Err(CredentialValidationError::EmptyUsername);
    }
    if password.is_empty() {
        return Err(CredentialValidationError::EmptyPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        assert!(validate_credentials("alice", "secret1").is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        assert_eq!(
            validate_credentials("", "secret1"),
            Err(CredentialValidationError::EmptyUsername)
        );
        assert_eq!(
            validate_credentials("   ", "secret1"),
            Err(CredentialValidationError::EmptyUsername)
        );
    }

    #[test]
    fn test_empty_password_rejected() {
        assert_eq!(
            validate_credentials("alice", ""),
            Err(CredentialValidationError::EmptyPassword)
        );
    }
}
