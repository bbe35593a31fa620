//! Authentication types for JWT and tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by every issued token.
///
/// The payload encodes the user id and nothing else sensitive. There is
/// no `exp` claim: tokens do not expire (see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            sub: user_id,
            iat: Utc::now().timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    #[serde(default)]
    pub username: String,
    /// Plaintext password, hashed before storage.
    #[serde(default)]
    pub password: String,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// Username of the authenticated user.
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_carry_user_id() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id);

        assert_eq!(claims.user_id(), user_id);
        assert!(claims.iat <= Utc::now().timestamp());
    }

    #[test]
    fn test_claims_payload_has_no_expiry() {
        let claims = Claims::new(Uuid::new_v4());
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("exp").is_none());
        assert!(json.get("sub").is_some());
    }
}
