//! Authentication service for the administrative API.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Validates Bearer tokens against the configured admin token.
///
/// Both sides are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// comparison, so the raw token never sits in memory longer than necessary
/// and log lines can reference the fingerprint instead of the secret. The
/// admin credential is provisioned by configuration — an idempotent
/// bootstrap with no startup write.
pub struct AuthService {
    admin_token_hash: String,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `admin_token` - the configured `ADMIN_TOKEN`
    /// - `signing_secret` - HMAC key from `TOKEN_SIGNING_SECRET`
    pub fn new(admin_token: &str, signing_secret: String) -> Self {
        let admin_token_hash = hash_token(admin_token, &signing_secret);
        Self {
            admin_token_hash,
            signing_secret,
        }
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token does not match the
    /// configured admin token.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let presented = hash_token(token, &self.signing_secret);

        if presented != self.admin_token_hash {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid token"}),
            ));
        }

        Ok(())
    }
}

/// Hashes a raw token with HMAC-SHA256, returning 64 lowercase hex chars.
fn hash_token(token: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let service = AuthService::new("valid-token", "test-secret".to_string());
        assert!(service.authenticate("valid-token").is_ok());
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let service = AuthService::new("valid-token", "test-secret".to_string());

        let result = service.authenticate("wrong-token");

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token("test-token", "secret");
        let hash2 = hash_token("test-token", "secret");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_token_secret_matters() {
        assert_ne!(hash_token("token", "secret-a"), hash_token("token", "secret-b"));
    }
}
