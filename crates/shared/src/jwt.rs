//! JWT verification for tokens issued by the external identity provider.
//!
//! The Tradeflow backend never issues tokens itself; it verifies RS256
//! bearer tokens minted by the hosted auth service and reads the subject
//! and role claims. This module is the whole of that interface.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (profile ID)
    pub sub: String,
    /// Role granted by the identity provider (`admin` or `subcontractor`)
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parses the subject claim as a profile UUID.
    pub fn subject_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::InvalidToken)
    }
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Verifier for access tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &self.algorithm)
            .field("leeway_secs", &self.leeway_secs)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a verifier from the provider's RSA public key in PEM format.
    pub fn new(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            decoding_key,
            algorithm: Algorithm::RS256,
            leeway_secs,
        })
    }

    /// Creates a verifier with an HS256 symmetric key.
    /// DO NOT use in production - only for tests.
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            leeway_secs: 0, // Strict for testing - no leeway
        }
    }

    /// Verifies a bearer token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway_secs;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const TEST_SECRET: &str = "test-secret-for-hs256";

    fn mint_token(sub: &str, role: &str, exp_offset_secs: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp: now + exp_offset_secs,
            iat: now,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new_for_testing(TEST_SECRET);
        let user_id = Uuid::new_v4();
        let token = mint_token(&user_id.to_string(), "subcontractor", 3600);

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "subcontractor");
        assert_eq!(claims.subject_id().unwrap(), user_id);
    }

    #[test]
    fn test_verify_admin_role() {
        let verifier = TokenVerifier::new_for_testing(TEST_SECRET);
        let token = mint_token(&Uuid::new_v4().to_string(), "admin", 3600);

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_verify_expired_token() {
        let verifier = TokenVerifier::new_for_testing(TEST_SECRET);
        let token = mint_token(&Uuid::new_v4().to_string(), "subcontractor", -3600);

        let result = verifier.verify(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_verify_garbage_token() {
        let verifier = TokenVerifier::new_for_testing(TEST_SECRET);
        let result = verifier.verify("not-a-jwt");
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_wrong_secret() {
        let verifier = TokenVerifier::new_for_testing("a-different-secret");
        let token = mint_token(&Uuid::new_v4().to_string(), "subcontractor", 3600);

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_subject_id_rejects_non_uuid() {
        let verifier = TokenVerifier::new_for_testing(TEST_SECRET);
        let token = mint_token("not-a-uuid", "subcontractor", 3600);

        let claims = verifier.verify(&token).unwrap();
        assert!(matches!(claims.subject_id(), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_invalid_public_key_pem() {
        let result = TokenVerifier::new("not a pem", DEFAULT_LEEWAY_SECS);
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_verifier_debug_redacts_key() {
        let verifier = TokenVerifier::new_for_testing(TEST_SECRET);
        let debug_str = format!("{:?}", verifier);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains(TEST_SECRET));
    }
}
