//! JWT token management

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Signing algorithm. Tokens whose header names anything else are rejected.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (decimal user ID)
    pub sub: String,
}

/// JWT manager for token generation and validation
///
/// Built once at startup from the configured secret and shared read-only
/// by every request.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtManager {
    /// Create a new JWT manager
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Tokens carry no expiry
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
        };

        debug!("Issuing token for user: {}", user_id);

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Validate a token and return the user ID it was issued for
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)
    }
}
