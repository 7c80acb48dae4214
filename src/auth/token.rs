use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
///
/// The expiry is an absolute timestamp inside the signed payload, so verification
/// depends only on the clock at verification time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Email of the authenticated user; doubles as the owner identifier for tasks.
    pub email: String,
    /// Display name of the authenticated user.
    pub user_name: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Issues and verifies HMAC-SHA256 signed bearer tokens.
///
/// Constructed once at startup from configuration and shared through `web::Data`;
/// the signing secret is never read from the environment per call.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: chrono::Duration::minutes(ttl_minutes),
        }
    }

    /// Generates a signed token carrying the user's identity claims.
    ///
    /// The expiry is computed as now + configured TTL and sealed into the payload.
    pub fn issue(&self, email: &str, user_name: &str) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalServerError("token expiry out of range".into()))?
            .timestamp() as usize;

        let claims = Claims {
            email: email.to_string(),
            user_name: user_name.to_string(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// Signature mismatch, malformed structure, and past expiry all collapse into
    /// the same `Unauthorized` error; callers treat them uniformly as a 401.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid access token".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test_secret_for_gen_verify", 30)
    }

    #[test_log::test]
    fn test_token_issuance_and_verification() {
        let tokens = service();
        let token = tokens.issue("alice@example.com", "alice").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.user_name, "alice");
    }

    #[test]
    fn test_token_expiration() {
        // A negative TTL produces a token whose expiry is already in the past,
        // beyond the default 60s validation leeway.
        let expired_issuer = TokenService::new("test_secret_for_expiration", -5);
        let expired_token = expired_issuer.issue("bob@example.com", "bob").unwrap();

        match expired_issuer.verify(&expired_token) {
            Err(AppError::Unauthorized(msg)) => {
                assert_eq!(msg, "Invalid access token");
            }
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let tokens = service();
        let token = tokens.issue("carol@example.com", "carol").unwrap();

        // Flip one byte of the signature segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3, "compact JWT should have three segments");
        let mut signature: Vec<char> = parts[2].chars().collect();
        signature[0] = if signature[0] == 'A' { 'B' } else { 'A' };
        parts[2] = signature.into_iter().collect();
        let tampered = parts.join(".");

        assert!(tokens.verify(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let tokens = service();
        let other = TokenService::new("a_completely_different_secret", 30);

        let token = tokens.issue("dave@example.com", "dave").unwrap();
        match other.verify(&token) {
            Err(AppError::Unauthorized(_)) => {}
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let tokens = service();
        assert!(tokens.verify("not-a-token").is_err());
        assert!(tokens.verify("").is_err());
    }
}
