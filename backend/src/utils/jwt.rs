//! JWT token utilities for authentication and authorization.
//!
//! Provides token creation, validation and the access-control precondition
//! used by protected routes. Tokens are stateless: they carry the seller's
//! e-mail as `sub` and expire after the configured lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{ServiceError, ServiceResult};

/// JWT Claims structure identifying a seller
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Seller e-mail
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn e_mail(&self) -> &str {
        &self.sub
    }
}

/// Issues and validates seller tokens with a shared HS256 secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl TokenService {
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        TokenService {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    /// Generate a signed token asserting the given seller e-mail
    pub fn issue(&self, e_mail: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| ServiceError::internal_error("Token lifetime out of range"))?;

        let claims = Claims {
            sub: e_mail.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a token
    pub fn validate(&self, token: &str) -> ServiceResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {:?}", e.kind());
                ServiceError::invalid_token(e.to_string())
            })?;

        if claims.sub.trim().is_empty() {
            return Err(ServiceError::invalid_token("Missing identity claim"));
        }

        Ok(claims)
    }

    /// Precondition for protected operations.
    ///
    /// An absent or blank token is `MissingToken`; anything else must pass
    /// [`TokenService::validate`].
    pub fn authorize(&self, token: Option<&str>) -> ServiceResult<Claims> {
        match token.map(str::trim) {
            Some(token) if !token.is_empty() => self.validate(token),
            _ => Err(ServiceError::MissingToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn service() -> TokenService {
        TokenService::new(SECRET, 3600)
    }

    fn sign<T: Serialize>(claims: &T, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issued_token_decodes_to_same_e_mail() {
        let tokens = service();
        let token = tokens.issue("a@b.com").unwrap();

        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims.e_mail(), "a@b.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let tokens = service();
        let token = tokens.issue("a@b.com").unwrap();

        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", unsigned, flipped, &signature[1..]);

        assert!(matches!(
            tokens.validate(&tampered),
            Err(ServiceError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "a@b.com".to_string(),
            exp: now + 600,
            iat: now,
        };
        let token = sign(&claims, "another-secret");

        assert!(matches!(
            service().validate(&token),
            Err(ServiceError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "a@b.com".to_string(),
            exp: now - 10,
            iat: now - 100,
        };
        let token = sign(&claims, SECRET);

        assert!(matches!(
            service().validate(&token),
            Err(ServiceError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_token_with_other_algorithm_is_rejected() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "a@b.com".to_string(),
            exp: now + 600,
            iat: now,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service().validate(&token),
            Err(ServiceError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        for lifetime in [u64::MAX, i64::MAX as u64] {
            assert!(matches!(
                TokenService::new(SECRET, lifetime).issue("a@b.com"),
                Err(ServiceError::InternalError { .. })
            ));
        }
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        for token in ["not-a-token", "a.b.c", "", "...."] {
            assert!(matches!(
                service().validate(token),
                Err(ServiceError::InvalidToken { .. })
            ));
        }
    }

    #[test]
    fn test_token_without_identity_claim_is_rejected() {
        #[derive(Serialize)]
        struct Anonymous {
            exp: usize,
            iat: usize,
        }

        let now = Utc::now().timestamp() as usize;
        let token = sign(
            &Anonymous {
                exp: now + 600,
                iat: now,
            },
            SECRET,
        );
        assert!(matches!(
            service().validate(&token),
            Err(ServiceError::InvalidToken { .. })
        ));

        let blank = sign(
            &Claims {
                sub: "  ".to_string(),
                exp: now + 600,
                iat: now,
            },
            SECRET,
        );
        assert!(matches!(
            service().validate(&blank),
            Err(ServiceError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_authorize_distinguishes_missing_from_invalid() {
        let tokens = service();

        assert!(matches!(tokens.authorize(None), Err(ServiceError::MissingToken)));
        assert!(matches!(tokens.authorize(Some("  ")), Err(ServiceError::MissingToken)));
        assert!(matches!(
            tokens.authorize(Some("garbage")),
            Err(ServiceError::InvalidToken { .. })
        ));

        let token = tokens.issue("a@b.com").unwrap();
        assert_eq!(tokens.authorize(Some(&token)).unwrap().e_mail(), "a@b.com");
    }
}
