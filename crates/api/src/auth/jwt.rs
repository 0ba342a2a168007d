//! Verification of bearer tokens issued by the session service.
//!
//! Tokens are HS256 JWTs. Only the subject and role are read; `exp` is
//! required and enforced with `jsonwebtoken`'s default leeway.

use std::fmt;

use classroom_core::types::DbId;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims this service relies on. Additional claims are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's internal database id.
    pub sub: DbId,
    /// Role name, checked against `classroom_core::roles`.
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Verifies tokens against the secret shared with the session service.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Build from `JWT_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self::new(secret.as_bytes())
    }

    /// Check signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.key, &self.validation).map(|data| data.claims)
    }
}

impl fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    const SECRET: &[u8] = b"unit-test-secret";

    fn sign(secret: &[u8], claims: &Claims) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
            .expect("encoding should succeed")
    }

    fn claims_expiring_in(secs: i64) -> Claims {
        Claims {
            sub: 42,
            role: "teacher".into(),
            exp: chrono::Utc::now().timestamp() + secs,
        }
    }

    #[test]
    fn accepts_token_from_shared_secret() {
        let token = sign(SECRET, &claims_expiring_in(600));

        let claims = JwtVerifier::new(SECRET)
            .verify(&token)
            .expect("token should verify");

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "teacher");
    }

    #[test]
    fn rejects_expired_token() {
        // Well beyond the default 60-second leeway.
        let token = sign(SECRET, &claims_expiring_in(-300));

        assert!(JwtVerifier::new(SECRET).verify(&token).is_err());
    }

    #[test]
    fn rejects_token_from_other_secret() {
        let token = sign(b"someone-else", &claims_expiring_in(600));

        assert!(JwtVerifier::new(SECRET).verify(&token).is_err());
    }

    #[test]
    fn debug_output_hides_key() {
        let rendered = format!("{:?}", JwtVerifier::new(SECRET));
        assert!(!rendered.contains("unit-test-secret"));
    }
}
