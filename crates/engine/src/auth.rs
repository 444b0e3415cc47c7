//! Password hashing and bearer-token issuance.
//!
//! Passwords are hashed with argon2 and a fresh random salt per call, so
//! identical passwords never share a hash. Tokens are stateless HS256
//! JWTs carrying `{user_id, email, exp}`; there is no revocation list.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: String,
    email: String,
    exp: i64,
}

pub struct Auth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_hours: i64,
}

impl Auth {
    pub fn new(secret: &[u8], token_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            token_hours,
        }
    }

    /// Signs a token for the given user, valid for the configured window.
    pub fn issue_token(&self, user_id: &str, email: &str) -> ResultEngine<String> {
        let expiry = Utc::now() + Duration::hours(self.token_hours);
        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            exp: expiry.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| EngineError::Internal(format!("failed to sign token: {err}")))
    }

    /// Verifies signature and expiry, returning the embedded user id.
    ///
    /// Expiry is the only failure reported as [`EngineError::TokenExpired`];
    /// every structural problem (bad signature, malformed payload, missing
    /// claim) collapses into [`EngineError::TokenInvalid`].
    pub fn verify_token(&self, token: &str) -> ResultEngine<String> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims.user_id),
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Err(EngineError::TokenExpired)
                }
                _ => Err(EngineError::TokenInvalid),
            },
        }
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("token_hours", &self.token_hours)
            .finish_non_exhaustive()
    }
}

pub fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Internal(format!("failed to hash password: {err}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
