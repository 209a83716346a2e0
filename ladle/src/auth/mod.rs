//! Password hashing and bearer-token issuance.
//!
//! Standard scheme, nothing novel: Argon2id password hashes and HS256 JWTs
//! with the user id as subject.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{LadleError, Result};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id the token refers to.
    pub sub: String,
    /// Expiration time as a UTC timestamp.
    pub exp: u64,
    /// Issued at as a UTC timestamp.
    pub iat: u64,
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| LadleError::Internal(format!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| LadleError::Internal(format!("Stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(user_id: &str, secret: &str, ttl_hours: u64) -> Result<String> {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + ttl_hours * 60 * 60,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| LadleError::Internal(format!("Failed to issue token: {e}")))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| LadleError::Auth("Invalid token".to_string()))?;

    Ok(token_data.claims)
}
