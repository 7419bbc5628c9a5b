//! Password hashing for the credential table.
//!
//! Passwords written by this service are stored as Argon2id PHC strings.
//! Rows seeded outside the service may still hold plaintext; those are
//! compared in constant time so existing accounts keep working until their
//! password is next reset.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use subtle::ConstantTimeEq;

use crate::error::{AppError, AppResult};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

/// True when `candidate` matches the stored value.
pub fn verify_password(candidate: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => candidate.as_bytes().ct_eq(stored.as_bytes()).into(),
    }
}

/// Hashes on the blocking pool; Argon2 is deliberately slow.
pub async fn hash_password_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

/// Hash verified when no row matches, so unknown usernames cost as much
/// as known ones.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("no-such-user").ok())
        .as_deref()
}

/// Checks `candidate` against each stored value on the blocking pool.
/// With nothing stored it still runs one Argon2 verification and fails.
pub async fn verify_any_blocking(candidate: String, stored: Vec<String>) -> AppResult<bool> {
    let matched = tokio::task::spawn_blocking(move || {
        if stored.is_empty() {
            if let Some(dummy) = dummy_hash() {
                verify_password(&candidate, dummy);
            }
            return false;
        }
        stored.iter().any(|s| verify_password(&candidate, s))
    })
    .await?;
    Ok(matched)
}
