//! Argon2id password hashing and policy checks for teacher accounts.
//!
//! Hashes use the PHC string format so the algorithm parameters and salt
//! travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a new password against the policy: minimum length and an exact
/// confirmation match.
pub fn validate_new_password(
    password: &str,
    confirmation: &str,
    min_length: usize,
) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "password must be at least {min_length} characters long"
        ));
    }
    if password != confirmation {
        return Err("password_confirmation does not match password".to_string());
    }
    Ok(())
}
