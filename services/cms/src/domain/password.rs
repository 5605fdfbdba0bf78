//! Argon2id password hashing and the registration password policy.

use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::error::CmsServiceError;

pub const PASSWORD_MIN_LEN: usize = 8;

pub const TOO_SHORT: &str = "This password is too short. It must contain at least 8 characters.";
pub const TOO_COMMON: &str = "This password is too common.";
pub const ENTIRELY_NUMERIC: &str = "This password is entirely numeric.";

/// Frequently breached passwords, lower-cased.
const COMMON_PASSWORDS: &[&str] = &[
    "000000", "1111", "111111", "11111111", "112233", "121212", "123123", "123321", "1234",
    "12345", "123456", "1234567", "12345678", "123456789", "1234567890", "123qwe", "131313",
    "159753", "1q2w3e", "1q2w3e4r", "1qaz2wsx", "555555", "654321", "666666", "696969",
    "7777777", "987654321", "aa123456", "abc123", "access", "admin", "admin123", "adminadmin",
    "amanda", "andrew", "ashley", "asdf", "asdfgh", "asdfghjkl", "azerty", "bailey", "baseball",
    "batman", "charlie", "chelsea", "computer", "dragon", "football", "freedom", "hello",
    "hello123", "iloveyou", "jennifer", "jessica", "jordan", "letmein", "login", "lovely",
    "master", "michael", "michelle", "monkey", "mustang", "nicole", "passw0rd", "password",
    "password1", "password12", "password123", "princess", "qazwsx", "qwerty", "qwerty123",
    "qwertyuiop", "shadow", "sunshine", "superman", "test123", "trustno1", "welcome",
    "whatever", "zaq12wsx", "zxcvbn", "zxcvbnm",
];

/// Hash a plaintext password with Argon2id and a random salt. Returns the PHC string.
pub fn hash_password(password: &str) -> Result<String, CmsServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch; a corrupt stored hash is an internal error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CmsServiceError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow!("invalid password hash format: {e}"))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("password verification failed: {e}").into()),
    }
}

/// Every policy rule the password breaks, in a fixed order. Empty when acceptable.
pub fn validate_password(password: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        problems.push(TOO_SHORT.to_owned());
    }
    let lowered = password.trim().to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        problems.push(TOO_COMMON.to_owned());
    }
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        problems.push(ENTIRELY_NUMERIC.to_owned());
    }
    problems
}
