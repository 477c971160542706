//! Password hashing and verification.
//!
//! Two stored formats are understood:
//! - Argon2id PHC strings (`$argon2id$v=19$...`), salted per user.
//! - Unsalted SHA-256 lowercase hex digests, as written by earlier
//!   deployments of this service.
//!
//! Verification picks the algorithm from the stored value, so switching the
//! configured scheme never locks existing users out.

use std::sync::OnceLock;

use anyhow::Result;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Scheme used when hashing passwords of new registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Argon2,
    Sha256,
}

/// Hash a password with the given scheme
pub fn hash_password(scheme: PasswordScheme, password: &str) -> Result<String> {
    match scheme {
        PasswordScheme::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            let hash = Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
            Ok(hash.to_string())
        }
        PasswordScheme::Sha256 => Ok(sha256_hex(password)),
    }
}

/// Verify a password against a stored hash of either format
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.starts_with("$argon2") {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::error!("Stored password hash is not a valid PHC string: {}", e);
                false
            }
        }
    } else {
        let computed = sha256_hex(password);
        computed.as_bytes().ct_eq(stored.as_bytes()).into()
    }
}

/// Burn roughly the same time as a real verification.
///
/// Called when the username is unknown so that response latency does not
/// tell an attacker which usernames exist.
pub fn dummy_verify(scheme: PasswordScheme, password: &str) {
    static ARGON2_DUMMY: OnceLock<String> = OnceLock::new();
    static SHA256_DUMMY: OnceLock<String> = OnceLock::new();

    let cell = match scheme {
        PasswordScheme::Argon2 => &ARGON2_DUMMY,
        PasswordScheme::Sha256 => &SHA256_DUMMY,
    };
    let dummy = cell.get_or_init(|| {
        hash_password(scheme, "authgate-dummy-password").unwrap_or_default()
    });
    let _ = verify_password(password, dummy);
}

fn sha256_hex(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
