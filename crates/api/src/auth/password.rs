//! Argon2id password hashing and verification.
//!
//! Digests are stored as PHC strings, so the cost parameters and salt travel
//! with the hash. Verification reads them back from the digest rather than
//! from [`PasswordConfig`], which keeps old digests valid after a cost change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use super::CredentialError;

/// Default Argon2 memory cost in KiB (64 MiB).
const DEFAULT_MEMORY_KIB: u32 = 65_536;
/// Default number of Argon2 passes.
const DEFAULT_ITERATIONS: u32 = 3;
/// Default Argon2 lane count.
const DEFAULT_PARALLELISM: u32 = 1;
/// Default minimum password length accepted at account creation.
const DEFAULT_MIN_LENGTH: usize = 8;

/// Cost parameters for new password digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    /// Minimum accepted password length, in characters.
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_MEMORY_KIB,
            iterations: DEFAULT_ITERATIONS,
            parallelism: DEFAULT_PARALLELISM,
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl PasswordConfig {
    /// Load hashing parameters from environment variables.
    ///
    /// | Env Var                | Default  |
    /// |------------------------|----------|
    /// | `PASSWORD_MEMORY_KIB`  | `65536`  |
    /// | `PASSWORD_ITERATIONS`  | `3`      |
    /// | `PASSWORD_PARALLELISM` | `1`      |
    /// | `PASSWORD_MIN_LENGTH`  | `8`      |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but does not parse.
    pub fn from_env() -> Self {
        Self {
            memory_kib: env_or("PASSWORD_MEMORY_KIB", DEFAULT_MEMORY_KIB),
            iterations: env_or("PASSWORD_ITERATIONS", DEFAULT_ITERATIONS),
            parallelism: env_or("PASSWORD_PARALLELISM", DEFAULT_PARALLELISM),
            min_length: env_or("PASSWORD_MIN_LENGTH", DEFAULT_MIN_LENGTH),
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, CredentialError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid number: {e}")),
        Err(_) => default,
    }
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str, config: &PasswordConfig) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = config
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored digest.
///
/// A malformed digest is a mismatch, not an error.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Reject passwords shorter than `min_length` characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}
