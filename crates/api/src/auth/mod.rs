//! Credential Service: password digests and session tokens.
//!
//! - [`password`] -- Argon2id hashing and verification.
//! - [`jwt`] -- HS256 token signing and validation.
//!
//! [`CredentialService`] bundles both behind the configuration they need so
//! callers never handle keys or cost parameters directly.

pub mod jwt;
pub mod password;

use buildup_core::types::DbId;

use jwt::JwtConfig;
use password::PasswordConfig;

/// Failures raised by the Credential Service.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Scheme prefix accepted (and stripped) in front of a token.
const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone)]
pub struct CredentialService {
    jwt: JwtConfig,
    password: PasswordConfig,
}

impl CredentialService {
    pub fn new(jwt: JwtConfig, password: PasswordConfig) -> Self {
        Self { jwt, password }
    }

    pub fn password_config(&self) -> &PasswordConfig {
        &self.password
    }

    /// One-way salted digest of `password`.
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        password::hash_password(password, &self.password)
    }

    /// Whether `password` matches `digest`. Never errors.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        password::verify_password(password, digest)
    }

    /// Signed token naming `user_id`, valid for the configured lifetime.
    pub fn issue_token(&self, user_id: DbId) -> Result<String, CredentialError> {
        jwt::generate_token(user_id, &self.jwt)
    }

    /// Recover the user id from a token, with or without a `Bearer ` prefix.
    pub fn parse_token(&self, token: &str) -> Result<DbId, CredentialError> {
        let token = token.trim();
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
        Ok(jwt::validate_token(token, &self.jwt)?.sub)
    }
}
