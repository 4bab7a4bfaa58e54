/// Domain error taxonomy.
///
/// The HTTP layer maps each variant to exactly one status code; see
/// `buildup_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A syntactically valid identifier that names nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No caller identity was supplied.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A caller was supplied but is neither the owner nor an admin.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Neither or both role payloads were supplied on account creation.
    #[error("Role violation: {0}")]
    RoleViolation(String),

    /// Login failed. Does not say whether the email or the password was wrong.
    #[error("Credential mismatch: {0}")]
    CredentialMismatch(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this is a `NotFound` for the given entity name.
    pub fn is_not_found(&self, expected: &str) -> bool {
        matches!(self, Self::NotFound { entity, .. } if *entity == expected)
    }
}
