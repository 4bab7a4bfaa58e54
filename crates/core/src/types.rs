use crate::error::CoreError;

/// All entity identifiers are application-generated UUIDs (v7, time ordered).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}

/// Parse an identifier received from a client.
///
/// A syntactically invalid identifier is always an error, unlike an
/// identifier that parses but names nothing.
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::InvalidIdentifier(raw.to_string()))
}
