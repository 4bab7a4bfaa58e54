//! Response envelope shared by every API handler.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Absent optional results serialize as `{ "data": null }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
