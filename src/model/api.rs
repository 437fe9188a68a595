use serde::{Deserialize, Serialize};

/// JSON envelope returned for every failed request.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorEnvelopeDto {
    /// `"fail"` for client-caused failures, `"error"` otherwise
    pub status: String,
    pub message: String,
    /// Fields exposed by the raised error itself
    pub error: RawErrorDto,
}

/// Fields a raised error exposes to clients.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawErrorDto {
    pub status_code: u16,
    pub status: String,
    pub is_operational: bool,
}
