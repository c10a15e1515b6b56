//! JSON envelopes wrapping Pingdom API payloads

use serde::{Deserialize, Serialize};

use crate::check::Check;

/// `{"check": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CheckEnvelope {
    pub check: Check,
}

/// `{"checks": [...]}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CheckListEnvelope {
    pub checks: Vec<Check>,
}

/// Acknowledgment returned by update and delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{"error": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ApiError,
}

/// Error reported by the server for a non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{status_code} {status_desc}: {message}")]
pub struct ApiError {
    #[serde(rename = "statuscode")]
    pub status_code: u16,
    #[serde(rename = "statusdesc")]
    pub status_desc: String,
    #[serde(rename = "errormessage")]
    pub message: String,
}
