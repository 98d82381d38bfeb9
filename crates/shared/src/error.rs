use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    Transport,
    MalformedResponse,
}

/// Serializable summary of a failed fetch, for front ends that report
/// failures without holding on to the underlying error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub code: ErrorCode,
    pub page: u32,
    pub message: String,
}

impl FetchFailure {
    pub fn new(code: ErrorCode, page: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            page,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("page {page} failed ({code:?}): {message}")]
pub struct FetchException {
    pub code: ErrorCode,
    pub page: u32,
    pub message: String,
}

impl From<FetchFailure> for FetchException {
    fn from(value: FetchFailure) -> Self {
        Self {
            code: value.code,
            page: value.page,
            message: value.message,
        }
    }
}
