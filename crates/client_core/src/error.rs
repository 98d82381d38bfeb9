use shared::error::{ErrorCode, FetchFailure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtworkSourceError {
    #[error("invalid page request: {0}")]
    InvalidRequest(String),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("malformed listing response: {0}")]
    MalformedResponse(String),
}

impl ArtworkSourceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Self::Transport(_) | Self::HttpStatus { .. } => ErrorCode::Transport,
            Self::MalformedResponse(_) => ErrorCode::MalformedResponse,
        }
    }

    pub fn to_failure(&self, page: u32) -> FetchFailure {
        FetchFailure::new(self.code(), page, self.to_string())
    }
}

impl From<serde_json::Error> for ArtworkSourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedResponse(value.to_string())
    }
}
