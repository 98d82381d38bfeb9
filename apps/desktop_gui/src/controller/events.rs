//! UI/backend events and error modeling for the desktop GUI.

use client_core::{ArtworkSourceError, PageTicket};
use shared::protocol::PageResult;

pub enum UiEvent {
    Info(String),
    PageLoaded {
        ticket: PageTicket,
        result: Result<PageResult, ArtworkSourceError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadPage,
    General,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Validation => "Unexpected response",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_source_error(context: UiErrorContext, err: &ArtworkSourceError) -> Self {
        let category = if err.is_transport() {
            UiErrorCategory::Transport
        } else if err.is_malformed() {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        format!("{} error: {}", err_label(self.category), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_source_errors_by_kind() {
        let transport = UiError::from_source_error(
            UiErrorContext::LoadPage,
            &ArtworkSourceError::HttpStatus { status: 503 },
        );
        assert_eq!(transport.category(), UiErrorCategory::Transport);
        assert_eq!(transport.context(), UiErrorContext::LoadPage);

        let malformed = UiError::from_source_error(
            UiErrorContext::LoadPage,
            &ArtworkSourceError::malformed("missing field `data`"),
        );
        assert_eq!(malformed.category(), UiErrorCategory::Validation);
        assert!(malformed.status_line().starts_with("Unexpected response error:"));
    }

    #[test]
    fn classifies_backend_command_processor_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn unknown_messages_fall_back_to_unknown() {
        let err = UiError::from_message(UiErrorContext::BackendStartup, "runtime exploded");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "runtime exploded");
    }
}
