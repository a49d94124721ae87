use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a failed lookup. Selects the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The provider could not resolve the city.
    NotFound,
    /// The provider answered, but with a failure or a body we could not read.
    ProviderError,
    /// No response was obtained at all.
    NetworkError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::NetworkError => "network_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call to the weather provider, normalized into data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct FetchFailure {
    pub kind: ErrorKind,
    /// Human-readable message recovered from the provider or the transport.
    pub message: Option<String>,
}

impl FetchFailure {
    pub fn new(kind: ErrorKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    /// Failure for a response that reached us but could not be decoded.
    pub fn unreadable() -> Self {
        Self::new(ErrorKind::ProviderError, None)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkError, Some(message.into()))
    }

    /// Failure for a non-success HTTP response carrying a provider message.
    pub fn from_response(status: StatusCode, message: String) -> Self {
        Self::new(classify_failure(Some(status), &message), Some(message))
    }
}

/// Maps a provider failure to an [`ErrorKind`].
///
/// A 404 status, or the code "404" appearing anywhere in the provider's
/// message, means the city was not found. Everything else that produced a
/// response is a provider error. The substring rule is kept for compatibility
/// with providers that only report the code inside the message text.
pub fn classify_failure(status: Option<StatusCode>, message: &str) -> ErrorKind {
    if status == Some(StatusCode::NOT_FOUND) || message.contains("404") {
        ErrorKind::NotFound
    } else {
        ErrorKind::ProviderError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_404_is_not_found() {
        let kind = classify_failure(Some(StatusCode::NOT_FOUND), "city not found");
        assert_eq!(kind, ErrorKind::NotFound);
    }

    #[test]
    fn code_in_message_is_not_found() {
        let kind = classify_failure(Some(StatusCode::BAD_REQUEST), "error 404: nothing to geocode");
        assert_eq!(kind, ErrorKind::NotFound);
    }

    #[test]
    fn other_statuses_are_provider_errors() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::TOO_MANY_REQUESTS, StatusCode::BAD_GATEWAY] {
            assert_eq!(classify_failure(Some(status), "Invalid API key"), ErrorKind::ProviderError);
        }
    }

    #[test]
    fn display_includes_kind_and_message() {
        let failure = FetchFailure::from_response(StatusCode::UNAUTHORIZED, "Invalid API key".into());
        assert_eq!(failure.to_string(), "provider_error: Invalid API key");
        assert_eq!(FetchFailure::unreadable().to_string(), "provider_error: no message");
    }
}
