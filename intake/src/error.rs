// Error types for the remote data clients
// User-facing text stays separate from transport details, which only go to the logs.

use thiserror::Error;

/// Shown when the server gives no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "The request could not be completed. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The public-data client was used before `initialize`.
    #[error("public data client is not initialized")]
    Uninitialized,

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx with `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Message suitable for a user-visible dialog.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } | ApiError::Rejected(message) => {
                if message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message.clone()
                }
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_messages_are_surfaced_to_the_user() {
        let e = ApiError::Rejected("Token expired".to_string());
        assert_eq!(e.user_message(), "Token expired");

        let e = ApiError::Http {
            status: 500,
            message: "Database unavailable".to_string(),
        };
        assert_eq!(e.user_message(), "Database unavailable");
        assert_eq!(e.to_string(), "HTTP 500: Database unavailable");
    }

    #[test]
    fn internal_failures_use_generic_message() {
        // INTENT: decode/IO details never reach the dialog text.
        let e = ApiError::Decode("missing field `success` at line 1".to_string());
        assert_eq!(e.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(ApiError::Uninitialized.user_message(), GENERIC_FAILURE_MESSAGE);

        let blank = ApiError::Rejected("  ".to_string());
        assert_eq!(blank.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
