use reqwest::StatusCode;
use thiserror::Error;

/// Why a weather request did not produce a summary.
///
/// The weather box never shows these details; every variant renders as the
/// same fixed message. They exist for logs and for tests.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to reach the weather service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Weather service responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected weather payload: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display_includes_code_and_body() {
        let err = FetchError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "Invalid API key".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Invalid API key"));
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn malformed_has_no_status() {
        let err = FetchError::Malformed("missing field `main`".into());
        assert!(err.status().is_none());
        assert!(err.to_string().contains("missing field"));
    }
}
