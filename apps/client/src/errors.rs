use serde::Deserialize;
use thiserror::Error;

/// Client-level error type.
/// Everything the report flow can fail with funnels into this enum so the
/// controller can render one dismissible banner from it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Server {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Could not read analysis response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a submission is refused before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a contract file to analyze")]
    NoFile,

    #[error("Please enter the role you are being hired for")]
    EmptyRole,

    #[error("Unsupported file '{name}': only PDF and DOCX contracts are accepted")]
    UnsupportedFile { name: String },

    #[error("File is empty")]
    EmptyFile,

    #[error("File too large ({size} bytes). Maximum allowed is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("An analysis is already in progress")]
    SubmissionPending,

    #[error("Search query cannot be empty")]
    EmptyQuery,

    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl AppError {
    /// Text shown verbatim in the error banner.
    pub fn banner_message(&self) -> String {
        match self {
            AppError::Server { status, message, .. } if message.is_empty() => {
                format!("Analysis service returned status {status}")
            }
            other => other.to_string(),
        }
    }

    /// Builds a `Server` error from a non-2xx response body.
    ///
    /// The analysis service answers with `{"error": {"code", "message"}}` from its
    /// own handlers and `{"detail": ...}` from framework-level rejections; anything
    /// else is passed through as the raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
            return AppError::Server {
                status,
                code: envelope.error.code,
                message: envelope.error.message,
            };
        }

        if let Ok(detail) = serde_json::from_str::<DetailEnvelope>(body) {
            let message = match detail.detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            return AppError::Server {
                status,
                code: "HTTP_ERROR".to_string(),
                message,
            };
        }

        AppError::Server {
            status,
            code: "HTTP_ERROR".to_string(),
            message: body.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    detail: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_message_is_used_verbatim() {
        let body = r#"{"error":{"code":"VALIDATION_ERROR","message":"Input validation failed","details":[]}}"#;
        let err = AppError::from_response(422, body);
        match &err {
            AppError::Server { status, code, message } => {
                assert_eq!(*status, 422);
                assert_eq!(code, "VALIDATION_ERROR");
                assert_eq!(message, "Input validation failed");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.banner_message(), "Input validation failed");
    }

    #[test]
    fn test_detail_envelope() {
        let body = r#"{"detail":"File too large (20000000 bytes). Maximum allowed is 10MB."}"#;
        let err = AppError::from_response(413, body);
        assert_eq!(
            err.banner_message(),
            "File too large (20000000 bytes). Maximum allowed is 10MB."
        );
    }

    #[test]
    fn test_raw_body_fallback() {
        let err = AppError::from_response(502, "  Bad Gateway\n");
        assert_eq!(err.banner_message(), "Bad Gateway");
    }

    #[test]
    fn test_empty_body_mentions_status() {
        let err = AppError::from_response(500, "");
        assert_eq!(err.banner_message(), "Analysis service returned status 500");
    }

    #[test]
    fn test_validation_message() {
        let err: AppError = ValidationError::EmptyRole.into();
        assert_eq!(
            err.banner_message(),
            "Please enter the role you are being hired for"
        );
    }
}
