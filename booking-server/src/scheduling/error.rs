//! Scheduling client error types.

use std::fmt;

/// Errors from the scheduling provider HTTP client.
#[derive(Debug)]
pub enum SchedulingError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization or conversion failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// The provider has no such centre
    CentreNotFound,

    /// Rate limited by the provider
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,
}

impl fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingError::Http(e) => write!(f, "HTTP error: {e}"),
            SchedulingError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            SchedulingError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            SchedulingError::CentreNotFound => write!(f, "centre not known to the provider"),
            SchedulingError::RateLimited => write!(f, "rate limited by the scheduling provider"),
            SchedulingError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for SchedulingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchedulingError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SchedulingError {
    fn from(err: reqwest::Error) -> Self {
        SchedulingError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SchedulingError::CentreNotFound;
        assert_eq!(err.to_string(), "centre not known to the provider");

        let err = SchedulingError::ApiError {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = SchedulingError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected string"));
    }
}
