//! Live-times error types.

use crate::domain::{DomainError, InvalidStopCode};

/// Why a request for live times produced no result.
///
/// The first five variants are faults reported by the server itself (see
/// [`LiveTimesError::is_classified`]); the rest are problems found while
/// reading the response.
#[derive(Debug, thiserror::Error)]
pub enum LiveTimesError {
    /// The API key was rejected
    #[error("authentication failed: invalid API key")]
    Authentication,

    /// The server rejected a parameter or failed while processing
    #[error("the live times server failed to process the request")]
    ServerError,

    /// The system is down for scheduled maintenance
    #[error("the live times system is down for maintenance")]
    Maintenance,

    /// The system is shedding load
    #[error("the live times system is overloaded")]
    SystemOverloaded,

    /// The server reported a fault code we do not recognise
    #[error("the live times server reported fault {code}")]
    UnrecognisedFault {
        code: String,
        message: Option<String>,
    },

    /// The document's structure did not match what the endpoint returns
    #[error("unexpected response structure: {0}")]
    Format(#[source] serde_json::Error),

    /// The response body was not JSON at all
    #[error("response is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Reading the response failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A journey request returned an empty list of journeys
    #[error("response contained no journeys")]
    NoJourneys,

    /// The returned journey failed validation
    #[error("journey in response is invalid: {0}")]
    InvalidJourney(#[source] Rejection),
}

impl LiveTimesError {
    /// Whether this fault was reported by the server, as opposed to being
    /// detected locally while reading the response.
    pub fn is_classified(&self) -> bool {
        matches!(
            self,
            LiveTimesError::Authentication
                | LiveTimesError::ServerError
                | LiveTimesError::Maintenance
                | LiveTimesError::SystemOverloaded
                | LiveTimesError::UnrecognisedFault { .. }
        )
    }

    /// Whether repeating the same request later could succeed.
    ///
    /// An authentication failure needs the key fixed first; a malformed or
    /// empty response is assumed to come back the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LiveTimesError::ServerError
                | LiveTimesError::Maintenance
                | LiveTimesError::SystemOverloaded
                | LiveTimesError::UnrecognisedFault { .. }
                | LiveTimesError::Io(_)
        )
    }
}

/// Why a single element of a response was discarded.
///
/// Rejections of stops, services, buses and departures are logged and the
/// element is skipped; only a rejected journey reaches the caller, inside
/// [`LiveTimesError::InvalidJourney`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// A required field was absent, null or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The stop code could not be used
    #[error(transparent)]
    StopCode(#[from] InvalidStopCode),

    /// The assembled value broke a domain invariant
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Read a required text field, treating absent, null and empty alike.
pub(super) fn require<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, Rejection> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(Rejection::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_error() -> serde_json::Error {
        serde_json::from_str::<u32>("\"x\"").unwrap_err()
    }

    #[test]
    fn error_display() {
        let err = LiveTimesError::Authentication;
        assert_eq!(err.to_string(), "authentication failed: invalid API key");

        let err = LiveTimesError::UnrecognisedFault {
            code: "SOMETHING_NEW".into(),
            message: None,
        };
        assert_eq!(
            err.to_string(),
            "the live times server reported fault SOMETHING_NEW"
        );

        let err = LiveTimesError::NoJourneys;
        assert_eq!(err.to_string(), "response contained no journeys");

        let err = LiveTimesError::InvalidJourney(Rejection::MissingField("terminus"));
        assert_eq!(
            err.to_string(),
            "journey in response is invalid: missing required field: terminus"
        );

        let err = LiveTimesError::Format(format_error());
        assert!(err.to_string().starts_with("unexpected response structure"));
    }

    #[test]
    fn format_error_keeps_cause() {
        use std::error::Error;

        let err = LiveTimesError::Format(format_error());
        let source = err.source().expect("format errors carry their cause");
        assert!(source.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn classified_errors() {
        assert!(LiveTimesError::Authentication.is_classified());
        assert!(LiveTimesError::ServerError.is_classified());
        assert!(LiveTimesError::Maintenance.is_classified());
        assert!(LiveTimesError::SystemOverloaded.is_classified());
        assert!(!LiveTimesError::NoJourneys.is_classified());
        assert!(!LiveTimesError::Format(format_error()).is_classified());
    }

    #[test]
    fn retry_guidance() {
        assert!(!LiveTimesError::Authentication.is_retryable());
        assert!(LiveTimesError::ServerError.is_retryable());
        assert!(LiveTimesError::Maintenance.is_retryable());
        assert!(LiveTimesError::SystemOverloaded.is_retryable());
        assert!(!LiveTimesError::NoJourneys.is_retryable());
        assert!(!LiveTimesError::Syntax(format_error()).is_retryable());
    }

    #[test]
    fn require_rejects_absent_and_empty() {
        assert_eq!(require(Some("22"), "serviceName"), Ok("22"));
        assert_eq!(
            require(Some(""), "serviceName"),
            Err(Rejection::MissingField("serviceName"))
        );
        assert_eq!(
            require(None, "serviceName"),
            Err(Rejection::MissingField("serviceName"))
        );
    }
}
