//! Domain error types.
//!
//! These errors are raised when constructing a domain value would break one
//! of its invariants. The parsers never surface them to callers: an element
//! that fails to construct is dropped instead.

/// Domain-level errors for validation of live-times values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A required text field was empty
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A service was built without any buses
    #[error("service {0} has no buses")]
    ServiceWithoutBuses(String),

    /// A stop was built without any services
    #[error("stop {0} has no services")]
    StopWithoutServices(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyField("destination");
        assert_eq!(err.to_string(), "destination must not be empty");

        let err = DomainError::ServiceWithoutBuses("44A".into());
        assert_eq!(err.to_string(), "service 44A has no buses");

        let err = DomainError::StopWithoutServices("36237983".into());
        assert_eq!(err.to_string(), "stop 36237983 has no services");
    }
}
