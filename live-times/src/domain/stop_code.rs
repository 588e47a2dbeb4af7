//! Bus stop code type.

use std::fmt;

/// Error returned when parsing an invalid stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop code: {reason}")]
pub struct InvalidStopCode {
    reason: &'static str,
}

/// The code identifying a physical bus stop (e.g., "36237983").
///
/// Stop codes are opaque to us: the upstream API treats them as strings, so
/// the only thing we enforce is that they are non-empty.
///
/// # Examples
///
/// ```
/// use live_times::domain::StopCode;
///
/// let code = StopCode::parse("36237983").unwrap();
/// assert_eq!(code.as_str(), "36237983");
///
/// assert!(StopCode::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopCode(String);

impl StopCode {
    /// Parse a stop code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopCode> {
        if s.is_empty() {
            return Err(InvalidStopCode {
                reason: "must not be empty",
            });
        }

        Ok(StopCode(s.to_string()))
    }

    /// Returns the stop code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StopCode {
    type Err = InvalidStopCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StopCode::parse("36237983").is_ok());
        assert!(StopCode::parse("6200206520").is_ok());
        assert!(StopCode::parse("A").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StopCode::parse("").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = StopCode::parse("36237983").unwrap();
        assert_eq!(code.to_string(), "36237983");
        assert_eq!(format!("{:?}", code), "StopCode(36237983)");
    }

    #[test]
    fn from_str() {
        let code: StopCode = "36232896".parse().unwrap();
        assert_eq!(code.as_str(), "36232896");
        assert!("".parse::<StopCode>().is_err());
    }
}
