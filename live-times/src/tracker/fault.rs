//! Classification of error envelopes returned by the tracker API.
//!
//! A failed request still returns a JSON object, carrying a `faultcode` (and
//! usually a human-readable `faultstring`) in place of the data.

use serde_json::Value;

use super::error::LiveTimesError;

const FAULT_CODE: &str = "faultcode";
const FAULT_STRING: &str = "faultstring";

/// Inspect a response for an error envelope.
///
/// Returns `None` if the response carries no fault, in which case the
/// caller should go on to read the data. Unknown codes are reported as
/// [`LiveTimesError::UnrecognisedFault`] rather than being ignored.
pub fn classify_fault(root: &Value) -> Option<LiveTimesError> {
    let code = match root.get(FAULT_CODE)? {
        Value::Null => return None,
        Value::String(code) => code.clone(),
        other => other.to_string(),
    };

    let error = match code.as_str() {
        "INVALID_APP_KEY" => LiveTimesError::Authentication,
        "INVALID_PARAMETER" | "PROCESSING_ERROR" => LiveTimesError::ServerError,
        "SYSTEM_MAINTENANCE" => LiveTimesError::Maintenance,
        "SYSTEM_OVERLOADED" => LiveTimesError::SystemOverloaded,
        _ => LiveTimesError::UnrecognisedFault {
            message: root
                .get(FAULT_STRING)
                .and_then(Value::as_str)
                .map(str::to_string),
            code,
        },
    };

    Some(error)
}
