use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::util::error::ServiceError;

/// Decode a request body field map into a typed request.
pub fn decode_body<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, ServiceError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ServiceError::invalid_input("Invalid request body", e.to_string()))
}

/// Run the `validator` rules on a request.
///
/// Missing required fields are reported as `Missing required fields` with
/// `required_hint` as details. Any other rule failure is reported with the
/// per-field errors as details.
pub fn validate_request<T: Validate>(request: &T, required_hint: &str) -> Result<(), ServiceError> {
    match request.validate() {
        Ok(()) => Ok(()),
        Err(errors) if has_missing_fields(&errors) => {
            Err(ServiceError::invalid_input("Missing required fields", required_hint))
        }
        Err(errors) => {
            let details = serde_json::to_value(&errors).unwrap_or_else(|_| Value::String(errors.to_string()));
            Err(ServiceError::invalid_input("Validation failed", details))
        }
    }
}

fn has_missing_fields(errors: &ValidationErrors) -> bool {
    errors
        .field_errors()
        .values()
        .any(|errs| errs.iter().any(|e| e.code == "required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(required)]
        name: Option<String>,
        #[validate(email)]
        email: Option<String>,
    }

    fn fields(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_missing_field_reported() {
        let probe: Probe = decode_body(fields(json!({}))).unwrap();
        match validate_request(&probe, "name is required").unwrap_err() {
            ServiceError::InvalidInput { message, details } => {
                assert_eq!(message, "Missing required fields");
                assert_eq!(details, json!("name is required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rule_failure_reported() {
        let probe: Probe = decode_body(fields(json!({ "name": "x", "email": "nope" }))).unwrap();
        match validate_request(&probe, "").unwrap_err() {
            ServiceError::InvalidInput { message, details } => {
                assert_eq!(message, "Validation failed");
                assert!(details.get("email").is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_error() {
        let res: Result<Probe, _> = decode_body(fields(json!({ "name": 5 })));
        assert!(matches!(res, Err(ServiceError::InvalidInput { .. })));
    }
}
