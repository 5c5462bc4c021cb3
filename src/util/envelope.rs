use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use serde_json::Value;

/// Uniform body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub details: Value,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Envelope {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, code: u16, details: Value) -> Self {
        Envelope {
            success: false,
            message: message.into(),
            data: None,
            error: Some(ErrorBody { code, details }),
        }
    }
}

/// A successful envelope together with its status code.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: Envelope<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        ApiResponse { status: StatusCode::OK, body: Envelope::success(message, data) }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        ApiResponse { status: StatusCode::CREATED, body: Envelope::success(message, data) }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(Envelope::success("Users fetched successfully", vec![1, 2])).unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "message": "Users fetched successfully", "data": [1, 2] })
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let body = serde_json::to_value(Envelope::<()>::failure(
            "Category already exists",
            409,
            json!({ "name": "Tech" }),
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Category already exists",
                "error": { "code": 409, "details": { "name": "Tech" } }
            })
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiResponse::ok("ok", 1).status, StatusCode::OK);
        assert_eq!(ApiResponse::created("made", 1).status, StatusCode::CREATED);
    }
}
