//! Response envelopes returned to the invoking transport.
//!
//! Envelopes serialize with API Gateway proxy field names:
//!
//! ```text
//! { "statusCode": 200,
//!   "headers": { "Content-Type": "application/json", "Access-Control-Allow-Origin": "*" },
//!   "body": "[...]" }
//! ```

use std::collections::BTreeMap;

use http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ResponseMode;
use crate::error::GatewayError;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const SAVED_MESSAGE: &str = "Item saved successfully";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded payload.
    pub body: String,
}

impl ResponseEnvelope {
    fn new(status: StatusCode, body: &Value, cors: bool) -> Self {
        let headers = if cors {
            BTreeMap::from([
                (CONTENT_TYPE.to_string(), "application/json".to_string()),
                (ALLOW_ORIGIN.to_string(), "*".to_string()),
            ])
        } else {
            BTreeMap::new()
        };
        Self {
            status_code: status.as_u16(),
            headers,
            body: body.to_string(),
        }
    }

    /// A 200 envelope carrying `body`.
    pub fn ok(body: &Value, cors: bool) -> Self {
        Self::new(StatusCode::OK, body, cors)
    }

    /// The write path's success envelope.
    pub fn saved(cors: bool) -> Self {
        Self::ok(&json!({ "message": SAVED_MESSAGE }), cors)
    }

    /// An `{"error": ...}` envelope with the status `mode` assigns to `err`.
    pub fn fault(err: &GatewayError, mode: ResponseMode, cors: bool) -> Self {
        Self::new(
            status_for(err, mode),
            &json!({ "error": err.to_string() }),
            cors,
        )
    }

    /// Decodes the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Status code for a fault under the given response mode.
pub fn status_for(err: &GatewayError, mode: ResponseMode) -> StatusCode {
    match (mode, err) {
        (ResponseMode::Typed, GatewayError::Validation(_)) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreFault, ValidationFault};

    #[test]
    fn test_serializes_proxy_field_names() {
        let envelope = ResponseEnvelope::ok(&json!([]), true);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["statusCode"], json!(200));
        assert_eq!(value["headers"]["Content-Type"], json!("application/json"));
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], json!("*"));
        assert_eq!(value["body"], json!("[]"));
    }

    #[test]
    fn test_headers_omitted_without_cors() {
        let value = serde_json::to_value(ResponseEnvelope::saved(false)).unwrap();
        assert!(value.get("headers").is_none());
        assert_eq!(
            value["body"],
            json!(r#"{"message":"Item saved successfully"}"#)
        );
    }

    #[test]
    fn test_fault_status_by_mode() {
        let validation = GatewayError::from(ValidationFault::MissingBody);
        let store = GatewayError::from(StoreFault::Throttled);

        assert_eq!(status_for(&validation, ResponseMode::Typed), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&validation, ResponseMode::Legacy),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_for(&store, ResponseMode::Typed), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(&store, ResponseMode::Legacy), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_fault_body_carries_message() {
        let err = GatewayError::from(StoreFault::Internal);
        let envelope = ResponseEnvelope::fault(&err, ResponseMode::Typed, true);

        assert_eq!(envelope.status_code, 500);
        assert_eq!(
            envelope.body_json().unwrap(),
            json!({ "error": "table service internal error" })
        );
    }
}
