//! Backend response envelope
//!
//! Every JSON response is wrapped as `{code?, message?, data}`. A missing
//! `code` or a number equal to one of [`SUCCESS_CODES`] means success. An
//! explicit `null` code is a failure.

use serde::Serialize;
use serde_json::Value;

/// Envelope codes that signal success.
pub const SUCCESS_CODES: [i64; 2] = [200, 0];

/// Message shown when a business failure carries no message.
pub const BUSINESS_FAILURE_FALLBACK: &str = "Operation failed";

/// Decoded response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// Business status code, if the backend sent one.
    pub code: Option<Value>,
    /// Human-readable status message.
    pub message: Option<String>,
    /// Payload.
    pub data: Value,
}

impl ResponseEnvelope {
    /// Decodes a response body.
    ///
    /// A body that is not JSON becomes a successful envelope whose data is
    /// the raw text.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<Value>(body).map_or_else(
            |_| Self::bare(Value::String(body.to_string())),
            Self::from_value,
        )
    }

    /// Decodes an already parsed JSON document.
    ///
    /// Objects without any of `code`, `message` or `data` are treated as
    /// bare payloads and returned whole.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::bare(value);
        };
        let is_envelope = ["code", "message", "data"]
            .iter()
            .any(|key| map.contains_key(*key));
        if !is_envelope {
            return Self::bare(Value::Object(map));
        }

        let code = map.remove("code");
        let message = match map.remove("message") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let data = map.remove("data").unwrap_or(Value::Null);
        Self {
            code,
            message,
            data,
        }
    }

    const fn bare(data: Value) -> Self {
        Self {
            code: None,
            message: None,
            data,
        }
    }

    /// Returns true if the envelope signals success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code.as_ref().is_none_or(is_success_code)
    }

    /// The code rendered for error reporting.
    #[must_use]
    pub fn code_label(&self) -> String {
        match &self.code {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// The server message, or the generic fallback.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(BUSINESS_FAILURE_FALLBACK)
            .to_string()
    }
}

// `200.0` is as good as `200`; the codes are small enough to be exact in f64.
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
fn is_success_code(code: &Value) -> bool {
    code.as_f64().is_some_and(|n| SUCCESS_CODES.iter().any(|&c| c as f64 == n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_zero_and_two_hundred_are_success() {
        for code in [0, 200] {
            let env = ResponseEnvelope::from_value(json!({"code": code, "data": {"id": 1}}));
            assert!(env.is_success(), "code {code} should succeed");
            assert_eq!(env.data, json!({"id": 1}));
        }
        for code in [0.0, 200.0] {
            let env = ResponseEnvelope::from_value(json!({"code": code}));
            assert!(env.is_success(), "code {code} should succeed");
        }
        assert!(!ResponseEnvelope::from_value(json!({"code": 200.5})).is_success());
    }

    #[test]
    fn test_missing_code_is_success() {
        let env = ResponseEnvelope::from_body(r#"{"data": [1, 2]}"#);
        assert!(env.is_success());
        assert_eq!(env.data, json!([1, 2]));
    }

    #[test]
    fn test_null_code_is_failure() {
        let env = ResponseEnvelope::from_body(r#"{"code": null, "message": "denied"}"#);
        assert!(!env.is_success());
        assert_eq!(env.failure_message(), "denied");
        assert_eq!(env.code_label(), "null");
    }

    #[test]
    fn test_other_code_is_failure_with_message() {
        let env = ResponseEnvelope::from_body(r#"{"code": 500, "message": "no such tag"}"#);
        assert!(!env.is_success());
        assert_eq!(env.failure_message(), "no such tag");
        assert_eq!(env.code_label(), "500");

        let env = ResponseEnvelope::from_body(r#"{"code": "E42"}"#);
        assert!(!env.is_success());
        assert_eq!(env.failure_message(), BUSINESS_FAILURE_FALLBACK);
        assert_eq!(env.code_label(), "E42");
    }

    #[test]
    fn test_bare_payloads() {
        let env = ResponseEnvelope::from_body(r#"{"id": 9, "name": "river"}"#);
        assert!(env.is_success());
        assert_eq!(env.data, json!({"id": 9, "name": "river"}));

        let env = ResponseEnvelope::from_body("plain text");
        assert!(env.is_success());
        assert_eq!(env.data, json!("plain text"));
    }
}
