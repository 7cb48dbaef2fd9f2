//! The `{code, message, data}` wrapper every backend response uses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Envelope code that marks success.
pub const SUCCESS_CODE: i64 = 200;

/// Envelope code the site treats as an expired session.
pub const UNAUTHORIZED_CODE: i64 = 401;

/// Message used when a failed envelope carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Code recorded for a body without an integer `code` field.
pub const MISSING_CODE: i64 = 0;

/// Uniform backend response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The server message, or the generic failure text when it is empty.
    pub fn failure_message(&self) -> String {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl Envelope<serde_json::Value> {
    /// Read a 2xx response body leniently.
    ///
    /// A body that is not JSON, or has no integer `code`, becomes a failed
    /// envelope carrying [`MISSING_CODE`] and whatever `message` it has.
    pub fn from_body(body: &[u8]) -> Self {
        let value: serde_json::Value = serde_json::from_slice(body).unwrap_or_default();
        let code = value
            .get("code")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(MISSING_CODE);
        let message = value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Self {
            code,
            message,
            data: value.get("data").cloned(),
        }
    }

    /// Convert into the payload, or an application error for non-200 codes.
    ///
    /// A missing or null `data` decodes as JSON `null`, so callers expecting
    /// `()` or `Option<_>` succeed on empty payloads.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(Error::Api {
                code: self.code,
                message: self.failure_message(),
            });
        }
        let data = self.data.unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_success_unwraps_data() {
        let env = parse(json!({"code": 200, "message": "ok", "data": {"total": 3}}));
        let data: serde_json::Value = env.into_data().unwrap();
        assert_eq!(data["total"], 3);
    }

    #[test]
    fn test_null_data_decodes_to_unit() {
        let env = parse(json!({"code": 200, "message": "ok", "data": null}));
        let _: () = env.into_data().unwrap();

        let env = parse(json!({"code": 200}));
        let data: Option<String> = env.into_data().unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_failure_code_rejects_with_message() {
        let env = parse(json!({"code": 400, "message": "bad title", "data": null}));
        let err = env.into_data::<()>().unwrap_err();
        match err {
            Error::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "bad title");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_body_without_code_is_a_failure() {
        let env = Envelope::from_body(br#"{"message": "maintenance mode"}"#);
        assert_eq!(env.code, MISSING_CODE);
        assert!(!env.is_success());
        assert_eq!(env.failure_message(), "maintenance mode");

        let env = Envelope::from_body(br#"{"code": "200", "data": 1}"#);
        assert!(!env.is_success());
    }

    #[test]
    fn test_non_json_body_is_a_failure() {
        for body in [&b""[..], &b"<html>oops</html>"[..], &b"[1, 2]"[..]] {
            let env = Envelope::from_body(body);
            assert_eq!(env.code, MISSING_CODE);
            assert_eq!(env.failure_message(), DEFAULT_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_body_with_code_reads_fields() {
        let env = Envelope::from_body(br#"{"code": 200, "message": "ok", "data": {"id": 3}}"#);
        assert!(env.is_success());
        let data: serde_json::Value = env.into_data().unwrap();
        assert_eq!(data["id"], 3);
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let env = parse(json!({"code": 500, "message": ""}));
        assert_eq!(env.failure_message(), DEFAULT_FAILURE_MESSAGE);
    }
}
