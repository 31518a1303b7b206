// Response envelope shared by every Evidenca endpoint.
//
// `{ "error": <flag>, "message": "...", "data": ... }`. The flag follows
// JavaScript truthiness because that is what the back end's clients test.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Raw envelope. `data` stays optional: update and delete endpoints may
/// answer with the flag alone.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub error: Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the back end flagged this response as a failure.
    pub fn is_error(&self) -> bool {
        is_truthy(&self.error)
    }

    /// Unwrap into the optional payload, or `Error::Api` when flagged.
    pub fn into_result(self) -> Result<Option<T>, Error> {
        if self.is_error() {
            return Err(Error::Api {
                message: error_message(&self.error, self.message.as_deref()),
            });
        }
        Ok(self.data)
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Best human-readable message for a flagged envelope.
pub(crate) fn error_message(flag: &Value, message: Option<&str>) -> String {
    if let Some(msg) = message.filter(|m| !m.is_empty()) {
        return msg.to_owned();
    }
    match flag {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| flag.to_string(), str::to_owned),
        _ => "request failed".into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn truthiness_matches_javascript() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("boom")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn missing_flag_is_success() {
        let env: Envelope<Vec<u32>> = serde_json::from_value(json!({ "data": [1, 2] })).unwrap();
        assert_eq!(env.into_result().unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn flagged_envelope_prefers_message_field() {
        let env: Envelope<Value> = serde_json::from_value(json!({
            "error": true,
            "message": "Invalid credentials"
        }))
        .unwrap();
        match env.into_result() {
            Err(Error::Api { message }) => assert_eq!(message, "Invalid credentials"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn string_flag_becomes_the_message() {
        let env: Envelope<Value> =
            serde_json::from_value(json!({ "error": "Event not found" })).unwrap();
        match env.into_result() {
            Err(Error::Api { message }) => assert_eq!(message, "Event not found"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn null_data_is_none() {
        let env: Envelope<Value> =
            serde_json::from_value(json!({ "error": false, "data": null })).unwrap();
        assert!(env.into_result().unwrap().is_none());
    }
}
