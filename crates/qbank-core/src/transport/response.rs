//! Raw responses as received from a transport

use serde_json::Value;

/// A successful (2xx) answer, body untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// A JSON answer, as servers send it
    pub fn from_json(status: u16, value: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: value.to_string().into_bytes(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The payload carried by the body.
    ///
    /// Empty bodies yield `Null`; bodies that are not JSON are returned as text.
    pub fn json_payload(&self) -> Value {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Value::Null;
        }
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&self.body).into_owned()))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_payload() {
        let response = RawResponse::from_json(200, &json!({"version": "1.2.0"}));
        assert_eq!(response.json_payload(), json!({"version": "1.2.0"}));
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(RawResponse::new(204, Vec::new()).json_payload(), Value::Null);
    }

    #[test]
    fn test_text_body_falls_back_to_string() {
        let response = RawResponse::new(200, b"ok".to_vec()).with_content_type("text/plain");
        assert_eq!(response.json_payload(), json!("ok"));
    }

    #[test]
    fn test_bytes_are_untouched() {
        let bytes = vec![0x50, 0x4b, 0x03, 0x04, 0xff, 0x00];
        assert_eq!(RawResponse::new(200, bytes.clone()).into_bytes(), bytes);
    }
}
