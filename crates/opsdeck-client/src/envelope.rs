use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Parsed body of a management API response.
///
/// Every field is optional: endpoints answer with a JSON object carrying any
/// subset of `status`, `message` and `data`. Bodies that are empty, not JSON,
/// or not an object at all parse to an empty envelope and are not errors by
/// themselves.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    /// Outcome marker; the value `"error"` flags a logical failure even when
    /// the HTTP status is a success.
    pub status: Option<String>,
    /// Human-readable text describing the outcome.
    pub message: Option<String>,
    /// Operation payload, arbitrary shape.
    pub data: Option<Value>,
}

impl Envelope {
    /// Parses a response body, substituting an empty envelope when the body
    /// does not deserialize.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// True when the envelope itself flags the operation as failed.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    /// Server-provided message, when present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }

    /// Message describing a failed call: the server-provided `message`, or a
    /// generic line carrying the HTTP status code.
    pub fn failure_message(&self, status: StatusCode) -> String {
        match self.message() {
            Some(message) => message.to_string(),
            None => format!("Request failed ({})", status.as_u16()),
        }
    }

    /// Payload of a successful call; an empty object when the server sent
    /// none.
    pub fn into_data(self) -> Value {
        self.data
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }
}
