//! HTTP request helper speaking the management API's JSON envelope.
//!
//! A call either succeeds with the envelope's payload or fails with a
//! human-readable message. Either way the outcome is surfaced through the
//! injected notifier (when one is attached) before it reaches the caller, so
//! the user sees what happened even if the caller only cares about the
//! returned value.

use std::sync::Arc;
use std::time::Duration;

use opsdeck_bridge::config::ApiConfig;
use opsdeck_bridge::notification::{Notifier, Severity};
use reqwest::{Method, Url};
use serde_json::Value;

use crate::envelope::Envelope;

/// Errors produced by [`ApiClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The configured base URL or a joined endpoint path does not form a
    /// valid URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
    /// The request never produced a usable response (connect failure,
    /// timeout, interrupted body).
    #[error("{0}")]
    Transport(reqwest::Error),
    /// The server answered, but the call failed: non-success HTTP status or
    /// an envelope carrying `status = "error"`.
    #[error("{message}")]
    Failed {
        /// HTTP status code of the response.
        status: u16,
        /// Message derived from the envelope, as surfaced to the notifier.
        message: String,
    },
}

/// Client for the management API.
///
/// Wraps a shared, pooled [`reqwest::Client`] configured from [`ApiConfig`].
/// Cloning is cheap; clones share the connection pool and the notifier.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ApiClient {
    /// Builds a client from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, RequestError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| RequestError::InvalidUrl(err.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(RequestError::Transport)?;

        Ok(Self {
            http,
            base_url,
            notifier: None,
        })
    }

    /// Attaches the notifier used to surface request outcomes. Without one,
    /// outcomes are still returned to the caller, just not displayed.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn notify(&self, severity: Severity, message: &str) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(severity, message);
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> RequestError {
        let err = err.without_url();
        self.notify(Severity::Danger, &err.to_string());
        RequestError::Transport(err)
    }

    /// Resolves an endpoint path against the configured base URL.
    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.base_url
            .join(path)
            .map_err(|err| RequestError::InvalidUrl(err.to_string()))
    }

    /// Issues a request and applies the envelope outcome policy.
    ///
    /// The call fails when the HTTP status is non-success or the envelope
    /// flags `status = "error"`. The failure message (the envelope's
    /// `message`, or a generic line with the status code) is surfaced at
    /// [`Severity::Danger`] and returned to the caller. A successful call
    /// surfaces the envelope's message, if any, at [`Severity::Success`] and
    /// yields the envelope's payload. Exactly one notification is triggered
    /// per call, only on failure or on success with a message.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, RequestError> {
        let url = self.endpoint(path)?;
        log::debug!("{method} {url}");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;
        let envelope = Envelope::from_body(&body);

        if !status.is_success() || envelope.is_error() {
            let message = envelope.failure_message(status);
            log::warn!("API call failed with status {status}: {message}");
            self.notify(Severity::Danger, &message);
            return Err(RequestError::Failed {
                status: status.as_u16(),
                message,
            });
        }

        if let Some(message) = envelope.message() {
            self.notify(Severity::Success, message);
        }

        Ok(envelope.into_data())
    }

    /// `GET` without a body.
    pub async fn get(&self, path: &str) -> Result<Value, RequestError> {
        self.request(Method::GET, path, None).await
    }

    /// `POST` with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, RequestError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// `PUT` with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, RequestError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// `DELETE` without a body.
    pub async fn delete(&self, path: &str) -> Result<Value, RequestError> {
        self.request(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Mutex;

    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Notifier that records every notification it receives.
    #[derive(Default)]
    struct RecordingNotifier {
        shown: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingNotifier {
        fn shown(&self) -> Vec<(Severity, String)> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, severity: Severity, message: &str) {
            self.shown
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    /// Serves exactly one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len(),
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr, notifier: &Arc<RecordingNotifier>) -> ApiClient {
        let config = ApiConfig {
            base_url: format!("http://{addr}"),
            ..ApiConfig::default()
        };
        ApiClient::new(&config)
            .unwrap()
            .with_notifier(notifier.clone())
    }

    #[tokio::test]
    async fn success_returns_the_payload_without_notifying() {
        let addr = serve_once("200 OK", r#"{"status":"ok","data":{"hosts":["node1"]}}"#).await;
        let notifier = Arc::new(RecordingNotifier::default());
        let client = client_for(addr, &notifier);

        let data = client.get("/api/hosts").await.unwrap();
        assert_eq!(data, json!({"hosts": ["node1"]}));
        assert!(notifier.shown().is_empty());
    }

    #[tokio::test]
    async fn success_message_triggers_exactly_one_success_notification() {
        let addr = serve_once("200 OK", r#"{"message":"Saved"}"#).await;
        let notifier = Arc::new(RecordingNotifier::default());
        let client = client_for(addr, &notifier);

        let data = client
            .post("/api/hosts", &json!({"hostname": "node1"}))
            .await
            .unwrap();
        assert_eq!(data, json!({}));
        assert_eq!(
            notifier.shown(),
            vec![(Severity::Success, "Saved".to_string())]
        );
    }

    #[tokio::test]
    async fn http_failure_uses_the_envelope_message() {
        let addr = serve_once("500 Internal Server Error", r#"{"message":"Server error"}"#).await;
        let notifier = Arc::new(RecordingNotifier::default());
        let client = client_for(addr, &notifier);

        let err = client.get("/api/hosts").await.unwrap_err();
        match err {
            RequestError::Failed { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Server error");
            }
            other => panic!("expected a failed call, got {other:?}"),
        }
        assert_eq!(
            notifier.shown(),
            vec![(Severity::Danger, "Server error".to_string())]
        );
    }

    #[tokio::test]
    async fn http_failure_without_a_message_gets_the_generic_one() {
        let addr = serve_once("404 Not Found", "").await;
        let notifier = Arc::new(RecordingNotifier::default());
        let client = client_for(addr, &notifier);

        let err = client.delete("/api/hosts/node1").await.unwrap_err();
        match err {
            RequestError::Failed { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Request failed (404)");
            }
            other => panic!("expected a failed call, got {other:?}"),
        }
        assert_eq!(
            notifier.shown(),
            vec![(Severity::Danger, "Request failed (404)".to_string())]
        );
    }

    #[tokio::test]
    async fn envelope_error_fails_the_call_despite_ok_status() {
        let addr = serve_once("200 OK", r#"{"status":"error","message":"Invalid entry"}"#).await;
        let notifier = Arc::new(RecordingNotifier::default());
        let client = client_for(addr, &notifier);

        let err = client
            .put("/api/hosts/node1", &json!({"ip": "bad"}))
            .await
            .unwrap_err();
        match err {
            RequestError::Failed { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "Invalid entry");
            }
            other => panic!("expected a failed call, got {other:?}"),
        }
        assert_eq!(
            notifier.shown(),
            vec![(Severity::Danger, "Invalid entry".to_string())]
        );
    }

    #[tokio::test]
    async fn non_json_body_on_ok_status_is_an_empty_success() {
        let addr = serve_once("200 OK", "<html>maintenance</html>").await;
        let notifier = Arc::new(RecordingNotifier::default());
        let client = client_for(addr, &notifier);

        let data = client.get("/api/health").await.unwrap();
        assert_eq!(data, json!({}));
        assert!(notifier.shown().is_empty());
    }

    #[tokio::test]
    async fn connect_failure_notifies_and_fails() {
        // Bind a port, then drop the listener so connecting to it is refused.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = Arc::new(RecordingNotifier::default());
        let client = client_for(addr, &notifier);

        let err = client.get("/api/health").await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
        let shown = notifier.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, Severity::Danger);
    }

    #[test]
    fn invalid_base_url_is_rejected_at_construction() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            ApiClient::new(&config),
            Err(RequestError::InvalidUrl(_))
        ));
    }
}
