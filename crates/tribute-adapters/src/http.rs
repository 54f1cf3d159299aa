use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use tribute_core::PortError;

/// Blocking JSON client for the tribute REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Arc<Mutex<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, PortError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
            token: Arc::new(Mutex::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) -> Result<(), PortError> {
        let mut g = self
            .token
            .lock()
            .map_err(|e| PortError::Transport(format!("token lock poisoned: {e}")))?;
        *g = token;
        Ok(())
    }

    pub fn get(&self, path: &str) -> Result<Value, PortError> {
        self.call(Method::GET, path, None)
    }

    pub fn post(&self, path: &str, body: &Value) -> Result<Value, PortError> {
        self.call(Method::POST, path, Some(body))
    }

    pub fn patch(&self, path: &str, body: &Value) -> Result<Value, PortError> {
        self.call(Method::PATCH, path, Some(body))
    }

    fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, PortError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");
        let mut req = self.client.request(method, &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        req = self.authorize(req)?;

        let response = req
            .send()
            .map_err(|e| PortError::Transport(format!("request to {path} failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| PortError::Transport(format!("reading {path} response failed: {e}")))?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).ok();
            let message = body
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| format!("server returned {status}"));
            tracing::warn!(%status, path, %message, "api request rejected");
            return Err(if status == StatusCode::NOT_FOUND {
                PortError::NotFound(message)
            } else {
                PortError::Rejected(message)
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| PortError::Transport(format!("{path} json decode failed: {e}")))
    }

    fn authorize(&self, req: RequestBuilder) -> Result<RequestBuilder, PortError> {
        let g = self
            .token
            .lock()
            .map_err(|e| PortError::Transport(format!("token lock poisoned: {e}")))?;
        Ok(match g.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        })
    }
}

fn error_message(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_owned())
}
