//! Network seam for the SOS client.
//!
//! [`Transport`] posts a JSON body and hands back the parsed JSON response.
//! [`HttpTransport`] is the reqwest implementation used by the CLI; tests
//! substitute a scripted transport.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::LoaderConfig;
use crate::error::Result;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request never produced a response (refused, DNS, timeout).
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    /// A non-success status whose body is not JSON.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be read or parsed as JSON.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, TransportError::Unreachable(_))
    }
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `payload` as JSON to `endpoint` and return the parsed response body.
    async fn post_json(&self, endpoint: &str, payload: &Value) -> TransportResult<Value>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        Self::new(config.request_timeout(), config.connect_timeout())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, endpoint: &str, payload: &Value) -> TransportResult<Value> {
        let body = serde_json::to_vec(payload).map_err(|e| TransportError::Decode(e.to_string()))?;

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let status = response.status();
        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type)
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        let text = decode_body(&bytes, charset.as_deref());

        debug!("SOS responded with HTTP {} ({} bytes)", status, bytes.len());

        match serde_json::from_str::<Value>(&text) {
            Ok(json) => Ok(json),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(TransportError::Decode(e.to_string())),
        }
    }
}

/// Extract the `charset` parameter from a `Content-Type` header value.
fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Decode a response body with the declared charset, falling back to UTF-8.
fn decode_body(bytes: &[u8], charset: Option<&str>) -> String {
    let encoding = charset
        .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()))
        .unwrap_or(encoding_rs::UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
