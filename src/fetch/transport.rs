//! HTTP transport for the request executor
//!
//! The executor consumes the network through the narrow [`Transport`]
//! trait: issue one GET for a path, or tear down and re-establish the
//! underlying connection. Retry policy and response classification live
//! in the executor; this module only moves bytes.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors at the transport level
///
/// All of these are soft from the executor's point of view: they trigger
/// retry/backoff rather than propagating directly.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),
}

/// A raw HTTP response: status code plus unparsed body
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body bytes, uninterpreted
    pub body: Vec<u8>,
}

/// Narrow network capability consumed by the request executor
///
/// One transport instance backs one executor and is never shared across
/// workers. `request` issues a single GET; `reconnect` drops the current
/// connection state and establishes fresh connections on the next
/// request (the recovery step for stale or half-closed connections).
#[async_trait]
pub trait Transport: Send {
    /// Issues a GET request for the given absolute path
    async fn request(&mut self, path: &str) -> Result<RawResponse, TransportError>;

    /// Re-establishes the underlying connection state
    fn reconnect(&mut self) -> Result<(), TransportError>;
}

/// Transport over reqwest against a fixed base URL
///
/// The client owns a connection pool that is reused across calls;
/// `reconnect` rebuilds the client, discarding every pooled connection.
pub struct HttpTransport {
    base_url: Url,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport for the given base URL (scheme and host)
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url,
            client: build_client()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&mut self, path: &str) -> Result<RawResponse, TransportError> {
        let url = self.base_url.join(path)?;
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }

    fn reconnect(&mut self) -> Result<(), TransportError> {
        self.client = build_client()?;
        Ok(())
    }
}

/// Builds an HTTP client with the crate's standard configuration
fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("starmap/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Scripted transport for exercising the executor's retry policy
///
/// Plays back a fixed sequence of responses and records every request
/// path and reconnect call.
#[cfg(test)]
pub(crate) struct ScriptedTransport {
    responses: std::collections::VecDeque<Result<RawResponse, TransportError>>,
    pub requests: Vec<String>,
    pub reconnects: usize,
}

#[cfg(test)]
impl ScriptedTransport {
    pub fn new(responses: Vec<Result<RawResponse, TransportError>>) -> Self {
        Self {
            responses: responses.into(),
            requests: Vec::new(),
            reconnects: 0,
        }
    }

    pub fn ok(body: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        })
    }

    pub fn status(status: u16) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status,
            body: Vec::new(),
        })
    }

    pub fn error(message: &str) -> Result<RawResponse, TransportError> {
        Err(TransportError::Connection(message.to_string()))
    }
}

#[cfg(test)]
#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(&mut self, path: &str) -> Result<RawResponse, TransportError> {
        self.requests.push(path.to_string());
        self.responses
            .pop_front()
            .unwrap_or_else(|| ScriptedTransport::error("script exhausted"))
    }

    fn reconnect(&mut self) -> Result<(), TransportError> {
        self.reconnects += 1;
        Ok(())
    }
}
