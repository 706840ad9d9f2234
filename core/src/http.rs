//! HTTP requests as plain data, and the transport that executes them.
//!
//! # Design
//! `Client` builds `HttpRequest` values without touching the network and
//! hands them to a `Transport` for the round-trip. The split keeps request
//! construction deterministic and lets tests swap in a recording transport.
//! `UreqTransport` is the blocking HTTP/1.1 implementation used by default.

use std::time::Duration;

use thiserror::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Whether the response body should be read. Delete only needs the status.
    pub read_body: bool,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<Vec<u8>>,
}

/// Why a request produced no response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Failed(String),
}

/// Performs the HTTP round-trip for a request.
///
/// Any status the server answers with is a successful exchange. An `Err`
/// means nothing usable came back.
pub trait Transport {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        (**self).send(request, timeout)
    }
}

/// Blocking transport backed by `ureq`. Builds one agent per request so the
/// timeout applies to the whole exchange, connect through body read.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        // 4xx/5xx are data, not errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        let result = match request.method {
            HttpMethod::Get => with_headers(agent.get(&request.uri), &request.headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(&request.uri), &request.headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(agent.post(&request.uri), &request.headers);
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(map_ureq_error)?;
        let status = response.status().as_u16();
        // The whole body is read, however large; ureq caps it at 10 MiB otherwise.
        let body = if request.read_body {
            let bytes = response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_vec()
                .map_err(map_ureq_error)?;
            Some(bytes)
        } else {
            None
        };

        Ok(HttpResponse { status, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match &err {
        ureq::Error::Timeout(_) => TransportError::Timeout(err.to_string()),
        _ => TransportError::Failed(err.to_string()),
    }
}
