//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `UreqTransport` builds a fresh agent for every call, so no connection or
//! session state survives between requests. Status codes are returned as
//! data (`http_status_as_error(false)`); interpreting them is the client's
//! job. The configured timeout covers the whole round-trip, from connect to
//! the last byte of the body.

use std::io;
use std::time::Duration;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Implementations report only transport failures (`Network`, `Timeout`).
/// Any response the server sends, whatever its status, is `Ok`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    timeout: Duration,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(self.timeout))
            .build()
            .new_agent()
    }

    fn map_error(&self, err: ureq::Error) -> ApiError {
        match err {
            ureq::Error::Timeout(_) => ApiError::Timeout(self.timeout),
            ureq::Error::Io(e) if is_timeout(&e) => ApiError::Timeout(self.timeout),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent();
        let url = request.url.as_str();
        let body = request.body.as_deref().map(str::as_bytes);

        let result = match (request.method, body) {
            (HttpMethod::Get, _) => with_headers(agent.get(url), &request.headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(url), &request.headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(agent.post(url), &request.headers).send(body)
            }
            (HttpMethod::Post, None) => with_headers(agent.post(url), &request.headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(agent.put(url), &request.headers).send(body)
            }
            (HttpMethod::Put, None) => with_headers(agent.put(url), &request.headers).send_empty(),
        };
        let mut response = result.map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // List and search are unpaginated, so the body has no size cap.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(|e| self.map_error(e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
