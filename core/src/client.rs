//! Verb-generic REST client shared by every resource service.
//!
//! # Design
//! `RestClient` holds the base URL, a `Transport` and a `Codec`, and carries
//! no mutable state between calls. Each call is split into
//! [`RestClient::build_request`], which produces an `HttpRequest`, the
//! transport round-trip, and [`RestClient::parse_response`], which turns the
//! `HttpResponse` into a typed value or an `ApiError`. Both halves are public
//! so they can be tested without a network.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{Codec, JsonCodec};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Blocking JSON-over-HTTP client bound to one base URL.
#[derive(Debug, Clone)]
pub struct RestClient<T = UreqTransport, C = JsonCodec> {
    base_url: String,
    transport: T,
    codec: C,
}

impl RestClient {
    /// Client using `ureq` with the configured timeout and the JSON codec.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        RestClient::with_parts(config, transport, JsonCodec)
    }
}

impl<T: Transport, C: Codec> RestClient<T, C> {
    pub fn with_parts(config: &ClientConfig, transport: T, codec: C) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
            codec,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.build_request::<()>(HttpMethod::Get, path, None)?;
        self.send(request)
    }

    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Post, path, Some(body))?;
        self.send(request)
    }

    pub fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(HttpMethod::Put, path, Some(body))?;
        self.send(request)
    }

    /// Issue a DELETE. An empty response body is a valid result for any `R`
    /// that can be decoded from "no value", such as `()` or `IgnoredAny`.
    pub fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.build_request::<()>(HttpMethod::Delete, path, None)?;
        self.send(request)
    }

    /// Join `path` onto the base URL and encode `body`, if any.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        let media_type = self.codec.content_type();
        let mut headers = vec![("accept".to_string(), media_type.to_string())];
        let body = match body {
            Some(value) => {
                headers.push(("content-type".to_string(), media_type.to_string()));
                Some(self.codec.encode(value)?)
            }
            None => None,
        };
        Ok(HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        })
    }

    /// Map a non-2xx status to `ApiError::Http`, otherwise decode the body.
    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }
        self.codec.decode(&response.body)
    }

    fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.transport.execute(&request).map_err(|err| {
            tracing::warn!(method = %request.method, url = %request.url, error = %err, "Request failed");
            err
        })?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "Received response"
        );
        if !response.is_success() {
            tracing::warn!(
                method = %request.method,
                url = %request.url,
                status = response.status,
                "Server returned error status"
            );
        }
        self.parse_response(response)
    }
}

#[cfg(test)]
mod tests {
    use serde::de::IgnoredAny;

    use super::*;
    use crate::types::{Student, StudentInput};

    struct NoNetwork;

    impl Transport for NoNetwork {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Network("offline".to_string()))
        }
    }

    fn client() -> RestClient<NoNetwork> {
        RestClient::with_transport(&ClientConfig::new("http://localhost:8080/api"), NoNetwork)
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn input() -> StudentInput {
        StudentInput {
            name: "Jane Roe".to_string(),
            roll_no: "EE042".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1987654321".to_string(),
            department: "Electrical".to_string(),
            year: "1st Year".to_string(),
        }
    }

    #[test]
    fn build_get_has_no_body_or_content_type() {
        let req = client()
            .build_request::<()>(HttpMethod::Get, "/students", None)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/api/students");
        assert!(req.body.is_none());
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_post_serializes_body_with_content_type() {
        let req = client()
            .build_request(HttpMethod::Post, "/students", Some(&input()))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["rollNo"], "EE042");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RestClient::with_transport(&ClientConfig::new("http://localhost:8080/api/"), NoNetwork);
        let req = client
            .build_request::<()>(HttpMethod::Delete, "/students/1", None)
            .unwrap();
        assert_eq!(req.url, "http://localhost:8080/api/students/1");
    }

    #[test]
    fn parse_accepts_any_2xx() {
        let body = r#"{"id":"1","name":"Jane Roe","rollNo":"EE042","email":"jane@example.com","phone":"+1987654321","department":"Electrical","year":"1st Year"}"#;
        let created: Student = client().parse_response(response(201, body)).unwrap();
        assert_eq!(created, input().with_id("1"));
        let fetched: Student = client().parse_response(response(200, body)).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn parse_error_status_carries_body() {
        let err = client()
            .parse_response::<Student>(response(500, "internal error"))
            .unwrap_err();
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_not_found() {
        let err = client()
            .parse_response::<Student>(response(404, ""))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn parse_bad_json() {
        let err = client()
            .parse_response::<Vec<Student>>(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn parse_empty_body_for_delete() {
        client()
            .parse_response::<IgnoredAny>(response(204, ""))
            .unwrap();
        client()
            .parse_response::<IgnoredAny>(response(200, r#"{"message":"deleted"}"#))
            .unwrap();
    }

    #[test]
    fn transport_errors_pass_through() {
        let err = client().get::<Vec<Student>>("/students").unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
