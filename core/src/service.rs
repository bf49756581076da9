//! Student resource service: fixed paths and verbs over `RestClient`.
//!
//! Every method issues exactly one request and returns the client's result
//! unchanged. Ids are percent-encoded into a single path segment; beyond that
//! there is no validation, retry or partial-update merging here.
//! `update_student` always sends the full record.

use serde::de::IgnoredAny;

use crate::client::RestClient;
use crate::codec::{Codec, JsonCodec};
use crate::config::{ClientConfig, Endpoints};
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Student, StudentInput};

#[derive(Debug, Clone)]
pub struct StudentService<T = UreqTransport, C = JsonCodec> {
    client: RestClient<T, C>,
    endpoints: Endpoints,
}

impl StudentService {
    pub fn new(config: &ClientConfig) -> Self {
        Self::from_client(RestClient::new(config), config.endpoints.clone())
    }
}

impl<T: Transport, C: Codec> StudentService<T, C> {
    pub fn from_client(client: RestClient<T, C>, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn client(&self) -> &RestClient<T, C> {
        &self.client
    }

    /// `GET /students`, in server order.
    pub fn get_all_students(&self) -> Result<Vec<Student>, ApiError> {
        self.client.get(self.endpoints.list())
    }

    /// `GET /students/{id}`. A missing record is an `Http` 404 error.
    pub fn get_student_by_id(&self, id: &str) -> Result<Student, ApiError> {
        self.client.get(&self.endpoints.by_id(id)?)
    }

    /// `POST /students`. The returned record carries the server-assigned id.
    pub fn create_student(&self, input: &StudentInput) -> Result<Student, ApiError> {
        self.client.post(self.endpoints.list(), input)
    }

    /// `PUT /students/{id}` with a whole replacement record.
    pub fn update_student(&self, id: &str, input: &StudentInput) -> Result<Student, ApiError> {
        self.client.put(&self.endpoints.by_id(id)?, input)
    }

    /// `DELETE /students/{id}`. Any success body, including none, is accepted.
    pub fn delete_student(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&self.endpoints.by_id(id)?)
            .map(|_| ())
    }

    /// `GET /students/search?q={query}` with `query` form-urlencoded.
    pub fn search_students(&self, query: &str) -> Result<Vec<Student>, ApiError> {
        let encoded = serde_urlencoded::to_string([("q", query)])
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.client
            .get(&format!("{}?{encoded}", self.endpoints.search()))
    }
}
