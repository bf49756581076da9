//! Client configuration resolved once at process start.

use std::env;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

use crate::error::ApiError;

/// Base URL used when `API_BASE_URL` is unset or blank.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub const BASE_URL_VAR: &str = "API_BASE_URL";
pub const TIMEOUT_VAR: &str = "API_TIMEOUT_MS";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Relative path for each logical student operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub students: String,
    pub search: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            students: "/students".to_string(),
            search: "/students/search".to_string(),
        }
    }
}

impl Endpoints {
    pub fn list(&self) -> &str {
        &self.students
    }

    /// Path of one student. `id` is percent-encoded as a single segment, so
    /// it can never reach another route or add a query string.
    pub fn by_id(&self, id: &str) -> Result<String, ApiError> {
        let segment = match id {
            "" => {
                return Err(ApiError::Serialization(
                    "student id must not be empty".to_string(),
                ))
            }
            // Dot segments would be collapsed by URL normalization.
            "." | ".." => id.replace('.', "%2E"),
            _ => utf8_percent_encode(id, PATH_SEGMENT).to_string(),
        };
        Ok(format!("{}/{segment}", self.students))
    }

    pub fn search(&self) -> &str {
        &self.search
    }
}

/// Everything `RestClient` and `StudentService` need to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Upper bound for a single request round-trip.
    pub timeout: Duration,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with default timeout and endpoints.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout: DEFAULT_TIMEOUT,
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read a `.env` file if one exists, then resolve from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_env()?;
        tracing::debug!(
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            "Loaded client configuration"
        );
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = optional(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = optional(TIMEOUT_VAR)
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidValue {
                        key: TIMEOUT_VAR.to_string(),
                        value,
                    })
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self::new(&base_url).with_timeout(timeout))
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
