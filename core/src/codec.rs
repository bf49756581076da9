//! Body encoding at the client boundary.
//!
//! `RestClient` only talks to a [`Codec`], so the resource service above it
//! never depends on a concrete serialization library.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// Encode request bodies and decode response bodies.
pub trait Codec {
    /// Media type sent in `content-type` and `accept`.
    fn content_type(&self) -> &'static str;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ApiError>;

    /// Decode a response body. An empty (or all-whitespace) body must be
    /// treated as "no value" rather than a syntax error.
    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, ApiError>;
}

/// `serde_json` backed codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ApiError> {
        serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, ApiError> {
        // Empty bodies decode as `null`: fine for `()`, `Option<_>` and
        // `IgnoredAny`, a parse error for anything that needs a value.
        if body.trim().is_empty() {
            return T::deserialize(serde_json::Value::Null)
                .map_err(|e| ApiError::Parse(format!("empty response body: {e}")));
        }
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}
