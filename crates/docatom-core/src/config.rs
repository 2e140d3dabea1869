//! Client configuration.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DocAtomError, DocAtomResult};

/// Endpoint used when none is given.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/";

/// Default response timeout (five minutes).
pub const DEFAULT_TIMEOUT_MS: u64 = 300_000;

/// Connection settings shared by every request a client issues.
///
/// The endpoint always ends with exactly one `/`, and the timeout is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    endpoint: String,
    timeout_ms: u64,
    /// Headers merged into every upload.
    #[serde(default)]
    default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given base endpoint.
    pub fn new(endpoint: &str) -> DocAtomResult<Self> {
        Ok(Self {
            endpoint: normalize_endpoint(endpoint)?,
            ..Self::default()
        })
    }

    /// The normalized base endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Replace the base endpoint.
    pub fn set_endpoint(&mut self, endpoint: &str) -> DocAtomResult<()> {
        self.endpoint = normalize_endpoint(endpoint)?;
        Ok(())
    }

    /// Response timeout in milliseconds.
    ///
    /// Bounds the wait until the response status and headers arrive. Once the
    /// response has started, downloading its body is not timed.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Response timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Set the response timeout. Must be at least one millisecond.
    pub fn set_timeout_ms(&mut self, timeout_ms: i64) -> DocAtomResult<()> {
        if timeout_ms < 1 {
            return Err(DocAtomError::invalid_configuration(
                "TimeoutMs must be greater than 0.",
            ));
        }
        self.timeout_ms = timeout_ms as u64;
        Ok(())
    }

    /// Builder: set the response timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: i64) -> DocAtomResult<Self> {
        self.set_timeout_ms(timeout_ms)?;
        Ok(self)
    }

    /// Headers merged into every upload.
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Mutable access to the default headers.
    pub fn default_headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.default_headers
    }

    /// Builder: add a default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Resolve a path suffix against the endpoint.
    pub fn url_for(&self, suffix: &str) -> String {
        format!("{}{}", self.endpoint, suffix)
    }

    /// Re-check every invariant, e.g. after deserializing.
    pub fn validate(&self) -> DocAtomResult<()> {
        let normalized = normalize_endpoint(&self.endpoint)?;
        if normalized != self.endpoint {
            return Err(DocAtomError::invalid_configuration(format!(
                "Endpoint '{}' must end with '/'",
                self.endpoint
            )));
        }
        if self.timeout_ms < 1 {
            return Err(DocAtomError::invalid_configuration(
                "TimeoutMs must be greater than 0.",
            ));
        }
        Ok(())
    }
}

fn normalize_endpoint(endpoint: &str) -> DocAtomResult<String> {
    if endpoint.is_empty() {
        return Err(DocAtomError::argument_missing("Endpoint"));
    }

    url::Url::parse(endpoint).map_err(|e| {
        DocAtomError::invalid_configuration(format!("Invalid endpoint URL '{}': {}", endpoint, e))
    })?;

    if endpoint.ends_with('/') {
        Ok(endpoint.to_string())
    } else {
        Ok(format!("{}/", endpoint))
    }
}
