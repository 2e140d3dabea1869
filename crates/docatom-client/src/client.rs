//! Client entry point for the DocumentAtom API.

use std::path::Path;
use std::sync::Arc;

use docatom_core::{ClientConfig, DocAtomResult, LogSink, Logger};

use crate::cancel::Pending;
use crate::facades::{ExtractAtom, TypeDetection};
use crate::payload::{read_document, Payload};
use crate::transport::Transport;

/// Client for the DocumentAtom API.
///
/// Configuration can only be changed through `&mut self`, so requests that
/// borrow the client always see the settings they were issued with.
#[derive(Debug)]
pub struct DocumentAtomClient {
    transport: Transport,
}

impl DocumentAtomClient {
    /// Create a new client for the given base endpoint.
    pub fn new(endpoint: &str) -> DocAtomResult<Self> {
        Self::with_config(ClientConfig::new(endpoint)?)
    }

    /// Create a new client from a full configuration.
    pub fn with_config(config: ClientConfig) -> DocAtomResult<Self> {
        config.validate()?;
        Ok(Self {
            transport: Transport::new(config, Logger::default())?,
        })
    }

    /// Builder: route client log messages to `sink`.
    pub fn with_logger(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.transport.set_logger(Logger::new(sink));
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Mutable configuration. Changes apply to requests issued afterwards.
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        self.transport.config_mut()
    }

    /// The underlying transport, for calling arbitrary paths.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Type detection endpoint.
    pub fn type_detection(&self) -> TypeDetection<'_> {
        TypeDetection::new(&self.transport)
    }

    /// Atom extraction endpoints.
    pub fn extract_atom(&self) -> ExtractAtom<'_> {
        ExtractAtom::new(&self.transport)
    }

    /// Check that the service answers at the configured endpoint.
    pub fn validate_connectivity(&self) -> Pending<'_, bool> {
        self.transport.probe()
    }

    /// Read a file into an uploadable payload.
    pub fn convert_file_to_binary(&self, path: impl AsRef<Path>) -> DocAtomResult<Payload> {
        read_document(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docatom_core::{ErrorCode, NoopSink};

    #[test]
    fn test_new_normalizes_endpoint() {
        let client = DocumentAtomClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.config().endpoint(), "http://localhost:8000/");
    }

    #[test]
    fn test_new_rejects_empty_endpoint() {
        let err = DocumentAtomClient::new("").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValMissingArgument);
    }

    #[test]
    fn test_config_mut_changes_timeout() {
        let mut client = DocumentAtomClient::new("http://localhost:8000")
            .unwrap()
            .with_logger(Arc::new(NoopSink));
        client.config_mut().set_timeout_ms(1000).unwrap();
        assert_eq!(client.transport().config().timeout_ms(), 1000);
    }

    #[test]
    fn test_facade_rejects_empty_document_synchronously() {
        let client = DocumentAtomClient::new("http://localhost:8000").unwrap();
        let err = client.extract_atom().pdf(Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "fileBinary cannot be null or empty");

        let err = client.type_detection().detect_type(Vec::<u8>::new()).unwrap_err();
        assert!(err.is_precondition());
    }
}
