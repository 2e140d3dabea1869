//! docatom-core - Core types for the DocumentAtom client.
//!
//! This crate holds what the HTTP client is built on: the validated
//! [`ClientConfig`], the [`DocAtomError`] taxonomy, the injectable
//! [`LogSink`] capability, and the response models returned by the service.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS};
pub use error::{DocAtomError, DocAtomResult, ErrorCode, Rejection};
pub use logging::{LogSink, Logger, NoopSink, Severity, TracingSink};
pub use types::{Atom, ExtractAtomResponse, Quark, TypeDetectionResponse};
