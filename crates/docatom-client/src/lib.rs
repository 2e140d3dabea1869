//! docatom-client - Client library for the DocumentAtom API.
//!
//! This crate uploads documents to a DocumentAtom service for type detection
//! and atom extraction.
//!
//! Every call validates its input up front and returns a [`Pending`] request.
//! Await it to send, or take its [`Canceller`] first to abort it later.
//!
//! # Example
//!
//! ```ignore
//! use docatom_client::DocumentAtomClient;
//!
//! let client = DocumentAtomClient::new("http://localhost:8000")?;
//!
//! // Detect the type of a file on disk
//! let detected = client.type_detection().detect_type(Path::new("report.pdf"))?.await?;
//!
//! // Extract atoms, keeping a handle to cancel the upload
//! let request = client.extract_atom().pdf(bytes)?;
//! let canceller = request.canceller();
//! let atoms = request.await?;
//! ```

mod cancel;
mod client;
mod facades;
mod payload;
mod transport;

pub use cancel::{Canceller, Pending};
pub use client::DocumentAtomClient;
pub use facades::{AtomFormat, ExtractAtom, TypeDetection, TYPE_DETECT_PATH};
pub use payload::{read_document, DocumentSource, Payload};
pub use transport::{Transport, FILE_FIELD};

pub use docatom_core::{
    Atom, ClientConfig, DocAtomError, DocAtomResult, ErrorCode, ExtractAtomResponse, LogSink,
    Quark, Rejection, Severity, TypeDetectionResponse,
};
