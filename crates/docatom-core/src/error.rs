//! Error types for DocumentAtom client operations.
//!
//! Errors fall into two groups. Precondition errors (`ArgumentMissing`,
//! `InvalidConfiguration`, `FileNotFound`) are returned before any request is
//! built. Everything that happens once a request is on the wire is normalized
//! into either the remote service's structured body or a message, see
//! [`DocAtomError::rejection`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for DocumentAtom operations.
pub type DocAtomResult<T> = Result<T, DocAtomError>;

/// Main error type for all DocumentAtom operations.
#[derive(Error, Debug)]
pub enum DocAtomError {
    /// A required argument was empty.
    #[error("{parameter} cannot be null or empty")]
    ArgumentMissing { parameter: String },

    /// A configuration value violates its invariant.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A document path does not exist.
    #[error("File not found at {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The service rejected the request with a structured error body.
    #[error("Remote error (HTTP {status}): {body}")]
    Remote {
        status: u16,
        body: serde_json::Value,
    },

    /// Network failure, timeout, abort, or an error status without a body.
    #[error("{message}")]
    Transport {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A successful response whose body could not be deserialized.
    #[error("Parse error: {message}")]
    Parse { message: String, code: ErrorCode },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValMissingArgument,
    ValInvalidConfiguration,

    // Files (FILE_xxx)
    FileNotFound,
    FileIo,

    // Remote (REM_xxx)
    RemoteApplication,

    // Network (NET_xxx)
    NetTimeout,
    NetConnectionFailed,
    NetCancelled,
    NetHttpStatus,

    // Parse (PARSE_xxx)
    ParseInvalidJson,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValMissingArgument => "VAL_001",
            ErrorCode::ValInvalidConfiguration => "VAL_002",
            ErrorCode::FileNotFound => "FILE_001",
            ErrorCode::FileIo => "FILE_002",
            ErrorCode::RemoteApplication => "REM_001",
            ErrorCode::NetTimeout => "NET_001",
            ErrorCode::NetConnectionFailed => "NET_002",
            ErrorCode::NetCancelled => "NET_003",
            ErrorCode::NetHttpStatus => "NET_004",
            ErrorCode::ParseInvalidJson => "PARSE_001",
        }
    }
}

/// The single shape a failed request is reported as.
///
/// Either the service's error body, untouched, or a message. Never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection<'a> {
    Body(&'a serde_json::Value),
    Message(String),
}

impl DocAtomError {
    /// Create an argument-missing error naming the parameter.
    pub fn argument_missing(parameter: impl Into<String>) -> Self {
        Self::ArgumentMissing {
            parameter: parameter.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create a transport error with the given code.
    pub fn transport(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::Transport {
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Create a transport error that keeps the underlying cause.
    pub fn transport_with_source(
        message: impl Into<String>,
        code: ErrorCode,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            code,
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            code: ErrorCode::ParseInvalidJson,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ArgumentMissing { .. } => ErrorCode::ValMissingArgument,
            Self::InvalidConfiguration(_) => ErrorCode::ValInvalidConfiguration,
            Self::FileNotFound { .. } => ErrorCode::FileNotFound,
            Self::Remote { .. } => ErrorCode::RemoteApplication,
            Self::Transport { code, .. } => *code,
            Self::Parse { code, .. } => *code,
            Self::Io(_) => ErrorCode::FileIo,
        }
    }

    /// Project the error onto the unified rejection shape.
    ///
    /// A structured remote body wins, otherwise the message is used.
    pub fn rejection(&self) -> Rejection<'_> {
        match self {
            Self::Remote { body, .. } => Rejection::Body(body),
            Self::Transport { message, .. } | Self::Parse { message, .. } => {
                Rejection::Message(message.clone())
            }
            other => Rejection::Message(other.to_string()),
        }
    }

    /// The remote error body, if the service sent one.
    pub fn remote_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Remote { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether this error was raised before any request was attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::ArgumentMissing { .. } | Self::InvalidConfiguration(_) | Self::FileNotFound { .. }
        )
    }

    /// Whether the request ran out of time waiting for a response.
    pub fn is_timeout(&self) -> bool {
        self.code() == ErrorCode::NetTimeout
    }

    /// Whether the request was aborted through its canceller.
    pub fn is_cancelled(&self) -> bool {
        self.code() == ErrorCode::NetCancelled
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::ArgumentMissing { .. } => Some("Please supply a non-empty value"),
            Self::FileNotFound { .. } => Some("Please check the document path"),
            Self::Transport {
                code: ErrorCode::NetTimeout,
                ..
            } => Some("Please raise timeout_ms or check the service load"),
            Self::Transport {
                code: ErrorCode::NetConnectionFailed,
                ..
            } => Some("Please check that the endpoint is reachable"),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DocAtomError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}
