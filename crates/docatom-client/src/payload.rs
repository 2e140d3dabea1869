//! Document payloads and the file reader that produces them.

use std::path::{Path, PathBuf};

use docatom_core::{DocAtomError, DocAtomResult};

/// Resolved document bytes, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub bytes: Vec<u8>,
    /// Size announced alongside the upload, when known.
    pub declared_size: Option<u64>,
    /// File name reported in the multipart part.
    pub file_name: Option<String>,
}

impl Payload {
    /// Wrap raw bytes with no declared size.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            declared_size: None,
            file_name: None,
        }
    }

    /// Builder: announce a size.
    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.declared_size = Some(size);
        self
    }

    /// Builder: set the reported file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }
}

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Bytes already in memory.
    Bytes(Vec<u8>),
    /// Bytes with an explicit declared size.
    Sized { bytes: Vec<u8>, size: u64 },
    /// A file to read before uploading.
    Path(PathBuf),
}

impl DocumentSource {
    /// Check presence and turn the source into an uploadable payload.
    ///
    /// Paths are read from disk here, before any request exists. Empty
    /// content is rejected whether it came from memory or from a file.
    pub fn resolve(self) -> DocAtomResult<Payload> {
        match self {
            Self::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(DocAtomError::argument_missing("fileBinary"));
                }
                Ok(Payload::new(bytes))
            }
            Self::Sized { bytes, size } => {
                if bytes.is_empty() {
                    return Err(DocAtomError::argument_missing("fileBinary"));
                }
                Ok(Payload::new(bytes).with_declared_size(size))
            }
            Self::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(DocAtomError::argument_missing("filePath"));
                }
                let payload = read_document(&path)?;
                if payload.bytes.is_empty() {
                    return Err(DocAtomError::argument_missing("fileBinary"));
                }
                Ok(payload)
            }
        }
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for DocumentSource {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for DocumentSource {
    fn from(bytes: &[u8; N]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for DocumentSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for DocumentSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Payload> for DocumentSource {
    fn from(payload: Payload) -> Self {
        match payload.declared_size {
            Some(size) => Self::Sized {
                bytes: payload.bytes,
                size,
            },
            None => Self::Bytes(payload.bytes),
        }
    }
}

/// Read a document from disk.
///
/// The declared size comes from the file's metadata and the file name is kept
/// for the multipart part.
pub fn read_document(path: impl AsRef<Path>) -> DocAtomResult<Payload> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DocAtomError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    let size = std::fs::metadata(path)?.len();

    let mut payload = Payload::new(bytes).with_declared_size(size);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        payload = payload.with_file_name(name);
    }

    tracing::debug!("Read {} bytes from {}", size, path.display());
    Ok(payload)
}
