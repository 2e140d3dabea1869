//! Response types returned by the DocumentAtom service.
//!
//! Field names follow the service's wire format, so most fields carry an
//! explicit `rename`. Atoms and quarks are handed back as the service sent
//! them: `null` reads as the field's default and unknown fields are kept in
//! `extra`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Result of a type detection call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDetectionResponse {
    /// MIME type, e.g. `application/pdf`.
    #[serde(rename = "MimeType")]
    pub mime_type: String,
    /// Canonical file extension without the dot.
    #[serde(rename = "Extension")]
    pub extension: String,
    /// Document type label, e.g. `Pdf`.
    #[serde(rename = "Type")]
    pub type_: String,
}

/// Atoms extracted from one document, in document order.
pub type ExtractAtomResponse = Vec<Atom>;

/// A unit of extracted content such as a paragraph, cell or image region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    #[serde(rename = "GUID", default, deserialize_with = "null_as_default")]
    pub guid: String,
    #[serde(rename = "Type", default, deserialize_with = "null_as_default")]
    pub type_: String,
    /// Byte offset within the source document.
    #[serde(rename = "Position", default, deserialize_with = "null_as_default")]
    pub position: u64,
    /// Length in bytes.
    #[serde(rename = "Length", default, deserialize_with = "null_as_default")]
    pub length: u64,
    #[serde(rename = "MD5Hash", default, deserialize_with = "null_as_default")]
    pub md5_hash: String,
    #[serde(rename = "SHA1Hash", default, deserialize_with = "null_as_default")]
    pub sha1_hash: String,
    #[serde(rename = "SHA256Hash", default, deserialize_with = "null_as_default")]
    pub sha256_hash: String,
    #[serde(rename = "Formatting", default, deserialize_with = "null_as_default")]
    pub formatting: String,
    #[serde(rename = "Text", default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "HeaderLevel", default, skip_serializing_if = "Option::is_none")]
    pub header_level: Option<u32>,
    #[serde(rename = "Quarks", default, skip_serializing_if = "Option::is_none")]
    pub quarks: Option<Vec<Quark>>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A child unit nested under an [`Atom`] or another quark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quark {
    #[serde(rename = "ParentGUID", default, deserialize_with = "null_as_default")]
    pub parent_guid: String,
    #[serde(rename = "GUID", default, deserialize_with = "null_as_default")]
    pub guid: String,
    #[serde(rename = "Type", default, deserialize_with = "null_as_default")]
    pub type_: String,
    #[serde(rename = "Position", default, deserialize_with = "null_as_default")]
    pub position: u64,
    #[serde(rename = "Length", default, deserialize_with = "null_as_default")]
    pub length: u64,
    #[serde(rename = "MD5Hash", default, deserialize_with = "null_as_default")]
    pub md5_hash: String,
    #[serde(rename = "SHA1Hash", default, deserialize_with = "null_as_default")]
    pub sha1_hash: String,
    #[serde(rename = "SHA256Hash", default, deserialize_with = "null_as_default")]
    pub sha256_hash: String,
    #[serde(rename = "Formatting", default, deserialize_with = "null_as_default")]
    pub formatting: String,
    #[serde(rename = "Text", default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Table payload, passed through as-is.
    #[serde(rename = "Table", default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Value>,
    #[serde(rename = "HeaderLevel", default, skip_serializing_if = "Option::is_none")]
    pub header_level: Option<u32>,
    #[serde(rename = "Quarks", default, skip_serializing_if = "Option::is_none")]
    pub quarks: Option<Vec<Quark>>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Atom {
    /// Number of quarks at every depth below this atom.
    pub fn quark_count(&self) -> usize {
        self.quarks.as_deref().map(count_quarks).unwrap_or(0)
    }
}

/// Read `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn count_quarks(quarks: &[Quark]) -> usize {
    quarks
        .iter()
        .map(|q| 1 + q.quarks.as_deref().map(count_quarks).unwrap_or(0))
        .sum()
}
