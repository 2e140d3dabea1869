//! Endpoint facades: type detection and per-format atom extraction.
//!
//! Each call checks its document is present, resolves a fixed path under the
//! configured endpoint and hands off to [`Transport::upload`].

use strum::{Display, EnumIter, EnumString};

use docatom_core::{DocAtomResult, ExtractAtomResponse, TypeDetectionResponse};

use crate::cancel::Pending;
use crate::payload::DocumentSource;
use crate::transport::Transport;

/// Path of the type detection endpoint.
pub const TYPE_DETECT_PATH: &str = "typedetect";

/// Document formats the service can extract atoms from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AtomFormat {
    Excel,
    Html,
    Markdown,
    Ocr,
    Pdf,
    Png,
    #[strum(to_string = "powerpoint", serialize = "pptx")]
    PowerPoint,
    Rtf,
    Text,
    Word,
}

impl AtomFormat {
    /// Path of the extraction endpoint, relative to the base endpoint.
    pub fn path_suffix(&self) -> &'static str {
        match self {
            Self::Excel => "atom/excel",
            Self::Html => "atom/html",
            Self::Markdown => "atom/markdown",
            Self::Ocr => "atom/ocr",
            Self::Pdf => "atom/pdf",
            Self::Png => "atom/png",
            // PowerPoint slides are always extracted with OCR assistance.
            Self::PowerPoint => "atom/powerpoint?ocr",
            Self::Rtf => "atom/rtf",
            Self::Text => "atom/text",
            Self::Word => "atom/word",
        }
    }
}

/// Type detection endpoint.
#[derive(Debug, Clone, Copy)]
pub struct TypeDetection<'a> {
    transport: &'a Transport,
}

impl<'a> TypeDetection<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Detect the MIME type, extension and document type of a file.
    pub fn detect_type(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, TypeDetectionResponse>> {
        let payload = document.into().resolve()?;
        let url = self.transport.config().url_for(TYPE_DETECT_PATH);
        Ok(self.transport.upload(url, payload))
    }
}

/// Atom extraction endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ExtractAtom<'a> {
    transport: &'a Transport,
}

impl<'a> ExtractAtom<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Extract atoms from a document of the given format.
    pub fn extract(
        &self,
        format: AtomFormat,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        let payload = document.into().resolve()?;
        let url = self.transport.config().url_for(format.path_suffix());
        Ok(self.transport.upload(url, payload))
    }

    /// Extract atoms from an Excel workbook.
    pub fn excel(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Excel, document)
    }

    /// Extract atoms from an HTML document.
    pub fn html(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Html, document)
    }

    /// Extract atoms from a Markdown document.
    pub fn markdown(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Markdown, document)
    }

    /// Extract atoms from an image using OCR.
    pub fn ocr(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Ocr, document)
    }

    /// Extract atoms from a PDF.
    pub fn pdf(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Pdf, document)
    }

    /// Extract atoms from a PNG image.
    pub fn png(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Png, document)
    }

    /// Extract atoms from a PowerPoint deck (PPT or PPTX).
    pub fn powerpoint(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::PowerPoint, document)
    }

    /// Extract atoms from an RTF document.
    pub fn rtf(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Rtf, document)
    }

    /// Extract atoms from plain text.
    pub fn text(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Text, document)
    }

    /// Extract atoms from a Word document (DOC or DOCX).
    pub fn word(
        &self,
        document: impl Into<DocumentSource>,
    ) -> DocAtomResult<Pending<'a, ExtractAtomResponse>> {
        self.extract(AtomFormat::Word, document)
    }
}
