//! Attachment slots and file values
//!
//! A [`FileRef`] is the plain value an attachment slot holds: file name, mime
//! type, size and raw bytes. It carries no handle to where the bytes came
//! from, so constraint checks on it are pure functions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Mime types the wizard knows about
pub mod mime {
    /// Portable Document Format
    pub const PDF: &str = "application/pdf";
    /// OOXML word processing document
    pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    /// Legacy Word document
    pub const DOC: &str = "application/msword";
    /// OOXML spreadsheet
    pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
    /// Legacy Excel spreadsheet
    pub const XLS: &str = "application/vnd.ms-excel";
    /// JPEG image
    pub const JPEG: &str = "image/jpeg";
    /// PNG image
    pub const PNG: &str = "image/png";
    /// Plain text
    pub const TEXT: &str = "text/plain";
    /// Unknown binary
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Infer a mime type from a file extension (case-insensitive, without dot)
#[must_use]
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => mime::PDF,
        "docx" => mime::DOCX,
        "doc" => mime::DOC,
        "xlsx" => mime::XLSX,
        "xls" => mime::XLS,
        "jpg" | "jpeg" => mime::JPEG,
        "png" => mime::PNG,
        "txt" => mime::TEXT,
        _ => mime::OCTET_STREAM,
    }
}

/// The eleven fixed attachment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Completed application form
    ApplicationForm,
    /// Motivation letter
    MotivationLetter,
    /// Statutes and internal rules (NGO / cooperative)
    Statutes,
    /// Company registration sheet (SME / startup)
    CircuitSheet,
    /// Bank account details
    BankDetails,
    /// Accreditation or registration receipt
    Accreditation,
    /// CV of the project lead
    Cv,
    /// Detailed budget
    DetailedBudget,
    /// Project timeline
    Timeline,
    /// Map of the intervention area
    Map,
    /// Support or partnership letter
    SupportLetter,
}

impl DocumentType {
    /// All slots in display order
    pub const ALL: [DocumentType; 11] = [
        DocumentType::ApplicationForm,
        DocumentType::MotivationLetter,
        DocumentType::Statutes,
        DocumentType::CircuitSheet,
        DocumentType::BankDetails,
        DocumentType::Accreditation,
        DocumentType::Cv,
        DocumentType::DetailedBudget,
        DocumentType::Timeline,
        DocumentType::Map,
        DocumentType::SupportLetter,
    ];

    /// Persisted tag
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            DocumentType::ApplicationForm => "APPLICATION_FORM",
            DocumentType::MotivationLetter => "MOTIVATION_LETTER",
            DocumentType::Statutes => "STATUTES",
            DocumentType::CircuitSheet => "CIRCUIT_SHEET",
            DocumentType::BankDetails => "BANK_DETAILS",
            DocumentType::Accreditation => "ACCREDITATION",
            DocumentType::Cv => "CV",
            DocumentType::DetailedBudget => "DETAILED_BUDGET",
            DocumentType::Timeline => "TIMELINE",
            DocumentType::Map => "MAP",
            DocumentType::SupportLetter => "SUPPORT_LETTER",
        }
    }

    /// Whether the slot must be filled before a strict submission
    #[must_use]
    pub fn is_required(self) -> bool {
        !matches!(self, DocumentType::Map | DocumentType::SupportLetter)
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unrecognized attachment tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document type: '{0}'")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    /// Accepts the persisted tag in any case, with `-` or `_` separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|doc| doc.tag().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}

/// Attachment value: name, mime type, size and content
///
/// The stored `sizeBytes` is ignored on load; the size is always the byte count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredFile")]
pub struct FileRef {
    file_name: String,
    mime_type: String,
    size_bytes: u64,
    #[serde(with = "hex")]
    bytes: Vec<u8>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFile {
    file_name: String,
    mime_type: String,
    #[serde(with = "hex")]
    bytes: Vec<u8>,
}

impl From<StoredFile> for FileRef {
    fn from(stored: StoredFile) -> Self {
        Self::new(stored.file_name, stored.mime_type, stored.bytes)
    }
}

impl FileRef {
    /// Create from content; the size is taken from the byte count
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            bytes,
        }
    }

    /// File name as selected
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Declared mime type
    #[inline]
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Size in bytes
    #[inline]
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Raw content
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Mapping from attachment slot to its file, if any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attachments(BTreeMap<DocumentType, FileRef>);

impl Attachments {
    /// File in `slot`
    #[inline]
    #[must_use]
    pub fn get(&self, slot: DocumentType) -> Option<&FileRef> {
        self.0.get(&slot)
    }

    /// Put a file in `slot`, returning the file it replaces
    pub fn set(&mut self, slot: DocumentType, file: FileRef) -> Option<FileRef> {
        self.0.insert(slot, file)
    }

    /// Empty `slot`
    pub fn clear(&mut self, slot: DocumentType) -> Option<FileRef> {
        self.0.remove(&slot)
    }

    /// Filled slots in display order
    pub fn iter(&self) -> impl Iterator<Item = (DocumentType, &FileRef)> {
        self.0.iter().map(|(slot, file)| (*slot, file))
    }

    /// Number of filled slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no slot is filled
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
