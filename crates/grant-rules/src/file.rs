//! Attachment rules

use crate::violation::RuleViolation;
use grant_model::{mime, Attachments, DocumentType, FileRef};

/// Largest accepted attachment: 10 MiB
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted attachment mime types
pub const ALLOWED_MIME_TYPES: [&str; 7] = [
    mime::PDF,
    mime::DOCX,
    mime::DOC,
    mime::XLSX,
    mime::XLS,
    mime::JPEG,
    mime::PNG,
];

/// Check if `mime_type` is in the allow-list
#[inline]
#[must_use]
pub fn is_allowed_mime(mime_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime_type)
}

/// Size and type gate for one attachment slot
///
/// An empty slot passes. Size is checked before type.
pub fn file_constraints(file: Option<&FileRef>) -> Result<(), RuleViolation> {
    let Some(file) = file else {
        return Ok(());
    };
    if file.size_bytes() > MAX_ATTACHMENT_BYTES {
        return Err(RuleViolation::FileTooLarge {
            size: file.size_bytes(),
            max: MAX_ATTACHMENT_BYTES,
        });
    }
    if !is_allowed_mime(file.mime_type()) {
        return Err(RuleViolation::UnsupportedFileType {
            mime: file.mime_type().to_string(),
        });
    }
    Ok(())
}

/// Required slots that hold no file, in display order
#[must_use]
pub fn missing_required_attachments(attachments: &Attachments) -> Vec<DocumentType> {
    DocumentType::ALL
        .into_iter()
        .filter(|slot| slot.is_required() && attachments.get(*slot).is_none())
        .collect()
}
