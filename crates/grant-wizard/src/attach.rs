//! Reading attachment files from disk

use grant_model::{mime, mime_for_extension, FileRef};
use std::io;
use std::path::Path;

/// Read `path` into a [`FileRef`], inferring the mime type from its extension
///
/// Files without an extension are typed `application/octet-stream` and will
/// fail the attachment type rule.
pub async fn read_attachment(path: &Path) -> io::Result<FileRef> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    let mime_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(mime::OCTET_STREAM, mime_for_extension);
    Ok(FileRef::new(file_name, mime_type, bytes))
}
