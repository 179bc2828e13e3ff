use std::fs;
use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use report_core::Attachment;
use thiserror::Error;

/// Inline request data above this size is rejected by the generator.
pub const MAX_ATTACHMENT_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path} is too large ({actual} bytes, max {max_bytes})")]
    TooLarge {
        path: String,
        max_bytes: u64,
        actual: u64,
    },
}

/// Reads a reference document and encodes it for inline transfer.
pub fn load_attachment(path: &Path) -> Result<Attachment, AttachmentError> {
    let display = path.display().to_string();
    let read_err = |source| AttachmentError::Read {
        path: display.clone(),
        source,
    };

    let len = fs::metadata(path).map_err(read_err)?.len();
    if len > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            path: display.clone(),
            max_bytes: MAX_ATTACHMENT_BYTES,
            actual: len,
        });
    }
    let bytes = fs::read(path).map_err(read_err)?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());
    Ok(Attachment {
        name,
        mime_type: mime_type_for(path).to_string(),
        data: STANDARD.encode(bytes),
    })
}

pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "hwp" => "application/x-hwp",
        _ => "application/octet-stream",
    }
}
