//! Loading image attachments from disk.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use veritas_contracts::{
    error::{VeritasError, VeritasResult},
    request::ImageAttachment,
};

/// Media type for `path`, inferred from its extension.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Read `path` and encode it as a `data:` URI attachment.
pub fn load_image(path: &Path) -> VeritasResult<ImageAttachment> {
    let bytes = std::fs::read(path).map_err(|e| VeritasError::ImageRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let media_type = media_type_for(path);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(file = %file_name, media_type, bytes = bytes.len(), "image loaded");

    Ok(ImageAttachment {
        file_name,
        media_type: media_type.to_string(),
        data_uri: format!("data:{};base64,{}", media_type, STANDARD.encode(&bytes)),
        byte_len: bytes.len(),
    })
}
