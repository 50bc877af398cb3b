//! Download naming and PNG materialization.

use std::path::{Path, PathBuf};

use base64::Engine;

use crate::error::ImageError;

/// File stem used when the prompt yields nothing usable.
const DEFAULT_STEM: &str = "generated-image";

/// Longest stem derived from a prompt.
const MAX_STEM_LEN: usize = 50;

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Download file name for a prompt, e.g. `"A-cat-wearing-a-hat.png"`.
#[must_use]
pub fn download_filename(prompt: &str) -> String {
    let stem = sanitize_for_filename(prompt, MAX_STEM_LEN);
    let stem = if stem.is_empty() { DEFAULT_STEM.to_string() } else { stem };
    format!("{stem}.png")
}

/// Sanitize a string for use in a filename.
///
/// Keeps ASCII alphanumerics and underscores, collapses every other run
/// into one hyphen, drops leading and trailing hyphens, and truncates to
/// `max_len` characters. Case is preserved.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true;

    for ch in input.trim().chars() {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' {
            result.push(ch);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }
    result
}

/// Where a download lands: an explicit file, a file inside an explicit
/// directory, or the derived name in the working directory.
#[must_use]
pub fn resolve_download_path(explicit: Option<&Path>, prompt: &str) -> PathBuf {
    match explicit {
        Some(p) if p.is_dir() => p.join(download_filename(prompt)),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(download_filename(prompt)),
    }
}

/// Decode a base64 image payload and write it as PNG, converting if needed.
///
/// # Errors
///
/// Returns an error if the payload is not valid base64, cannot be decoded as
/// an image, or the file cannot be written.
pub fn save_png(base64_data: &str, output_path: &Path) -> Result<(), ImageError> {
    let data = decode_payload(base64_data)?;

    if data.starts_with(&PNG_MAGIC) {
        std::fs::write(output_path, &data).map_err(ImageError::Io)
    } else {
        let img = image::load_from_memory(&data)
            .map_err(|e| ImageError::ImageConversion(format!("Failed to decode image: {e}")))?;
        img.save_with_format(output_path, image::ImageFormat::Png)
            .map_err(|e| ImageError::ImageConversion(format!("Failed to save as png: {e}")))
    }
}

/// Decode a base64 payload into raw bytes.
///
/// # Errors
///
/// Returns an error if the payload is not valid base64.
pub fn decode_payload(base64_data: &str) -> Result<Vec<u8>, ImageError> {
    base64::engine::general_purpose::STANDARD
        .decode(base64_data.trim())
        .map_err(|e| ImageError::ImageConversion(format!("Failed to decode base64: {e}")))
}
