//! Aspect ratio presets and upload content types.

use std::fmt;
use std::path::Path;

/// The five aspect ratio presets offered for text-to-image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// 1:1
    #[default]
    Square,
    /// 16:9
    Landscape,
    /// 9:16
    Portrait,
    /// 4:3
    Classic,
    /// 3:4
    ClassicPortrait,
}

impl AspectRatio {
    /// All presets in display order.
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Classic,
        AspectRatio::ClassicPortrait,
    ];

    /// The ratio as sent to the remote service, e.g. `"16:9"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Classic => "4:3",
            Self::ClassicPortrait => "3:4",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an aspect ratio preset.
///
/// # Errors
///
/// Returns an error if the ratio is not one of the presets.
pub fn parse_aspect_ratio(ratio: &str) -> Result<AspectRatio, String> {
    AspectRatio::ALL.into_iter().find(|r| r.as_str() == ratio).ok_or_else(|| {
        let valid: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
        format!("Unsupported aspect ratio '{ratio}'. Valid: {valid:?}")
    })
}

/// Content type a file declares through its extension.
#[must_use]
pub fn declared_mime_type(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Validate that a declared content type is an image type.
///
/// # Errors
///
/// Returns an error if the type does not start with `image/`.
pub fn validate_image_mime(mime: &str) -> Result<(), String> {
    if mime.starts_with("image/") {
        Ok(())
    } else {
        Err(format!("Unsupported file type '{mime}'. Expected image/png, image/jpeg or image/webp"))
    }
}
