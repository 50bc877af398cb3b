//! Image service port for the remote generative-image API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// A text-to-image request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesRequest {
    /// Remote model identifier (e.g., `"imagen-4.0-generate-001"`).
    pub model: String,
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Number of images to generate.
    pub count: u32,
    /// Requested output MIME type (e.g., `"image/png"`).
    pub output_mime_type: String,
    /// Aspect ratio (e.g., `"16:9"`).
    pub aspect_ratio: String,
}

/// A single image payload as returned on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Base64-encoded image bytes.
    pub data: String,
    /// MIME type, when the service reports one.
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Response to a text-to-image request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesResponse {
    /// Generated images, in service order.
    pub images: Vec<ImagePayload>,
}

/// One ordered part of a mixed-content request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentPart {
    /// Inline binary data.
    InlineData {
        /// MIME type of the data.
        mime_type: String,
        /// Base64-encoded bytes.
        data: String,
    },
    /// Plain text.
    Text(String),
}

/// Output modalities that can be requested from the content endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    /// Image output.
    Image,
    /// Text output.
    Text,
}

impl Modality {
    /// Wire name of the modality.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Text => "TEXT",
        }
    }
}

/// A mixed-content request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    /// Remote model identifier.
    pub model: String,
    /// Ordered input parts.
    pub parts: Vec<ContentPart>,
    /// Requested output modalities.
    pub response_modalities: Vec<Modality>,
}

/// Response to a mixed-content request: the first candidate's parts, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Returned parts.
    pub parts: Vec<ContentPart>,
}

/// Boxed future type returned by [`ImageService`] operations.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ImageError>> + Send + 'a>>;

/// The two operations of the remote image service.
pub trait ImageService: Send + Sync {
    /// Generate images from a text prompt.
    fn generate_images(&self, request: &ImagesRequest) -> ServiceFuture<'_, ImagesResponse>;

    /// Generate content from ordered image and text parts.
    fn generate_content(&self, request: &ContentRequest) -> ServiceFuture<'_, ContentResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_request_serialization() {
        let request = ContentRequest {
            model: "gemini-2.5-flash-image-preview".into(),
            parts: vec![
                ContentPart::InlineData { mime_type: "image/png".into(), data: "AAAA".into() },
                ContentPart::Text("add a hat".into()),
            ],
            response_modalities: vec![Modality::Image, Modality::Text],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["parts"][0]["inline_data"]["mime_type"], "image/png");
        assert_eq!(json["parts"][1]["text"], "add a hat");

        let back: ContentRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn image_payload_mime_type_defaults_to_none() {
        let payload: ImagePayload = serde_json::from_str(r#"{"data":"AAAA"}"#).unwrap();
        assert_eq!(payload.data, "AAAA");
        assert!(payload.mime_type.is_none());
    }

    #[test]
    fn modality_wire_names() {
        assert_eq!(Modality::Image.as_str(), "IMAGE");
        assert_eq!(Modality::Text.as_str(), "TEXT");
    }
}
