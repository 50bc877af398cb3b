//! Turns a "generate image" request into one remote call and normalizes the outcome.

use crate::error::{classify_failure, FailureKind};
use crate::model::ModelId;
use crate::ports::{ContentPart, ContentRequest, ImageService, ImagesRequest, Modality};

/// Output format requested from the text-to-image model.
const OUTPUT_MIME_TYPE: &str = "image/png";

/// A reference image supplied to the editing model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    /// Base64-encoded bytes, without any data URL prefix.
    pub data: String,
    /// Declared MIME type.
    pub mime_type: String,
}

/// One submit's worth of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Prompt text, sent as-is.
    pub prompt: String,
    /// Aspect ratio, e.g. `"16:9"`. Only the text-to-image model uses it.
    pub aspect_ratio: String,
    /// Remote model identifier.
    pub model: String,
    /// Optional reference image for the editing model.
    pub reference: Option<ReferenceImage>,
}

/// Generate one image and return its base64 payload.
///
/// # Errors
///
/// Fails with [`FailureKind::PromptOrImageRequiredForEdit`] when the editing
/// model gets neither prompt nor image, [`FailureKind::NoImagesReturned`] for
/// an unknown model or an empty result, and otherwise with the classified
/// service failure.
pub async fn generate_image(
    service: &dyn ImageService,
    request: &GenerationRequest,
) -> Result<String, FailureKind> {
    let result = match ModelId::from_id(&request.model) {
        Some(ModelId::Imagen) => generate_from_text(service, request).await,
        Some(ModelId::NanoBanana) => generate_from_parts(service, request).await,
        None => {
            tracing::warn!(model = %request.model, "Unsupported model requested");
            Err(FailureKind::NoImagesReturned)
        }
    };

    if let Err(kind) = &result {
        tracing::debug!(model = %request.model, ?kind, "Image generation failed");
    }
    result
}

async fn generate_from_text(
    service: &dyn ImageService,
    request: &GenerationRequest,
) -> Result<String, FailureKind> {
    let images_request = ImagesRequest {
        model: request.model.clone(),
        prompt: request.prompt.clone(),
        count: 1,
        output_mime_type: OUTPUT_MIME_TYPE.to_string(),
        aspect_ratio: request.aspect_ratio.clone(),
    };

    let response = service.generate_images(&images_request).await.map_err(|e| {
        tracing::debug!(error = %e, "Text-to-image call failed");
        classify_failure(&e)
    })?;

    response.images.into_iter().next().map(|image| image.data).ok_or(FailureKind::NoImagesReturned)
}

async fn generate_from_parts(
    service: &dyn ImageService,
    request: &GenerationRequest,
) -> Result<String, FailureKind> {
    let parts = edit_parts(request);
    if parts.is_empty() {
        return Err(FailureKind::PromptOrImageRequiredForEdit);
    }

    let content_request = ContentRequest {
        model: request.model.clone(),
        parts,
        response_modalities: vec![Modality::Image, Modality::Text],
    };

    let response = service.generate_content(&content_request).await.map_err(|e| {
        tracing::debug!(error = %e, "Image edit call failed");
        classify_failure(&e)
    })?;

    response
        .parts
        .into_iter()
        .find_map(|part| match part {
            ContentPart::InlineData { data, .. } => Some(data),
            ContentPart::Text(_) => None,
        })
        .ok_or(FailureKind::NoImagesReturned)
}

/// Reference image first, then the prompt when it is not blank.
fn edit_parts(request: &GenerationRequest) -> Vec<ContentPart> {
    let mut parts = Vec::with_capacity(2);
    if let Some(ref image) = request.reference {
        parts.push(ContentPart::InlineData {
            mime_type: image.mime_type.clone(),
            data: image.data.clone(),
        });
    }
    if !request.prompt.trim().is_empty() {
        parts.push(ContentPart::Text(request.prompt.clone()));
    }
    parts
}
