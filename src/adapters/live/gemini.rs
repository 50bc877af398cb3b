//! Live adapter for the Gemini generative-image API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::{Credential, API_KEY_ENV_VARS};
use crate::error::ImageError;
use crate::ports::{
    ContentPart, ContentRequest, ContentResponse, ImagePayload, ImageService, ImagesRequest,
    ImagesResponse, ServiceFuture,
};

/// Live Gemini image service that calls the Google AI API.
pub struct GeminiService {
    client: Client,
    base_url: String,
    credential: Credential,
}

impl GeminiService {
    /// Create a new service against `base_url` with the given credential source.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: Client::new(), base_url, credential }
    }

    fn api_key(&self) -> Result<String, ImageError> {
        self.credential
            .resolve()
            .ok_or_else(|| ImageError::MissingApiKey { env_var: API_KEY_ENV_VARS[0].to_string() })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, ImageError> {
        let api_key = self.api_key()?;

        tracing::debug!(url, "Sending image service request");
        let response =
            self.client.post(url).header("x-goog-api-key", api_key).json(body).send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Image service returned an error");
            return Err(ImageError::Api { status: status.as_u16(), message: response_text });
        }

        serde_json::from_str(&response_text).map_err(|e| ImageError::Api {
            status: status.as_u16(),
            message: format!("Failed to parse response: {e}"),
        })
    }
}

impl ImageService for GeminiService {
    fn generate_images(&self, request: &ImagesRequest) -> ServiceFuture<'_, ImagesResponse> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/models/{}:predict", self.base_url, request.model);
            let body = serde_json::json!({
                "instances": [{ "prompt": request.prompt }],
                "parameters": {
                    "sampleCount": request.count,
                    "aspectRatio": request.aspect_ratio,
                    "outputOptions": { "mimeType": request.output_mime_type },
                }
            });

            let parsed: PredictResponse = self.post(&url, &body).await?;
            let images = parsed
                .predictions
                .into_iter()
                .filter_map(|p| {
                    p.bytes_base64_encoded.map(|data| ImagePayload { data, mime_type: p.mime_type })
                })
                .collect();

            Ok(ImagesResponse { images })
        })
    }

    fn generate_content(&self, request: &ContentRequest) -> ServiceFuture<'_, ContentResponse> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/models/{}:generateContent", self.base_url, request.model);

            let parts: Vec<serde_json::Value> = request
                .parts
                .iter()
                .map(|part| match part {
                    ContentPart::InlineData { mime_type, data } => serde_json::json!({
                        "inlineData": { "mimeType": mime_type, "data": data }
                    }),
                    ContentPart::Text(text) => serde_json::json!({ "text": text }),
                })
                .collect();
            let modalities: Vec<&str> =
                request.response_modalities.iter().map(|m| m.as_str()).collect();

            let body = serde_json::json!({
                "contents": [{ "parts": parts }],
                "generationConfig": { "responseModalities": modalities }
            });

            let parsed: GenerateContentResponse = self.post(&url, &body).await?;
            let parts = parsed
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content)
                .map(|content| content.parts.into_iter().filter_map(GeminiPart::into_part).collect())
                .unwrap_or_default();

            Ok(ContentResponse { parts })
        })
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

impl GeminiPart {
    fn into_part(self) -> Option<ContentPart> {
        match (self.inline_data, self.text) {
            (Some(inline), _) => {
                Some(ContentPart::InlineData { mime_type: inline.mime_type, data: inline.data })
            }
            (None, Some(text)) => Some(ContentPart::Text(text)),
            (None, None) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}
