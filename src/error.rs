//! Error types: transport-level failures and the user-facing failure taxonomy.

use thiserror::Error;

use crate::cassette::recorder::RecordableError;
use crate::config::API_KEY_ENV_VARS;

/// Cassette tag for [`ImageError::MissingApiKey`].
const MISSING_API_KEY_KIND: &str = "missing_api_key";

/// Errors raised while talking to the remote service or the local machine.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The remote service returned an error response.
    #[error("Remote service error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or parse failure description.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image decoding or PNG conversion failed.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No credential could be resolved when a call was about to be made.
    #[error("No API key configured. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        /// The environment variable checked first.
        env_var: String,
    },

    /// A failure served back from a cassette, carrying the recorded text.
    #[error("{0}")]
    Replayed(String),
}

impl ImageError {
    /// Rebuild a failure read back from a cassette.
    ///
    /// A known `kind` restores its variant so classification matches the
    /// recorded run; anything else becomes [`ImageError::Replayed`].
    #[must_use]
    pub fn from_recorded(kind: Option<&str>, message: String) -> Self {
        match kind {
            Some(MISSING_API_KEY_KIND) => {
                Self::MissingApiKey { env_var: API_KEY_ENV_VARS[0].to_string() }
            }
            _ => Self::Replayed(message),
        }
    }
}

impl RecordableError for ImageError {
    fn recorded_kind(&self) -> Option<&'static str> {
        match self {
            Self::MissingApiKey { .. } => Some(MISSING_API_KEY_KIND),
            _ => None,
        }
    }
}

/// User-facing failure kinds. Every kind is rendered through its translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// No credential was configured for the remote service.
    #[error("API key not configured")]
    ApiKeyNotConfigured,
    /// The remote service reported an exhausted quota.
    #[error("quota exceeded")]
    QuotaExceeded,
    /// The remote service rejected the credential.
    #[error("invalid API key")]
    InvalidApiKey,
    /// The call succeeded but carried no image.
    #[error("no images returned")]
    NoImagesReturned,
    /// Submit was attempted with neither a prompt nor a reference image.
    #[error("prompt or image required")]
    PromptOrImageRequired,
    /// The editing model was called with neither a prompt nor a reference image.
    #[error("prompt or image required for edit")]
    PromptOrImageRequiredForEdit,
    /// The selected file does not declare an image content type.
    #[error("invalid image file")]
    InvalidImageFile,
    /// The selected file could not be read.
    #[error("file read failure")]
    FileReadFailure,
    /// Anything the classifier could not place.
    #[error("generic failure")]
    GenericFailure,
    /// A failure that carried no message at all.
    #[error("unknown failure")]
    UnknownFailure,
}

impl FailureKind {
    /// Translation key used to render this failure.
    #[must_use]
    pub fn translation_key(self) -> &'static str {
        match self {
            Self::ApiKeyNotConfigured => "error_api_key_not_configured",
            Self::QuotaExceeded => "error_quota",
            Self::InvalidApiKey => "error_api_key",
            Self::NoImagesReturned => "error_no_images_returned",
            Self::PromptOrImageRequired => "error_prompt_or_image_required",
            Self::PromptOrImageRequiredForEdit => "error_prompt_or_image_required_for_edit",
            Self::InvalidImageFile => "error_invalid_image_file",
            Self::FileReadFailure => "error_read_file",
            Self::GenericFailure => "error_generic",
            Self::UnknownFailure => "error_unknown",
        }
    }
}

/// Map a service failure onto the user-facing taxonomy.
///
/// Best effort: the remote service only hands back opaque text, so anything
/// other than the missing-credential case is matched on substrings and may
/// be misclassified.
#[must_use]
pub fn classify_failure(error: &ImageError) -> FailureKind {
    match error {
        ImageError::MissingApiKey { .. } => FailureKind::ApiKeyNotConfigured,
        ImageError::Api { status, message } => classify_message(&format!("{status} {message}")),
        other => classify_message(&other.to_string()),
    }
}

/// Classify a raw failure message. First match wins, case-insensitive.
#[must_use]
pub fn classify_message(message: &str) -> FailureKind {
    if message.trim().is_empty() {
        return FailureKind::UnknownFailure;
    }

    let lower = message.to_lowercase();
    if lower.contains("429") || lower.contains("quota") || lower.contains("resource_exhausted") {
        FailureKind::QuotaExceeded
    } else if lower.contains("api") && lower.contains("key") {
        FailureKind::InvalidApiKey
    } else {
        FailureKind::GenericFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_from_status_and_code() {
        assert_eq!(classify_message("429 RESOURCE_EXHAUSTED"), FailureKind::QuotaExceeded);
        assert_eq!(classify_message("Quota exceeded for project"), FailureKind::QuotaExceeded);
        assert_eq!(classify_message("resource_exhausted"), FailureKind::QuotaExceeded);
    }

    #[test]
    fn invalid_key_needs_both_words() {
        assert_eq!(classify_message("Invalid API key provided"), FailureKind::InvalidApiKey);
        assert_eq!(classify_message("api failure"), FailureKind::GenericFailure);
        assert_eq!(classify_message("missing key"), FailureKind::GenericFailure);
    }

    #[test]
    fn quota_wins_over_key() {
        assert_eq!(classify_message("429: api key over quota"), FailureKind::QuotaExceeded);
    }

    #[test]
    fn empty_message_is_unknown() {
        assert_eq!(classify_message(""), FailureKind::UnknownFailure);
        assert_eq!(classify_message("   "), FailureKind::UnknownFailure);
    }

    #[test]
    fn missing_key_passes_through() {
        // The Display text mentions "API key"; the variant must win over the heuristic.
        let err = ImageError::MissingApiKey { env_var: "GEMINI_API_KEY".into() };
        assert_eq!(classify_failure(&err), FailureKind::ApiKeyNotConfigured);
    }

    #[test]
    fn api_error_uses_status_and_body() {
        let err = ImageError::Api { status: 429, message: "Too many requests".into() };
        assert_eq!(classify_failure(&err), FailureKind::QuotaExceeded);

        let err = ImageError::Api { status: 400, message: "API key not valid".into() };
        assert_eq!(classify_failure(&err), FailureKind::InvalidApiKey);

        let err = ImageError::Api { status: 500, message: "internal".into() };
        assert_eq!(classify_failure(&err), FailureKind::GenericFailure);
    }

    #[test]
    fn replayed_failure_is_classified_by_text() {
        let err = ImageError::Replayed("Remote service error (429): RESOURCE_EXHAUSTED".into());
        assert_eq!(classify_failure(&err), FailureKind::QuotaExceeded);
        assert_eq!(classify_failure(&ImageError::Replayed(String::new())), FailureKind::UnknownFailure);
    }

    #[test]
    fn translation_keys() {
        assert_eq!(FailureKind::QuotaExceeded.translation_key(), "error_quota");
        assert_eq!(FailureKind::InvalidApiKey.translation_key(), "error_api_key");
        assert_eq!(FailureKind::FileReadFailure.translation_key(), "error_read_file");
    }
}
