//! Session state and the controller that turns user actions into state
//! transitions and image service calls.
//!
//! Every mutation of [`SessionState`] goes through [`StudioController`].
//! Generation runs `Idle -> Submitting -> Idle`; while `Submitting` the
//! controller refuses another submit and ignores model or aspect ratio
//! changes, so correctness does not depend on the front-end disabling them.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use base64::Engine;

use crate::error::{FailureKind, ImageError};
use crate::generation::{generate_image, GenerationRequest, ReferenceImage};
use crate::model::ModelId;
use crate::output::{resolve_download_path, save_png};
use crate::params::{declared_mime_type, validate_image_mime, AspectRatio};
use crate::ports::ImageService;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// An image held as a self-describing `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    /// Wrap a base64 payload with its MIME type.
    #[must_use]
    pub fn new(mime_type: &str, payload: &str) -> Self {
        Self(format!("data:{mime_type};base64,{payload}"))
    }

    /// The base64 payload, without the `data:` prefix.
    #[must_use]
    pub fn payload(&self) -> &str {
        self.0.split_once(',').map_or("", |(_, payload)| payload)
    }
}

/// A reference image picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Encoded file contents.
    pub url: DataUrl,
    /// Declared MIME type.
    pub mime_type: String,
    /// Where it was read from.
    pub source: PathBuf,
}

/// The last Imagen result, restored when switching back to that model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResult {
    /// The generated image.
    pub image: DataUrl,
    /// Aspect ratio it was generated with.
    pub aspect_ratio: AspectRatio,
}

/// A transient message that expires on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// What to tell the user.
    pub kind: FailureKind,
    /// When it was raised.
    pub raised_at: Instant,
}

impl Notification {
    /// Whether the notification should still be shown at `now`.
    #[must_use]
    pub fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < NOTIFICATION_TTL
    }
}

/// All in-memory state of one session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Primary prompt text.
    pub prompt: String,
    /// Selected aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// Selected model.
    pub model: ModelId,
    /// Reference image for the editing model.
    pub uploaded_image: Option<UploadedImage>,
    /// The image currently on the canvas.
    pub generated_image: Option<DataUrl>,
    /// A generation is in flight.
    pub loading: bool,
    /// Failure of the last generation, shown in place of the canvas.
    pub error: Option<FailureKind>,
    /// The enlarged image viewer is open.
    pub image_viewer_open: bool,
    /// The prompt editor is open.
    pub prompt_editor_open: bool,
    /// Working copy of the prompt inside the editor.
    pub prompt_draft: String,
    /// Transient notification.
    pub notification: Option<Notification>,
    /// Last Imagen result.
    pub imagen_result: Option<CachedResult>,
}

impl SessionState {
    fn new(model: ModelId, aspect_ratio: AspectRatio) -> Self {
        Self {
            prompt: String::new(),
            aspect_ratio,
            model,
            uploaded_image: None,
            generated_image: None,
            loading: false,
            error: None,
            image_viewer_open: false,
            prompt_editor_open: false,
            prompt_draft: String::new(),
            notification: None,
            imagen_result: None,
        }
    }
}

/// Result of trying to start a generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Another generation is in flight.
    Busy,
    /// Neither prompt nor reference image; a notification was raised.
    Rejected,
    /// Submitting; send this request and pass the result to `finish_submit`.
    Started(GenerationRequest),
}

/// Outcome of a full submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another generation is in flight.
    Busy,
    /// Nothing to submit.
    Rejected,
    /// A new image is on the canvas.
    Generated,
    /// The call failed; the session error is set.
    Failed(FailureKind),
}

impl SubmitOutcome {
    /// Translation key describing why nothing was generated, if anything.
    #[must_use]
    pub fn failure_key(self) -> Option<&'static str> {
        match self {
            Self::Generated => None,
            Self::Busy => Some("generation_in_progress"),
            Self::Rejected => Some(FailureKind::PromptOrImageRequired.translation_key()),
            Self::Failed(kind) => Some(kind.translation_key()),
        }
    }
}

/// Mediates every user action on a session.
pub struct StudioController {
    service: Box<dyn ImageService>,
    state: SessionState,
    in_flight: Option<(ModelId, AspectRatio)>,
}

impl StudioController {
    /// Start a session with the given initial model and aspect ratio.
    #[must_use]
    pub fn new(service: Box<dyn ImageService>, model: ModelId, aspect_ratio: AspectRatio) -> Self {
        Self { service, state: SessionState::new(model, aspect_ratio), in_flight: None }
    }

    /// Current state, for rendering.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Replace the primary prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.state.prompt = prompt.into();
    }

    /// Select an aspect ratio. Ignored while loading or when the active
    /// model does not use it; returns whether it was applied.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> bool {
        if self.state.loading || !self.state.model.uses_aspect_ratio() {
            return false;
        }
        self.state.aspect_ratio = ratio;
        true
    }

    /// Switch models. Ignored while loading or when `model` is already active.
    pub fn select_model(&mut self, model: ModelId) {
        if self.state.loading || self.state.model == model {
            return;
        }
        tracing::debug!(from = ?self.state.model, to = ?model, "Switching model");
        self.state.model = model;

        if !model.accepts_reference_image() {
            self.state.uploaded_image = None;
            self.state.prompt_editor_open = false;
        }

        match model {
            ModelId::NanoBanana => self.state.generated_image = None,
            ModelId::Imagen => match self.state.imagen_result.clone() {
                Some(cached) => {
                    self.state.generated_image = Some(cached.image);
                    self.state.aspect_ratio = cached.aspect_ratio;
                }
                None => self.state.generated_image = None,
            },
        }
    }

    /// Read `path` as the reference image. Returns whether it was stored.
    ///
    /// State is only touched after the read completes. A non-image file or a
    /// failed read raises a notification instead.
    pub async fn upload(&mut self, path: &Path) -> bool {
        if !self.state.model.accepts_reference_image() {
            tracing::warn!(model = ?self.state.model, "Model does not take a reference image");
            return false;
        }

        let mime_type = declared_mime_type(path);
        if let Err(e) = validate_image_mime(mime_type) {
            tracing::debug!(path = %path.display(), error = %e, "Rejected upload");
            self.notify(FailureKind::InvalidImageFile);
            return false;
        }

        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
                self.state.uploaded_image = Some(UploadedImage {
                    url: DataUrl::new(mime_type, &payload),
                    mime_type: mime_type.to_string(),
                    source: path.to_path_buf(),
                });
                true
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read upload");
                self.notify(FailureKind::FileReadFailure);
                false
            }
        }
    }

    /// Drop the reference image.
    pub fn clear_upload(&mut self) {
        self.state.uploaded_image = None;
    }

    /// Validate and enter `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.state.loading {
            tracing::warn!("Submit ignored: a generation is already in flight");
            return SubmitStart::Busy;
        }
        if self.state.prompt.trim().is_empty() && self.state.uploaded_image.is_none() {
            self.notify(FailureKind::PromptOrImageRequired);
            return SubmitStart::Rejected;
        }

        self.dismiss_notification();
        self.state.loading = true;
        self.state.error = None;
        self.state.generated_image = None;
        self.in_flight = Some((self.state.model, self.state.aspect_ratio));

        SubmitStart::Started(GenerationRequest {
            prompt: self.state.prompt.clone(),
            aspect_ratio: self.state.aspect_ratio.as_str().to_string(),
            model: self.state.model.id().to_string(),
            reference: self.state.uploaded_image.as_ref().map(|image| ReferenceImage {
                data: image.url.payload().to_string(),
                mime_type: image.mime_type.clone(),
            }),
        })
    }

    /// Send a started request to the image service.
    ///
    /// # Errors
    ///
    /// Returns the classified failure kind.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, FailureKind> {
        generate_image(self.service.as_ref(), request).await
    }

    /// Leave `Submitting` with the call's result. Always clears loading.
    pub fn finish_submit(&mut self, result: Result<String, FailureKind>) -> SubmitOutcome {
        let submitted = self.in_flight.take();
        self.state.loading = false;

        match result {
            Ok(payload) => {
                let image = DataUrl::new("image/png", &payload);
                if let Some((ModelId::Imagen, aspect_ratio)) = submitted {
                    self.state.imagen_result =
                        Some(CachedResult { image: image.clone(), aspect_ratio });
                }
                self.state.generated_image = Some(image);
                SubmitOutcome::Generated
            }
            Err(kind) => {
                self.state.error = Some(kind);
                SubmitOutcome::Failed(kind)
            }
        }
    }

    /// Validate, call the service and apply the result.
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.begin_submit() {
            SubmitStart::Busy => SubmitOutcome::Busy,
            SubmitStart::Rejected => SubmitOutcome::Rejected,
            SubmitStart::Started(request) => {
                let result = self.generate(&request).await;
                self.finish_submit(result)
            }
        }
    }

    /// Open the prompt editor on a copy of the prompt. Only the editing
    /// model offers it; returns whether it opened.
    pub fn open_prompt_editor(&mut self) -> bool {
        if !self.state.model.accepts_reference_image() {
            return false;
        }
        self.state.prompt_draft = self.state.prompt.clone();
        self.state.prompt_editor_open = true;
        true
    }

    /// Replace the editor's working copy.
    pub fn set_prompt_draft(&mut self, text: impl Into<String>) {
        if self.state.prompt_editor_open {
            self.state.prompt_draft = text.into();
        }
    }

    /// Commit the working copy to the prompt and close the editor.
    pub fn save_prompt_editor(&mut self) {
        if self.state.prompt_editor_open {
            self.state.prompt = std::mem::take(&mut self.state.prompt_draft);
            self.state.prompt_editor_open = false;
        }
    }

    /// Close the editor, discarding the working copy.
    pub fn close_prompt_editor(&mut self) {
        self.state.prompt_editor_open = false;
        self.state.prompt_draft.clear();
    }

    /// Open the enlarged viewer. Needs a generated image; returns whether it opened.
    pub fn open_image_viewer(&mut self) -> bool {
        self.state.image_viewer_open = self.state.generated_image.is_some();
        self.state.image_viewer_open
    }

    /// Close the enlarged viewer.
    pub fn close_image_viewer(&mut self) {
        self.state.image_viewer_open = false;
    }

    /// The notification to show at `now`, if any.
    #[must_use]
    pub fn live_notification(&self, now: Instant) -> Option<FailureKind> {
        self.state.notification.filter(|n| n.is_live(now)).map(|n| n.kind)
    }

    /// Hide the notification.
    pub fn dismiss_notification(&mut self) {
        self.state.notification = None;
    }

    /// Save the generated image as PNG, named after the prompt unless
    /// `target` names a file.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no generated image or it cannot be written.
    pub fn download(&self, target: Option<&Path>) -> Result<PathBuf, ImageError> {
        let image = self
            .state
            .generated_image
            .as_ref()
            .ok_or_else(|| ImageError::InvalidArgument("No generated image to download".into()))?;

        let path = resolve_download_path(target, &self.state.prompt);
        save_png(image.payload(), &path)?;
        tracing::info!(path = %path.display(), "Saved generated image");
        Ok(path)
    }

    fn notify(&mut self, kind: FailureKind) {
        self.state.notification = Some(Notification { kind, raised_at: Instant::now() });
    }
}
