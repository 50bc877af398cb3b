//! Service context that picks the image service adapter for this run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiService;
use crate::adapters::recording::image_service::RecordingImageService;
use crate::adapters::replaying::image_service::ReplayingImageService;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::error::ImageError;
use crate::ports::ImageService;

/// Directory that recorded cassettes are written under.
const CASSETTE_DIR: &str = ".image-studio/cassettes";

/// Bundles the port trait objects for one run.
pub struct ServiceContext {
    /// Image service port.
    pub service: Box<dyn ImageService>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the cassette to disk. The recording service must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is still alive or the cassette file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording service still holds the recorder".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        tracing::debug!(interactions = recorder.interaction_count(), "Finishing recording");
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context. The credential is resolved on each call, so a
    /// missing key surfaces as a generation failure rather than here.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        let service = GeminiService::new(config.service.base_url.clone(), config.credential());
        Self { service: Box::new(service) }
    }

    /// Create a recording context that wraps the live adapter with a recorder.
    #[must_use]
    pub fn recording(config: &Config) -> (Self, RecordingSession) {
        let live = Self::live(config);

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(CASSETTE_DIR).join(&timestamp).join("image_service.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_service"),
            commit_hash(),
        )));

        let service = RecordingImageService::new(live.service, Arc::clone(&recorder));
        (Self { service: Box::new(service) }, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ImageError> {
        let replayer = CassetteReplayer::load(path)
            .map_err(|e| ImageError::Config(format!("Failed to load cassette: {e}")))?;
        tracing::debug!(
            cassette = %path.display(),
            interactions = replayer.remaining(),
            "Replaying recorded interactions"
        );
        let service = ReplayingImageService::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { service: Box::new(service) })
    }
}

/// Current git commit hash, or "unknown" if unavailable.
fn commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::generation::tests::FakeService;
    use crate::generation::{generate_image, GenerationRequest};
    use crate::model::ModelId;
    use crate::output::tests::TINY_PNG;

    fn imagen_request(prompt: &str) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.into(),
            aspect_ratio: "1:1".into(),
            model: ModelId::Imagen.id().into(),
            reference: None,
        }
    }

    fn scratch_recorder(name: &str) -> (PathBuf, Arc<Mutex<CassetteRecorder>>) {
        let dir = std::env::temp_dir().join(format!("image_studio_context_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("image_service.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, name, "deadbeef")));
        (path, recorder)
    }

    #[tokio::test]
    async fn recorded_session_replays_the_same_outcomes() {
        let (path, recorder) = scratch_recorder("round_trip");
        let fake = Arc::new(FakeService::with_image(TINY_PNG));
        fake.push_images_error(ImageError::MissingApiKey { env_var: "GEMINI_API_KEY".into() });

        let service =
            RecordingImageService::new(Box::new(Arc::clone(&fake)), Arc::clone(&recorder));
        let recorded_ok = generate_image(&service, &imagen_request("a cat")).await;
        let recorded_err = generate_image(&service, &imagen_request("a dog")).await;
        assert_eq!(recorded_ok.as_deref(), Ok(TINY_PNG));
        assert_eq!(recorded_err, Err(FailureKind::ApiKeyNotConfigured));
        assert_eq!(fake.call_count(), 2);

        drop(service);
        let written = RecordingSession { recorder }.finish().unwrap();
        assert_eq!(written, path);

        let ctx = ServiceContext::replaying(&path).unwrap();
        let replayed_ok = generate_image(ctx.service.as_ref(), &imagen_request("a cat")).await;
        let replayed_err = generate_image(ctx.service.as_ref(), &imagen_request("a dog")).await;
        assert_eq!(replayed_ok, recorded_ok);
        assert_eq!(replayed_err, recorded_err);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn finish_fails_while_service_is_alive() {
        let (_path, recorder) = scratch_recorder("still_alive");
        let fake = Arc::new(FakeService::default());
        let service = RecordingImageService::new(Box::new(fake), Arc::clone(&recorder));

        let err = RecordingSession { recorder }.finish().unwrap_err();
        assert!(err.contains("still holds the recorder"));
        drop(service);
    }

    #[tokio::test]
    async fn replaying_context_serves_cassette() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("test_fixtures/cassettes/imagen_success.cassette.yaml");
        let ctx = ServiceContext::replaying(&path).unwrap();

        let request = GenerationRequest {
            prompt: "a lighthouse at dusk".into(),
            aspect_ratio: "16:9".into(),
            model: ModelId::Imagen.id().into(),
            reference: None,
        };
        let image = generate_image(ctx.service.as_ref(), &request).await.unwrap();
        assert!(!image.is_empty());
    }

    #[test]
    fn replaying_missing_cassette_is_config_error() {
        let err = ServiceContext::replaying(Path::new("/nonexistent/cassette.yaml"))
            .err()
            .expect("load should fail");
        assert!(matches!(err, ImageError::Config(_)));
    }
}
