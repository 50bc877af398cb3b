//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use super::format::{Cassette, Interaction};

/// An error that can be written into a cassette.
///
/// Most errors are stored as their display text. An error that returns a
/// kind is stored as `{"kind": .., "message": ..}` so the replaying side can
/// rebuild the same variant instead of an opaque message.
pub trait RecordableError: std::fmt::Display {
    /// Stable kind tag, if the variant must survive a replay.
    fn recorded_kind(&self) -> Option<&'static str> {
        None
    }
}

/// Records interactions and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), name: name.into(), commit: commit.into(), interactions: Vec::new() }
    }

    /// Record one call and its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the input or the `Ok` value cannot be serialized.
    pub fn record<I, T, E>(
        &mut self,
        port: &str,
        method: &str,
        input: &I,
        result: &Result<T, E>,
    ) -> Result<(), serde_json::Error>
    where
        I: Serialize,
        T: Serialize,
        E: RecordableError,
    {
        let input = serde_json::to_value(input)?;
        let output = match result {
            Ok(v) => serde_json::json!({ "Ok": serde_json::to_value(v)? }),
            Err(e) => match e.recorded_kind() {
                Some(kind) => {
                    serde_json::json!({ "Err": { "kind": kind, "message": e.to_string() } })
                }
                None => serde_json::json!({ "Err": e.to_string() }),
            },
        };

        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
        Ok(())
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageError;
    use crate::ports::{ImagePayload, ImagesResponse};

    #[test]
    fn records_ok_and_err_outcomes() {
        let dir = std::env::temp_dir().join("image_studio_recorder_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("nested/session.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording", "deadbeef");
        let ok: Result<ImagesResponse, ImageError> = Ok(ImagesResponse {
            images: vec![ImagePayload { data: "AAAA".into(), mime_type: None }],
        });
        let err: Result<ImagesResponse, ImageError> =
            Err(ImageError::Api { status: 429, message: "RESOURCE_EXHAUSTED".into() });
        recorder.record("image_service", "generate_images", &"a cat", &ok).unwrap();
        recorder.record("image_service", "generate_images", &"a dog", &err).unwrap();
        assert_eq!(recorder.interaction_count(), 2);

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].seq, 0);
        assert_eq!(cassette.interactions[0].output["Ok"]["images"][0]["data"], "AAAA");
        assert_eq!(cassette.interactions[1].seq, 1);
        assert!(cassette.interactions[1].output["Err"].as_str().unwrap().contains("429"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn tags_errors_that_carry_a_kind() {
        let mut recorder = CassetteRecorder::new("unused.yaml", "tagged", "deadbeef");
        let err: Result<ImagesResponse, ImageError> =
            Err(ImageError::MissingApiKey { env_var: "GEMINI_API_KEY".into() });

        recorder.record("image_service", "generate_images", &"a cat", &err).unwrap();

        let output = &recorder.interactions[0].output["Err"];
        assert_eq!(output["kind"], "missing_api_key");
        assert!(output["message"].as_str().unwrap().contains("GEMINI_API_KEY"));
    }
}
