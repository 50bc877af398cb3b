//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use super::format::{Cassette, Interaction};

/// Serves interactions from a loaded cassette in recording order, per
/// port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Load a YAML cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Take the next recorded output for `port`/`method`.
    ///
    /// A request that differs from the recorded one is still served; the
    /// mismatch is only logged.
    ///
    /// # Errors
    ///
    /// Returns an error once the cassette has no more interactions for the pair.
    pub fn next_output(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let interaction = self
            .queues
            .get_mut(&(port.to_string(), method.to_string()))
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| {
                format!("Cassette exhausted: no interactions left for {port}::{method}")
            })?;

        if &interaction.input != input {
            tracing::warn!(
                seq = interaction.seq,
                port,
                method,
                "Replayed request differs from the recorded one"
            );
        }
        Ok(interaction.output)
    }

    /// Interactions not yet served, across all pairs.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, method: &str, prompt: &str) -> Interaction {
        Interaction {
            seq,
            port: "image_service".into(),
            method: method.into(),
            input: json!({ "prompt": prompt }),
            output: json!({ "Ok": { "images": [] } }),
        }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
    }

    #[test]
    fn replays_in_order_per_method() {
        let cassette = make_cassette(vec![
            interaction(0, "generate_images", "first"),
            interaction(1, "generate_content", "edit"),
            interaction(2, "generate_images", "second"),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining(), 3);

        let input = json!({ "prompt": "first" });
        assert!(replayer.next_output("image_service", "generate_images", &input).is_ok());
        assert!(replayer.next_output("image_service", "generate_content", &input).is_ok());
        assert!(replayer.next_output("image_service", "generate_images", &input).is_ok());
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    fn exhausted_cassette_is_an_error() {
        let cassette = make_cassette(vec![interaction(0, "generate_images", "only")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let input = json!({});

        assert!(replayer.next_output("image_service", "generate_images", &input).is_ok());
        let err = replayer.next_output("image_service", "generate_images", &input).unwrap_err();
        assert!(err.contains("Cassette exhausted"));
        assert!(replayer.next_output("unknown", "method", &input).is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = std::env::temp_dir().join("image_studio_replayer_load_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.cassette.yaml");
        let yaml =
            serde_yaml::to_string(&make_cassette(vec![interaction(0, "generate_images", "x")]))
                .unwrap();
        std::fs::write(&path, yaml).unwrap();

        let replayer = CassetteReplayer::load(&path).unwrap();
        assert_eq!(replayer.remaining(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_nonexistent_fails() {
        assert!(CassetteReplayer::load(Path::new("/nonexistent/cassette.yaml")).is_err());
    }
}
