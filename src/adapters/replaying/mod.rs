//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_service;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;

/// Serve the next recorded result for `method`, shaped as `Result<T, ImageError>`.
///
/// Recorded failures are either plain text or a `{kind, message}` map. Both
/// are rebuilt with [`ImageError::from_recorded`] so they flow through the
/// same classification as live ones.
pub(crate) fn replay<I, T>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    method: &str,
    input: &I,
) -> Result<T, ImageError>
where
    I: Serialize,
    T: DeserializeOwned,
{
    let input = serde_json::to_value(input).map_err(|e| ImageError::Replayed(e.to_string()))?;
    let output = replayer
        .lock()
        .map_err(|e| ImageError::Replayed(format!("Replayer lock poisoned: {e}")))?
        .next_output("image_service", method, &input)
        .map_err(ImageError::Replayed)?;

    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let kind = err_val.get("kind").and_then(serde_json::Value::as_str);
        let message = err_val
            .as_str()
            .or_else(|| err_val.get("message").and_then(serde_json::Value::as_str))
            .unwrap_or_default()
            .to_string();
        return Err(ImageError::from_recorded(kind, message));
    }
    let ok_val = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(ok_val).map_err(|e| ImageError::Replayed(e.to_string()))
}
