//! Recording adapters that capture interactions to cassettes.

pub mod image_service;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::{CassetteRecorder, RecordableError};

/// Record an interaction, logging rather than failing the call when the
/// recorder cannot take it.
pub(crate) fn record_result<I, T, E>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    I: Serialize,
    T: Serialize,
    E: RecordableError,
{
    let Ok(mut guard) = recorder.lock() else {
        tracing::warn!(method, "Recorder lock poisoned; interaction not recorded");
        return;
    };
    if let Err(e) = guard.record("image_service", method, input, result) {
        tracing::warn!(method, error = %e, "Failed to record interaction");
    }
}
