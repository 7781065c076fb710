//! Recording adapter that captures port interactions to a cassette.

pub mod filesystem;

pub use filesystem::RecordingFileSystem;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::format::RecordedError;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::FsError;

/// Record a `Result` interaction using the ok/err JSON convention.
///
/// Mirror of `replaying::extract_result`.
///
/// Convention:
/// - `Ok(v)` is serialized as `{"ok": v}`
/// - `Err(e)` is serialized as `{"err": {"kind": .., "message": ..}}`
pub(crate) fn record_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    method: &str,
    input: &I,
    result: Result<T, &FsError>,
) where
    T: Serialize,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");

    let output_json = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize ok value");
            serde_json::json!({ "ok": inner })
        }
        Err(e) => {
            let recorded = serde_json::to_value(RecordedError::from(e))
                .expect("failed to serialize recorded error");
            serde_json::json!({ "err": recorded })
        }
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(method, input_json, output_json);
}
