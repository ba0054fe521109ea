use crate::audio::RecordingBuffer;
use crate::error::CaptureError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Which recognition backend a capture session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    Streaming,
    Batch,
}

/// The single source of truth for which operations are currently legal.
///
/// `Error` is not terminal: the next `start_capture` clears it and retries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CaptureState {
    Idle,
    Listening { mode: CaptureMode },
    /// Batch stop in flight: flush, validation and upload
    Processing,
    Error { error: CaptureError },
}

impl CaptureState {
    pub fn is_listening(&self) -> bool {
        matches!(self, CaptureState::Listening { .. })
    }
}

/// Advisory startup probe result: whether the remote service reports its
/// transcription backend as configured. Batch mode may still be selected
/// without it, but will predictably fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub transcription_backend_configured: bool,
}

/// One in-progress batch recording. At most one exists at a time, owned by
/// the orchestrator; it lives exactly while the state is `Listening { Batch }`
/// or `Processing`.
#[derive(Debug)]
pub struct RecordingSession {
    pub id: Uuid,
    pub encoding: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_seconds: u64,
    pub buffer: RecordingBuffer,
}

impl RecordingSession {
    pub fn new(encoding: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            encoding,
            started_at: Utc::now(),
            elapsed_seconds: 0,
            buffer: RecordingBuffer::new(),
        }
    }
}
