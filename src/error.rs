use serde::Serialize;

/// Reportable failure categories surfaced through the capture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Microphone permission denied or no capture device available
    Device,
    /// No streaming recognition backend on this platform
    RecognizerUnavailable,
    /// Recording contained no audio data
    EmptyRecording,
    /// Recording below the minimum usable size
    RecordingTooShort,
    /// Recording above the maximum upload size
    RecordingTooLarge,
    /// Transcription service rejected the recording or the transport failed
    Transcription,
    /// A recognition backend raised mid-session
    BackendFault,
    /// Persistence service unreachable (non-fatal, degrades history only)
    PersistenceUnavailable,
}

/// Error value carried by `CaptureState::Error`.
///
/// This is UI-facing state, not a propagating error: the orchestrator resolves
/// every failure into one of these and never lets it escape as a panic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CaptureError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Recording validation failures, applied in order at finalize time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No audio data captured. Please try again.")]
    EmptyRecording,

    #[error("Recording too short ({bytes} bytes). Please speak for at least 1-2 seconds.")]
    RecordingTooShort { bytes: usize },

    #[error("Recording too large ({bytes} bytes). Maximum size is 25MB. Try shorter recordings.")]
    RecordingTooLarge { bytes: usize },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyRecording => ErrorKind::EmptyRecording,
            ValidationError::RecordingTooShort { .. } => ErrorKind::RecordingTooShort,
            ValidationError::RecordingTooLarge { .. } => ErrorKind::RecordingTooLarge,
        }
    }
}

impl From<ValidationError> for CaptureError {
    fn from(err: ValidationError) -> Self {
        CaptureError::new(err.kind(), err.to_string())
    }
}

/// Capture device acquisition/start failures.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Microphone access denied: {0}")]
    AccessDenied(String),

    #[error("No capture device available: {0}")]
    Unavailable(String),

    #[error("Failed to start recording: {0}")]
    Start(String),
}

impl From<DeviceError> for CaptureError {
    fn from(err: DeviceError) -> Self {
        CaptureError::new(ErrorKind::Device, err.to_string())
    }
}

/// Persistence gateway transport failures.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server error: {status} - {body}")]
    Status { status: u16, body: String },
}

/// Batch transcription failures. A failed attempt is never retried
/// automatically; the user re-records.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("Transcription failed: {0}")]
    Rejected(String),

    #[error("Error processing audio: {0}")]
    Transport(#[from] GatewayError),
}

impl From<TranscriptionError> for CaptureError {
    fn from(err: TranscriptionError) -> Self {
        CaptureError::new(ErrorKind::Transcription, err.to_string())
    }
}
