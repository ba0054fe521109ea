pub mod audio;
pub mod config;
pub mod error;
pub mod gateway;
pub mod recognizer;
pub mod session;

pub use audio::{
    AudioFragment, CaptureBackend, CaptureDevice, CaptureProfile, DeviceEvent, RecordingBuffer,
    ValidatedRecording,
};
pub use config::Config;
pub use error::{
    CaptureError, DeviceError, ErrorKind, GatewayError, TranscriptionError, ValidationError,
};
pub use gateway::{HttpGateway, PersistenceGateway, SaveSegmentRequest, StoredSegment};
pub use recognizer::{
    BatchRecognizer, RecognitionResult, StreamingBackend, StreamingEvent, StreamingRecognizer,
};
pub use session::{
    CaptureMode, CaptureState, DurationTimer, HealthStatus, Orchestrator, RecognitionSource,
    RecordingSession, Segment, Transcript,
};
