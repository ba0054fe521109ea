pub mod orchestrator;
pub mod segment;
pub mod state;
pub mod timer;

pub use orchestrator::Orchestrator;
pub use segment::{RecognitionSource, Segment, Transcript};
pub use state::{CaptureMode, CaptureState, HealthStatus, RecordingSession};
pub use timer::DurationTimer;
