pub mod buffer;
pub mod device;

pub use buffer::{RecordingBuffer, ValidatedRecording, MAX_RECORDING_BYTES, MIN_RECORDING_BYTES};
pub use device::{
    AudioFragment, CaptureBackend, CaptureDevice, CaptureProfile, DeviceEvent,
    ENCODING_PREFERENCES, FALLBACK_ENCODING,
};
