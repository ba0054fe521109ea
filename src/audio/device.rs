use crate::error::DeviceError;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One chunk of encoded audio delivered during an active batch recording.
#[derive(Debug, Clone)]
pub struct AudioFragment {
    /// Raw bytes in the negotiated encoding (PCM i16 LE for `audio/wav`)
    pub bytes: Vec<u8>,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Event delivered by a capture backend while recording.
#[derive(Debug)]
pub enum DeviceEvent {
    Fragment(AudioFragment),
    /// Mid-capture I/O fault; capture is over when this arrives
    Fault(String),
}

/// Fixed microphone capture profile.
#[derive(Debug, Clone)]
pub struct CaptureProfile {
    pub sample_rate: u32,
    pub channels: u16,
    pub echo_cancellation: bool,
    pub noise_suppression: bool,
}

impl Default for CaptureProfile {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 1,
            echo_cancellation: true,
            noise_suppression: true,
        }
    }
}

/// Ordered encoding preference list; the first one the backend supports wins.
pub const ENCODING_PREFERENCES: &[&str] =
    &["audio/webm;codecs=opus", "audio/webm", "audio/mp4"];

/// Fallback when the backend supports none of the preferred encodings.
/// Fragments are then raw PCM and get a WAV container at finalize time.
pub const FALLBACK_ENCODING: &str = "audio/wav";

/// Microphone capture backend, injected by the host platform.
///
/// Contract: `stop()` must end fragment delivery and drop the event sender
/// (closing the channel is the flush signal the orchestrator waits on).
/// Stopping an inactive backend is a no-op.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Request microphone access with the given profile
    async fn open(&mut self, profile: &CaptureProfile) -> Result<(), DeviceError>;

    /// Whether the backend can emit fragments in the given encoding
    fn supports_encoding(&self, encoding: &str) -> bool;

    /// Begin fragment delivery at the given cadence
    async fn start(
        &mut self,
        fragment_interval: Duration,
    ) -> Result<mpsc::Receiver<DeviceEvent>, DeviceError>;

    /// Stop fragment delivery and drop the event sender
    async fn stop(&mut self) -> Result<(), DeviceError>;

    /// Check if the backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Microphone handle shared across recording sessions.
///
/// The device is acquired at most once and reused between recordings so the
/// host platform does not re-prompt for permission; it is only released on
/// teardown. Encoding is negotiated once at open time.
pub struct CaptureDevice {
    backend: Box<dyn CaptureBackend>,
    profile: CaptureProfile,
    encoding: Option<String>,
}

impl CaptureDevice {
    pub fn new(backend: Box<dyn CaptureBackend>, profile: CaptureProfile) -> Self {
        Self {
            backend,
            profile,
            encoding: None,
        }
    }

    /// Acquire the microphone and negotiate the capture encoding.
    ///
    /// Idempotent: a device that is already open keeps its negotiated encoding.
    pub async fn open(&mut self) -> Result<(), DeviceError> {
        if self.encoding.is_some() {
            return Ok(());
        }

        self.backend.open(&self.profile).await?;

        let encoding = ENCODING_PREFERENCES
            .iter()
            .find(|enc| self.backend.supports_encoding(enc))
            .map(|enc| enc.to_string())
            .unwrap_or_else(|| {
                warn!(
                    "Backend '{}' supports none of the preferred encodings, falling back to {}",
                    self.backend.name(),
                    FALLBACK_ENCODING
                );
                FALLBACK_ENCODING.to_string()
            });

        info!(
            "Capture device ready: backend={}, encoding={}",
            self.backend.name(),
            encoding
        );

        self.encoding = Some(encoding);
        Ok(())
    }

    /// Whether permission has been granted and an encoding resolved
    pub fn is_ready(&self) -> bool {
        self.encoding.is_some()
    }

    /// Negotiated encoding, once open
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn profile(&self) -> &CaptureProfile {
        &self.profile
    }

    /// Begin fragment delivery for a new recording
    pub async fn start(
        &mut self,
        fragment_interval: Duration,
    ) -> Result<mpsc::Receiver<DeviceEvent>, DeviceError> {
        if self.encoding.is_none() {
            return Err(DeviceError::Start("device not open".to_string()));
        }

        self.backend.start(fragment_interval).await
    }

    /// Stop fragment delivery. Calling this when not capturing is a no-op.
    pub async fn stop(&mut self) -> Result<(), DeviceError> {
        if !self.backend.is_capturing() {
            return Ok(());
        }

        self.backend.stop().await
    }
}
