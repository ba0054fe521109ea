use super::segment::{Segment, Transcript};
use super::state::{CaptureMode, CaptureState, HealthStatus, RecordingSession};
use super::timer::DurationTimer;
use crate::audio::{CaptureBackend, CaptureDevice, CaptureProfile, DeviceEvent, FALLBACK_ENCODING};
use crate::config::Config;
use crate::error::{CaptureError, ErrorKind};
use crate::gateway::{PersistenceGateway, SaveSegmentRequest, StoredSegment};
use crate::recognizer::{
    merge_final_results, BatchRecognizer, StreamingBackend, StreamingEvent, StreamingRecognizer,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The capture/recognition state machine.
///
/// Single logical actor: this is the only writer of the capture state, the
/// transcript, and the recording session. UI commands are direct method
/// calls; device fragments, recognizer results, and timer ticks arrive on
/// channels and are applied one at a time by [`process_pending`], which the
/// host pumps from its event loop.
///
/// [`process_pending`]: Orchestrator::process_pending
pub struct Orchestrator {
    state: CaptureState,
    transcript: Transcript,
    session: Option<RecordingSession>,

    device: CaptureDevice,
    streaming: Option<StreamingRecognizer>,
    batch: BatchRecognizer,
    gateway: Arc<dyn PersistenceGateway>,

    timer: DurationTimer,
    device_rx: Option<mpsc::Receiver<DeviceEvent>>,
    streaming_rx: Option<mpsc::Receiver<StreamingEvent>>,
    tick_rx: Option<mpsc::UnboundedReceiver<()>>,

    history: Vec<StoredSegment>,
    health: Option<HealthStatus>,

    fragment_interval: Duration,
    language: String,
}

impl Orchestrator {
    /// Build an orchestrator around host-injected backends.
    ///
    /// Pass `None` for the streaming backend on platforms without a
    /// continuous recognizer; starting a streaming capture then surfaces
    /// `RecognizerUnavailable`.
    pub fn new(
        config: &Config,
        capture_backend: Box<dyn CaptureBackend>,
        streaming_backend: Option<Box<dyn StreamingBackend>>,
        gateway: Arc<dyn PersistenceGateway>,
    ) -> Self {
        let profile = CaptureProfile {
            sample_rate: config.capture.sample_rate,
            channels: config.capture.channels,
            ..CaptureProfile::default()
        };

        Self {
            state: CaptureState::Idle,
            transcript: Transcript::new(),
            session: None,
            device: CaptureDevice::new(capture_backend, profile),
            streaming: streaming_backend.map(StreamingRecognizer::new),
            batch: BatchRecognizer::new(Arc::clone(&gateway)),
            gateway,
            timer: DurationTimer::new(),
            device_rx: None,
            streaming_rx: None,
            tick_rx: None,
            history: Vec::new(),
            health: None,
            fragment_interval: Duration::from_millis(config.capture.fragment_interval_ms),
            language: config.recognition.language.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Probe the persistence service at startup: health check plus history
    /// fetch. Both are advisory; failures are logged and capture still works.
    pub async fn bootstrap(&mut self) {
        match self.gateway.health().await {
            Ok(health) => {
                if !health.transcription_backend_configured {
                    warn!("Transcription backend not configured on server; uploads will fail");
                }
                self.health = Some(health);
            }
            Err(e) => {
                warn!("Server health check failed: {}", e);
            }
        }

        self.refresh_history().await;
    }

    /// Begin a capture session in the given mode.
    ///
    /// Legal only from `Idle` or `Error` (a prior error is cleared); while
    /// listening or processing the call is rejected with no state change.
    /// Failures resolve into the `Error` state rather than propagating.
    pub async fn start_capture(&mut self, mode: CaptureMode) {
        if matches!(
            self.state,
            CaptureState::Listening { .. } | CaptureState::Processing
        ) {
            warn!("Capture already in progress; start ignored");
            return;
        }

        // Any previously surfaced error is cleared by a new attempt
        self.state = CaptureState::Idle;

        match mode {
            CaptureMode::Streaming => self.start_streaming().await,
            CaptureMode::Batch => self.start_batch().await,
        }
    }

    async fn start_streaming(&mut self) {
        let Some(recognizer) = self.streaming.as_mut() else {
            self.state = CaptureState::Error {
                error: CaptureError::new(
                    ErrorKind::RecognizerUnavailable,
                    "Speech recognition is not supported on this platform",
                ),
            };
            return;
        };

        match recognizer.start().await {
            Ok(rx) => {
                self.streaming_rx = Some(rx);
                self.state = CaptureState::Listening {
                    mode: CaptureMode::Streaming,
                };
                info!("Streaming capture started");
            }
            Err(e) => {
                error!("Failed to start streaming recognition: {}", e);
                self.state = CaptureState::Error {
                    error: CaptureError::new(
                        ErrorKind::BackendFault,
                        format!("Failed to start streaming recognition: {}", e),
                    ),
                };
            }
        }
    }

    async fn start_batch(&mut self) {
        // First batch capture acquires the device; later ones reuse it
        if let Err(e) = self.device.open().await {
            error!("Capture device not ready: {}", e);
            self.state = CaptureState::Error { error: e.into() };
            return;
        }

        let encoding = self
            .device
            .encoding()
            .unwrap_or(FALLBACK_ENCODING)
            .to_string();

        match self.device.start(self.fragment_interval).await {
            Ok(rx) => {
                self.device_rx = Some(rx);
                self.session = Some(RecordingSession::new(encoding));
                self.tick_rx = Some(self.timer.start(TICK_INTERVAL));
                self.state = CaptureState::Listening {
                    mode: CaptureMode::Batch,
                };
                info!("Batch recording started");
            }
            Err(e) => {
                error!("Failed to start recording: {}", e);
                self.state = CaptureState::Error { error: e.into() };
            }
        }
    }

    /// End the current capture session.
    ///
    /// Streaming: stops the recognizer and returns to `Idle`. Batch: stops
    /// the device, flushes in-flight fragments, validates and uploads the
    /// recording, then appends the segment or surfaces the failure. Calling
    /// this while not listening is a no-op.
    pub async fn stop_capture(&mut self) {
        let mode = match &self.state {
            CaptureState::Listening { mode } => *mode,
            _ => {
                debug!("stop_capture while not listening; no-op");
                return;
            }
        };

        match mode {
            CaptureMode::Streaming => {
                self.streaming_rx = None;
                if let Some(recognizer) = self.streaming.as_mut() {
                    if let Err(e) = recognizer.stop().await {
                        warn!("Failed to stop streaming recognizer: {}", e);
                    }
                }
                self.state = CaptureState::Idle;
                info!("Streaming capture stopped");
            }
            CaptureMode::Batch => {
                self.state = CaptureState::Processing;
                self.timer.stop();
                self.tick_rx = None;

                if let Err(e) = self.device.stop().await {
                    warn!("Failed to stop capture device: {}", e);
                }

                // Flush: the backend drops its sender on stop, so draining to
                // channel close guarantees the last fragment is buffered.
                if let Some(mut rx) = self.device_rx.take() {
                    while let Some(event) = rx.recv().await {
                        self.on_device_event(event).await;
                    }
                }

                self.finish_batch().await;
            }
        }
    }

    /// Empty the transcript and clear any surfaced error. Ignored while a
    /// capture is in progress.
    pub fn clear_transcript(&mut self) {
        match self.state {
            CaptureState::Idle | CaptureState::Error { .. } => {
                self.transcript.clear();
                self.state = CaptureState::Idle;
            }
            _ => warn!("clear_transcript ignored while capture is in progress"),
        }
    }

    // ------------------------------------------------------------------
    // Event intake
    // ------------------------------------------------------------------

    /// Apply all pending asynchronous notifications, one at a time:
    /// device fragments, recognizer results, then timer ticks. The host
    /// calls this from its event loop.
    pub async fn process_pending(&mut self) {
        if let Some(mut rx) = self.device_rx.take() {
            while let Ok(event) = rx.try_recv() {
                self.on_device_event(event).await;
            }
            if self.batch_session_active() {
                self.device_rx = Some(rx);
            }
        }

        if let Some(mut rx) = self.streaming_rx.take() {
            while let Ok(event) = rx.try_recv() {
                self.on_streaming_event(event).await;
            }
            if matches!(
                self.state,
                CaptureState::Listening {
                    mode: CaptureMode::Streaming
                }
            ) {
                self.streaming_rx = Some(rx);
            }
        }

        if let Some(mut rx) = self.tick_rx.take() {
            while rx.try_recv().is_ok() {
                self.on_tick();
            }
            if matches!(
                self.state,
                CaptureState::Listening {
                    mode: CaptureMode::Batch
                }
            ) {
                self.tick_rx = Some(rx);
            }
        }
    }

    async fn on_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Fragment(fragment) => {
                // Fragments are legal while listening and during the
                // post-stop flush; anything later is a stray and dropped.
                if self.batch_session_active() {
                    if let Some(session) = self.session.as_mut() {
                        session.buffer.append(fragment);
                    }
                }
            }
            DeviceEvent::Fault(message) => {
                if matches!(
                    self.state,
                    CaptureState::Listening {
                        mode: CaptureMode::Batch
                    }
                ) {
                    error!("Recording error: {}", message);
                    self.abort_batch_session().await;
                    self.state = CaptureState::Error {
                        error: CaptureError::new(
                            ErrorKind::BackendFault,
                            format!("Recording error: {}", message),
                        ),
                    };
                }
            }
        }
    }

    async fn on_streaming_event(&mut self, event: StreamingEvent) {
        if !matches!(
            self.state,
            CaptureState::Listening {
                mode: CaptureMode::Streaming
            }
        ) {
            return;
        }

        match event {
            StreamingEvent::Results(results) => {
                if let Some(merged) = merge_final_results(&results) {
                    let segment =
                        Segment::streaming(merged.text, merged.confidence, &self.language);
                    let request = SaveSegmentRequest::from(&segment);
                    // Appended immediately; the local transcript is the
                    // authoritative copy, so a failed save is only a warning.
                    self.transcript.append(segment);
                    self.save_best_effort(&request).await;
                }
            }
            StreamingEvent::Fault(message) => {
                error!("Speech recognition error: {}", message);
                if let Some(recognizer) = self.streaming.as_mut() {
                    if let Err(e) = recognizer.stop().await {
                        warn!("Failed to stop faulted recognizer: {}", e);
                    }
                }
                self.state = CaptureState::Error {
                    error: CaptureError::new(
                        ErrorKind::BackendFault,
                        format!("Speech recognition error: {}", message),
                    ),
                };
            }
            StreamingEvent::Ended => {
                // Continuous mode does not run forever; treat platform
                // termination as a clean stop.
                info!("Streaming recognition session ended");
                self.state = CaptureState::Idle;
            }
        }
    }

    fn on_tick(&mut self) {
        if matches!(
            self.state,
            CaptureState::Listening {
                mode: CaptureMode::Batch
            }
        ) {
            if let Some(session) = self.session.as_mut() {
                session.elapsed_seconds += 1;
            }
        }
    }

    // ------------------------------------------------------------------
    // Batch completion
    // ------------------------------------------------------------------

    async fn finish_batch(&mut self) {
        let Some(mut session) = self.session.take() else {
            self.state = CaptureState::Idle;
            return;
        };

        let recording = match session
            .buffer
            .finalize(&session.encoding, self.device.profile())
        {
            Ok(recording) => recording,
            Err(e) => {
                warn!("Recording rejected: {}", e);
                self.state = CaptureState::Error { error: e.into() };
                return;
            }
        };

        match self
            .batch
            .transcribe(recording, session.elapsed_seconds as f64)
            .await
        {
            Ok(segment) => {
                let request = SaveSegmentRequest::from(&segment);
                self.transcript.append(segment);
                self.save_best_effort(&request).await;
                self.refresh_history().await;
                self.state = CaptureState::Idle;
                info!("Batch recording transcribed and appended");
            }
            Err(e) => {
                error!("Transcription failed: {}", e);
                self.state = CaptureState::Error { error: e.into() };
            }
        }
    }

    async fn abort_batch_session(&mut self) {
        self.timer.stop();
        self.tick_rx = None;
        self.session = None;
        self.device_rx = None;
        if let Err(e) = self.device.stop().await {
            warn!("Failed to stop capture device: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // Persistence (best-effort)
    // ------------------------------------------------------------------

    async fn save_best_effort(&self, request: &SaveSegmentRequest) {
        if let Err(e) = self.gateway.save_segment(request).await {
            warn!("Error saving transcript: {}", e);
        }
    }

    async fn refresh_history(&mut self) {
        match self.gateway.fetch_history().await {
            Ok(items) => {
                debug!("History refreshed: {} items", items.len());
                self.history = items;
            }
            Err(e) => {
                warn!("Error fetching saved transcripts: {}", e);
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_text(&self) -> String {
        self.transcript.text()
    }

    pub fn history(&self) -> &[StoredSegment] {
        &self.history
    }

    pub fn health(&self) -> Option<HealthStatus> {
        self.health
    }

    /// Elapsed seconds of the in-progress batch recording, for UI feedback
    pub fn elapsed_seconds(&self) -> u64 {
        self.session.as_ref().map(|s| s.elapsed_seconds).unwrap_or(0)
    }

    fn batch_session_active(&self) -> bool {
        matches!(
            self.state,
            CaptureState::Listening {
                mode: CaptureMode::Batch
            } | CaptureState::Processing
        )
    }
}
