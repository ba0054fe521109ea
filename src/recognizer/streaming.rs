use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

/// One recognition alternative from a streaming result batch.
#[derive(Debug, Clone)]
pub struct RecognitionResult {
    pub text: String,
    /// Interim results are discardable hints, not part of the contract
    pub is_final: bool,
    pub confidence: Option<f32>,
}

/// Event delivered by a streaming recognition backend.
#[derive(Debug)]
pub enum StreamingEvent {
    /// One result batch; may mix interim and final alternatives
    Results(Vec<RecognitionResult>),
    /// Backend raised mid-session; the listening session is over
    Fault(String),
    /// Platform-level session termination (continuous mode does not
    /// guarantee indefinite operation)
    Ended,
}

/// Continuous recognition backend, injected by the host platform.
///
/// The backend is expected to run in continuous mode with interim and final
/// results enabled for a fixed language.
#[async_trait::async_trait]
pub trait StreamingBackend: Send + Sync {
    /// Begin recognition; events arrive on the returned channel
    async fn start(&mut self) -> Result<mpsc::Receiver<StreamingEvent>>;

    /// End the recognition session
    async fn stop(&mut self) -> Result<()>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Text and confidence merged from the final alternatives of one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalText {
    pub text: String,
    pub confidence: Option<f32>,
}

/// Concatenate all final alternatives of one result batch into one text.
///
/// Returns `None` when the batch held only interim results. The merged
/// confidence is the first one reported with a final alternative.
pub fn merge_final_results(results: &[RecognitionResult]) -> Option<FinalText> {
    let mut text = String::new();
    let mut confidence = None;

    for result in results.iter().filter(|r| r.is_final) {
        text.push_str(&result.text);
        if confidence.is_none() {
            confidence = result.confidence;
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(FinalText { text, confidence })
    }
}

/// Wraps the continuous recognition backend; only final results ever leave
/// this layer as transcript segments.
pub struct StreamingRecognizer {
    backend: Box<dyn StreamingBackend>,
}

impl StreamingRecognizer {
    pub fn new(backend: Box<dyn StreamingBackend>) -> Self {
        Self { backend }
    }

    pub async fn start(&mut self) -> Result<mpsc::Receiver<StreamingEvent>> {
        info!("Starting streaming recognizer: {}", self.backend.name());
        self.backend.start().await
    }

    pub async fn stop(&mut self) -> Result<()> {
        info!("Stopping streaming recognizer: {}", self.backend.name());
        self.backend.stop().await
    }
}
