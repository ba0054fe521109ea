use crate::audio::ValidatedRecording;
use crate::error::TranscriptionError;
use crate::gateway::PersistenceGateway;
use crate::session::Segment;
use std::sync::Arc;
use tracing::info;

/// Record-then-upload recognizer: takes a validated recording, sends it to
/// the transcription service, and returns one segment per recording.
///
/// A failed attempt is not retried automatically — microphone conditions may
/// have changed, and a silent retry would duplicate cost.
pub struct BatchRecognizer {
    gateway: Arc<dyn PersistenceGateway>,
}

impl BatchRecognizer {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    pub async fn transcribe(
        &self,
        recording: ValidatedRecording,
        duration_seconds: f64,
    ) -> Result<Segment, TranscriptionError> {
        let response = self.gateway.transcribe_audio(&recording).await?;

        if response.success {
            let text = response.transcript.unwrap_or_default();
            info!("Transcription successful: {} chars", text.len());
            Ok(Segment::batch(text, duration_seconds))
        } else {
            let reason = response
                .message
                .unwrap_or_else(|| "no reason given".to_string());
            Err(TranscriptionError::Rejected(reason))
        }
    }
}
