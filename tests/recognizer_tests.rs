// Unit tests for the two recognizer wrappers
//
// Streaming: only final alternatives of a result batch contribute to a
// segment, in arrival order. Batch: the upload response maps to exactly one
// segment or a transcription error, with no retry.

use dictation_core::audio::ValidatedRecording;
use dictation_core::error::{GatewayError, TranscriptionError};
use dictation_core::gateway::{
    PersistenceGateway, SaveSegmentRequest, StoredSegment, TranscribeResponse,
};
use dictation_core::recognizer::{merge_final_results, BatchRecognizer, RecognitionResult};
use dictation_core::session::{HealthStatus, RecognitionSource};
use std::sync::Arc;

fn result(text: &str, is_final: bool, confidence: Option<f32>) -> RecognitionResult {
    RecognitionResult {
        text: text.to_string(),
        is_final,
        confidence,
    }
}

#[test]
fn test_interim_results_are_discarded() {
    let batch = vec![
        result("hel", false, None),
        result("hello wor", false, None),
    ];

    assert_eq!(merge_final_results(&batch), None);
}

#[test]
fn test_final_results_concatenate_in_order() {
    let batch = vec![
        result("hello ", true, Some(0.9)),
        result("wor", false, None),
        result("world", true, Some(0.7)),
    ];

    let merged = merge_final_results(&batch).unwrap();
    assert_eq!(merged.text, "hello world");
    // First reported final confidence wins
    assert_eq!(merged.confidence, Some(0.9));
}

#[test]
fn test_empty_batch_produces_no_segment() {
    assert_eq!(merge_final_results(&[]), None);
}

// ---------------------------------------------------------------------
// Batch recognizer against a scripted gateway
// ---------------------------------------------------------------------

struct ScriptedGateway {
    response: Option<TranscribeResponse>,
}

#[async_trait::async_trait]
impl PersistenceGateway for ScriptedGateway {
    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        Ok(HealthStatus {
            transcription_backend_configured: true,
        })
    }

    async fn fetch_history(&self) -> Result<Vec<StoredSegment>, GatewayError> {
        Ok(Vec::new())
    }

    async fn save_segment(&self, _request: &SaveSegmentRequest) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn transcribe_audio(
        &self,
        _recording: &ValidatedRecording,
    ) -> Result<TranscribeResponse, GatewayError> {
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(GatewayError::Status {
                status: 500,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

fn recording() -> ValidatedRecording {
    ValidatedRecording {
        bytes: vec![0u8; 2000],
        encoding: "audio/webm".to_string(),
    }
}

#[tokio::test]
async fn test_successful_upload_becomes_one_segment() {
    let gateway = Arc::new(ScriptedGateway {
        response: Some(TranscribeResponse {
            success: true,
            transcript: Some("hello".to_string()),
            message: None,
        }),
    });
    let recognizer = BatchRecognizer::new(gateway);

    let segment = recognizer.transcribe(recording(), 3.0).await.unwrap();

    assert_eq!(segment.text, "hello");
    assert_eq!(segment.source, RecognitionSource::Batch);
    assert_eq!(segment.duration_seconds, Some(3.0));
    assert_eq!(segment.source.wire_method(), "whisper");
}

#[tokio::test]
async fn test_rejected_upload_carries_the_backend_reason() {
    let gateway = Arc::new(ScriptedGateway {
        response: Some(TranscribeResponse {
            success: false,
            transcript: None,
            message: Some("audio unintelligible".to_string()),
        }),
    });
    let recognizer = BatchRecognizer::new(gateway);

    let err = recognizer.transcribe(recording(), 3.0).await.unwrap_err();

    match err {
        TranscriptionError::Rejected(reason) => assert_eq!(reason, "audio unintelligible"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_is_a_transcription_error() {
    let gateway = Arc::new(ScriptedGateway { response: None });
    let recognizer = BatchRecognizer::new(gateway);

    let err = recognizer.transcribe(recording(), 3.0).await.unwrap_err();

    assert!(matches!(err, TranscriptionError::Transport(_)));
}
