use crate::session::Segment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GET /health response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub openai_key_configured: bool,
}

/// GET /transcriptions response
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<StoredSegment>,
}

/// One previously saved segment as the persistence service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSegment {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// POST /transcriptions request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSegmentRequest {
    pub text: String,
    pub confidence: Option<f32>,
    pub method: String,
    pub language: Option<String>,
    pub duration: Option<f64>,
}

impl From<&Segment> for SaveSegmentRequest {
    fn from(segment: &Segment) -> Self {
        Self {
            text: segment.text.clone(),
            confidence: segment.confidence,
            method: segment.source.wire_method().to_string(),
            language: segment.language.clone(),
            duration: segment.duration_seconds,
        }
    }
}

/// POST /transcriptions response
#[derive(Debug, Deserialize)]
pub struct SaveSegmentResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /transcribe-audio response
#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeResponse {
    pub success: bool,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
