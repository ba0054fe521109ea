use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which recognition backend produced a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionSource {
    /// Continuous recognizer emitting results while the user speaks
    Streaming,
    /// Record-then-upload recognizer
    Batch,
}

impl RecognitionSource {
    /// `method` tag the persistence service expects on saved segments.
    pub fn wire_method(&self) -> &'static str {
        match self {
            RecognitionSource::Streaming => "webkit",
            RecognitionSource::Batch => "whisper",
        }
    }
}

/// One finalized unit of transcribed text with provenance metadata.
/// Immutable once created; forwarded once to the persistence gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub source: RecognitionSource,
    pub confidence: Option<f32>,
    pub language: Option<String>,
    pub duration_seconds: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Segment {
    pub fn streaming(text: String, confidence: Option<f32>, language: &str) -> Self {
        Self {
            text,
            source: RecognitionSource::Streaming,
            confidence,
            language: Some(language.to_string()),
            duration_seconds: None,
            created_at: Utc::now(),
        }
    }

    pub fn batch(text: String, duration_seconds: f64) -> Self {
        Self {
            text,
            source: RecognitionSource::Batch,
            confidence: None,
            // Language detection happens service-side for uploads
            language: None,
            duration_seconds: Some(duration_seconds),
            created_at: Utc::now(),
        }
    }
}

/// Append-only sequence of transcribed segments.
///
/// Owned exclusively by the orchestrator; cleared only by explicit user
/// action, never mutated except by append.
#[derive(Debug, Default)]
pub struct Transcript {
    segments: Vec<Segment>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Rendered text: each segment followed by a single space separator.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(&segment.text);
            out.push(' ');
        }
        out
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}
