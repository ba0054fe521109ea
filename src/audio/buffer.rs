use super::device::{AudioFragment, CaptureProfile, FALLBACK_ENCODING};
use crate::error::ValidationError;
use std::io::Cursor;
use tracing::{debug, info};

/// Recordings below this size cannot contain usable speech.
pub const MIN_RECORDING_BYTES: usize = 1000;

/// Upper bound on the upload payload; the transcription service rejects
/// anything larger anyway.
pub const MAX_RECORDING_BYTES: usize = 25 * 1024 * 1024;

/// A recording that passed size validation, ready for upload.
#[derive(Debug, Clone)]
pub struct ValidatedRecording {
    pub bytes: Vec<u8>,
    pub encoding: String,
}

impl ValidatedRecording {
    /// Upload filename; the extension is what the transcription service keys
    /// its container handling on.
    pub fn file_name(&self) -> String {
        let ext = if self.encoding.contains("webm") {
            "webm"
        } else {
            "wav"
        };
        format!("recording.{}", ext)
    }
}

/// Accumulates audio fragments for the in-progress batch recording and
/// validates the assembled payload before upload.
///
/// Validating client-side avoids a round trip for recordings that can never
/// transcribe usefully.
#[derive(Debug, Default)]
pub struct RecordingBuffer {
    fragments: Vec<AudioFragment>,
}

impl RecordingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment in delivery order
    pub fn append(&mut self, fragment: AudioFragment) {
        debug!("Buffered fragment: {} bytes", fragment.bytes.len());
        self.fragments.push(fragment);
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn total_bytes(&self) -> usize {
        self.fragments.iter().map(|f| f.bytes.len()).sum()
    }

    /// Freeze the buffered fragments into one validated payload.
    ///
    /// Validation is applied in order: empty, too short, too large. Raw PCM
    /// (the `audio/wav` fallback) is wrapped in a WAV container; containered
    /// encodings are concatenated as delivered.
    pub fn finalize(
        &mut self,
        encoding: &str,
        profile: &CaptureProfile,
    ) -> Result<ValidatedRecording, ValidationError> {
        let total = self.total_bytes();

        if self.fragments.is_empty() || total == 0 {
            return Err(ValidationError::EmptyRecording);
        }
        if total < MIN_RECORDING_BYTES {
            return Err(ValidationError::RecordingTooShort { bytes: total });
        }
        if total > MAX_RECORDING_BYTES {
            return Err(ValidationError::RecordingTooLarge { bytes: total });
        }

        let fragments = std::mem::take(&mut self.fragments);

        let bytes = if encoding == FALLBACK_ENCODING {
            wrap_pcm_in_wav(&fragments, profile)
        } else {
            let mut assembled = Vec::with_capacity(total);
            for fragment in &fragments {
                assembled.extend_from_slice(&fragment.bytes);
            }
            assembled
        };

        info!(
            "Recording finalized: {} fragments, {} bytes, encoding={}",
            fragments.len(),
            bytes.len(),
            encoding
        );

        Ok(ValidatedRecording {
            bytes,
            encoding: encoding.to_string(),
        })
    }
}

/// Wrap raw little-endian PCM i16 fragments in a WAV container.
fn wrap_pcm_in_wav(fragments: &[AudioFragment], profile: &CaptureProfile) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: profile.channels,
        sample_rate: profile.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        // Writing to an in-memory cursor cannot fail; hound only surfaces
        // I/O errors from the underlying writer.
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .expect("WAV writer over in-memory cursor");

        for fragment in fragments {
            for sample in fragment.bytes.chunks_exact(2) {
                let value = i16::from_le_bytes([sample[0], sample[1]]);
                writer
                    .write_sample(value)
                    .expect("WAV sample write to in-memory cursor");
            }
        }

        writer.finalize().expect("WAV finalize to in-memory cursor");
    }

    cursor.into_inner()
}
