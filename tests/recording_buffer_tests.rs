// Unit tests for recording accumulation and validation
//
// These tests verify the size validation policy applied before upload
// (empty / too short / too large, in that order) and the two assembly
// paths: containered encodings are concatenated, raw PCM gets a WAV wrap.

use dictation_core::audio::{
    AudioFragment, CaptureProfile, RecordingBuffer, MAX_RECORDING_BYTES, MIN_RECORDING_BYTES,
};
use dictation_core::ValidationError;
use std::io::Cursor;

fn fragment(bytes: Vec<u8>, timestamp_ms: u64) -> AudioFragment {
    AudioFragment { bytes, timestamp_ms }
}

fn profile() -> CaptureProfile {
    CaptureProfile::default()
}

#[test]
fn test_empty_buffer_is_rejected() {
    let mut buffer = RecordingBuffer::new();

    let result = buffer.finalize("audio/webm", &profile());

    assert_eq!(result.unwrap_err(), ValidationError::EmptyRecording);
}

#[test]
fn test_zero_byte_fragments_are_rejected_as_empty() {
    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![], 0));
    buffer.append(fragment(vec![], 100));

    let result = buffer.finalize("audio/webm", &profile());

    assert_eq!(result.unwrap_err(), ValidationError::EmptyRecording);
}

#[test]
fn test_recording_below_minimum_is_too_short() {
    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![0u8; MIN_RECORDING_BYTES - 1], 0));

    let result = buffer.finalize("audio/webm", &profile());

    assert_eq!(
        result.unwrap_err(),
        ValidationError::RecordingTooShort {
            bytes: MIN_RECORDING_BYTES - 1
        }
    );
}

#[test]
fn test_recording_at_minimum_passes() {
    // Boundary: exactly the configured minimum is acceptable
    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![7u8; MIN_RECORDING_BYTES], 0));

    let recording = buffer.finalize("audio/webm", &profile()).unwrap();

    assert_eq!(recording.bytes.len(), MIN_RECORDING_BYTES);
    assert_eq!(recording.encoding, "audio/webm");
}

#[test]
fn test_recording_above_maximum_is_too_large() {
    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![0u8; MAX_RECORDING_BYTES + 1], 0));

    let result = buffer.finalize("audio/webm", &profile());

    assert_eq!(
        result.unwrap_err(),
        ValidationError::RecordingTooLarge {
            bytes: MAX_RECORDING_BYTES + 1
        }
    );
}

#[test]
fn test_containered_fragments_are_concatenated_in_order() {
    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![1u8; 600], 0));
    buffer.append(fragment(vec![2u8; 600], 100));

    let recording = buffer
        .finalize("audio/webm;codecs=opus", &profile())
        .unwrap();

    assert_eq!(recording.bytes.len(), 1200);
    assert!(recording.bytes[..600].iter().all(|&b| b == 1));
    assert!(recording.bytes[600..].iter().all(|&b| b == 2));
}

#[test]
fn test_pcm_fallback_is_wrapped_in_wav_container() {
    let mut buffer = RecordingBuffer::new();
    // 1000 samples of PCM i16 LE silence
    buffer.append(fragment(vec![0u8; 2000], 0));

    let recording = buffer.finalize("audio/wav", &profile()).unwrap();

    assert_eq!(&recording.bytes[0..4], b"RIFF");
    assert_eq!(&recording.bytes[8..12], b"WAVE");

    // Read it back to confirm the container matches the capture profile
    let reader = hound::WavReader::new(Cursor::new(recording.bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 1000);
}

#[test]
fn test_upload_filename_follows_encoding() {
    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![0u8; 2000], 0));
    let webm = buffer
        .finalize("audio/webm;codecs=opus", &profile())
        .unwrap();
    assert_eq!(webm.file_name(), "recording.webm");

    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![0u8; 2000], 0));
    let wav = buffer.finalize("audio/wav", &profile()).unwrap();
    assert_eq!(wav.file_name(), "recording.wav");

    // Anything that is not webm uploads under the wav name
    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![0u8; 2000], 0));
    let mp4 = buffer.finalize("audio/mp4", &profile()).unwrap();
    assert_eq!(mp4.file_name(), "recording.wav");
}

#[test]
fn test_finalize_drains_the_buffer() {
    let mut buffer = RecordingBuffer::new();
    buffer.append(fragment(vec![0u8; 2000], 0));

    buffer.finalize("audio/webm", &profile()).unwrap();

    assert_eq!(buffer.fragment_count(), 0);
    assert_eq!(buffer.total_bytes(), 0);
}
