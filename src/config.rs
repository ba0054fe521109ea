use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub capture: CaptureConfig,
    pub recognition: RecognitionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the persistence/transcription service
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    pub sample_rate: u32,
    pub channels: u16,
    /// Fragment delivery cadence in milliseconds
    pub fragment_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionConfig {
    /// Fixed recognition language for the streaming backend (e.g. "en-US")
    pub language: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig {
                base_url: "http://localhost:5000".to_string(),
            },
            capture: CaptureConfig {
                sample_rate: 44100, // 44.1kHz for broad device compatibility
                channels: 1,        // Mono
                fragment_interval_ms: 100,
            },
            recognition: RecognitionConfig {
                language: "en-US".to_string(),
            },
        }
    }
}
