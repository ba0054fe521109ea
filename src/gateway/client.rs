use super::messages::{
    HealthResponse, HistoryResponse, SaveSegmentRequest, SaveSegmentResponse, StoredSegment,
    TranscribeResponse,
};
use crate::audio::ValidatedRecording;
use crate::error::GatewayError;
use crate::session::HealthStatus;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

/// Remote service holding transcript history and the batch transcription
/// endpoint. Abstracted behind a trait so the orchestrator can be exercised
/// without a network.
#[async_trait::async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// GET /health
    async fn health(&self) -> Result<HealthStatus, GatewayError>;

    /// GET /transcriptions
    async fn fetch_history(&self) -> Result<Vec<StoredSegment>, GatewayError>;

    /// POST /transcriptions
    async fn save_segment(&self, request: &SaveSegmentRequest) -> Result<(), GatewayError>;

    /// POST /transcribe-audio (multipart upload)
    async fn transcribe_audio(
        &self,
        recording: &ValidatedRecording,
    ) -> Result<TranscribeResponse, GatewayError>;
}

/// HTTP implementation of the persistence gateway contract.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-2xx response to a gateway error carrying the body text.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait::async_trait]
impl PersistenceGateway for HttpGateway {
    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let response = self.client.get(self.url("/health")).send().await?;
        let health: HealthResponse = check_status(response).await?.json().await?;

        debug!(
            "Server health check: openai_key_configured={}",
            health.openai_key_configured
        );

        Ok(HealthStatus {
            transcription_backend_configured: health.openai_key_configured,
        })
    }

    async fn fetch_history(&self) -> Result<Vec<StoredSegment>, GatewayError> {
        let response = self.client.get(self.url("/transcriptions")).send().await?;
        let history: HistoryResponse = check_status(response).await?.json().await?;

        if !history.success {
            warn!("History fetch reported success=false");
            return Ok(Vec::new());
        }

        info!("Fetched {} saved transcripts", history.data.len());
        Ok(history.data)
    }

    async fn save_segment(&self, request: &SaveSegmentRequest) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url("/transcriptions"))
            .json(request)
            .send()
            .await?;

        let saved: SaveSegmentResponse = check_status(response).await?.json().await?;
        if !saved.success {
            warn!(
                "Failed to save segment: {}",
                saved.message.as_deref().unwrap_or("no reason given")
            );
        }

        Ok(())
    }

    async fn transcribe_audio(
        &self,
        recording: &ValidatedRecording,
    ) -> Result<TranscribeResponse, GatewayError> {
        let part = Part::bytes(recording.bytes.clone())
            .file_name(recording.file_name())
            .mime_str(&recording.encoding)?;
        let form = Form::new().part("audio", part);

        info!(
            "Uploading recording for transcription: {} bytes as {}",
            recording.bytes.len(),
            recording.file_name()
        );

        let response = self
            .client
            .post(self.url("/transcribe-audio"))
            .multipart(form)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }
}
