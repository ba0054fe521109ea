pub mod client;
pub mod messages;

pub use client::{HttpGateway, PersistenceGateway};
pub use messages::{
    HealthResponse, HistoryResponse, SaveSegmentRequest, SaveSegmentResponse, StoredSegment,
    TranscribeResponse,
};
