pub mod batch;
pub mod streaming;

pub use batch::BatchRecognizer;
pub use streaming::{
    merge_final_results, FinalText, RecognitionResult, StreamingBackend, StreamingEvent,
    StreamingRecognizer,
};
