pub mod error;
pub mod inference;

pub use bytes::Bytes;
pub use error::ClassificationError;
pub use inference::detect::{BoundingBox, DetectionRecord, ObjectDetectInference, ScoredLabel};
pub use inference::frame::Frame;
pub use inference::speech::{SpeechSynthesizer, UtteranceListener};
