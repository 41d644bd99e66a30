use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Failed to read recording: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed recording at line {line}: {source}")]
    Recording {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("The recording contains no frames.")]
    EmptyRecording,
}
