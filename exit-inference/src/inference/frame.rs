use bytes::Bytes;

/// Camera frame handed to the classifier. The core only reads its metadata.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    data: Option<Bytes>,
}

impl Frame {
    pub fn new(sequence: u64, width: u32, height: u32, data: Bytes) -> Self {
        Self {
            sequence,
            width,
            height,
            data: Some(data),
        }
    }

    /// A frame whose image buffer could not be acquired.
    pub fn without_image(sequence: u64, width: u32, height: u32) -> Self {
        Self {
            sequence,
            width,
            height,
            data: None,
        }
    }

    pub fn has_image(&self) -> bool {
        self.data.is_some()
    }
}
