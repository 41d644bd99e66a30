use crate::error::ClassificationError;
use crate::inference::detect::{BoundingBox, DetectionRecord, ObjectDetectInference, ScoredLabel};
use crate::inference::frame::Frame;
use bytes::Bytes;
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CLASSIFICATION_THRESHOLD: f32 = 0.7;
pub const DEFAULT_MAX_LABELS_PER_OBJECT: usize = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct RecordedLabel {
    pub text: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordedObject {
    #[serde(rename = "box")]
    pub bounding_box: [i32; 4],
    #[serde(default)]
    pub labels: Vec<RecordedLabel>,
}

/// One line of a recording.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedFrame {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub objects: Vec<RecordedObject>,
    #[serde(default)]
    pub missing_image: bool,
    #[serde(default)]
    pub fail: bool,
}

/// Detector options mirrored from the on-device classifier setup.
#[derive(Debug, Copy, Clone)]
pub struct ReplayOptions {
    pub classification_threshold: f32,
    pub max_labels_per_object: usize,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            classification_threshold: DEFAULT_CLASSIFICATION_THRESHOLD,
            max_labels_per_object: DEFAULT_MAX_LABELS_PER_OBJECT,
        }
    }
}

/// Classifier that plays back detections recorded from a real model run.
/// Frame `n` is answered with recording line `n % len`.
pub struct ReplayDetectSession {
    frames: Vec<RecordedFrame>,
    options: ReplayOptions,
}

impl ReplayDetectSession {
    pub fn new(path: impl AsRef<Path>, options: ReplayOptions) -> Result<Self, ClassificationError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let session = Self::from_jsonl(&content, options)?;
        info!(
            "Loaded {} recorded frames from {}",
            session.len(),
            path.as_ref().display()
        );
        Ok(session)
    }

    pub fn from_jsonl(content: &str, options: ReplayOptions) -> Result<Self, ClassificationError> {
        let mut frames = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let frame = serde_json::from_str::<RecordedFrame>(line).map_err(|source| {
                ClassificationError::Recording {
                    line: index + 1,
                    source,
                }
            })?;
            frames.push(frame);
        }

        if frames.is_empty() {
            return Err(ClassificationError::EmptyRecording);
        }
        Ok(Self { frames, options })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn recorded(&self, sequence: u64) -> &RecordedFrame {
        &self.frames[(sequence % self.frames.len() as u64) as usize]
    }

    /// Stands in for the camera: produces the frame the recording was taken from.
    pub fn capture(&self, sequence: u64) -> Frame {
        let recorded = self.recorded(sequence);
        if recorded.missing_image {
            Frame::without_image(sequence, recorded.width, recorded.height)
        } else {
            Frame::new(sequence, recorded.width, recorded.height, Bytes::new())
        }
    }

    fn to_record(&self, object: &RecordedObject, frame: &Frame) -> DetectionRecord {
        let [left, top, right, bottom] = object.bounding_box;
        let labels = object
            .labels
            .iter()
            .filter(|label| label.confidence >= self.options.classification_threshold)
            .take(self.options.max_labels_per_object)
            .map(|label| ScoredLabel::new(label.text.clone(), label.confidence))
            .collect();

        DetectionRecord::with_labels(
            labels,
            BoundingBox::new(left, top, right, bottom),
            frame.width,
            frame.height,
        )
    }
}

impl ObjectDetectInference for ReplayDetectSession {
    async fn inference_detect(
        &self,
        frame: &Frame,
    ) -> Result<Vec<DetectionRecord>, ClassificationError> {
        let recorded = self.recorded(frame.sequence);
        if recorded.fail {
            return Err(ClassificationError::Inference(format!(
                "recorded failure for frame {}",
                frame.sequence
            )));
        }

        let detections = recorded
            .objects
            .iter()
            .map(|object| self.to_record(object, frame))
            .collect::<Vec<_>>();
        debug!(
            "Frame {}: replayed {} detections",
            frame.sequence,
            detections.len()
        );
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECORDING: &str = r#"
{"width":640,"height":480,"objects":[{"box":[100,50,300,400],"labels":[{"text":"door","confidence":0.9}]}]}
{"width":640,"height":480,"objects":[{"box":[0,250,150,400],"labels":[{"text":"chair","confidence":0.65},{"text":"table","confidence":0.8}]}],"missing_image":true}

{"width":640,"height":480,"fail":true}
"#;

    #[test]
    fn parses_lines_and_skips_blank_ones() {
        let session = ReplayDetectSession::from_jsonl(RECORDING, ReplayOptions::default()).unwrap();
        assert_eq!(session.len(), 3);
        assert!(session.capture(0).has_image());
        assert!(!session.capture(1).has_image());
        assert_eq!(session.capture(4).sequence, 4);
    }

    #[tokio::test]
    async fn drops_labels_below_classification_threshold() {
        let session = ReplayDetectSession::from_jsonl(RECORDING, ReplayOptions::default()).unwrap();
        let detections = session.inference_detect(&session.capture(1)).await.unwrap();

        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].labels, vec![ScoredLabel::new("table", 0.8)]);
        assert_eq!(detections[0].bounding_box, BoundingBox::new(0, 250, 150, 400));
        assert_eq!(detections[0].frame_height, 480);
    }

    #[tokio::test]
    async fn caps_labels_per_object() {
        let options = ReplayOptions {
            classification_threshold: 0.0,
            max_labels_per_object: 1,
        };
        let session = ReplayDetectSession::from_jsonl(RECORDING, options).unwrap();
        let detections = session.inference_detect(&session.capture(1)).await.unwrap();
        assert_eq!(detections[0].labels, vec![ScoredLabel::new("chair", 0.65)]);
    }

    #[tokio::test]
    async fn recorded_failure_is_an_inference_error() {
        let session = ReplayDetectSession::from_jsonl(RECORDING, ReplayOptions::default()).unwrap();
        let result = session.inference_detect(&session.capture(2)).await;
        assert!(matches!(result, Err(ClassificationError::Inference(_))));
    }

    #[test]
    fn reports_malformed_line_number() {
        let content = "{\"width\":640,\"height\":480}\n{not json}\n";
        match ReplayDetectSession::from_jsonl(content, ReplayOptions::default()) {
            Err(ClassificationError::Recording { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn empty_recording_is_rejected() {
        let result = ReplayDetectSession::from_jsonl("\n  \n", ReplayOptions::default());
        assert!(matches!(result, Err(ClassificationError::EmptyRecording)));
    }

    #[test]
    fn loads_from_file() -> Result<(), ClassificationError> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(RECORDING.as_bytes())?;
        let session = ReplayDetectSession::new(file.path(), ReplayOptions::default())?;
        assert_eq!(session.len(), 3);
        Ok(())
    }
}
