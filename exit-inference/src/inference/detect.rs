use crate::error::ClassificationError;
use crate::inference::frame::Frame;
use crate::inference::DOOR_LABEL;
use std::future::Future;
use std::sync::Arc;

/// Black-box object classifier: one frame in, labelled boxes out.
pub trait ObjectDetectInference: Send + Sync {
    fn inference_detect(
        &self,
        frame: &Frame,
    ) -> impl Future<Output = Result<Vec<DetectionRecord>, ClassificationError>> + Send;
}

impl<T: ObjectDetectInference> ObjectDetectInference for Arc<T> {
    fn inference_detect(
        &self,
        frame: &Frame,
    ) -> impl Future<Output = Result<Vec<DetectionRecord>, ClassificationError>> + Send {
        T::inference_detect(self, frame)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLabel {
    pub text: String,
    pub confidence: f32,
}

impl ScoredLabel {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }

    pub fn is_door(&self) -> bool {
        self.text.eq_ignore_ascii_case(DOOR_LABEL)
    }

    /// Confidence as a whole percentage, truncated toward zero.
    pub fn percent(&self) -> i32 {
        (self.confidence * 100.0) as i32
    }
}

/// Axis-aligned box in source-frame pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right).div_euclid(2)
    }

    pub fn overlaps_horizontally(&self, other: &BoundingBox) -> bool {
        self.right > other.left && self.left < other.right
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }
}

/// One object observed in one frame.
///
/// Labels are ordered by the classifier, the first one being the top label.
/// Records are produced per frame and never outlive it.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRecord {
    pub labels: Vec<ScoredLabel>,
    pub bounding_box: BoundingBox,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl DetectionRecord {
    pub fn new(
        label: impl Into<String>,
        confidence: f32,
        bounding_box: BoundingBox,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        Self {
            labels: vec![ScoredLabel::new(label, confidence)],
            bounding_box,
            frame_width,
            frame_height,
        }
    }

    pub fn with_labels(
        labels: Vec<ScoredLabel>,
        bounding_box: BoundingBox,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        Self {
            labels,
            bounding_box,
            frame_width,
            frame_height,
        }
    }

    pub fn top_label(&self) -> Option<&ScoredLabel> {
        self.labels.first()
    }

    pub fn label(&self) -> Option<&str> {
        self.top_label().map(|label| label.text.as_str())
    }

    pub fn confidence(&self) -> Option<f32> {
        self.top_label().map(|label| label.confidence)
    }

    /// True when any label names a door with at least `min_confidence`.
    pub fn is_door(&self, min_confidence: f32) -> bool {
        self.labels
            .iter()
            .any(|label| label.is_door() && label.confidence >= min_confidence)
    }

    /// True when any label names something other than a door with at least `min_confidence`.
    pub fn is_non_door(&self, min_confidence: f32) -> bool {
        self.labels
            .iter()
            .any(|label| !label.is_door() && label.confidence >= min_confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_x_floors_toward_negative() {
        assert_eq!(BoundingBox::new(100, 50, 300, 400).center_x(), 200);
        assert_eq!(BoundingBox::new(0, 250, 151, 400).center_x(), 75);
        assert_eq!(BoundingBox::new(-3, 0, 0, 10).center_x(), -2);
    }

    #[test]
    fn horizontal_overlap_excludes_touching_edges() {
        let door = BoundingBox::new(100, 50, 300, 400);
        assert!(BoundingBox::new(0, 0, 101, 10).overlaps_horizontally(&door));
        assert!(!BoundingBox::new(0, 0, 100, 10).overlaps_horizontally(&door));
        assert!(!BoundingBox::new(300, 0, 400, 10).overlaps_horizontally(&door));
        assert!(BoundingBox::new(150, 0, 160, 10).overlaps_horizontally(&door));
    }

    #[test]
    fn door_matching_is_case_insensitive_and_checks_every_label() {
        let bbox = BoundingBox::new(0, 0, 10, 10);
        let record = DetectionRecord::new("DOOR", 0.5, bbox, 640, 480);
        assert!(record.is_door(0.5));
        assert!(!record.is_non_door(0.5));

        let record = DetectionRecord::with_labels(
            vec![ScoredLabel::new("wall", 0.8), ScoredLabel::new("Door", 0.6)],
            bbox,
            640,
            480,
        );
        assert!(record.is_door(0.5));
        assert!(record.is_non_door(0.5));
        assert_eq!(record.label(), Some("wall"));
        assert!(!record.is_door(0.7));
    }

    #[test]
    fn percent_truncates() {
        assert_eq!(ScoredLabel::new("door", 0.9).percent(), 90);
        assert_eq!(ScoredLabel::new("chair", 0.6).percent(), 60);
        assert_eq!(ScoredLabel::new("chair", 0.999).percent(), 99);
    }

    #[test]
    fn unlabelled_record_has_no_top_label() {
        let record =
            DetectionRecord::with_labels(Vec::new(), BoundingBox::new(0, 0, 1, 1), 640, 480);
        assert!(record.label().is_none());
        assert!(record.confidence().is_none());
        assert!(!record.is_door(0.0));
    }
}
