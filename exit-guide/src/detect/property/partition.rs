use crate::detect::property::path::PathAnalyzer;
use crate::detect::MIN_DETECTION_CONFIDENCE;
use exit_inference::DetectionRecord;

/// A frame's detections split into doors and in-path obstacles, both in detection order.
#[derive(Debug, Clone, Default)]
pub struct DetectionPartition<'a> {
    pub doors: Vec<&'a DetectionRecord>,
    pub obstacles: Vec<&'a DetectionRecord>,
}

impl<'a> DetectionPartition<'a> {
    /// The first qualifying door. No ranking by size or confidence is applied.
    pub fn primary_door(&self) -> Option<&'a DetectionRecord> {
        self.doors.first().copied()
    }

    pub fn primary_obstacle(&self) -> Option<&'a DetectionRecord> {
        self.obstacles.first().copied()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Partitioner {
    pub min_confidence: f32,
    pub path: PathAnalyzer,
}

impl Default for Partitioner {
    fn default() -> Self {
        Self {
            min_confidence: MIN_DETECTION_CONFIDENCE,
            path: PathAnalyzer::default(),
        }
    }
}

impl Partitioner {
    pub fn new(min_confidence: f32, path: PathAnalyzer) -> Self {
        Self {
            min_confidence,
            path,
        }
    }

    pub fn partition<'a>(&self, detections: &'a [DetectionRecord]) -> DetectionPartition<'a> {
        let doors = detections
            .iter()
            .filter(|detection| detection.is_door(self.min_confidence))
            .collect::<Vec<_>>();

        let primary_door = doors.first().copied();
        let obstacles = match primary_door {
            Some(door) => detections
                .iter()
                .filter(|detection| {
                    detection.is_non_door(self.min_confidence)
                        && self
                            .path
                            .is_in_path(detection, Some(door), detection.frame_height)
                })
                .collect(),
            None => Vec::new(),
        };

        DetectionPartition { doors, obstacles }
    }
}

pub fn partition(detections: &[DetectionRecord], min_confidence: f32) -> DetectionPartition<'_> {
    Partitioner::new(min_confidence, PathAnalyzer::default()).partition(detections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exit_inference::{BoundingBox, ScoredLabel};

    fn record(label: &str, confidence: f32, bbox: (i32, i32, i32, i32)) -> DetectionRecord {
        DetectionRecord::new(
            label,
            confidence,
            BoundingBox::new(bbox.0, bbox.1, bbox.2, bbox.3),
            640,
            480,
        )
    }

    #[test]
    fn splits_doors_and_in_path_obstacles() {
        let detections = vec![
            record("chair", 0.6, (0, 250, 150, 400)),
            record("Door", 0.9, (100, 50, 300, 400)),
            record("plant", 0.8, (400, 300, 500, 450)),
            record("box", 0.7, (150, 300, 250, 470)),
        ];
        let result = partition(&detections, MIN_DETECTION_CONFIDENCE);

        assert_eq!(result.doors, vec![&detections[1]]);
        assert_eq!(result.obstacles, vec![&detections[0], &detections[3]]);
        assert_eq!(result.primary_obstacle(), Some(&detections[0]));
    }

    #[test]
    fn low_confidence_detections_are_excluded_everywhere() {
        let detections = vec![
            record("door", 0.49, (100, 50, 300, 400)),
            record("door", 0.9, (100, 50, 300, 400)),
            record("chair", 0.49, (0, 250, 150, 400)),
        ];
        let result = partition(&detections, 0.5);

        assert_eq!(result.doors, vec![&detections[1]]);
        assert!(result.obstacles.is_empty());
    }

    #[test]
    fn without_doors_there_are_no_obstacles() {
        let detections = vec![
            record("chair", 0.99, (0, 250, 150, 400)),
            record("table", 0.99, (100, 300, 300, 479)),
        ];
        let result = partition(&detections, 0.5);

        assert!(result.doors.is_empty());
        assert!(result.obstacles.is_empty());
        assert!(result.primary_door().is_none());
    }

    #[test]
    fn first_door_in_detection_order_is_primary() {
        let detections = vec![
            record("door", 0.55, (400, 50, 600, 400)),
            record("door", 0.99, (100, 50, 300, 400)),
            // overlaps only the second, larger-confidence door
            record("chair", 0.9, (0, 250, 150, 400)),
        ];
        let result = partition(&detections, 0.5);

        assert_eq!(result.primary_door(), Some(&detections[0]));
        assert!(result.obstacles.is_empty());
    }

    #[test]
    fn a_secondary_door_label_makes_a_door() {
        let detections = vec![DetectionRecord::with_labels(
            vec![ScoredLabel::new("wall", 0.8), ScoredLabel::new("door", 0.7)],
            BoundingBox::new(100, 50, 300, 400),
            640,
            480,
        )];
        let result = partition(&detections, 0.5);
        assert_eq!(result.doors.len(), 1);
    }
}
