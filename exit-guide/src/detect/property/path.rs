use crate::detect::PATH_BAND_FACTOR;
use exit_inference::DetectionRecord;

/// Geometric test for objects standing between the user and the primary door.
#[derive(Debug, Copy, Clone)]
pub struct PathAnalyzer {
    pub band_factor: f32,
}

impl Default for PathAnalyzer {
    fn default() -> Self {
        Self {
            band_factor: PATH_BAND_FACTOR,
        }
    }
}

impl PathAnalyzer {
    pub fn new(band_factor: f32) -> Self {
        Self { band_factor }
    }

    /// A candidate is in path when it reaches into the near-field band, starts above the
    /// door's bottom edge and overlaps the door horizontally.
    ///
    /// Args:
    ///     candidate: the detection being tested.
    ///     primary_door: the door the user is walking toward, if any.
    ///     frame_height: height of the source frame in pixels.
    ///
    /// Returns:
    ///     bool: always false without a door.
    pub fn is_in_path(
        &self,
        candidate: &DetectionRecord,
        primary_door: Option<&DetectionRecord>,
        frame_height: u32,
    ) -> bool {
        let Some(door) = primary_door else {
            return false;
        };

        let path_threshold = frame_height as f32 * self.band_factor;
        let candidate_box = &candidate.bounding_box;
        let door_box = &door.bounding_box;

        candidate_box.bottom as f32 > path_threshold
            && candidate_box.top < door_box.bottom
            && candidate_box.overlaps_horizontally(door_box)
    }
}

pub fn is_in_path(
    candidate: &DetectionRecord,
    primary_door: Option<&DetectionRecord>,
    frame_height: u32,
) -> bool {
    PathAnalyzer::default().is_in_path(candidate, primary_door, frame_height)
}
