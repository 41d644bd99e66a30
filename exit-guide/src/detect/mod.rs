pub mod analysis;
pub mod property;

/// Minimum label confidence for a detection to count as a door or an obstacle.
pub const MIN_DETECTION_CONFIDENCE: f32 = 0.5;

/// Normalized y where the near-field band begins; everything below it is the user's
/// immediate walking path (the lower 40% of the frame).
pub const PATH_BAND_FACTOR: f32 = 0.6;

pub(crate) const FALLBACK_DOOR_LABEL: &str = "door";
pub(crate) const FALLBACK_OBSTACLE_LABEL: &str = "object";
