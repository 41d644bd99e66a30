pub mod compose;
mod clear_path_describer;
mod obstacle_describer;
mod scanning_describer;

use crate::detect::analysis::compose::CompositeDescriber;
use crate::detect::property::partition::DetectionPartition;
use std::fmt::{Display, Formatter};

pub use clear_path_describer::ClearPathDescriber;
pub use obstacle_describer::ObstacleDescriber;
pub use scanning_describer::ScanningDescriber;

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum GuidanceCategory {
    Scanning,
    Clear,
    Caution,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GuidanceMessage {
    pub text: String,
    pub category: GuidanceCategory,
}

impl GuidanceMessage {
    pub fn new(text: impl Into<String>, category: GuidanceCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

impl Display for GuidanceMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.category, self.text)
    }
}

/// Produces a guidance message for the partitions it knows how to describe.
pub trait Describer {
    /// Returns Some(message) if this describer applies to the partition, None otherwise.
    fn describe(&self, partition: &DetectionPartition<'_>) -> Option<GuidanceMessage>;
}

/// Maps a frame's doors and obstacles to the one message to announce. Never fails.
pub fn decide(partition: &DetectionPartition<'_>) -> GuidanceMessage {
    CompositeDescriber::new().describe(partition)
}
