use crate::detect::analysis::{Describer, GuidanceCategory, GuidanceMessage};
use crate::detect::property::partition::DetectionPartition;

pub(crate) const SCANNING_TEXT: &str = "Scanning for doors. Please move slowly.";

pub struct ScanningDescriber;

impl ScanningDescriber {
    pub fn message() -> GuidanceMessage {
        GuidanceMessage::new(SCANNING_TEXT, GuidanceCategory::Scanning)
    }
}

impl Describer for ScanningDescriber {
    fn describe(&self, partition: &DetectionPartition<'_>) -> Option<GuidanceMessage> {
        if partition.doors.is_empty() {
            Some(Self::message())
        } else {
            None
        }
    }
}
