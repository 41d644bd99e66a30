use crate::detect::analysis::{Describer, GuidanceCategory, GuidanceMessage};
use crate::detect::property::partition::DetectionPartition;
use crate::detect::FALLBACK_DOOR_LABEL;

pub struct ClearPathDescriber;

impl Describer for ClearPathDescriber {
    fn describe(&self, partition: &DetectionPartition<'_>) -> Option<GuidanceMessage> {
        if !partition.obstacles.is_empty() {
            return None;
        }
        let door = partition.primary_door()?;

        let (door_label, door_percent) = door
            .top_label()
            .map_or((FALLBACK_DOOR_LABEL, 0), |label| {
                (label.text.as_str(), label.percent())
            });

        Some(GuidanceMessage::new(
            format!(
                "Walk straight. {} is ahead with {}% confidence.",
                door_label, door_percent
            ),
            GuidanceCategory::Clear,
        ))
    }
}
