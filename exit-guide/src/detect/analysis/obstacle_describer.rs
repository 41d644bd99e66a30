use crate::detect::analysis::{Describer, GuidanceCategory, GuidanceMessage};
use crate::detect::property::partition::DetectionPartition;
use crate::detect::property::side::Side;
use crate::detect::{FALLBACK_DOOR_LABEL, FALLBACK_OBSTACLE_LABEL};

pub struct ObstacleDescriber;

impl Describer for ObstacleDescriber {
    fn describe(&self, partition: &DetectionPartition<'_>) -> Option<GuidanceMessage> {
        let door = partition.primary_door()?;
        // First in-path obstacle in detection order, not the nearest one.
        let obstacle = partition.primary_obstacle()?;

        let door_label = door.label().unwrap_or(FALLBACK_DOOR_LABEL);
        let (obstacle_label, obstacle_percent) = obstacle
            .top_label()
            .map_or((FALLBACK_OBSTACLE_LABEL, 0), |label| {
                (label.text.as_str(), label.percent())
            });

        let side = Side::of(&obstacle.bounding_box, &door.bounding_box);

        Some(GuidanceMessage::new(
            format!(
                "Caution: {} detected on your {} with {}% confidence. Move {} to avoid and reach the {}.",
                obstacle_label,
                side,
                obstacle_percent,
                side.opposite(),
                door_label
            ),
            GuidanceCategory::Caution,
        ))
    }
}
