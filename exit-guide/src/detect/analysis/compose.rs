use crate::detect::analysis::{
    ClearPathDescriber, Describer, GuidanceMessage, ObstacleDescriber, ScanningDescriber,
};
use crate::detect::property::partition::DetectionPartition;

pub struct CompositeDescriber {
    describers: Vec<Box<dyn Describer + Send + Sync>>,
}

impl Default for CompositeDescriber {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeDescriber {
    pub fn new() -> Self {
        // Order matters: the first describer with something to say wins.
        let describers: Vec<Box<dyn Describer + Send + Sync>> = vec![
            Box::new(ScanningDescriber),
            Box::new(ObstacleDescriber),
            Box::new(ClearPathDescriber),
        ];
        CompositeDescriber { describers }
    }

    /// Picks the single message for this frame.
    pub fn describe(&self, partition: &DetectionPartition<'_>) -> GuidanceMessage {
        self.describers
            .iter()
            .find_map(|describer| describer.describe(partition))
            .unwrap_or_else(ScanningDescriber::message)
    }
}

impl Describer for CompositeDescriber {
    fn describe(&self, partition: &DetectionPartition<'_>) -> Option<GuidanceMessage> {
        Some(CompositeDescriber::describe(self, partition))
    }
}
