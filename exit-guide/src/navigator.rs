use crate::config::GuidanceConfig;
use crate::detect::analysis::compose::CompositeDescriber;
use crate::detect::analysis::GuidanceMessage;
use crate::detect::property::partition::Partitioner;
use crate::overlay::OverlaySink;
use crate::session::Session;
use exit_inference::{Frame, ObjectDetectInference, SpeechSynthesizer, UtteranceListener};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Throttled: skip cadence, analysis in flight, or guidance playing.
    Skipped,
    NoImageData,
    ClassificationFailed,
    Guided {
        message: GuidanceMessage,
        spoken: bool,
    },
}

/// Per-frame navigation pipeline around the classifier, speech and overlay collaborators.
pub struct Navigator<C, S, O> {
    classifier: C,
    speaker: S,
    overlay: O,
    partitioner: Partitioner,
    describer: CompositeDescriber,
    session: Arc<Session>,
}

impl<C, S, O> Navigator<C, S, O>
where
    C: ObjectDetectInference,
    S: SpeechSynthesizer,
    O: OverlaySink,
{
    pub fn new(config: &GuidanceConfig, classifier: C, speaker: S, overlay: O) -> Self {
        Self {
            classifier,
            speaker,
            overlay,
            partitioner: config.partitioner(),
            describer: CompositeDescriber::new(),
            session: Arc::new(Session::new(config.guidance_cooldown, config.frame_skip)),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Throttles, classifies and, when warranted, announces guidance for one frame.
    /// The analysis slot is released on every return path.
    pub async fn process_frame(&self, frame: Frame) -> FrameOutcome {
        let Some(_analysis) = self.session.try_begin_analysis(&frame) else {
            return FrameOutcome::Skipped;
        };

        if !frame.has_image() {
            debug!("Frame {} has no image data", frame.sequence);
            return FrameOutcome::NoImageData;
        }

        let detections = match self.classifier.inference_detect(&frame).await {
            Ok(detections) => detections,
            Err(e) => {
                warn!("Detection failed for frame {}: {}", frame.sequence, e);
                return FrameOutcome::ClassificationFailed;
            }
        };

        self.overlay.render(&detections, frame.width, frame.height);

        let partition = self.partitioner.partition(&detections);
        let message = self.describer.describe(&partition);
        debug!(
            "Frame {}: {} doors, {} obstacles -> {}",
            frame.sequence,
            partition.doors.len(),
            partition.obstacles.len(),
            message
        );

        let spoken = self.session.try_admit_speech(&message, Instant::now());
        if spoken {
            let listener: Arc<dyn UtteranceListener> = self.session.clone();
            self.speaker.speak(&message.text, listener);
        }

        FrameOutcome::Guided { message, spoken }
    }
}
