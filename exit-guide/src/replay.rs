use crate::navigator::{FrameOutcome, Navigator};
use crate::overlay::OverlaySink;
use exit_inference::{Frame, ObjectDetectInference, SpeechSynthesizer};
use futures::stream::{FuturesUnordered, StreamExt};
use log::error;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub analyzed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub spoken: usize,
}

impl ReplaySummary {
    pub fn record(&mut self, outcome: &FrameOutcome) {
        match outcome {
            FrameOutcome::Skipped => self.skipped += 1,
            FrameOutcome::NoImageData | FrameOutcome::ClassificationFailed => self.failed += 1,
            FrameOutcome::Guided { spoken, .. } => {
                self.analyzed += 1;
                if *spoken {
                    self.spoken += 1;
                }
            }
        }
    }

    fn record_joined(&mut self, joined: Result<FrameOutcome, JoinError>) {
        match joined {
            Ok(outcome) => self.record(&outcome),
            Err(e) => error!("Analysis task failed: {}", e),
        }
    }

    pub fn total(&self) -> usize {
        self.analyzed + self.skipped + self.failed
    }
}

/// Feeds `frames` captured frames to the navigator, one per `interval` tick, each on its
/// own task. Outcomes are tallied as the tasks finish, so only in-flight tasks are held.
pub async fn replay_frames<C, S, O>(
    navigator: Arc<Navigator<C, S, O>>,
    frames: u64,
    interval: Duration,
    capture: impl Fn(u64) -> Frame,
) -> ReplaySummary
where
    C: ObjectDetectInference + 'static,
    S: SpeechSynthesizer + 'static,
    O: OverlaySink + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    let mut pending = FuturesUnordered::new();
    let mut summary = ReplaySummary::default();
    let mut sequence = 0;
    while sequence < frames {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = capture(sequence);
                let navigator = Arc::clone(&navigator);
                pending.push(tokio::spawn(async move { navigator.process_frame(frame).await }));
                sequence += 1;
            }
            Some(joined) = pending.next() => summary.record_joined(joined),
        }
    }
    while let Some(joined) = pending.next().await {
        summary.record_joined(joined);
    }
    summary
}
