use crate::session::FRAME_SKIP;
use exit_inference::Frame;
use log::trace;

/// Admission control for camera frames: only every `(frame_skip + 1)`-th frame is
/// considered, and never while an analysis is running or guidance is playing.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    frame_skip: u32,
    frame_counter: u32,
    analysis_in_progress: bool,
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(FRAME_SKIP)
    }
}

impl FrameThrottle {
    pub fn new(frame_skip: u32) -> Self {
        Self {
            frame_skip,
            frame_counter: 0,
            analysis_in_progress: false,
        }
    }

    pub fn is_analysis_in_progress(&self) -> bool {
        self.analysis_in_progress
    }

    pub fn should_analyze(&mut self, frame: &Frame, speaking: bool) -> bool {
        self.frame_counter += 1;
        if self.frame_counter <= self.frame_skip {
            return false;
        }

        // The counter restarts on every admission attempt, admitted or not.
        self.frame_counter = 0;
        let admitted = !self.analysis_in_progress && !speaking;
        trace!(
            "Frame {}: admitted={} (in_progress={}, speaking={})",
            frame.sequence,
            admitted,
            self.analysis_in_progress,
            speaking
        );
        admitted
    }

    pub fn begin_analysis(&mut self) {
        self.analysis_in_progress = true;
    }

    pub fn end_analysis(&mut self) {
        self.analysis_in_progress = false;
    }
}
