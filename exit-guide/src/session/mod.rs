pub mod frame_throttle;
pub mod speech_gate;

use crate::detect::analysis::GuidanceMessage;
use exit_inference::{Frame, UtteranceListener};
use frame_throttle::FrameThrottle;
use log::debug;
use parking_lot::Mutex;
use speech_gate::SpeechGate;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Minimum time before an identical message is repeated.
pub const GUIDANCE_COOLDOWN: Duration = Duration::from_millis(20_000);

/// Frames skipped between two analysis attempts.
pub const FRAME_SKIP: u32 = 2;

#[derive(Debug, Default)]
struct SessionState {
    gate: SpeechGate,
    throttle: FrameThrottle,
}

/// Navigation state shared by the analysis task and the speech callbacks.
///
/// Both gates live behind one lock so that admitting a frame and a playback
/// notification can never interleave.
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(cooldown: Duration, frame_skip: u32) -> Self {
        Self {
            state: Mutex::new(SessionState {
                gate: SpeechGate::new(cooldown),
                throttle: FrameThrottle::new(frame_skip),
            }),
        }
    }

    /// Runs the frame through the throttle and, if admitted, marks an analysis as
    /// in flight until the returned guard is dropped.
    pub fn try_begin_analysis(self: &Arc<Self>, frame: &Frame) -> Option<AnalysisGuard> {
        let mut state = self.state.lock();
        let speaking = state.gate.is_speaking();
        if !state.throttle.should_analyze(frame, speaking) {
            return None;
        }
        state.throttle.begin_analysis();
        Some(AnalysisGuard {
            session: Arc::clone(self),
        })
    }

    fn end_analysis(&self) {
        self.state.lock().throttle.end_analysis();
    }

    pub fn try_admit_speech(&self, message: &GuidanceMessage, now: Instant) -> bool {
        self.state.lock().gate.try_admit(message, now)
    }

    pub fn is_speaking(&self) -> bool {
        self.state.lock().gate.is_speaking()
    }

    pub fn is_analysis_in_progress(&self) -> bool {
        self.state.lock().throttle.is_analysis_in_progress()
    }
}

impl UtteranceListener for Session {
    fn on_start(&self) {
        self.state.lock().gate.playback_started();
    }

    fn on_done(&self) {
        self.state.lock().gate.playback_finished();
    }

    fn on_error(&self) {
        debug!("Speech playback reported an error");
        self.state.lock().gate.playback_finished();
    }
}

/// Ends the in-flight analysis when dropped, on every exit path.
#[must_use = "dropping the guard ends the analysis immediately"]
pub struct AnalysisGuard {
    session: Arc<Session>,
}

impl Drop for AnalysisGuard {
    fn drop(&mut self) {
        self.session.end_analysis();
    }
}
