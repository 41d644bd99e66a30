use crate::detect::analysis::GuidanceMessage;
use crate::session::GUIDANCE_COOLDOWN;
use log::debug;
use std::time::{Duration, Instant};

/// Rate limiter in front of the speech engine.
///
/// An unchanged message is held back until the cooldown has elapsed. A changed message
/// goes out as soon as nothing is playing.
#[derive(Debug, Clone)]
pub struct SpeechGate {
    cooldown: Duration,
    last_spoken_text: String,
    last_spoken_at: Option<Instant>,
    speaking: bool,
}

impl Default for SpeechGate {
    fn default() -> Self {
        Self::new(GUIDANCE_COOLDOWN)
    }
}

impl SpeechGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_spoken_text: String::new(),
            last_spoken_at: None,
            speaking: false,
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn last_spoken_text(&self) -> &str {
        &self.last_spoken_text
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_spoken_at {
            Some(at) => now.saturating_duration_since(at) > self.cooldown,
            None => true,
        }
    }

    /// Returns true when `message` should be spoken now, and records it as the utterance
    /// in progress.
    pub fn try_admit(&mut self, message: &GuidanceMessage, now: Instant) -> bool {
        if self.speaking {
            return false;
        }
        if !self.cooldown_elapsed(now) && message.text == self.last_spoken_text {
            debug!("Suppressed repeated guidance: {}", message.text);
            return false;
        }

        self.speaking = true;
        self.last_spoken_text.clone_from(&message.text);
        self.last_spoken_at = Some(now);
        true
    }

    pub fn playback_started(&mut self) {
        self.speaking = true;
    }

    /// Covers both normal completion and playback errors.
    pub fn playback_finished(&mut self) {
        self.speaking = false;
    }
}
