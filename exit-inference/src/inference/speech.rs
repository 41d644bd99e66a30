use std::sync::Arc;

/// Playback progress reported by a speech engine for one utterance.
pub trait UtteranceListener: Send + Sync {
    fn on_start(&self);
    fn on_done(&self);
    fn on_error(&self);
}

/// Fire-and-forget text-to-speech output.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str, listener: Arc<dyn UtteranceListener>);
}
