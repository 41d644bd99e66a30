#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use exit_guide::config::GuidanceConfig;
use exit_guide::log_init;
use exit_guide::navigator::Navigator;
use exit_guide::overlay::LogOverlay;
use exit_guide::replay::replay_frames;
use exit_inference::inference::replay::ReplayDetectSession;
use exit_inference::{SpeechSynthesizer, UtteranceListener};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "exit-guide",
    about = "Replays recorded detections through the door navigation engine"
)]
struct Args {
    /// JSON-lines recording of detected objects, one frame per line.
    #[arg(long)]
    recording: PathBuf,
    #[arg(long, env = "EXIT_GUIDE_CONFIG")]
    config: Option<PathBuf>,
    /// Number of camera frames to feed; defaults to one analysis per recorded frame.
    #[arg(long)]
    frames: Option<u64>,
    #[arg(short, long)]
    verbose: bool,
}

const MAX_PLAYBACK: Duration = Duration::from_secs(60);

/// Logs utterances and reports playback progress after a reading-time delay.
struct SimulatedSpeaker {
    words_per_second: f32,
}

impl SpeechSynthesizer for SimulatedSpeaker {
    fn speak(&self, text: &str, listener: Arc<dyn UtteranceListener>) {
        info!("Speaking: {}", text);
        let words = text.split_whitespace().count() as f32;
        let playback = Duration::try_from_secs_f32(words / self.words_per_second)
            .map_or(MAX_PLAYBACK, |playback| playback.min(MAX_PLAYBACK));

        listener.on_start();
        tokio::spawn(async move {
            tokio::time::sleep(playback).await;
            listener.on_done();
        });
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    log_init(args.verbose);

    let config = GuidanceConfig::load(args.config.as_deref())?;
    let recording = Arc::new(
        ReplayDetectSession::new(&args.recording, config.replay_options())
            .with_context(|| format!("failed to load {}", args.recording.display()))?,
    );
    let frames = args
        .frames
        .unwrap_or(recording.len() as u64 * (config.frame_skip as u64 + 1));

    let navigator = Arc::new(Navigator::new(
        &config,
        Arc::clone(&recording),
        SimulatedSpeaker {
            words_per_second: config.speech_words_per_second,
        },
        LogOverlay::new(config.view_width, config.view_height),
    ));

    info!("Replaying {} frames", frames);
    let summary = replay_frames(navigator, frames, config.frame_interval, |sequence| {
        recording.capture(sequence)
    })
    .await;

    info!(
        "Done: {} analyzed, {} skipped, {} failed, {} spoken",
        summary.analyzed, summary.skipped, summary.failed, summary.spoken
    );
    Ok(())
}
