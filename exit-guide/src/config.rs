use crate::detect::property::partition::Partitioner;
use crate::detect::property::path::PathAnalyzer;
use crate::detect::{MIN_DETECTION_CONFIDENCE, PATH_BAND_FACTOR};
use crate::session::{FRAME_SKIP, GUIDANCE_COOLDOWN};
use anyhow::{anyhow, Context, Result};
use exit_inference::inference::replay::{
    ReplayOptions, DEFAULT_CLASSIFICATION_THRESHOLD, DEFAULT_MAX_LABELS_PER_OBJECT,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;
const DEFAULT_VIEW_WIDTH: u32 = 1080;
const DEFAULT_VIEW_HEIGHT: u32 = 1440;
const DEFAULT_WORDS_PER_SECOND: f32 = 2.5;
/// Lowest accepted simulated speech rate.
pub const MIN_WORDS_PER_SECOND: f32 = 0.1;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GuidanceConfigFile {
    guidance: Option<GuidanceSection>,
    camera: Option<CameraSection>,
    classifier: Option<ClassifierSection>,
    overlay: Option<OverlaySection>,
    speech: Option<SpeechSection>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GuidanceSection {
    min_confidence: Option<f32>,
    path_band_factor: Option<f32>,
    cooldown_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CameraSection {
    frame_skip: Option<u32>,
    frame_interval_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ClassifierSection {
    threshold: Option<f32>,
    max_labels: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct OverlaySection {
    view_width: Option<u32>,
    view_height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SpeechSection {
    words_per_second: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct GuidanceConfig {
    pub min_confidence: f32,
    pub path_band_factor: f32,
    pub guidance_cooldown: Duration,
    pub frame_skip: u32,
    pub frame_interval: Duration,
    pub classification_threshold: f32,
    pub max_labels_per_object: usize,
    pub view_width: u32,
    pub view_height: u32,
    pub speech_words_per_second: f32,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self::from_file(GuidanceConfigFile::default())
    }
}

impl GuidanceConfig {
    /// Defaults, then the optional TOML file, then `EXIT_GUIDE_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_cfg = match path {
            Some(path) => read_config_file(path)?,
            None => GuidanceConfigFile::default(),
        };
        let mut cfg = Self::from_file(file_cfg);
        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file_cfg: GuidanceConfigFile =
            toml::from_str(content).context("invalid guidance config")?;
        let cfg = Self::from_file(file_cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: GuidanceConfigFile) -> Self {
        let guidance = file.guidance.unwrap_or_default();
        let camera = file.camera.unwrap_or_default();
        let classifier = file.classifier.unwrap_or_default();
        let overlay = file.overlay.unwrap_or_default();
        let speech = file.speech.unwrap_or_default();

        Self {
            min_confidence: guidance.min_confidence.unwrap_or(MIN_DETECTION_CONFIDENCE),
            path_band_factor: guidance.path_band_factor.unwrap_or(PATH_BAND_FACTOR),
            guidance_cooldown: guidance
                .cooldown_ms
                .map(Duration::from_millis)
                .unwrap_or(GUIDANCE_COOLDOWN),
            frame_skip: camera.frame_skip.unwrap_or(FRAME_SKIP),
            frame_interval: Duration::from_millis(
                camera.frame_interval_ms.unwrap_or(DEFAULT_FRAME_INTERVAL_MS),
            ),
            classification_threshold: classifier
                .threshold
                .unwrap_or(DEFAULT_CLASSIFICATION_THRESHOLD),
            max_labels_per_object: classifier
                .max_labels
                .unwrap_or(DEFAULT_MAX_LABELS_PER_OBJECT),
            view_width: overlay.view_width.unwrap_or(DEFAULT_VIEW_WIDTH),
            view_height: overlay.view_height.unwrap_or(DEFAULT_VIEW_HEIGHT),
            speech_words_per_second: speech
                .words_per_second
                .unwrap_or(DEFAULT_WORDS_PER_SECOND),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = non_empty(lookup("EXIT_GUIDE_MIN_CONFIDENCE")) {
            self.min_confidence = value
                .parse()
                .map_err(|_| anyhow!("EXIT_GUIDE_MIN_CONFIDENCE must be a number"))?;
        }
        if let Some(value) = non_empty(lookup("EXIT_GUIDE_COOLDOWN_MS")) {
            let millis: u64 = value.parse().map_err(|_| {
                anyhow!("EXIT_GUIDE_COOLDOWN_MS must be an integer number of milliseconds")
            })?;
            self.guidance_cooldown = Duration::from_millis(millis);
        }
        if let Some(value) = non_empty(lookup("EXIT_GUIDE_FRAME_SKIP")) {
            self.frame_skip = value
                .parse()
                .map_err(|_| anyhow!("EXIT_GUIDE_FRAME_SKIP must be a non-negative integer"))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(anyhow!("min_confidence must be within [0, 1]"));
        }
        if !(self.path_band_factor > 0.0 && self.path_band_factor <= 1.0) {
            return Err(anyhow!("path_band_factor must be within (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.classification_threshold) {
            return Err(anyhow!("classifier threshold must be within [0, 1]"));
        }
        if self.max_labels_per_object == 0 {
            return Err(anyhow!("classifier max_labels must be greater than zero"));
        }
        if self.view_width == 0 || self.view_height == 0 {
            return Err(anyhow!("overlay view dimensions must be greater than zero"));
        }
        if self.frame_interval.is_zero() {
            return Err(anyhow!("camera frame_interval_ms must be greater than zero"));
        }
        if !(self.speech_words_per_second.is_finite()
            && self.speech_words_per_second >= MIN_WORDS_PER_SECOND)
        {
            return Err(anyhow!(
                "speech words_per_second must be at least {}",
                MIN_WORDS_PER_SECOND
            ));
        }
        Ok(())
    }

    pub fn partitioner(&self) -> Partitioner {
        Partitioner::new(self.min_confidence, PathAnalyzer::new(self.path_band_factor))
    }

    pub fn replay_options(&self) -> ReplayOptions {
        ReplayOptions {
            classification_threshold: self.classification_threshold,
            max_labels_per_object: self.max_labels_per_object,
        }
    }
}

fn read_config_file(path: &Path) -> Result<GuidanceConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_match_navigation_constants() {
        let cfg = GuidanceConfig::default();
        assert_eq!(cfg.min_confidence, 0.5);
        assert_eq!(cfg.path_band_factor, 0.6);
        assert_eq!(cfg.guidance_cooldown, Duration::from_secs(20));
        assert_eq!(cfg.frame_skip, 2);
        assert_eq!(cfg.classification_threshold, 0.7);
        assert_eq!(cfg.max_labels_per_object, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let cfg = GuidanceConfig::from_toml_str(
            r#"
            [guidance]
            min_confidence = 0.6
            cooldown_ms = 5000

            [camera]
            frame_skip = 0
            "#,
        )?;
        assert_eq!(cfg.min_confidence, 0.6);
        assert_eq!(cfg.guidance_cooldown, Duration::from_secs(5));
        assert_eq!(cfg.frame_skip, 0);
        assert_eq!(cfg.path_band_factor, 0.6);
        Ok(())
    }

    #[test]
    fn environment_overrides_win() -> Result<()> {
        let env = HashMap::from([
            ("EXIT_GUIDE_COOLDOWN_MS", "1500"),
            ("EXIT_GUIDE_FRAME_SKIP", "4"),
            ("EXIT_GUIDE_MIN_CONFIDENCE", " "),
        ]);
        let mut cfg = GuidanceConfig::default();
        cfg.apply_overrides(|key| env.get(key).map(|value| value.to_string()))?;

        assert_eq!(cfg.guidance_cooldown, Duration::from_millis(1500));
        assert_eq!(cfg.frame_skip, 4);
        assert_eq!(cfg.min_confidence, 0.5);
        Ok(())
    }

    #[test]
    fn malformed_override_is_an_error() {
        let mut cfg = GuidanceConfig::default();
        let result = cfg.apply_overrides(|key| {
            (key == "EXIT_GUIDE_FRAME_SKIP").then(|| "three".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(GuidanceConfig::from_toml_str("[guidance]\nmin_confidence = 1.5").is_err());
        assert!(GuidanceConfig::from_toml_str("[guidance]\npath_band_factor = 0.0").is_err());
        assert!(GuidanceConfig::from_toml_str("[overlay]\nview_width = 0").is_err());
        assert!(GuidanceConfig::from_toml_str("[camera]\nframe_interval_ms = 0").is_err());
        assert!(GuidanceConfig::from_toml_str("[unknown]\nvalue = 1").is_err());
    }

    #[test]
    fn misspelled_section_keys_are_rejected() {
        assert!(GuidanceConfig::from_toml_str("[guidance]\nmin_confidense = 0.6").is_err());
        assert!(GuidanceConfig::from_toml_str("[camera]\nframe_skips = 1").is_err());
        assert!(GuidanceConfig::from_toml_str("[classifier]\nthreshhold = 0.5").is_err());
        assert!(GuidanceConfig::from_toml_str("[overlay]\nwidth = 720").is_err());
        assert!(GuidanceConfig::from_toml_str("[speech]\nrate = 3.0").is_err());
    }

    #[test]
    fn speech_rate_has_a_lower_bound() -> Result<()> {
        assert!(GuidanceConfig::from_toml_str("[speech]\nwords_per_second = 1e-38").is_err());
        assert!(GuidanceConfig::from_toml_str("[speech]\nwords_per_second = 0.09").is_err());
        assert!(GuidanceConfig::from_toml_str("[speech]\nwords_per_second = inf").is_err());

        let cfg = GuidanceConfig::from_toml_str("[speech]\nwords_per_second = 0.1")?;
        assert_eq!(cfg.speech_words_per_second, MIN_WORDS_PER_SECOND);
        Ok(())
    }

    #[test]
    fn loads_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[overlay]\nview_width = 720\nview_height = 960")?;
        let cfg = GuidanceConfig::load(Some(file.path()))?;
        assert_eq!((cfg.view_width, cfg.view_height), (720, 960));
        Ok(())
    }
}
