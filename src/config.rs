//! Configuration parsing and management for kagami3d
//!
//! Every smoothing and damping factor used by the retargeters lives in
//! [`RetargetTuning`] so a host can swap in different constants (including a
//! time-normalized smoothing variant) without touching the algorithms.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, KagamiError};
use crate::tracking::DetectorOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub avatar: AvatarConfig,
    pub capture: CaptureConfig,
    pub detector: DetectorOptions,
    pub render: RenderConfig,
    pub retarget: RetargetTuning,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KagamiError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> Result<Self, KagamiError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, KagamiError> {
        let paths = [
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), KagamiError> {
        if self.detector.model_complexity > 2 {
            return Err(ConfigError::InvalidValue {
                field: "detector.model_complexity".to_string(),
                message: "Model complexity must be 0, 1, or 2".to_string(),
            }
            .into());
        }

        for (field, value) in [
            (
                "detector.min_detection_confidence",
                self.detector.min_detection_confidence,
            ),
            (
                "detector.min_tracking_confidence",
                self.detector.min_tracking_confidence,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Confidence must be between 0.0 and 1.0".to_string(),
                }
                .into());
            }
        }

        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "capture.width/height".to_string(),
                message: "Capture dimensions must be greater than 0".to_string(),
            }
            .into());
        }

        if self.capture.tick_hz <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "capture.tick_hz".to_string(),
                message: "Capture tick rate must be greater than 0".to_string(),
            }
            .into());
        }

        if self.render.target_fps <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "render.target_fps".to_string(),
                message: "Target frame rate must be greater than 0".to_string(),
            }
            .into());
        }

        self.retarget.validate()?;

        Ok(())
    }
}

/// Avatar asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Path or URL of the avatar model asset
    pub model: String,
    /// Path of the scene background asset
    pub background: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            model: "assets/avatar.vrm".to_string(),
            background: "assets/backgrounds/field.jpg".to_string(),
        }
    }
}

/// Capture device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Requested capture width in pixels (lower resolution = higher fps)
    pub width: u32,
    /// Requested capture height in pixels
    pub height: u32,
    /// Frame submission rate for the detection loop, in Hz
    pub tick_hz: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            tick_hz: 30.0,
        }
    }
}

/// Render loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render clock rate in Hz
    pub target_fps: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { target_fps: 60.0 }
    }
}

/// Dampeners and blend factors for the retargeters.
///
/// Blend factors are fixed interpolation steps applied once per solve-result
/// frame; they are deliberately NOT normalized by elapsed time, so the
/// effective smoothing time constant varies with detector throughput.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetargetTuning {
    /// Interpolation step used wherever no bone-specific factor applies
    pub default_blend: f32,
    /// Head rotation dampener (applied to the neck bone)
    pub head_dampener: f32,
    /// Hip rotation dampener
    pub hips_rotation_dampener: f32,
    /// Hip position interpolation step (small, to suppress root jitter)
    pub hips_position_blend: f32,
    /// Chest rotation dampener (shares the spine sample)
    pub chest_dampener: f32,
    /// Spine rotation dampener
    pub spine_dampener: f32,
    /// Limb segment dampener
    pub limb_dampener: f32,
    /// Blink blend against the channel's current weight
    pub blink_blend: f32,
    /// Viseme blend against the channel's current weight
    pub mouth_blend: f32,
    /// Gaze target interpolation step per axis
    pub gaze_blend: f32,
}

impl Default for RetargetTuning {
    fn default() -> Self {
        Self {
            default_blend: 0.3,
            head_dampener: 0.7,
            hips_rotation_dampener: 0.7,
            hips_position_blend: 0.07,
            chest_dampener: 0.25,
            spine_dampener: 0.45,
            limb_dampener: 1.0,
            blink_blend: 0.5,
            mouth_blend: 0.5,
            gaze_blend: 0.4,
        }
    }
}

impl RetargetTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("retarget.default_blend", self.default_blend),
            ("retarget.hips_position_blend", self.hips_position_blend),
            ("retarget.blink_blend", self.blink_blend),
            ("retarget.mouth_blend", self.mouth_blend),
            ("retarget.gaze_blend", self.gaze_blend),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Blend factor must be between 0.0 and 1.0".to_string(),
                });
            }
        }

        for (field, value) in [
            ("retarget.head_dampener", self.head_dampener),
            ("retarget.hips_rotation_dampener", self.hips_rotation_dampener),
            ("retarget.chest_dampener", self.chest_dampener),
            ("retarget.spine_dampener", self.spine_dampener),
            ("retarget.limb_dampener", self.limb_dampener),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Dampener must be between 0.0 and 1.0".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_tuning_contract_constants() {
        let tuning = RetargetTuning::default();
        assert_eq!(tuning.default_blend, 0.3);
        assert_eq!(tuning.head_dampener, 0.7);
        assert_eq!(tuning.hips_rotation_dampener, 0.7);
        assert_eq!(tuning.hips_position_blend, 0.07);
        assert_eq!(tuning.chest_dampener, 0.25);
        assert_eq!(tuning.spine_dampener, 0.45);
        assert_eq!(tuning.limb_dampener, 1.0);
        assert_eq!(tuning.blink_blend, 0.5);
        assert_eq!(tuning.mouth_blend, 0.5);
        assert_eq!(tuning.gaze_blend, 0.4);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::from_str(
            r#"
            [capture]
            width = 1280
            height = 720

            [retarget]
            gaze_blend = 0.25
            "#,
        )
        .unwrap();

        assert_eq!(config.capture.width, 1280);
        assert_eq!(config.capture.height, 720);
        // Untouched sections keep their defaults
        assert_eq!(config.retarget.gaze_blend, 0.25);
        assert_eq!(config.retarget.default_blend, 0.3);
        assert_eq!(config.detector.model_complexity, 1);
    }

    #[test]
    fn test_invalid_confidence_rejected() {
        let mut config = Config::default();
        config.detector.min_detection_confidence = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_blend_rejected() {
        let mut config = Config::default();
        config.retarget.default_blend = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_capture_size_rejected() {
        let mut config = Config::default();
        config.capture.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Config::from_str("not [ valid = toml").unwrap_err();
        assert!(matches!(err, KagamiError::Config(ConfigError::Parse(_))));
    }
}
