//! Runtime configuration
//!
//! Every section is optional in TOML; missing values take their defaults.
//! Durations are integer milliseconds.
//!
//! ```toml
//! device_name = "ESP32_Face"
//!
//! [window]
//! size = 512
//! mode = "rms"
//!
//! [face.thresholds]
//! low = 0.05
//!
//! [decay]
//! factor = 0.95
//! tick_interval = 50
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use emote_audio::WindowSpec;
use emote_core::EmoteError;
use emote_face::FaceConfig;
use emote_time::{BlinkConfig, DecayConfig};

use crate::{RuntimeError, RuntimeResult};

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// JSON lines instead of human-readable output
    pub json: bool,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

/// Face node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Name the audio sink advertises
    pub device_name: String,
    pub window: WindowSpec,
    pub face: FaceConfig,
    pub decay: DecayConfig,
    pub blink: BlinkConfig,
    pub logging: LoggingConfig,
    /// Blink RNG seed; random when unset
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            device_name: "ESP32_Face".to_string(),
            window: WindowSpec::default(),
            face: FaceConfig::default(),
            decay: DecayConfig::default(),
            blink: BlinkConfig::default(),
            logging: LoggingConfig::default(),
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate TOML
    pub fn from_toml_str(input: &str) -> RuntimeResult<Self> {
        let config: RuntimeConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> RuntimeResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<(), EmoteError> {
        if self.device_name.trim().is_empty() {
            return Err(EmoteError::InvalidConfig(
                "device_name must not be empty".to_string(),
            ));
        }
        self.window.validate()?;
        self.face.validate()?;
        self.decay.validate()?;
        self.blink.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emote_audio::LevelMode;
    use std::time::Duration;

    #[test]
    fn test_default_config_valid() {
        assert!(RuntimeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            device_name = "Desk_Face"
            seed = 11

            [window]
            mode = "mean_abs"

            [face]
            override_duration = 150

            [face.thresholds]
            low = 0.05

            [decay]
            tick_interval = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.device_name, "Desk_Face");
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.window.mode, LevelMode::MeanAbs);
        assert_eq!(config.window.size, 512);
        assert_eq!(config.face.override_duration, Duration::from_millis(150));
        assert_eq!(config.face.thresholds.low, 0.05);
        assert_eq!(config.face.thresholds.mid, 0.3);
        assert_eq!(config.decay.tick_interval, Duration::from_millis(20));
        assert_eq!(config.decay.factor, 0.95);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = RuntimeConfig::from_toml_str("[decay]\nfactor = 1.5\n").unwrap_err();
        assert!(matches!(err, RuntimeError::Config(EmoteError::DecayFactor(_))));

        let err = RuntimeConfig::from_toml_str("[face.thresholds]\nlow = 0.5\n").unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Config(EmoteError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = RuntimeConfig::from_toml_str("window = [").unwrap_err();
        assert!(matches!(err, RuntimeError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RuntimeConfig::load("/nonexistent/emote.toml").unwrap_err();
        assert!(matches!(err, RuntimeError::Io { .. }));
    }
}
