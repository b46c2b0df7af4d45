//! Configuration for the FIR shell.
//!
//! A config file is TOML with two optional tables. Anything left out keeps
//! its default:
//!
//! ```toml
//! [audio]
//! sample_rate = 48000
//! max_block_size = 256
//!
//! [filter]
//! method = "kaiser"
//! filter_type = "band-pass"
//! frequency = 500.0
//! upper_frequency = 3000.0
//! transition_width = 0.02
//! amplitude = -80.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FirError, Result};
use crate::params::FilterParameters;

/// Complete configuration
///
/// # Example
/// ```
/// use firshell::config::PluginConfig;
///
/// let config = PluginConfig::from_toml_str("[audio]\nsample_rate = 96000").unwrap();
/// assert_eq!(config.audio.sample_rate, 96000);
/// assert_eq!(config.filter.order, 21);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Audio stream configuration
    pub audio: AudioConfig,
    /// Initial filter parameters
    pub filter: FilterParameters,
}

/// Audio stream configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample rate in Hz, used when the input does not provide one
    pub sample_rate: u32,
    /// Largest block the host will hand to `process`
    pub max_block_size: usize,
    /// Number of channels to prepare histories for
    pub channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            max_block_size: 512,
            channels: 2,
        }
    }
}

impl PluginConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| FirError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FirError::Config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| FirError::Config(e.to_string()))
    }

    /// Reject stream settings the engine cannot be prepared with
    ///
    /// Filter parameters are not checked here; a bad design is refused when
    /// the filter is built and the passthrough stays active.
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate == 0 {
            return Err(FirError::Config("audio.sample_rate must be > 0".into()));
        }
        if self.audio.max_block_size == 0 {
            return Err(FirError::Config("audio.max_block_size must be > 0".into()));
        }
        if self.audio.channels == 0 {
            return Err(FirError::Config("audio.channels must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{FilterType, WindowType};
    use crate::params::MethodKind;

    #[test]
    fn test_empty_config_is_default() {
        let config = PluginConfig::from_toml_str("").unwrap();
        assert_eq!(config, PluginConfig::default());
        assert_eq!(config.audio.sample_rate, 44100);
    }

    #[test]
    fn test_filter_table() {
        let text = r#"
            [filter]
            method = "least-squares"
            filter_type = "band-stop"
            window_type = "blackman-harris"
            order = 63
            frequency = 800.0
            upper_frequency = 1200.0
        "#;
        let config = PluginConfig::from_toml_str(text).unwrap();
        assert_eq!(config.filter.method, MethodKind::LeastSquares);
        assert_eq!(config.filter.filter_type, FilterType::BandStop);
        assert_eq!(config.filter.window_type, WindowType::BlackmanHarris);
        assert_eq!(config.filter.order, 63);
        // Untouched fields keep their defaults
        assert_eq!(config.filter.amplitude, -100.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            PluginConfig::from_toml_str("[audio]\nsample_rate = 0"),
            Err(FirError::Config(_))
        ));
        assert!(matches!(
            PluginConfig::from_toml_str("[filter]\nmethod = \"remez\""),
            Err(FirError::Config(_))
        ));
        assert!(PluginConfig::from_toml_str("[audio\n").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PluginConfig::default();
        config.audio.max_block_size = 128;
        config.filter.frequency = 4321.0;
        let text = config.to_toml_string().unwrap();
        assert_eq!(PluginConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            PluginConfig::load("/nonexistent/firshell.toml"),
            Err(FirError::Config(_))
        ));
    }
}
