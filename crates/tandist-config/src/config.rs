//! The TanDist configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, FileOp};
use crate::paths::default_config_path;
use crate::validation::validate_config;
use tandist_core::{DEFAULT_SMOOTHING_COEFF, SmoothingMode};

/// Static configuration for the processor, the control surface, and the
/// offline host.
///
/// Every field has a default, so a partial file is valid.
///
/// # TOML Format
///
/// ```toml
/// [smoothing]
/// coefficient = 0.001
/// # time_constant_ms = 20.0
///
/// [surface]
/// width = 400.0
/// height = 300.0
/// knob_radius = 40.0
/// sensitivity = 0.005
///
/// [audio]
/// sample_rate = 48000
/// block_size = 256
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TanDistConfig {
    /// Gain smoothing.
    pub smoothing: SmoothingConfig,
    /// Control surface layout and feel.
    pub surface: SurfaceConfig,
    /// Offline processing defaults.
    pub audio: AudioConfig,
}

/// `[smoothing]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Per-sample one-pole coefficient in `(0, 1]`.
    pub coefficient: f32,
    /// Opt-in time constant in milliseconds. When set, overrides
    /// `coefficient` with a sample-rate dependent value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_constant_ms: Option<f32>,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            coefficient: DEFAULT_SMOOTHING_COEFF,
            time_constant_ms: None,
        }
    }
}

/// `[surface]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface width in logical pixels.
    pub width: f32,
    /// Surface height in logical pixels.
    pub height: f32,
    /// Knob body radius.
    pub knob_radius: f32,
    /// Normalized units per pixel of vertical drag.
    pub sensitivity: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
            knob_radius: 40.0,
            sensitivity: 0.005,
        }
    }
}

/// `[audio]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample rate used when the input does not dictate one.
    pub sample_rate: u32,
    /// Frames per `run` call.
    pub block_size: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            block_size: 256,
        }
    }
}

impl SmoothingConfig {
    /// The processor smoothing mode this section selects.
    pub fn mode(&self) -> SmoothingMode {
        match self.time_constant_ms {
            Some(ms) => SmoothingMode::TimeConstant { ms },
            None => SmoothingMode::PerSample {
                coeff: self.coefficient,
            },
        }
    }
}

impl TanDistConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(FileOp::Read, path, e))?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::io(FileOp::CreateDir, parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(FileOp::Write, path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field; see [`validate_config`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)?;
        Ok(())
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `path` must exist and parse. Without one, the user config
    /// file is used if present, otherwise the defaults. The result is
    /// validated either way.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let user = default_config_path();
                if user.is_file() {
                    Self::load(&user)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }
}
