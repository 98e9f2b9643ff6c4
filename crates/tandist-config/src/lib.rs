//! Configuration for the TanDist distortion.
//!
//! # Features
//!
//! - **Config file**: [`TanDistConfig`] loaded from and saved to TOML
//! - **Validation**: Range checks for smoothing, surface, and audio settings
//! - **Paths**: Platform-specific user config location
//!
//! # Example
//!
//! ```rust,no_run
//! use tandist_config::TanDistConfig;
//!
//! // Explicit path, or the user config file, or defaults
//! let config = TanDistConfig::load_or_default(None).unwrap();
//! println!("block size: {}", config.audio.block_size);
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

/// Configuration validation.
pub mod validation;

pub use config::{AudioConfig, SmoothingConfig, SurfaceConfig, TanDistConfig};
pub use error::{ConfigError, FileOp};
pub use paths::{
    CONFIG_FILE_NAME, default_config_path, ensure_user_config_dir, user_config_dir,
};
pub use validation::{ValidationError, ValidationResult, validate_config};
