//! Configuration validation.
//!
//! [`validate_config`] checks every field a [`TanDistConfig`] carries and
//! reports the first violation. A config that passes can be handed to the
//! processor and control surface without further checks.

use crate::config::TanDistConfig;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A field that must be finite and strictly positive is not.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Dotted field path, e.g. `"audio.sample_rate"`.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Smoothing coefficient outside `(0, 1]`.
    #[error("smoothing.coefficient {0} out of range (0, 1]")]
    CoefficientOutOfRange(f32),

    /// The knob does not fit on the surface.
    #[error("knob of radius {radius} does not fit a {width}x{height} surface")]
    KnobOutsideSurface {
        /// Knob radius.
        radius: f32,
        /// Surface width.
        width: f32,
        /// Surface height.
        height: f32,
    },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn positive(field: &'static str, value: f64) -> ValidationResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { field, value })
    }
}

/// Validate a configuration, returning the first problem found.
pub fn validate_config(config: &TanDistConfig) -> ValidationResult<()> {
    let smoothing = &config.smoothing;
    if !(smoothing.coefficient > 0.0 && smoothing.coefficient <= 1.0) {
        return Err(ValidationError::CoefficientOutOfRange(smoothing.coefficient));
    }
    if let Some(ms) = smoothing.time_constant_ms {
        positive("smoothing.time_constant_ms", f64::from(ms))?;
    }

    let surface = &config.surface;
    positive("surface.width", f64::from(surface.width))?;
    positive("surface.height", f64::from(surface.height))?;
    positive("surface.knob_radius", f64::from(surface.knob_radius))?;
    positive("surface.sensitivity", f64::from(surface.sensitivity))?;
    let diameter = surface.knob_radius * 2.0;
    if diameter > surface.width || diameter > surface.height {
        return Err(ValidationError::KnobOutsideSurface {
            radius: surface.knob_radius,
            width: surface.width,
            height: surface.height,
        });
    }

    positive("audio.sample_rate", f64::from(config.audio.sample_rate))?;
    positive("audio.block_size", config.audio.block_size as f64)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate_config(&TanDistConfig::default()), Ok(()));
    }

    #[test]
    fn coefficient_bounds() {
        let mut config = TanDistConfig::default();
        config.smoothing.coefficient = 1.0;
        assert!(validate_config(&config).is_ok());

        config.smoothing.coefficient = 0.0;
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::CoefficientOutOfRange(0.0))
        );

        config.smoothing.coefficient = 1.5;
        assert!(validate_config(&config).is_err());

        config.smoothing.coefficient = f32::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn time_constant_must_be_positive_when_set() {
        let mut config = TanDistConfig::default();
        config.smoothing.time_constant_ms = Some(0.0);
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::NonPositive {
                field: "smoothing.time_constant_ms",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut config = TanDistConfig::default();
        config.smoothing.time_constant_ms = Some(f32::INFINITY);
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::NonPositive {
                field: "smoothing.time_constant_ms",
                ..
            })
        ));

        config.smoothing.time_constant_ms = Some(f32::NAN);
        assert!(validate_config(&config).is_err());

        for field in ["width", "height", "sensitivity"] {
            let mut config = TanDistConfig::default();
            match field {
                "width" => config.surface.width = f32::INFINITY,
                "height" => config.surface.height = f32::INFINITY,
                _ => config.surface.sensitivity = f32::INFINITY,
            }
            assert!(
                matches!(
                    validate_config(&config),
                    Err(ValidationError::NonPositive { .. })
                ),
                "surface.{field} = inf accepted"
            );
        }
    }

    #[test]
    fn surface_rules() {
        let mut config = TanDistConfig::default();
        config.surface.sensitivity = 0.0;
        assert!(validate_config(&config).is_err());

        let mut config = TanDistConfig::default();
        config.surface.knob_radius = 200.0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::KnobOutsideSurface { .. })
        ));
    }

    #[test]
    fn audio_rules() {
        let mut config = TanDistConfig::default();
        config.audio.sample_rate = 0;
        assert!(validate_config(&config).is_err());

        let mut config = TanDistConfig::default();
        config.audio.block_size = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::NonPositive {
                field: "audio.block_size",
                ..
            })
        ));
    }
}
