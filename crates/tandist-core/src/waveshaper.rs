//! Memoryless tanh waveshaping.
//!
//! The transfer function is
//!
//! ```text
//! output = tanh(input * gain²)
//! ```
//!
//! Squaring the smoothed gain gives the knob a quadratic response: fine
//! resolution near the bottom of its travel, strong drive near the top.
//! `tanh` is self-limiting, so there is no separate clipping stage.
//!
//! # Saturation in `f32`
//!
//! Mathematically the output lies in the open interval (-1, 1) for any
//! finite input. In single precision `tanhf` rounds to exactly ±1.0 once
//! `|input * gain²|` exceeds roughly 9, so callers should rely on
//! `|output| <= 1.0`.
//!
//! # Non-finite input
//!
//! Nothing is filtered: NaN propagates to NaN and ±∞ saturates to ±1.0,
//! exactly as `tanhf` defines them.

use libm::tanhf;

/// Squared gain applied before the nonlinearity.
#[inline]
pub fn quadratic_gain(gain: f32) -> f32 {
    gain * gain
}

/// Shape one sample with an already-squared drive factor.
///
/// Use this when the same drive is applied to several channels in a frame.
#[inline]
pub fn shape(input: f32, drive: f32) -> f32 {
    tanhf(input * drive)
}

/// Shape one sample: `tanh(input * gain²)`.
///
/// ```rust
/// use tandist_core::waveshape;
///
/// // gain 2.0 → drive 4.0 → tanh(0.5 * 4.0) = tanh(2.0)
/// assert!((waveshape(0.5, 2.0) - 0.96403).abs() < 1e-5);
/// ```
#[inline]
pub fn waveshape(input: f32, gain: f32) -> f32 {
    shape(input, quadratic_gain(gain))
}
