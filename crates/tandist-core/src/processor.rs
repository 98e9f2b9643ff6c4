//! The TanDist stereo tanh distortion.
//!
//! Per frame, the gain target is read from the shared [`ParameterModel`],
//! smoothed once, squared, and applied to both channels before `tanh`:
//!
//! ```text
//! s ← s + (target - s) * α
//! outL = tanh(inL * s²)
//! outR = tanh(inR * s²)
//! ```
//!
//! Both channels share one smoother, so they always see the same gain in a
//! given frame.

use crate::effect::{AudioEffect, PluginInfo, four_cc};
use crate::parameters::{GAIN, ParameterModel};
use crate::smoother::{Smoother, SmoothingMode};
use crate::waveshaper::{quadratic_gain, shape};

/// Host-facing identification of the TanDist effect.
pub const TANDIST_INFO: PluginInfo = PluginInfo {
    label: "TanDist",
    name: "TanDist",
    brand: "UALG",
    description: "Simple distortion plugin.",
    maker: "MalgAmoe",
    uri: "somewhere.url",
    clap_id: "clap.TanDist.1",
    unique_id: four_cc(b"AEIO"),
    license: "MIT",
    version: (1, 0, 0),
    inputs: 2,
    outputs: 2,
    realtime_safe: true,
};

/// Stereo tanh waveshaper with a smoothed quadratic gain.
///
/// ## Parameters
/// - `gain`: Gain (1.0 to 10.0, default 1.0), applied squared
///
/// # Example
///
/// ```rust
/// use tandist_core::{AudioEffect, TanDist, GAIN};
///
/// let mut dist = TanDist::new(48000.0);
/// let (l, r) = dist.process_frame(1.0, -1.0);
/// assert!((l - 0.76159).abs() < 1e-4);
/// assert_eq!(r, -l);
///
/// // Another thread (host, UI) moves the target through a model clone
/// let params = dist.parameters().clone();
/// params.set_raw(GAIN, 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct TanDist {
    params: ParameterModel,
    gain: Smoother,
    sample_rate: f32,
}

impl TanDist {
    /// Create with a fresh parameter model and the default smoothing.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_parameters(ParameterModel::tandist(), sample_rate)
    }

    /// Create around an existing parameter model.
    ///
    /// The smoother starts at the model's current gain, so there is no ramp
    /// on the first block.
    pub fn with_parameters(params: ParameterModel, sample_rate: f32) -> Self {
        let gain = Smoother::with_mode(
            params.get_raw(GAIN),
            SmoothingMode::default(),
            sample_rate,
        );
        Self {
            params,
            gain,
            sample_rate,
        }
    }

    /// Builder: select a smoothing mode.
    #[must_use]
    pub fn with_smoothing(mut self, mode: SmoothingMode) -> Self {
        self.set_smoothing(mode);
        self
    }

    /// Change the smoothing mode without resetting the smoothed gain.
    pub fn set_smoothing(&mut self, mode: SmoothingMode) {
        self.gain.set_mode(mode);
        #[cfg(feature = "tracing")]
        tracing::debug!(?mode, coeff = self.gain.coeff(), "smoothing mode changed");
    }

    /// Smoothed gain as of the last processed frame.
    pub fn smoothed_gain(&self) -> f32 {
        self.gain.current()
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

impl Default for TanDist {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl AudioEffect for TanDist {
    fn info(&self) -> &'static PluginInfo {
        &TANDIST_INFO
    }

    fn parameters(&self) -> &ParameterModel {
        &self.params
    }

    #[inline]
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let gain = self.gain.advance(self.params.read_target(GAIN));
        let drive = quadratic_gain(gain);
        (shape(left, drive), shape(right, drive))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.gain.set_sample_rate(sample_rate);
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, coeff = self.gain.coeff(), "sample rate changed");
    }

    fn reset(&mut self) {
        self.gain.snap_to(self.params.get_raw(GAIN));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoother::DEFAULT_SMOOTHING_COEFF;
    use libm::tanhf;

    #[test]
    fn info_matches_plugin_metadata() {
        let dist = TanDist::default();
        let info = dist.info();
        assert_eq!(info.label, "TanDist");
        assert_eq!(info.license, "MIT");
        assert_eq!(info.version, (1, 0, 0));
        assert_eq!((info.inputs, info.outputs), (2, 2));
        assert!(info.realtime_safe);
        assert_eq!(&info.unique_id_bytes(), b"AEIO");
        assert_eq!(dist.latency_samples(), 0);
    }

    #[test]
    fn first_frame_at_default_gain() {
        let mut dist = TanDist::new(48000.0);
        let (l, r) = dist.process_frame(1.0, 0.5);
        assert!((l - tanhf(1.0)).abs() < 1e-6);
        assert!((r - tanhf(0.5)).abs() < 1e-6);
    }

    #[test]
    fn settled_gain_two_gives_tanh_two() {
        let params = ParameterModel::tandist();
        params.set_raw(GAIN, 2.0);
        let mut dist = TanDist::with_parameters(params, 48000.0);
        assert_eq!(dist.smoothed_gain(), 2.0);

        let (l, r) = dist.process_frame(0.5, -0.5);
        assert!((l - 0.96403).abs() < 1e-5, "got {l}");
        assert_eq!(r, -l);
    }

    #[test]
    fn gain_step_ramps_one_alpha_per_frame() {
        let mut dist = TanDist::new(48000.0);
        dist.parameters().set_raw(GAIN, 2.0);

        dist.process_frame(0.0, 0.0);
        let expected = 1.0 + DEFAULT_SMOOTHING_COEFF;
        assert!((dist.smoothed_gain() - expected).abs() < 1e-6);
    }

    #[test]
    fn channels_share_one_smoother() {
        let mut dist = TanDist::new(48000.0);
        dist.parameters().set_raw(GAIN, 10.0);

        let input = [0.3f32; 256];
        let mut left = [0.0f32; 256];
        let mut right = [0.0f32; 256];
        dist.run(&input, &input, &mut left, &mut right, 256);

        assert_eq!(left, right);
        let expected = 10.0 - 9.0 * (1.0f64 - 0.001).powi(256);
        assert!((f64::from(dist.smoothed_gain()) - expected).abs() < 1e-3);
    }

    #[test]
    fn zero_frames_leaves_state_and_outputs_untouched() {
        let mut dist = TanDist::new(48000.0);
        dist.parameters().set_raw(GAIN, 5.0);
        let mut left = [7.0f32; 4];
        let mut right = [7.0f32; 4];
        dist.run(&[0.1; 4], &[0.1; 4], &mut left, &mut right, 0);

        assert_eq!(left, [7.0; 4]);
        assert_eq!(right, [7.0; 4]);
        assert_eq!(dist.smoothed_gain(), 1.0);
    }

    #[test]
    fn short_buffers_are_not_overrun() {
        let mut dist = TanDist::new(48000.0);
        let mut left = [0.0f32; 3];
        let mut right = [0.0f32; 8];
        dist.run(&[1.0; 8], &[1.0; 8], &mut left, &mut right, 8);

        assert!(left.iter().all(|&s| s > 0.7));
        assert_eq!(&right[3..], &[0.0; 5]);
    }

    #[test]
    fn reset_snaps_to_target() {
        let mut dist = TanDist::new(48000.0);
        dist.parameters().set_raw(GAIN, 4.0);
        dist.process_frame(0.0, 0.0);
        assert!(dist.smoothed_gain() < 4.0);

        dist.reset();
        assert_eq!(dist.smoothed_gain(), 4.0);
        assert_eq!(dist.get_parameter_value(GAIN), 4.0);
    }

    #[test]
    fn host_writes_go_through_the_model() {
        let dist = TanDist::new(48000.0);
        dist.set_parameter_value(GAIN, 42.0);
        assert_eq!(dist.get_parameter_value(GAIN), 10.0);
        assert_eq!(dist.parameters().take_external_change(GAIN), Some(10.0));

        dist.set_parameter_value(3, 2.0);
        assert_eq!(dist.get_parameter_value(3), 0.0);
        assert_eq!(dist.parameter_count(), 1);
        assert!(dist.parameter_descriptor(1).is_none());
    }

    #[test]
    fn time_constant_mode_is_opt_in() {
        let dist = TanDist::new(48000.0);
        assert_eq!(dist.gain.coeff(), DEFAULT_SMOOTHING_COEFF);

        let mut dist = dist.with_smoothing(SmoothingMode::TimeConstant { ms: 5.0 });
        let at_48k = dist.gain.coeff();
        dist.set_sample_rate(96000.0);
        assert!(dist.gain.coeff() < at_48k);
        assert_eq!(dist.sample_rate(), 96000.0);
    }
}
