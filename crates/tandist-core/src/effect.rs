//! The host-facing audio effect capability.
//!
//! [`AudioEffect`] is the contract a plugin-format adapter (or the CLI) talks
//! to: static metadata, parameter discovery, parameter reads and writes, and
//! block processing over separate left/right buffers.
//!
//! ## Design Decisions
//!
//! - **Shared parameters**: Parameter values live in a [`ParameterModel`]
//!   that the effect exposes by reference. Hosts and editors clone the model
//!   handle and write from their own threads while the audio thread holds
//!   `&mut self` for [`run`](AudioEffect::run).
//!
//! - **Stereo frames**: Processing is defined per frame (one left and one
//!   right sample). Per-frame state such as gain smoothing advances once per
//!   frame, never once per channel.
//!
//! - **No allocations**: `run`, `process_frame`, and the parameter accessors
//!   are real-time safe: no heap allocation, no locks, no I/O, and no panics
//!   on any input including mismatched buffer lengths.

use crate::param_info::ParamDescriptor;
use crate::parameters::ParameterModel;

/// Static identification reported to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    /// Short label used as plugin identifier.
    pub label: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Vendor brand shown by hosts.
    pub brand: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Author or vendor.
    pub maker: &'static str,
    /// LV2-style URI.
    pub uri: &'static str,
    /// CLAP identifier.
    pub clap_id: &'static str,
    /// Four-character code packed big-endian.
    pub unique_id: u32,
    /// License identifier.
    pub license: &'static str,
    /// `(major, minor, patch)`.
    pub version: (u32, u32, u32),
    /// Number of audio inputs.
    pub inputs: usize,
    /// Number of audio outputs.
    pub outputs: usize,
    /// Whether processing is hard real-time safe.
    pub realtime_safe: bool,
}

impl PluginInfo {
    /// Version as `major.minor.patch`.
    #[cfg(feature = "std")]
    pub fn version_string(&self) -> String {
        let (major, minor, patch) = self.version;
        format!("{major}.{minor}.{patch}")
    }

    /// Unique id rendered as its four ASCII characters.
    pub fn unique_id_bytes(&self) -> [u8; 4] {
        self.unique_id.to_be_bytes()
    }
}

/// Pack four ASCII bytes into a big-endian `u32` identifier.
pub const fn four_cc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

/// A stereo audio effect with host-visible parameters.
///
/// # Example
///
/// ```rust
/// use tandist_core::{AudioEffect, TanDist, GAIN};
///
/// let mut effect = TanDist::new(48000.0);
/// effect.set_parameter_value(GAIN, 2.0);
///
/// let input = [0.5f32; 64];
/// let (mut left, mut right) = ([0.0f32; 64], [0.0f32; 64]);
/// effect.run(&input, &input, &mut left, &mut right, 64);
///
/// assert_eq!(left, right);
/// ```
pub trait AudioEffect {
    /// Static metadata.
    fn info(&self) -> &'static PluginInfo;

    /// Shared parameter store.
    fn parameters(&self) -> &ParameterModel;

    /// Process one stereo frame.
    fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process `frames` frames from the input buffers into the output buffers.
    ///
    /// Frames beyond the shortest of the four buffers are skipped rather
    /// than treated as an error. `frames == 0` is a no-op that leaves all
    /// state untouched.
    fn run(
        &mut self,
        in_left: &[f32],
        in_right: &[f32],
        out_left: &mut [f32],
        out_right: &mut [f32],
        frames: usize,
    ) {
        let frames = frames
            .min(in_left.len())
            .min(in_right.len())
            .min(out_left.len())
            .min(out_right.len());

        for i in 0..frames {
            let (l, r) = self.process_frame(in_left[i], in_right[i]);
            out_left[i] = l;
            out_right[i] = r;
        }
    }

    /// Update the sample rate.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear processing state without touching parameter values.
    fn reset(&mut self);

    /// Processing latency in samples. Default is 0.
    fn latency_samples(&self) -> usize {
        0
    }

    /// Number of parameters.
    fn parameter_count(&self) -> usize {
        self.parameters().len()
    }

    /// Parameter metadata by index.
    fn parameter_descriptor(&self, index: usize) -> Option<&ParamDescriptor> {
        self.parameters().descriptor(index)
    }

    /// Current raw parameter value; `0.0` for an unknown index.
    fn get_parameter_value(&self, index: usize) -> f32 {
        self.parameters().get_raw(index)
    }

    /// Host write: clamp and store, then notify the control surface.
    ///
    /// Unknown indices are ignored.
    fn set_parameter_value(&self, index: usize, value: f32) {
        self.parameters().set_from_host(index, value);
    }
}
