//! Parameter bridge trait for decoupled UI-to-audio parameter communication.
//!
//! [`ParamBridge`] abstracts over the parameter storage mechanism so the
//! control surface can be driven by the lock-free [`ParameterModel`] in a
//! plugin or standalone host, or by a test double that records calls.
//!
//! ```text
//! ControlSurface ──► ParamBridge::begin_set / set / end_set
//!                           │
//!                    ParameterModel (atomics)
//!                           │
//! Audio thread  ◄── ParameterModel::read_target
//! Host          ──► ParameterModel::set_from_host ──► take_external_change ──► ControlSurface
//! ```

use core::fmt;
use tandist_core::{ParamDescriptor, ParameterModel};

/// Type-safe index into the parameter array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamIndex(pub usize);

impl fmt::Display for ParamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ParamIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Trait for bridging parameter values between the UI and audio threads.
///
/// Implementations must be thread-safe: `get` and `set` may be called
/// from different threads simultaneously.
pub trait ParamBridge: Send + Sync {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Parameter descriptor for display and normalization.
    ///
    /// Returns `None` if the index is out of range.
    fn param_descriptor(&self, param: ParamIndex) -> Option<ParamDescriptor>;

    /// Read the current raw value of a parameter.
    ///
    /// Returns `0.0` if the index is out of range.
    fn get(&self, param: ParamIndex) -> f32;

    /// Write a new raw value for a parameter.
    ///
    /// Out-of-range indices are silently ignored. Values are clamped to the
    /// parameter's valid range by the implementation.
    fn set(&self, param: ParamIndex, value: f32);

    /// Begin a gesture (drag start). Hosts group the following `set` calls.
    fn begin_set(&self, param: ParamIndex);

    /// End a gesture (drag stop).
    fn end_set(&self, param: ParamIndex);

    /// Drain a host-originated change for this parameter, if one is pending.
    ///
    /// UI writes through [`set`](Self::set) never show up here.
    fn take_external_change(&self, param: ParamIndex) -> Option<f32>;
}

impl ParamBridge for ParameterModel {
    fn param_count(&self) -> usize {
        self.len()
    }

    fn param_descriptor(&self, param: ParamIndex) -> Option<ParamDescriptor> {
        self.descriptor(param.0).copied()
    }

    fn get(&self, param: ParamIndex) -> f32 {
        self.get_raw(param.0)
    }

    fn set(&self, param: ParamIndex, value: f32) {
        self.set_raw(param.0, value);
    }

    fn begin_set(&self, param: ParamIndex) {
        self.begin_edit(param.0);
    }

    fn end_set(&self, param: ParamIndex) {
        self.end_edit(param.0);
    }

    fn take_external_change(&self, param: ParamIndex) -> Option<f32> {
        ParameterModel::take_external_change(self, param.0)
    }
}
