//! Lock-free parameter storage shared between the audio thread, the host,
//! and the control surface.
//!
//! [`ParameterModel`] holds each parameter's immutable [`ParamDescriptor`]
//! and its current raw (plain-unit) target value. Values are stored as `f32`
//! bit-cast into an `AtomicU32`, so every read and write is a single atomic
//! load or store: the audio thread never blocks, and concurrent writers from
//! the host and the UI cannot tear a value.
//!
//! Besides the value itself, each parameter carries two latches:
//!
//! - **Gesture flags**: the control surface raises [`GESTURE_BEGIN`] /
//!   [`GESTURE_END`] around a drag; the host side drains them with
//!   [`take_gesture_flags`](ParameterModel::take_gesture_flags) to group
//!   automation recording.
//! - **External change**: host automation writes through
//!   [`set_from_host`](ParameterModel::set_from_host), which raises a flag the
//!   UI drains with
//!   [`take_external_change`](ParameterModel::take_external_change). Writes
//!   from the UI itself use [`set_raw`](ParameterModel::set_raw) and never
//!   raise it, so a drag is not echoed back into its own session.
//!
//! Unknown indices are not errors: reads return [`NEUTRAL_VALUE`] and
//! writes are silent no-ops, so a host can query any parameter slot freely.

use crate::param_info::{ParamDescriptor, ParamFlags, ParamId};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

/// Index of the gain parameter.
pub const GAIN: usize = 0;

/// Value returned for reads of an unknown parameter index.
pub const NEUTRAL_VALUE: f32 = 0.0;

/// Flag indicating a gesture-begin is pending (UI → host).
pub const GESTURE_BEGIN: u8 = 1;
/// Flag indicating a gesture-end is pending (UI → host).
pub const GESTURE_END: u8 = 2;

/// The gain descriptor: `Gain` / `gain`, range 1–10, default 1, automatable.
pub const GAIN_DESCRIPTOR: ParamDescriptor = ParamDescriptor::new("Gain", "gain", 1.0, 10.0, 1.0)
    .with_id(ParamId(0))
    .with_flags(ParamFlags::AUTOMATABLE);

/// Rejected descriptor set passed to [`ParameterModel::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamError {
    /// A descriptor violates `min < max` or `min <= default <= max`.
    InvalidRange {
        /// Index of the offending descriptor.
        index: usize,
    },
    /// Two descriptors share the same [`ParamId`].
    DuplicateId(ParamId),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::InvalidRange { index } => {
                write!(f, "parameter {index} has an invalid range or default")
            }
            ParamError::DuplicateId(id) => write!(f, "duplicate parameter id {}", id.0),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

struct ParameterData {
    descriptors: Vec<ParamDescriptor>,
    /// f32 bit-cast to u32, one per descriptor.
    values: Vec<AtomicU32>,
    /// bit 0 = begin pending, bit 1 = end pending.
    gesture_flags: Vec<AtomicU8>,
    /// Set by host writes, cleared by the UI.
    external_change: Vec<AtomicBool>,
}

/// Shared parameter store.
///
/// Cheap to clone: all clones refer to the same storage, so the audio
/// processor, the host adapter, and the editor each hold their own handle.
#[derive(Clone)]
pub struct ParameterModel {
    inner: Arc<ParameterData>,
}

impl ParameterModel {
    /// Build a model from descriptors. Every value starts at its default.
    pub fn new(descriptors: Vec<ParamDescriptor>) -> Result<Self, ParamError> {
        for (index, desc) in descriptors.iter().enumerate() {
            if !desc.is_valid() {
                return Err(ParamError::InvalidRange { index });
            }
            if descriptors[..index].iter().any(|d| d.id == desc.id) {
                return Err(ParamError::DuplicateId(desc.id));
            }
        }

        #[cfg(feature = "tracing")]
        for desc in &descriptors {
            tracing::debug!(
                name = desc.name,
                symbol = desc.symbol,
                min = desc.min,
                max = desc.max,
                default = desc.default,
                "registered parameter"
            );
        }

        let values = descriptors
            .iter()
            .map(|d| AtomicU32::new(d.default.to_bits()))
            .collect();
        let gesture_flags = descriptors.iter().map(|_| AtomicU8::new(0)).collect();
        let external_change = descriptors.iter().map(|_| AtomicBool::new(false)).collect();

        Ok(Self {
            inner: Arc::new(ParameterData {
                descriptors,
                values,
                gesture_flags,
                external_change,
            }),
        })
    }

    /// The single-parameter model of the TanDist effect.
    pub fn tandist() -> Self {
        let data = ParameterData {
            descriptors: alloc::vec![GAIN_DESCRIPTOR],
            values: alloc::vec![AtomicU32::new(GAIN_DESCRIPTOR.default.to_bits())],
            gesture_flags: alloc::vec![AtomicU8::new(0)],
            external_change: alloc::vec![AtomicBool::new(false)],
        };
        Self {
            inner: Arc::new(data),
        }
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.inner.descriptors.len()
    }

    /// Whether the model has no parameters.
    pub fn is_empty(&self) -> bool {
        self.inner.descriptors.is_empty()
    }

    /// Descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&ParamDescriptor> {
        self.inner.descriptors.get(index)
    }

    /// All descriptors, in index order.
    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.inner.descriptors
    }

    /// Find a parameter index by its stable [`ParamId`].
    pub fn index_by_id(&self, id: ParamId) -> Option<usize> {
        self.inner.descriptors.iter().position(|d| d.id == id)
    }

    /// Current raw value, or [`NEUTRAL_VALUE`] for an unknown index.
    pub fn get_raw(&self, index: usize) -> f32 {
        self.inner
            .values
            .get(index)
            .map_or(NEUTRAL_VALUE, |v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Audio-path read of the raw target.
    ///
    /// Identical result to [`get_raw`](Self::get_raw) but with relaxed
    /// ordering: the audio thread only needs the latest value, not ordering
    /// against other memory.
    #[inline]
    pub fn read_target(&self, index: usize) -> f32 {
        match self.inner.values.get(index) {
            Some(v) => f32::from_bits(v.load(Ordering::Relaxed)),
            None => NEUTRAL_VALUE,
        }
    }

    /// Clamp `value` to the parameter's range and store it.
    ///
    /// Returns the stored value, or `None` when nothing was written (unknown
    /// index or NaN). Safe to call from any thread concurrently with reads.
    pub fn set_raw(&self, index: usize, value: f32) -> Option<f32> {
        if value.is_nan() {
            return None;
        }
        let (atomic, desc) = self
            .inner
            .values
            .get(index)
            .zip(self.inner.descriptors.get(index))?;
        let clamped = desc.clamp(value);
        atomic.store(clamped.to_bits(), Ordering::Release);
        Some(clamped)
    }

    /// Host/automation write: [`set_raw`](Self::set_raw) plus an external
    /// change notification for the control surface.
    pub fn set_from_host(&self, index: usize, value: f32) -> Option<f32> {
        let stored = self.set_raw(index, value)?;
        if let Some(flag) = self.inner.external_change.get(index) {
            flag.store(true, Ordering::Release);
        }
        Some(stored)
    }

    /// Drain a pending external change, returning the current raw value.
    pub fn take_external_change(&self, index: usize) -> Option<f32> {
        let flag = self.inner.external_change.get(index)?;
        if flag.swap(false, Ordering::AcqRel) {
            Some(self.get_raw(index))
        } else {
            None
        }
    }

    /// Linear map of `raw` into `[0, 1]` space, or [`NEUTRAL_VALUE`] for an unknown index.
    pub fn normalize(&self, index: usize, raw: f32) -> f32 {
        self.descriptor(index)
            .map_or(NEUTRAL_VALUE, |d| d.normalize(raw))
    }

    /// Linear map of `normalized` into the raw range, or [`NEUTRAL_VALUE`] for an unknown index.
    pub fn denormalize(&self, index: usize, normalized: f32) -> f32 {
        self.descriptor(index)
            .map_or(NEUTRAL_VALUE, |d| d.denormalize(normalized))
    }

    /// Current value in normalized space.
    pub fn get_normalized(&self, index: usize) -> f32 {
        self.normalize(index, self.get_raw(index))
    }

    /// Signal the start of a parameter gesture (drag start).
    pub fn begin_edit(&self, index: usize) {
        if let Some(flag) = self.inner.gesture_flags.get(index) {
            flag.fetch_or(GESTURE_BEGIN, Ordering::Release);
        }
    }

    /// Signal the end of a parameter gesture (drag stop).
    pub fn end_edit(&self, index: usize) {
        if let Some(flag) = self.inner.gesture_flags.get(index) {
            flag.fetch_or(GESTURE_END, Ordering::Release);
        }
    }

    /// Atomically read and clear gesture flags for a parameter.
    ///
    /// Both bits may be set when a whole gesture happened between two polls.
    pub fn take_gesture_flags(&self, index: usize) -> u8 {
        self.inner
            .gesture_flags
            .get(index)
            .map_or(0, |flag| flag.swap(0, Ordering::AcqRel))
    }

    /// Restore every parameter to its default value.
    ///
    /// Counts as a host write: every parameter raises its external change
    /// flag so an open control surface picks up the defaults.
    pub fn reset_to_defaults(&self) {
        let params = self
            .inner
            .values
            .iter()
            .zip(&self.inner.descriptors)
            .zip(&self.inner.external_change);
        for ((atomic, desc), flag) in params {
            atomic.store(desc.default.to_bits(), Ordering::Release);
            flag.store(true, Ordering::Release);
        }
    }
}

impl Default for ParameterModel {
    fn default() -> Self {
        Self::tandist()
    }
}

impl fmt::Debug for ParameterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (i, desc) in self.inner.descriptors.iter().enumerate() {
            list.entry(&(desc.symbol, self.get_raw(i)));
        }
        list.finish()
    }
}
