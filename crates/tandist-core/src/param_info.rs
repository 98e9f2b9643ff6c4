//! Parameter metadata for host discovery and UI normalization.
//!
//! Each controllable quantity is described by a [`ParamDescriptor`]: its
//! display name and automation symbol, its plain-value range and default,
//! a stable [`ParamId`], and host capability [`ParamFlags`]. Descriptors are
//! immutable once built; the current value lives in
//! [`ParameterModel`](crate::ParameterModel).
//!
//! Normalization is linear:
//!
//! - `normalize(raw) = (raw - min) / (max - min)`
//! - `denormalize(norm) = min + norm * (max - min)`
//!
//! # Example
//!
//! ```rust
//! use tandist_core::{ParamDescriptor, ParamFlags, ParamId};
//!
//! let drive = ParamDescriptor::new("Drive", "drive", 1.0, 10.0, 1.0)
//!     .with_id(ParamId(7))
//!     .with_flags(ParamFlags::AUTOMATABLE);
//!
//! assert_eq!(drive.normalize(5.5), 0.5);
//! assert_eq!(drive.denormalize(1.0), 10.0);
//! assert_eq!(drive.clamp(42.0), 10.0);
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Used by hosts for automation recording and parameter mapping. Once
/// assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// Use [`union`](Self::union) to combine.
///
/// ```rust
/// use tandist_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::HIDDEN);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(!ParamFlags::NONE.contains(ParamFlags::AUTOMATABLE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter should be hidden from generic host UI.
    pub const HIDDEN: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// The host queries descriptors once at initialization. The invariants
/// `min < max` and `min <= default <= max` are checked by
/// [`is_valid`](Self::is_valid); [`ParameterModel`](crate::ParameterModel)
/// refuses to register descriptors that violate them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name (e.g. `"Gain"`).
    pub name: &'static str,

    /// Automation symbol, lowercase and stable (e.g. `"gain"`).
    pub symbol: &'static str,

    /// Minimum plain value.
    pub min: f32,

    /// Maximum plain value.
    pub max: f32,

    /// Value the parameter holds at construction.
    pub default: f32,

    /// Stable numeric ID. Default: `ParamId(0)`.
    pub id: ParamId,

    /// Capability flags. Default: [`ParamFlags::AUTOMATABLE`].
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Linear parameter with the given name, symbol, and range.
    pub const fn new(
        name: &'static str,
        symbol: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            symbol,
            min,
            max,
            default,
            id: ParamId(0),
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Sets the stable parameter ID.
    pub const fn with_id(mut self, id: ParamId) -> Self {
        self.id = id;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether the range and default satisfy `min <= default <= max` and `min < max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min < self.max
            && self.default >= self.min
            && self.default <= self.max
    }

    /// Whether the host may automate this parameter.
    #[inline]
    pub fn is_automatable(&self) -> bool {
        self.flags.contains(ParamFlags::AUTOMATABLE)
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// ```rust
    /// use tandist_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::new("Gain", "gain", 1.0, 10.0, 1.0);
    /// assert_eq!(desc.clamp(-4.0), 1.0);
    /// assert_eq!(desc.clamp(15.0), 10.0);
    /// assert_eq!(desc.clamp(2.5), 2.5);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range: `(raw - min) / (max - min)`.
    ///
    /// No clamping is applied; out-of-range input maps outside `[0, 1]`.
    #[inline]
    pub fn normalize(&self, raw: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (raw - self.min) / range
    }

    /// Converts a normalized value to the plain range: `min + norm * (max - min)`.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized * (self.max - self.min)
    }

    /// Formats a plain value with two decimals, as shown under the knob.
    #[cfg(feature = "std")]
    pub fn format_value(&self, raw: f32) -> String {
        format!("{raw:.2}")
    }
}
