//! TanDist Core - tanh distortion DSP and parameter model
//!
//! This crate holds everything that runs on, or talks directly to, the audio
//! thread. It performs no allocation, locking, or I/O in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect
//!
//! - [`AudioEffect`] - Host-facing capability: metadata, parameters, block processing
//! - [`TanDist`] - Stereo `tanh(x * gain²)` distortion with a smoothed gain
//! - [`PluginInfo`] / [`TANDIST_INFO`] - Static identification for hosts
//!
//! ## Parameters
//!
//! - [`ParameterModel`] - Lock-free shared store with clamped writes, gesture
//!   flags, and host-change notification
//! - [`ParamDescriptor`] - Name, symbol, range, default, id, and flags
//!
//! ## DSP Building Blocks
//!
//! - [`Smoother`] - One-pole per-frame parameter smoothing
//! - [`waveshape`] - The memoryless tanh transfer function
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! tandist-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use tandist_core::{AudioEffect, TanDist, GAIN};
//!
//! let mut dist = TanDist::new(48000.0);
//! dist.set_parameter_value(GAIN, 3.0);
//!
//! let input = [0.25f32; 128];
//! let mut left = [0.0f32; 128];
//! let mut right = [0.0f32; 128];
//! dist.run(&input, &input, &mut left, &mut right, 128);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std as alloc;

pub mod effect;
pub mod param_info;
pub mod parameters;
pub mod processor;
pub mod smoother;
pub mod waveshaper;

pub use effect::{AudioEffect, PluginInfo, four_cc};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId};
pub use parameters::{
    GAIN, GAIN_DESCRIPTOR, GESTURE_BEGIN, GESTURE_END, NEUTRAL_VALUE, ParamError, ParameterModel,
};
pub use processor::{TANDIST_INFO, TanDist};
pub use smoother::{DEFAULT_SMOOTHING_COEFF, Smoother, SmoothingMode};
pub use waveshaper::{quadratic_gain, shape, waveshape};
