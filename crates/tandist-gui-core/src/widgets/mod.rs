//! egui rendering for control-surface knobs.
//!
//! - [`paint_knob`] - Draw one knob from its [`KnobGeometry`](crate::KnobGeometry)
//! - [`draw_arc`] - Polyline arc helper

mod knob;

pub use knob::{draw_arc, paint_knob};
