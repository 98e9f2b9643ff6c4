//! Control surface for the TanDist distortion.
//!
//! The interaction logic is toolkit-independent: a [`ControlSurface`] turns
//! pointer events into parameter gestures through the [`ParamBridge`] trait,
//! and [`KnobGeometry`] describes what to draw. [`TanDistEditor`] wires both
//! into egui.
//!
//! # Modules
//!
//! - [`param_bridge`] - Parameter bridge trait with gesture protocol and host-change polling
//! - [`control_surface`] - Idle/Dragging state machine, hit testing, drag mapping
//! - [`geometry`] - Knob layout in surface coordinates
//! - [`theme`] - Colors and egui theme application
//! - [`widgets`] - egui knob painter
//! - [`editor`] - egui editor hosting a control surface

pub mod control_surface;
pub mod editor;
pub mod geometry;
pub mod param_bridge;
pub mod theme;
pub mod widgets;

pub use control_surface::{
    ControlSurface, DEFAULT_SENSITIVITY, DragSession, DragState, KnobControl, PointerButton,
    PointerEvent, PointerPhase, Transition, drag_value, hit_test,
};
pub use editor::TanDistEditor;
pub use geometry::{KnobGeometry, Point, Rect};
pub use param_bridge::{ParamBridge, ParamIndex};
pub use theme::Theme;
