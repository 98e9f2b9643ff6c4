//! Pointer-driven knob interaction, independent of any rendering toolkit.
//!
//! A [`ControlSurface`] owns a set of [`KnobControl`]s and a two-state drag
//! machine:
//!
//! ```text
//!            down (primary, inside knob) / begin_set
//!   Idle ───────────────────────────────────────────► Dragging
//!    ▲                                                 │   ▲
//!    │            up (primary) / end_set               │   │ move / set
//!    └─────────────────────────────────────────────────┘───┘
//! ```
//!
//! While dragging, the vertical distance from the press point drives the
//! value: `clamp(start + (start_y - y) * sensitivity, 0, 1)`. Moving up
//! increases the value.
//!
//! Toolkits feed raw pointer events into
//! [`handle_pointer_event`](ControlSurface::handle_pointer_event) and repaint
//! from [`KnobControl::geometry`]; all parameter traffic goes through a
//! [`ParamBridge`].

use crate::geometry::{KnobGeometry, Point};
use crate::param_bridge::{ParamBridge, ParamIndex};
use tandist_config::SurfaceConfig;
use tandist_core::GAIN;

/// Normalized value change per pixel of vertical drag.
pub const DEFAULT_SENSITIVITY: f32 = 0.005;

/// Normalized value a knob shows before its first host update.
pub const INITIAL_NORMALIZED: f32 = 0.5;

/// Default surface width.
pub const DEFAULT_WIDTH: f32 = 400.0;
/// Default surface height.
pub const DEFAULT_HEIGHT: f32 = 300.0;
/// Default knob body radius.
pub const DEFAULT_KNOB_RADIUS: f32 = 40.0;

/// Inclusive circular hit test: `|point - center|² <= radius²`.
#[inline]
pub fn hit_test(center: Point, radius: f32, point: Point) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// Normalized value for a drag that started at `start_y` with `start_value`
/// and has reached `y`.
#[inline]
pub fn drag_value(start_value: f32, start_y: f32, y: f32, sensitivity: f32) -> f32 {
    let delta_y = start_y - y;
    (start_value + delta_y * sensitivity).clamp(0.0, 1.0)
}

/// Which pointer button an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button or single touch.
    Primary,
    /// Right button.
    Secondary,
    /// Middle button.
    Middle,
}

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved (button state irrelevant).
    Move,
    /// Button released.
    Up,
}

/// A pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Event phase.
    pub phase: PointerPhase,
    /// Pointer position.
    pub position: Point,
    /// Button that changed state. Ignored for [`PointerPhase::Move`].
    pub button: PointerButton,
}

impl PointerEvent {
    /// Primary-button press at `(x, y)`.
    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Down, x, y)
    }

    /// Pointer movement to `(x, y)`.
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    /// Primary-button release at `(x, y)`.
    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Up, x, y)
    }

    fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    /// Replace the button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// One on-screen rotary control bound to a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct KnobControl {
    center: Point,
    radius: f32,
    param: ParamIndex,
    normalized: f32,
}

impl KnobControl {
    /// Knob at `center` with body `radius`, editing `param`.
    pub fn new(center: Point, radius: f32, param: ParamIndex) -> Self {
        Self {
            center,
            radius,
            param,
            normalized: INITIAL_NORMALIZED,
        }
    }

    /// Center position.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Body radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Bound parameter.
    pub fn param(&self) -> ParamIndex {
        self.param
    }

    /// Displayed value in `[0, 1]`.
    pub fn normalized(&self) -> f32 {
        self.normalized
    }

    /// Whether `point` lies on the knob body.
    pub fn hit_test(&self, point: Point) -> bool {
        hit_test(self.center, self.radius, point)
    }

    /// Drawing layout at the current value.
    pub fn geometry(&self) -> KnobGeometry {
        KnobGeometry::new(self.center, self.radius, self.normalized)
    }

    fn set_normalized(&mut self, value: f32) -> bool {
        let value = value.clamp(0.0, 1.0);
        if value == self.normalized {
            return false;
        }
        self.normalized = value;
        true
    }
}

/// State captured when a drag begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Index of the knob being dragged.
    pub knob: usize,
    /// Knob value at press time.
    pub start_value: f32,
    /// Pointer y at press time.
    pub start_pointer_y: f32,
}

/// Drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A knob is being dragged.
    Dragging(DragSession),
}

/// Result of feeding one event to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Event did not affect any control.
    Ignored,
    /// Drag began; `begin_set` was sent.
    DragStarted {
        /// Knob index.
        knob: usize,
        /// Bound parameter.
        param: ParamIndex,
    },
    /// Drag moved the value; `set` was sent.
    ValueChanged {
        /// Knob index.
        knob: usize,
        /// Bound parameter.
        param: ParamIndex,
        /// New normalized value.
        normalized: f32,
    },
    /// Drag finished; `end_set` was sent.
    DragEnded {
        /// Knob index.
        knob: usize,
        /// Bound parameter.
        param: ParamIndex,
    },
}

impl Transition {
    /// Whether the surface needs repainting.
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, Transition::Ignored)
    }
}

/// A fixed-size panel of knobs with drag interaction.
#[derive(Debug, Clone)]
pub struct ControlSurface {
    width: f32,
    height: f32,
    sensitivity: f32,
    knobs: Vec<KnobControl>,
    state: DragState,
}

impl ControlSurface {
    /// Empty surface of the given size with the default sensitivity.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            sensitivity: DEFAULT_SENSITIVITY,
            knobs: Vec::new(),
            state: DragState::Idle,
        }
    }

    /// The TanDist layout: one gain knob centered on the surface.
    pub fn tandist(width: f32, height: f32, knob_radius: f32) -> Self {
        let mut surface = Self::new(width, height);
        surface.add_knob(KnobControl::new(
            Point::new(width * 0.5, height * 0.5),
            knob_radius,
            ParamIndex(GAIN),
        ));
        surface
    }

    /// The TanDist layout sized and tuned by a `[surface]` config section.
    ///
    /// Expects a validated config; see `tandist_config::validate_config`.
    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self::tandist(config.width, config.height, config.knob_radius)
            .with_sensitivity(config.sensitivity)
    }

    /// Builder: set the drag sensitivity.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Add a knob, returning its index.
    pub fn add_knob(&mut self, knob: KnobControl) -> usize {
        self.knobs.push(knob);
        self.knobs.len() - 1
    }

    /// Surface size as `(width, height)`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Drag sensitivity.
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// All knobs.
    pub fn knobs(&self) -> &[KnobControl] {
        &self.knobs
    }

    /// Knob by index.
    pub fn knob(&self, index: usize) -> Option<&KnobControl> {
        self.knobs.get(index)
    }

    /// Current drag state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether knob `index` is being dragged.
    pub fn is_dragging(&self, index: usize) -> bool {
        matches!(self.state, DragState::Dragging(s) if s.knob == index)
    }

    /// Whether any knob bound to `param` is being dragged.
    fn is_dragging_param(&self, param: ParamIndex) -> bool {
        match self.state {
            DragState::Dragging(s) => self.knobs.get(s.knob).is_some_and(|k| k.param == param),
            DragState::Idle => false,
        }
    }

    /// Advance the drag state machine with one pointer event.
    ///
    /// Gesture signals and value writes are sent to `bridge` as side
    /// effects. Only the primary button starts or ends a drag.
    pub fn handle_pointer_event(
        &mut self,
        bridge: &dyn ParamBridge,
        event: PointerEvent,
    ) -> Transition {
        match (self.state, event.phase) {
            (DragState::Idle, PointerPhase::Down) if event.button == PointerButton::Primary => {
                let Some(index) = self.knobs.iter().position(|k| k.hit_test(event.position))
                else {
                    return Transition::Ignored;
                };
                let knob = &self.knobs[index];
                let param = knob.param;
                self.state = DragState::Dragging(DragSession {
                    knob: index,
                    start_value: knob.normalized,
                    start_pointer_y: event.position.y,
                });
                bridge.begin_set(param);
                tracing::trace!(knob = index, %param, value = knob.normalized, "gesture begin");
                Transition::DragStarted { knob: index, param }
            }
            (DragState::Dragging(session), PointerPhase::Move) => {
                let normalized = drag_value(
                    session.start_value,
                    session.start_pointer_y,
                    event.position.y,
                    self.sensitivity,
                );
                let Some(knob) = self.knobs.get_mut(session.knob) else {
                    return Transition::Ignored;
                };
                knob.set_normalized(normalized);
                let param = knob.param;
                if let Some(desc) = bridge.param_descriptor(param) {
                    bridge.set(param, desc.denormalize(knob.normalized));
                }
                Transition::ValueChanged {
                    knob: session.knob,
                    param,
                    normalized: knob.normalized,
                }
            }
            (DragState::Dragging(session), PointerPhase::Up)
                if event.button == PointerButton::Primary =>
            {
                self.state = DragState::Idle;
                let Some(knob) = self.knobs.get(session.knob) else {
                    return Transition::Ignored;
                };
                bridge.end_set(knob.param);
                tracing::trace!(
                    knob = session.knob,
                    param = %knob.param,
                    value = knob.normalized,
                    "gesture end"
                );
                Transition::DragEnded {
                    knob: session.knob,
                    param: knob.param,
                }
            }
            _ => Transition::Ignored,
        }
    }

    /// Host-side change notification for `param` at raw value `raw`.
    ///
    /// Ignored while that parameter is being dragged. Returns whether any
    /// knob's displayed value changed; applying the same value twice is a
    /// no-op.
    pub fn parameter_changed(
        &mut self,
        bridge: &dyn ParamBridge,
        param: ParamIndex,
        raw: f32,
    ) -> bool {
        if self.is_dragging_param(param) {
            return false;
        }
        let Some(desc) = bridge.param_descriptor(param) else {
            return false;
        };
        let normalized = desc.normalize(raw);
        let mut changed = false;
        for knob in self.knobs.iter_mut().filter(|k| k.param == param) {
            changed |= knob.set_normalized(normalized);
        }
        changed
    }

    /// Drain host-originated changes from the bridge and apply them.
    ///
    /// Returns whether a repaint is needed.
    pub fn poll_host_changes(&mut self, bridge: &dyn ParamBridge) -> bool {
        let mut changed = false;
        for i in 0..self.knobs.len() {
            let param = self.knobs[i].param;
            if let Some(raw) = bridge.take_external_change(param) {
                changed |= self.parameter_changed(bridge, param, raw);
            }
        }
        changed
    }

    /// Read every bound parameter from the bridge and update the knobs.
    ///
    /// Used once when an editor opens so it does not show the initial
    /// placeholder value.
    pub fn sync_from_bridge(&mut self, bridge: &dyn ParamBridge) {
        for i in 0..self.knobs.len() {
            let param = self.knobs[i].param;
            let raw = bridge.get(param);
            self.parameter_changed(bridge, param, raw);
        }
        tracing::debug!(knobs = self.knobs.len(), "control surface synced from bridge");
    }
}

impl Default for ControlSurface {
    fn default() -> Self {
        Self::tandist(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_KNOB_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tandist_core::{GESTURE_BEGIN, GESTURE_END, ParamDescriptor, ParameterModel};

    const GAIN_PARAM: ParamIndex = ParamIndex(GAIN);

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Begin(ParamIndex),
        Set(ParamIndex, f32),
        End(ParamIndex),
    }

    /// Bridge double that records every call in order.
    struct Recorder {
        model: ParameterModel,
        calls: Mutex<Vec<Call>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                model: ParameterModel::tandist(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ParamBridge for Recorder {
        fn param_count(&self) -> usize {
            self.model.len()
        }
        fn param_descriptor(&self, param: ParamIndex) -> Option<ParamDescriptor> {
            self.model.param_descriptor(param)
        }
        fn get(&self, param: ParamIndex) -> f32 {
            self.model.get_raw(param.0)
        }
        fn set(&self, param: ParamIndex, value: f32) {
            self.calls.lock().unwrap().push(Call::Set(param, value));
            self.model.set_raw(param.0, value);
        }
        fn begin_set(&self, param: ParamIndex) {
            self.calls.lock().unwrap().push(Call::Begin(param));
        }
        fn end_set(&self, param: ParamIndex) {
            self.calls.lock().unwrap().push(Call::End(param));
        }
        fn take_external_change(&self, param: ParamIndex) -> Option<f32> {
            self.model.take_external_change(param.0)
        }
    }

    fn surface() -> ControlSurface {
        ControlSurface::default()
    }

    #[test]
    fn hit_test_boundary_is_inclusive() {
        let center = Point::new(200.0, 150.0);
        assert!(hit_test(center, 40.0, Point::new(220.0, 150.0)));
        assert!(!hit_test(center, 40.0, Point::new(245.0, 150.0)));
        assert!(hit_test(center, 40.0, Point::new(240.0, 150.0)));
    }

    #[test]
    fn drag_value_examples() {
        assert!((drag_value(0.5, 100.0, 50.0, DEFAULT_SENSITIVITY) - 0.75).abs() < 1e-6);
        assert_eq!(drag_value(0.5, 100.0, 300.0, DEFAULT_SENSITIVITY), 0.0);
        assert_eq!(drag_value(0.9, 100.0, -500.0, DEFAULT_SENSITIVITY), 1.0);
        assert_eq!(drag_value(0.3, 100.0, 100.0, DEFAULT_SENSITIVITY), 0.3);
    }

    #[test]
    fn default_layout_matches_editor() {
        let s = surface();
        assert_eq!(s.size(), (400.0, 300.0));
        assert_eq!(s.sensitivity(), 0.005);
        let knob = s.knob(0).unwrap();
        assert_eq!(knob.center(), Point::new(200.0, 150.0));
        assert_eq!(knob.radius(), 40.0);
        assert_eq!(knob.param(), GAIN_PARAM);
        assert_eq!(knob.normalized(), INITIAL_NORMALIZED);
        assert_eq!(s.state(), DragState::Idle);
    }

    #[test]
    fn default_config_gives_default_layout() {
        let s = ControlSurface::from_config(&SurfaceConfig::default());
        assert_eq!(s.size(), surface().size());
        assert_eq!(s.sensitivity(), DEFAULT_SENSITIVITY);
        assert_eq!(s.knobs(), surface().knobs());
    }

    #[test]
    fn config_sets_layout_and_sensitivity() {
        let config = SurfaceConfig {
            width: 200.0,
            height: 100.0,
            knob_radius: 30.0,
            sensitivity: 0.01,
        };
        let bridge = Recorder::new();
        let mut s = ControlSurface::from_config(&config);
        assert_eq!(s.size(), (200.0, 100.0));
        let knob = s.knob(0).unwrap();
        assert_eq!(knob.center(), Point::new(100.0, 50.0));
        assert_eq!(knob.radius(), 30.0);

        // 25 px up at 0.01 per pixel
        s.handle_pointer_event(&bridge, PointerEvent::down(100.0, 50.0));
        s.handle_pointer_event(&bridge, PointerEvent::moved(100.0, 25.0));
        assert!((s.knob(0).unwrap().normalized() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn full_drag_writes_through_bridge() {
        let bridge = Recorder::new();
        let mut s = surface();

        // press on the top edge of the knob, y = 110
        let t = s.handle_pointer_event(&bridge, PointerEvent::down(200.0, 110.0));
        assert_eq!(t, Transition::DragStarted { knob: 0, param: GAIN_PARAM });
        assert_eq!(
            s.state(),
            DragState::Dragging(DragSession {
                knob: 0,
                start_value: 0.5,
                start_pointer_y: 110.0
            })
        );

        let t = s.handle_pointer_event(&bridge, PointerEvent::moved(200.0, 60.0));
        assert!(matches!(
            t,
            Transition::ValueChanged { normalized, .. } if (normalized - 0.75).abs() < 1e-6
        ));
        assert!((bridge.model.get_raw(GAIN) - 7.75).abs() < 1e-5);

        let t = s.handle_pointer_event(&bridge, PointerEvent::moved(200.0, 310.0));
        assert!(matches!(t, Transition::ValueChanged { normalized, .. } if normalized == 0.0));
        assert_eq!(bridge.model.get_raw(GAIN), 1.0);

        let t = s.handle_pointer_event(&bridge, PointerEvent::up(200.0, 310.0));
        assert_eq!(t, Transition::DragEnded { knob: 0, param: GAIN_PARAM });
        assert_eq!(s.state(), DragState::Idle);

        let calls = bridge.calls();
        assert_eq!(calls.first(), Some(&Call::Begin(GAIN_PARAM)));
        assert_eq!(calls.last(), Some(&Call::End(GAIN_PARAM)));
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn press_outside_knob_is_ignored() {
        let bridge = Recorder::new();
        let mut s = surface();
        assert_eq!(
            s.handle_pointer_event(&bridge, PointerEvent::down(245.0, 150.0)),
            Transition::Ignored
        );
        assert_eq!(
            s.handle_pointer_event(&bridge, PointerEvent::moved(245.0, 10.0)),
            Transition::Ignored
        );
        assert!(bridge.calls().is_empty());
    }

    #[test]
    fn only_primary_button_drags() {
        let bridge = Recorder::new();
        let mut s = surface();
        let right = PointerEvent::down(200.0, 150.0).with_button(PointerButton::Secondary);
        assert_eq!(s.handle_pointer_event(&bridge, right), Transition::Ignored);

        s.handle_pointer_event(&bridge, PointerEvent::down(200.0, 150.0));
        let right_up = PointerEvent::up(200.0, 150.0).with_button(PointerButton::Secondary);
        assert_eq!(s.handle_pointer_event(&bridge, right_up), Transition::Ignored);
        assert!(s.is_dragging(0));
    }

    #[test]
    fn release_without_drag_is_ignored() {
        let bridge = Recorder::new();
        let mut s = surface();
        assert_eq!(
            s.handle_pointer_event(&bridge, PointerEvent::up(200.0, 150.0)),
            Transition::Ignored
        );
    }

    #[test]
    fn host_change_updates_knob_when_idle() {
        let model = ParameterModel::tandist();
        let mut s = surface();

        assert!(s.parameter_changed(&model, GAIN_PARAM, 10.0));
        assert_eq!(s.knob(0).unwrap().normalized(), 1.0);
        assert!(!s.parameter_changed(&model, GAIN_PARAM, 10.0));
    }

    #[test]
    fn host_change_ignored_while_dragging() {
        let model = ParameterModel::tandist();
        let mut s = surface();
        s.handle_pointer_event(&model, PointerEvent::down(200.0, 150.0));
        s.handle_pointer_event(&model, PointerEvent::moved(200.0, 130.0));
        let during = s.knob(0).unwrap().normalized();

        assert!(!s.parameter_changed(&model, GAIN_PARAM, 1.0));
        assert_eq!(s.knob(0).unwrap().normalized(), during);

        s.handle_pointer_event(&model, PointerEvent::up(200.0, 130.0));
        assert!(s.parameter_changed(&model, GAIN_PARAM, 1.0));
        assert_eq!(s.knob(0).unwrap().normalized(), 0.0);
    }

    #[test]
    fn poll_drains_host_writes_only() {
        let model = ParameterModel::tandist();
        let mut s = surface();

        s.handle_pointer_event(&model, PointerEvent::down(200.0, 150.0));
        s.handle_pointer_event(&model, PointerEvent::moved(200.0, 100.0));
        s.handle_pointer_event(&model, PointerEvent::up(200.0, 100.0));
        assert!(!s.poll_host_changes(&model));
        assert_eq!(model.take_gesture_flags(GAIN), GESTURE_BEGIN | GESTURE_END);

        model.set_from_host(GAIN, 5.5);
        assert!(s.poll_host_changes(&model));
        assert_eq!(s.knob(0).unwrap().normalized(), 0.5);
    }

    #[test]
    fn sync_reads_current_values() {
        let model = ParameterModel::tandist();
        let mut s = surface();
        assert_eq!(s.knob(0).unwrap().normalized(), 0.5);

        s.sync_from_bridge(&model);
        assert_eq!(s.knob(0).unwrap().normalized(), 0.0);
    }

    #[test]
    fn drag_starts_from_current_value() {
        let model = ParameterModel::tandist();
        model.set_raw(GAIN, 5.5);
        let mut s = surface();
        s.sync_from_bridge(&model);

        s.handle_pointer_event(&model, PointerEvent::down(200.0, 100.0 + 10.0));
        s.handle_pointer_event(&model, PointerEvent::moved(0.0, 60.0));
        assert!((s.knob(0).unwrap().normalized() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn transitions_report_redraw() {
        assert!(!Transition::Ignored.needs_redraw());
        assert!(Transition::DragEnded { knob: 0, param: GAIN_PARAM }.needs_redraw());
    }
}
