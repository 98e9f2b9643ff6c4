//! egui editor hosting a [`ControlSurface`].
//!
//! The editor allocates a fixed-size region, translates egui's raw pointer
//! events into surface coordinates, runs them through the drag state
//! machine, and paints every knob. Host automation is picked up each frame
//! through [`ParamBridge::take_external_change`].
//!
//! It does not create a window; embed it in any egui `Ui`.

use std::sync::Arc;

use egui::{CornerRadius, Event, Pos2, Response, Sense, Ui, vec2};

use tandist_config::TanDistConfig;

use crate::control_surface::{ControlSurface, PointerButton, PointerEvent, PointerPhase};
use crate::geometry::Point;
use crate::param_bridge::ParamBridge;
use crate::theme::Theme;
use crate::widgets::paint_knob;

/// Stateful editor: one per open plugin UI.
pub struct TanDistEditor {
    bridge: Arc<dyn ParamBridge>,
    surface: ControlSurface,
    theme: Theme,
    origin: Option<Pos2>,
    synced: bool,
}

impl TanDistEditor {
    /// Create an editor over `surface`, talking to `bridge`.
    pub fn new(bridge: Arc<dyn ParamBridge>, surface: ControlSurface) -> Self {
        Self {
            bridge,
            surface,
            theme: Theme::default(),
            origin: None,
            synced: false,
        }
    }

    /// Create an editor whose surface follows `config.surface`.
    pub fn from_config(bridge: Arc<dyn ParamBridge>, config: &TanDistConfig) -> Self {
        Self::new(bridge, ControlSurface::from_config(&config.surface))
    }

    /// Builder: replace the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// The hosted surface.
    pub fn surface(&self) -> &ControlSurface {
        &self.surface
    }

    /// Screen position of the surface origin as of the last frame.
    pub fn origin(&self) -> Option<Pos2> {
        self.origin
    }

    /// Lay out, handle input, and paint for one frame.
    pub fn ui(&mut self, ui: &mut Ui) -> Response {
        let bridge = Arc::clone(&self.bridge);
        if !self.synced {
            self.surface.sync_from_bridge(bridge.as_ref());
            self.synced = true;
        }

        let (width, height) = self.surface.size();
        let (rect, response) =
            ui.allocate_exact_size(vec2(width, height), Sense::click_and_drag());
        self.origin = Some(rect.min);

        let mut redraw = self.surface.poll_host_changes(bridge.as_ref());

        let events = ui.input(|i| i.events.clone());
        for event in &events {
            if let Some(pointer) = translate_event(event, rect.min) {
                redraw |= self
                    .surface
                    .handle_pointer_event(bridge.as_ref(), pointer)
                    .needs_redraw();
            }
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, CornerRadius::ZERO, self.theme.background);

            for (index, knob) in self.surface.knobs().iter().enumerate() {
                let desc = bridge.param_descriptor(knob.param());
                let (label, value_text) = desc.map_or_else(
                    || (String::new(), String::new()),
                    |d| {
                        (
                            d.name.to_string(),
                            d.format_value(d.denormalize(knob.normalized())),
                        )
                    },
                );
                paint_knob(
                    &painter,
                    rect.min,
                    &knob.geometry(),
                    &label,
                    &value_text,
                    self.surface.is_dragging(index),
                    &self.theme,
                );
            }
        }

        if redraw {
            ui.ctx().request_repaint();
        }
        response
    }
}

/// Convert an egui event into a surface-space pointer event.
fn translate_event(event: &Event, origin: Pos2) -> Option<PointerEvent> {
    let to_surface = |pos: Pos2| Point::new(pos.x - origin.x, pos.y - origin.y);
    match event {
        Event::PointerMoved(pos) => Some(PointerEvent {
            phase: PointerPhase::Move,
            position: to_surface(*pos),
            button: PointerButton::Primary,
        }),
        Event::PointerButton {
            pos,
            button,
            pressed,
            ..
        } => {
            let button = match button {
                egui::PointerButton::Primary => PointerButton::Primary,
                egui::PointerButton::Secondary => PointerButton::Secondary,
                egui::PointerButton::Middle => PointerButton::Middle,
                _ => return None,
            };
            Some(PointerEvent {
                phase: if *pressed {
                    PointerPhase::Down
                } else {
                    PointerPhase::Up
                },
                position: to_surface(*pos),
                button,
            })
        }
        _ => None,
    }
}
