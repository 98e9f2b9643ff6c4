//! Visual styling for the TanDist editor.

use egui::{Color32, Stroke, Style, Visuals};

/// Theme colors for the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Surface background.
    pub background: Color32,
    /// Range arc around the knob.
    pub arc: Color32,
    /// Knob body fill.
    pub knob_body: Color32,
    /// Indicator dot.
    pub indicator: Color32,
    /// Translucent ring drawn over the knob while dragging.
    pub drag_glow: Color32,
    /// Parameter name text.
    pub label: Color32,
    /// Formatted value text.
    pub value: Color32,
    /// Label and value font size in points.
    pub font_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0x2a, 0x2a, 0x2a),
            arc: Color32::from_rgba_unmultiplied(0xcc, 0xcc, 0xcc, 0x88),
            knob_body: Color32::from_rgb(0x50, 0x50, 0x50),
            indicator: Color32::WHITE,
            drag_glow: Color32::from_rgba_unmultiplied(0x00, 0xff, 0x88, 0x33),
            label: Color32::from_rgb(0xcc, 0xcc, 0xcc),
            value: Color32::WHITE,
            font_size: 14.0,
        }
    }
}

impl Theme {
    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.background;
        visuals.panel_fill = self.background;
        visuals.extreme_bg_color = self.background;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.label);
        visuals.override_text_color = Some(self.label);

        style.visuals = visuals;
        ctx.set_style(style);
    }
}
