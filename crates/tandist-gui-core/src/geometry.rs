//! Toolkit-independent layout for the control surface.
//!
//! Coordinates are in surface space: origin top-left, y pointing down, one
//! unit per logical pixel. Angles are in radians measured from +x toward +y,
//! so negative angles point upward on screen.
//!
//! A knob sweeps 260° starting at −220°: the minimum sits lower-left, the
//! midpoint straight up, and the maximum lower-right.

use core::f32::consts::PI;

/// Sweep start in degrees.
pub const START_ANGLE_DEG: f32 = -220.0;
/// Total sweep in degrees.
pub const ANGLE_RANGE_DEG: f32 = 260.0;
/// Indicator dot distance from center, as a fraction of the radius.
pub const INDICATOR_DISTANCE_RATIO: f32 = 0.75;
/// Indicator dot diameter.
pub const INDICATOR_DIAMETER: f32 = 7.0;
/// Gap between knob body and range arc.
pub const ARC_OFFSET: f32 = 8.0;
/// Range arc stroke width.
pub const ARC_STROKE_WIDTH: f32 = 2.0;
/// Glow ring extent beyond the body while dragging.
pub const GLOW_OFFSET: f32 = 4.0;
/// Label and value box width.
pub const LABEL_WIDTH: f32 = 100.0;
/// Label and value box height.
pub const LABEL_HEIGHT: f32 = 20.0;
/// Gap between knob body and label box.
pub const LABEL_GAP: f32 = 20.0;

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position, growing downward.
    pub y: f32,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Construct a rectangle from its top-left corner and size.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

#[inline]
fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

/// Indicator angle in radians for a normalized value.
pub fn indicator_angle(normalized: f32) -> f32 {
    deg_to_rad(START_ANGLE_DEG + normalized * ANGLE_RANGE_DEG)
}

/// Everything needed to draw one knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobGeometry {
    /// Knob center.
    pub center: Point,
    /// Body radius.
    pub radius: f32,
    /// Indicator direction in radians.
    pub indicator_angle: f32,
    /// Indicator dot center.
    pub indicator: Point,
    /// Indicator dot radius.
    pub indicator_radius: f32,
    /// Range arc radius.
    pub arc_radius: f32,
    /// Angle at the middle of the range arc.
    pub arc_center_angle: f32,
    /// Half of the range arc's sweep.
    pub arc_half_sweep: f32,
    /// Drag highlight radius.
    pub glow_radius: f32,
    /// Parameter name box.
    pub label_rect: Rect,
    /// Formatted value box, directly under the label.
    pub value_rect: Rect,
}

impl KnobGeometry {
    /// Lay out a knob at `center` with body `radius` showing `normalized`.
    pub fn new(center: Point, radius: f32, normalized: f32) -> Self {
        let angle = indicator_angle(normalized);
        let distance = radius * INDICATOR_DISTANCE_RATIO;
        let label_y = center.y + radius + LABEL_GAP;
        let label_x = center.x - LABEL_WIDTH * 0.5;

        Self {
            center,
            radius,
            indicator_angle: angle,
            indicator: Point::new(
                center.x + angle.cos() * distance,
                center.y + angle.sin() * distance,
            ),
            indicator_radius: INDICATOR_DIAMETER * 0.5,
            arc_radius: radius + ARC_OFFSET,
            arc_center_angle: deg_to_rad(START_ANGLE_DEG + ANGLE_RANGE_DEG * 0.5),
            arc_half_sweep: deg_to_rad(ANGLE_RANGE_DEG * 0.5),
            glow_radius: radius + GLOW_OFFSET,
            label_rect: Rect::new(label_x, label_y, LABEL_WIDTH, LABEL_HEIGHT),
            value_rect: Rect::new(label_x, label_y + LABEL_HEIGHT, LABEL_WIDTH, LABEL_HEIGHT),
        }
    }

    /// Range arc start angle.
    pub fn arc_start(&self) -> f32 {
        self.arc_center_angle - self.arc_half_sweep
    }

    /// Range arc end angle.
    pub fn arc_end(&self) -> f32 {
        self.arc_center_angle + self.arc_half_sweep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn sweep_endpoints() {
        assert!(close(indicator_angle(0.0), deg_to_rad(-220.0)));
        assert!(close(indicator_angle(1.0), deg_to_rad(40.0)));
        assert!(close(indicator_angle(0.5), -PI / 2.0));
    }

    #[test]
    fn midpoint_indicator_points_straight_up() {
        let g = KnobGeometry::new(Point::new(200.0, 150.0), 40.0, 0.5);
        assert!(close(g.indicator.x, 200.0));
        assert!(close(g.indicator.y, 120.0));
        assert_eq!(g.indicator_radius, 3.5);
    }

    #[test]
    fn arc_spans_full_sweep() {
        let g = KnobGeometry::new(Point::new(0.0, 0.0), 40.0, 0.0);
        assert_eq!(g.arc_radius, 48.0);
        assert!(close(g.arc_start(), indicator_angle(0.0)));
        assert!(close(g.arc_end(), indicator_angle(1.0)));
        assert_eq!(g.glow_radius, 44.0);
    }

    #[test]
    fn labels_stack_below_knob() {
        let g = KnobGeometry::new(Point::new(200.0, 150.0), 40.0, 0.3);
        assert_eq!(g.label_rect, Rect::new(150.0, 210.0, 100.0, 20.0));
        assert_eq!(g.value_rect, Rect::new(150.0, 230.0, 100.0, 20.0));
        assert_eq!(g.label_rect.center(), Point::new(200.0, 220.0));
    }

    #[test]
    fn distance_squared_is_symmetric() {
        let a = Point::new(200.0, 150.0);
        let b = Point::new(220.0, 150.0);
        assert_eq!(a.distance_squared(b), 400.0);
        assert_eq!(b.distance_squared(a), 400.0);
    }
}
