//! Property-based tests for the control surface.

use proptest::prelude::*;
use tandist_core::{GAIN, ParameterModel};
use tandist_gui_core::{
    ControlSurface, DEFAULT_SENSITIVITY, Point, PointerEvent, drag_value, hit_test,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The drag result is always inside [0, 1].
    #[test]
    fn drag_value_clamped(
        start in 0.0f32..=1.0f32,
        start_y in -2000.0f32..2000.0f32,
        y in -2000.0f32..2000.0f32,
    ) {
        let v = drag_value(start, start_y, y, DEFAULT_SENSITIVITY);
        prop_assert!((0.0..=1.0).contains(&v));
    }

    /// Hit testing agrees with the Euclidean distance.
    #[test]
    fn hit_test_matches_distance(x in 0.0f32..400.0f32, y in 0.0f32..300.0f32) {
        let center = Point::new(200.0, 150.0);
        let inside = hit_test(center, 40.0, Point::new(x, y));
        let d2 = (x - 200.0) * (x - 200.0) + (y - 150.0) * (y - 150.0);
        prop_assert_eq!(inside, d2 <= 1600.0);
    }

    /// Whatever path the pointer takes, the model stays in range and the
    /// surface returns to idle after release.
    #[test]
    fn arbitrary_drag_keeps_model_in_range(
        ys in prop::collection::vec(-1000.0f32..1000.0f32, 1..50),
    ) {
        let model = ParameterModel::tandist();
        let mut surface = ControlSurface::default();
        surface.handle_pointer_event(&model, PointerEvent::down(200.0, 150.0));
        for &y in &ys {
            surface.handle_pointer_event(&model, PointerEvent::moved(200.0, y));
            let raw = model.get_raw(GAIN);
            prop_assert!((1.0..=10.0).contains(&raw));
            let n = surface.knob(0).unwrap().normalized();
            prop_assert!((0.0..=1.0).contains(&n));
        }
        surface.handle_pointer_event(&model, PointerEvent::up(200.0, 0.0));
        prop_assert!(!surface.is_dragging(0));
    }
}
