use autocam_processing_core::{CameraPlanner, ZoomConstraints};
use autocam_project_model::event::{InputEvent, MouseButton};
use autocam_project_model::geometry::Size2D;
use proptest::prelude::*;

fn arb_event(width: f64, height: f64) -> impl Strategy<Value = InputEvent> {
    (0u8..3, 0.0..30.0f64, -50.0..width + 50.0, -50.0..height + 50.0).prop_map(
        |(kind, timestamp, x, y)| match kind {
            0 => InputEvent::cursor_moved(timestamp, x, y),
            1 => InputEvent::mouse_down(timestamp, x, y, MouseButton::Left),
            _ => InputEvent::mouse_up(timestamp, x, y, MouseButton::Left),
        },
    )
}

fn arb_session() -> impl Strategy<Value = (Size2D, Vec<InputEvent>, f64)> {
    (320.0..4000.0f64, 240.0..2400.0f64).prop_flat_map(|(width, height)| {
        (
            Just(Size2D::new(width, height)),
            prop::collection::vec(arb_event(width, height), 0..80).prop_map(|mut events| {
                events.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
                events
            }),
            -5.0..40.0f64,
        )
    })
}

proptest! {
    #[test]
    fn plan_keyframes_are_strictly_ordered_and_anchored(
        (source, events, duration) in arb_session(),
    ) {
        let constraints = ZoomConstraints::default();
        let plan = CameraPlanner::with_defaults().plan(&events, source, duration, &constraints);

        prop_assert!(!plan.keyframes.is_empty());
        prop_assert!(plan.is_strictly_ordered());
        prop_assert_eq!(plan.keyframes.first().unwrap().time, 0.0);
        prop_assert_eq!(plan.keyframes.last().unwrap().time, plan.duration);
        prop_assert!(plan.duration >= duration.max(0.0));
    }

    #[test]
    fn plan_zoom_and_viewport_stay_in_bounds((source, events, duration) in arb_session()) {
        let constraints = ZoomConstraints::default();
        let plan = CameraPlanner::with_defaults().plan(&events, source, duration, &constraints);
        let ceiling = constraints.zoom_ceiling();

        for kf in &plan.keyframes {
            prop_assert!(kf.zoom >= 1.0 && kf.zoom <= ceiling + 1e-9);
            let half_w = source.width / kf.zoom / 2.0;
            let half_h = source.height / kf.zoom / 2.0;
            prop_assert!(kf.center.x >= half_w - 1e-6);
            prop_assert!(kf.center.x <= source.width - half_w + 1e-6);
            prop_assert!(kf.center.y >= half_h - 1e-6);
            prop_assert!(kf.center.y <= source.height - half_h + 1e-6);
        }
    }

    #[test]
    fn plan_is_deterministic((source, events, duration) in arb_session()) {
        let constraints = ZoomConstraints::default();
        let planner = CameraPlanner::with_defaults();
        prop_assert_eq!(
            planner.plan(&events, source, duration, &constraints),
            planner.plan(&events, source, duration, &constraints)
        );
    }

    #[test]
    fn plan_survives_degenerate_sources(
        width in -10.0..2.0f64,
        height in -10.0..2.0f64,
        x in -100.0..100.0f64,
    ) {
        let events = [
            InputEvent::mouse_down(0.5, x, x, MouseButton::Left),
            InputEvent::mouse_up(0.6, x, x, MouseButton::Left),
        ];
        let source = Size2D::new(width, height);
        let plan =
            CameraPlanner::with_defaults().plan(&events, source, 1.0, &ZoomConstraints::default());
        prop_assert!(plan.is_strictly_ordered());
        prop_assert!(plan.keyframes.iter().all(|kf| kf.center.is_finite() && kf.zoom.is_finite()));
    }
}
