use docket_core::Rect;
use docket_designer::{
    resize_frame, Component, Content, Handle, Layout, Style, MIN_COMPONENT_SIZE,
};
use proptest::prelude::*;

fn box_handle() -> impl Strategy<Value = Handle> {
    prop_oneof![
        Just(Handle::Top),
        Just(Handle::Bottom),
        Just(Handle::Left),
        Just(Handle::Right),
        Just(Handle::TopLeft),
        Just(Handle::TopRight),
        Just(Handle::BottomLeft),
        Just(Handle::BottomRight),
    ]
}

proptest! {
    #[test]
    fn resize_never_shrinks_below_minimum(
        w in 5.0f64..500.0,
        h in 5.0f64..500.0,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
        handle in box_handle(),
    ) {
        let r = resize_frame(Rect::new(100.0, 100.0, w, h), handle, dx, dy, false);
        prop_assert!(r.w >= MIN_COMPONENT_SIZE);
        prop_assert!(r.h >= MIN_COMPONENT_SIZE);
        prop_assert_eq!(r.x, r.x.round());
        prop_assert_eq!(r.w, r.w.round());
    }

    #[test]
    fn resize_left_edge_stays_left_of_right_edge(
        w in 10.0f64..500.0,
        dx in -2000.0f64..2000.0,
    ) {
        let start = Rect::new(100.0, 100.0, w, 50.0);
        let r = resize_frame(start, Handle::Left, dx, 0.0, false);
        prop_assert!(r.x < start.right());
    }

    #[test]
    fn scale_round_trip_stays_close(
        x in 0i32..800,
        y in 0i32..1100,
        w in 5i32..400,
        h in 5i32..400,
        percent in 10i32..=200,
    ) {
        let frame = Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
        let mut layout = Layout::from_components(vec![Component::framed(
            "box",
            Style::default(),
            frame,
            Content::Rectangle,
        )]);

        let ratio = f64::from(percent) / 100.0;
        layout.scale_all(ratio);
        layout.scale_all(1.0 / ratio);

        let back = layout.get("box").and_then(|c| c.frame().copied()).unwrap_or_default();
        prop_assert!((back.x - frame.x).abs() <= 1.0);
        prop_assert!((back.y - frame.y).abs() <= 1.0);
        prop_assert!((back.w - frame.w).abs() <= 1.0);
        prop_assert!((back.h - frame.h).abs() <= 1.0);
    }
}
