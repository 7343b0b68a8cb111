use docket_core::{Point, Rect};
use docket_designer::{
    Canvas, Component, Content, DrawKind, GlobalSettings, GuideKind, Layout, LineShape,
    PointerEvent, PointerTarget, Shape, Style,
};

#[test]
fn test_drag_aligns_with_other_component_edge() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![
        Component::framed("a", Style::default(), Rect::new(100.0, 100.0, 50.0, 50.0), Content::Rectangle),
        Component::framed("b", Style::default(), Rect::new(300.0, 300.0, 50.0, 50.0), Content::Rectangle),
    ]));

    canvas.pointer_down(
        PointerEvent::new(310.0, 310.0),
        PointerTarget::Component("b".to_string()),
        &settings,
    );
    canvas.pointer_move(PointerEvent::new(112.0, 310.0), &settings);

    let frame = canvas.layout().get("b").and_then(|c| c.frame().copied()).expect("b");
    assert_eq!((frame.x, frame.y), (100.0, 300.0));
    assert_eq!(canvas.guides().vertical.len(), 1);
    assert_eq!(canvas.guides().vertical[0].pos, 100.0);
    assert_eq!(canvas.guides().vertical[0].kind, GuideKind::Component);
    assert!(canvas.guides().horizontal.is_empty());
}

#[test]
fn test_drawn_line_locks_onto_intersection() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![Component::new(
        "wall",
        Style::default(),
        Shape::Line(LineShape::new(Point::new(300.0, 0.0), Point::new(300.0, 400.0))),
    )]));
    canvas.draw.kind = DrawKind::Line;
    canvas.enter_draw_mode();

    canvas.pointer_down(PointerEvent::new(100.0, 200.0), PointerTarget::Canvas, &settings);
    let drawn_id = canvas
        .layout()
        .iter()
        .find(|c| c.id != "wall")
        .map(|c| c.id.clone())
        .expect("new line");
    let end = |canvas: &Canvas| {
        canvas
            .layout()
            .get(&drawn_id)
            .and_then(|c| c.line().copied())
            .map(|l| l.end)
            .expect("line end")
    };

    canvas.pointer_move(PointerEvent::new(308.0, 205.0), &settings);
    let locked = end(&canvas);
    assert!((locked.x - 300.0).abs() < 1e-9);
    assert!(canvas.snap_indicator().is_some());

    // within the exit distance the lock holds
    canvas.pointer_move(PointerEvent::new(330.0, 210.0), &settings);
    assert_eq!(end(&canvas), locked);

    // far away the lock releases and the axis guide takes over
    canvas.pointer_move(PointerEvent::new(104.0, 400.0), &settings);
    assert_eq!(end(&canvas), Point::new(100.0, 400.0));
    assert!(canvas.snap_indicator().is_none());
    assert_eq!(canvas.guides().vertical.len(), 1);

    canvas.pointer_up();
    assert!(canvas.snap_indicator().is_none());
    assert!(canvas.guides().is_empty());
}

#[test]
fn test_table_bottom_is_not_a_target() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![
        Component::framed(
            "t",
            Style::default(),
            Rect::new(40.0, 150.0, 714.0, 200.0),
            Content::Table(Default::default()),
        ),
        Component::framed("b", Style::default(), Rect::new(300.0, 600.0, 10.0, 10.0), Content::Rectangle),
    ]));

    canvas.pointer_down(
        PointerEvent::new(305.0, 605.0),
        PointerTarget::Component("b".to_string()),
        &settings,
    );
    // top of b lands 2 units below the stored table bottom (350)
    canvas.pointer_move(PointerEvent::new(305.0, 357.0), &settings);
    let frame = canvas.layout().get("b").and_then(|c| c.frame().copied()).expect("b");
    assert_eq!(frame.y, 352.0);
}
