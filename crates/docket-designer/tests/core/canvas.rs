use docket_core::{Point, Rect};
use docket_designer::{
    Canvas, Component, Content, GlobalSettings, Handle, InteractionMode, Layout, LineShape,
    PointerEvent, PointerTarget, Shape, Style,
};

fn framed(id: &str, x: f64, y: f64, w: f64, h: f64) -> Component {
    Component::framed(id, Style::default(), Rect::new(x, y, w, h), Content::Rectangle)
}

fn line(id: &str, start: (f64, f64), end: (f64, f64)) -> Component {
    Component::new(
        id,
        Style::default(),
        Shape::Line(LineShape::new(
            Point::new(start.0, start.1),
            Point::new(end.0, end.1),
        )),
    )
}

fn target(id: &str) -> PointerTarget {
    PointerTarget::Component(id.to_string())
}

fn frame_of(canvas: &Canvas, id: &str) -> Rect {
    canvas
        .layout()
        .get(id)
        .and_then(|c| c.frame().copied())
        .expect("framed component")
}

fn line_of(canvas: &Canvas, id: &str) -> LineShape {
    canvas
        .layout()
        .get(id)
        .and_then(|c| c.line().copied())
        .expect("line component")
}

fn click(canvas: &mut Canvas, event: PointerEvent, t: PointerTarget, settings: &GlobalSettings) {
    canvas.pointer_down(event, t, settings);
    canvas.pointer_up();
}

#[test]
fn test_multi_drag_applies_uniform_delta() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![
        framed("a", 100.0, 100.0, 50.0, 50.0),
        framed("b", 300.0, 200.0, 40.0, 40.0),
        line("l", (500.0, 500.0), (600.0, 520.0)),
    ]));
    canvas.snap.enabled = false;

    click(&mut canvas, PointerEvent::new(110.0, 110.0), target("a"), &settings);
    click(&mut canvas, PointerEvent::new(310.0, 210.0).with_modifier(), target("b"), &settings);
    click(&mut canvas, PointerEvent::new(550.0, 510.0).with_modifier(), target("l"), &settings);
    assert_eq!(canvas.selection().len(), 3);

    canvas.pointer_down(PointerEvent::new(110.0, 110.0), target("a"), &settings);
    canvas.pointer_move(PointerEvent::new(120.0, 120.0), &settings);
    canvas.pointer_move(PointerEvent::new(127.0, 133.0), &settings);
    canvas.pointer_up();

    assert_eq!(frame_of(&canvas, "a"), Rect::new(117.0, 123.0, 50.0, 50.0));
    assert_eq!(frame_of(&canvas, "b"), Rect::new(317.0, 223.0, 40.0, 40.0));
    let l = line_of(&canvas, "l");
    assert_eq!(l.start, Point::new(517.0, 523.0));
    assert_eq!(l.end, Point::new(617.0, 543.0));
}

#[test]
fn test_multi_drag_leaves_paths_in_place() {
    let settings = GlobalSettings::default();
    let mut path = docket_designer::PathData::starting_at(Point::new(10.0, 10.0));
    path.line_to(Point::new(20.0, 20.0));
    let mut canvas = Canvas::new(Layout::from_components(vec![
        framed("a", 100.0, 100.0, 50.0, 50.0),
        Component::new("p", Style::default(), Shape::Path(path.clone())),
    ]));
    canvas.snap.enabled = false;
    canvas.select_all();

    canvas.pointer_down(PointerEvent::new(110.0, 110.0), target("a"), &settings);
    canvas.pointer_move(PointerEvent::new(150.0, 150.0), &settings);
    canvas.pointer_up();

    assert_eq!(frame_of(&canvas, "a").x, 140.0);
    assert_eq!(
        canvas.layout().get("p").map(|c| c.shape.clone()),
        Some(Shape::Path(path))
    );
}

#[test]
fn test_marquee_replaces_selection_each_move() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![
        framed("a", 10.0, 10.0, 20.0, 20.0),
        framed("b", 100.0, 100.0, 20.0, 20.0),
        line("l", (200.0, 50.0), (200.0, 150.0)),
    ]));

    canvas.pointer_down(PointerEvent::new(0.0, 0.0), PointerTarget::Canvas, &settings);
    assert_eq!(canvas.mode(), InteractionMode::Marquee);

    canvas.pointer_move(PointerEvent::new(150.0, 150.0), &settings);
    assert_eq!(canvas.selection().ids(), ["a".to_string(), "b".to_string()]);

    canvas.pointer_move(PointerEvent::new(50.0, 50.0), &settings);
    assert_eq!(canvas.selection().ids(), ["a".to_string()]);
    assert_eq!(canvas.marquee(), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));

    canvas.pointer_up();
    assert_eq!(canvas.marquee(), None);
    assert_eq!(canvas.selection().len(), 1);
}

#[test]
fn test_marquee_selects_lines_by_endpoint_box() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![line(
        "l",
        (300.0, 300.0),
        (200.0, 200.0),
    )]));
    canvas.pointer_down(PointerEvent::new(190.0, 190.0), PointerTarget::Canvas, &settings);
    canvas.pointer_move(PointerEvent::new(210.0, 210.0), &settings);
    assert!(canvas.selection().contains("l"));
}

#[test]
fn test_marquee_with_modifier_keeps_base_selection() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![
        framed("a", 10.0, 10.0, 20.0, 20.0),
        framed("b", 300.0, 300.0, 20.0, 20.0),
    ]));
    click(&mut canvas, PointerEvent::new(15.0, 15.0), target("a"), &settings);

    canvas.pointer_down(
        PointerEvent::new(290.0, 290.0).with_modifier(),
        PointerTarget::Canvas,
        &settings,
    );
    canvas.pointer_move(PointerEvent::new(400.0, 400.0), &settings);
    assert!(canvas.selection().contains("a"));
    assert!(canvas.selection().contains("b"));
}

#[test]
fn test_marquee_without_modifier_clears_selection() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![framed("a", 10.0, 10.0, 20.0, 20.0)]));
    click(&mut canvas, PointerEvent::new(15.0, 15.0), target("a"), &settings);
    canvas.pointer_down(PointerEvent::new(500.0, 500.0), PointerTarget::Canvas, &settings);
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_modifier_deselecting_last_member_starts_nothing() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![framed("a", 10.0, 10.0, 20.0, 20.0)]));
    click(&mut canvas, PointerEvent::new(15.0, 15.0), target("a"), &settings);

    canvas.pointer_down(PointerEvent::new(15.0, 15.0).with_modifier(), target("a"), &settings);
    assert!(canvas.selection().is_empty());
    assert_eq!(canvas.mode(), InteractionMode::Idle);
}

#[test]
fn test_resize_refused_for_multi_selection() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![
        framed("a", 10.0, 10.0, 20.0, 20.0),
        framed("b", 100.0, 100.0, 20.0, 20.0),
    ]));
    canvas.select_all();
    canvas.pointer_down(
        PointerEvent::new(30.0, 30.0),
        PointerTarget::Handle("a".to_string(), Handle::BottomRight),
        &settings,
    );
    assert_eq!(canvas.mode(), InteractionMode::Idle);
}

#[test]
fn test_resize_clamps_to_minimum() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![framed("a", 100.0, 100.0, 50.0, 40.0)]));
    canvas.pointer_down(
        PointerEvent::new(150.0, 140.0),
        PointerTarget::Handle("a".to_string(), Handle::BottomRight),
        &settings,
    );
    assert_eq!(canvas.mode(), InteractionMode::Resizing);
    canvas.pointer_move(PointerEvent::new(-500.0, -500.0), &settings);
    let frame = frame_of(&canvas, "a");
    assert!(frame.w >= 5.0 && frame.h >= 5.0);
    assert_eq!((frame.x, frame.y), (100.0, 100.0));

    canvas.pointer_move(PointerEvent::new(170.5, 150.0), &settings);
    assert_eq!(frame_of(&canvas, "a"), Rect::new(100.0, 100.0, 71.0, 50.0));
}

#[test]
fn test_single_line_drag_snaps_midpoint_to_paper_center() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![line("l", (100.0, 100.0), (200.0, 100.0))]));

    canvas.pointer_down(PointerEvent::new(150.0, 100.0), target("l"), &settings);
    canvas.pointer_move(PointerEvent::new(395.0, 100.0), &settings);

    let l = line_of(&canvas, "l");
    assert_eq!(l.start, Point::new(347.0, 100.0));
    assert_eq!(l.end, Point::new(447.0, 100.0));
    assert_eq!(canvas.guides().vertical.len(), 1);
    assert_eq!(canvas.guides().vertical[0].pos, 397.0);

    canvas.pointer_up();
    assert!(canvas.guides().is_empty());
}

#[test]
fn test_locked_line_endpoint_stays_on_axis() {
    let settings = GlobalSettings::default();
    let mut l = line("l", (100.0, 100.0), (200.0, 100.0));
    if let Some(shape) = l.line_mut() {
        shape.lock = docket_designer::LockDirection::Horizontal;
    }
    let mut canvas = Canvas::new(Layout::from_components(vec![l]));

    canvas.pointer_down(
        PointerEvent::new(200.0, 100.0),
        PointerTarget::Handle("l".to_string(), Handle::LineEnd),
        &settings,
    );
    assert_eq!(canvas.mode(), InteractionMode::Resizing);
    canvas.pointer_move(PointerEvent::new(260.0, 140.0), &settings);

    let shape = line_of(&canvas, "l");
    assert_eq!(shape.start, Point::new(100.0, 100.0));
    assert_eq!(shape.end, Point::new(260.0, 100.0));
}

#[test]
fn test_render_scale_divides_pointer_deltas() {
    let settings = GlobalSettings::default();
    let mut canvas = Canvas::new(Layout::from_components(vec![framed("a", 100.0, 100.0, 50.0, 50.0)]));
    canvas.snap.enabled = false;
    canvas.set_render_scale(50.0);

    canvas.pointer_down(PointerEvent::new(60.0, 60.0), target("a"), &settings);
    canvas.pointer_move(PointerEvent::new(70.0, 65.0), &settings);
    assert_eq!(frame_of(&canvas, "a"), Rect::new(120.0, 110.0, 50.0, 50.0));
}
