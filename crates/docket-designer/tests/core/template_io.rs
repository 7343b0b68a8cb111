use docket_core::Point;
use docket_designer::{Shape, TemplateStore};
use serde_json::json;

fn saved_store() -> serde_json::Value {
    json!({
        "templates": [
            {
                "id": "t1",
                "name": "出库单",
                "settings": {
                    "paperWidth": 794,
                    "paperHeight": 1123,
                    "calculationFormulas": "合计=sum(金额)",
                    "groupingFieldIds": ["f_no"],
                    "isPreviewLocked": false,
                    "structureScale": 100
                },
                "layout": [
                    {"id": "l", "type": "draw_line", "x": 40, "y": 300, "w": 754, "h": 300,
                     "style": {"strokeWidth": 1, "zIndex": 10}},
                    {"id": "p", "type": "draw_path", "d": "M 10 10 L 20 30 L 40 30",
                     "style": {"fillColor": "none"}},
                    {"id": "c", "type": "checkbox", "x": 40, "y": 400, "w": 120, "h": 24,
                     "content": "已审核", "checked": true}
                ],
                "linkedViews": [{"viewId": "v-out"}]
            },
            {"id": "t2", "name": "空模板"}
        ],
        "currentId": "t2"
    })
}

#[test]
fn test_store_loads_saved_json() {
    let store: TemplateStore = serde_json::from_value(saved_store()).expect("store parses");
    assert_eq!(store.len(), 2);
    assert_eq!(store.current_id(), Some("t2"));
    assert_eq!(store.find_by_view("v-out").map(|t| t.id.as_str()), Some("t1"));

    let first = store.get("t1").expect("t1");
    assert_eq!(first.settings.grouping_field_ids, vec!["f_no".to_string()]);
    assert_eq!(first.layout.len(), 3);
    let line = first.layout.get("l").and_then(|c| c.line()).copied().expect("line");
    assert_eq!(line.end, Point::new(754.0, 300.0));
    assert!(matches!(
        first.layout.get("p").map(|c| &c.shape),
        Some(Shape::Path(p)) if p.segments().len() == 3
    ));

    let empty = store.get("t2").expect("t2");
    assert!(empty.layout.is_empty());
    assert_eq!(empty.settings.paper_width, 794.0);
}

#[test]
fn test_store_writes_flat_records() {
    let store: TemplateStore = serde_json::from_value(saved_store()).expect("store parses");
    let written = serde_json::to_value(&store).expect("serializes");

    let layout = &written["templates"][0]["layout"];
    assert_eq!(layout[0]["type"], "draw_line");
    assert_eq!(layout[0]["w"], 754.0);
    assert_eq!(layout[0]["h"], 300.0);
    assert_eq!(layout[1]["d"], "M 10 10 L 20 30 L 40 30");
    assert_eq!(layout[2]["checked"], true);
    assert_eq!(written["templates"][0]["linkedViews"][0]["viewId"], "v-out");
    assert_eq!(written["currentId"], "t2");

    let reread: TemplateStore = serde_json::from_value(written).expect("reparses");
    assert_eq!(reread, store);
}
