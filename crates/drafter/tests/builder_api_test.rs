//! Integration tests for the Drafter builder API
//!
//! These tests drive the public builders end to end, down to the saved file.

use drafter::{
    ArchitectureDiagram, Canvas, ConnectOptions, Direction, DrafterError, Flowchart, LinkOptions,
    Outline, ShapeOptions, TextOptions,
    color::PaletteColor,
    config::{AppConfig, LayoutConfig, StyleConfig},
    element::Element,
    geometry::{Point, Side},
};
use serde_json::Value;

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("exported JSON should parse")
}

#[test]
fn test_facing_shapes_connect_edge_to_edge() {
    let mut canvas = Canvas::new();
    let options = ShapeOptions::default().with_size(100.0, 50.0);
    let first = canvas.add_shape(0.0, 0.0, "First", &options);
    let second = canvas.add_shape(300.0, 0.0, "Second", &options);

    let id = canvas
        .connect(&first, &second, &ConnectOptions::default())
        .expect("both shapes belong to the canvas");

    let connector = canvas.element(&id).and_then(Element::as_connector).unwrap();
    assert_eq!(connector.start(), Point::new(100.0, 25.0));
    assert_eq!(connector.end(), Point::new(300.0, 25.0));
    assert_eq!(connector.from_side(), Side::Right);
    assert_eq!(connector.to_side(), Side::Left);
}

#[test]
fn test_swapped_connection_mirrors_sides() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(0.0, 0.0, "A", &ShapeOptions::default());
    let b = canvas.add_shape(40.0, 300.0, "B", &ShapeOptions::default());

    let forward = canvas.connect(&a, &b, &ConnectOptions::default()).unwrap();
    let backward = canvas.connect(&b, &a, &ConnectOptions::default()).unwrap();

    let forward = canvas.element(&forward).and_then(Element::as_connector).unwrap();
    let backward = canvas.element(&backward).and_then(Element::as_connector).unwrap();
    assert_eq!((forward.from_side(), forward.to_side()), (Side::Bottom, Side::Top));
    assert_eq!((backward.from_side(), backward.to_side()), (Side::Top, Side::Bottom));
}

#[test]
fn test_connector_endpoints_are_frozen() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(0.0, 0.0, "A", &ShapeOptions::default());
    let b = canvas.add_shape(300.0, 0.0, "B", &ShapeOptions::default());
    let id = canvas.connect(&a, &b, &ConnectOptions::default()).unwrap();
    let before = canvas.element(&id).and_then(Element::as_connector).unwrap().end();

    canvas.add_shape(600.0, 0.0, "C", &ShapeOptions::default());

    let after = canvas.element(&id).and_then(Element::as_connector).unwrap().end();
    assert_eq!(before, after);
}

#[test]
fn test_vertical_flowchart_spacing() {
    let layout = LayoutConfig::new(Direction::Vertical, 20.0);
    let config = AppConfig::new(layout, StyleConfig::default());
    let mut flowchart = Flowchart::with_config(&config).unwrap();

    let first = flowchart
        .add_node("a", "A", &ShapeOptions::default().with_size(150.0, 60.0))
        .unwrap();
    let second = flowchart
        .add_node("b", "B", &ShapeOptions::default().with_size(150.0, 40.0))
        .unwrap();

    let first_y = flowchart.canvas().bounds(&first).unwrap().min_y();
    let second_y = flowchart.canvas().bounds(&second).unwrap().min_y();
    assert_eq!(second_y, first_y + 60.0 + 20.0);
}

#[test]
fn test_flowchart_duplicate_leaves_state_unchanged() {
    let mut flowchart = Flowchart::new();
    flowchart.process("step", "Step").unwrap();
    let cursor = flowchart.cursor();
    let elements = flowchart.canvas().document().len();

    let result = flowchart.decision("step", "Again?");

    assert!(matches!(result, Err(DrafterError::DuplicateIdentifier(_))));
    assert_eq!(flowchart.cursor(), cursor);
    assert_eq!(flowchart.canvas().document().len(), elements);
}

#[test]
fn test_flowchart_unknown_id_appends_nothing() {
    let mut flowchart = Flowchart::new();
    flowchart.start("Start").unwrap();

    let result = flowchart.connect("__start__", "missing", &LinkOptions::default());

    assert!(matches!(result, Err(DrafterError::UnknownIdentifier(_))));
    assert_eq!(flowchart.canvas().document().counts(), (1, 0, 0));
}

#[test]
fn test_records_follow_insertion_order() {
    let mut canvas = Canvas::new();
    let shapes: Vec<_> = (0..3)
        .map(|i| canvas.add_shape(i as f32 * 200.0, 0.0, "", &ShapeOptions::default()))
        .collect();
    let connectors = vec![
        canvas.connect(&shapes[0], &shapes[1], &ConnectOptions::default()).unwrap(),
        canvas.connect_plain(&shapes[1], &shapes[2], &ConnectOptions::default()).unwrap(),
    ];

    let json = parse(&canvas.to_json().unwrap());
    let records = json["elements"].as_array().unwrap();

    assert_eq!(canvas.document().len(), 5);
    assert_eq!(records.len(), 5);
    let ids: Vec<&str> = records.iter().map(|record| record["id"].as_str().unwrap()).collect();
    let expected: Vec<&str> = shapes.iter().chain(&connectors).map(|id| id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_labels_expand_to_bound_text_records() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(0.0, 0.0, "A", &ShapeOptions::default());
    let b = canvas.add_shape(300.0, 0.0, "B", &ShapeOptions::default());
    canvas
        .connect(&a, &b, &ConnectOptions::default().with_label("calls"))
        .unwrap();
    canvas.add_text(0.0, 200.0, "note", &TextOptions::default());

    let json = parse(&canvas.to_json().unwrap());
    let types: Vec<&str> = json["elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["type"].as_str().unwrap())
        .collect();

    assert_eq!(canvas.document().len(), 4);
    assert_eq!(types, ["rectangle", "text", "rectangle", "text", "arrow", "text", "text"]);
}

#[test]
fn test_save_appends_extension_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new();
    canvas.add_shape(0.0, 0.0, "Saved", &ShapeOptions::default());

    let path = canvas.save(dir.path().join("diagram")).unwrap();
    assert_eq!(path.file_name().unwrap(), "diagram.excalidraw");

    let again = canvas.save(&path).unwrap();
    assert_eq!(again, path);

    let json = parse(&std::fs::read_to_string(&path).unwrap());
    assert_eq!(json["type"], "excalidraw");
    assert_eq!(json["elements"].as_array().unwrap().len(), 2);
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = Canvas::new();

    let result = canvas.save(dir.path().join("no").join("such").join("diagram"));

    assert!(matches!(result, Err(DrafterError::Io(_))));
}

#[test]
fn test_save_to_directory_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = Canvas::new();
    let mut directory = dir.path().as_os_str().to_owned();
    directory.push("/");

    let result = canvas.save(&directory);

    assert!(matches!(result, Err(DrafterError::Io(_))));
    assert!(!dir.path().join(".excalidraw").exists());
    assert!(matches!(canvas.save(""), Err(DrafterError::Io(_))));
}

#[test]
fn test_line_between_exports_line_record() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(0.0, 0.0, "A", &ShapeOptions::default());
    let b = canvas.add_shape(0.0, 200.0, "B", &ShapeOptions::default());

    let id = canvas.line_between(&a, &b, PaletteColor::Black).unwrap();

    let json = parse(&canvas.to_json().unwrap());
    let line = json["elements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|record| record["id"] == id.as_str())
        .unwrap();
    assert_eq!(line["type"], "line");
    assert_eq!(line["x"], 75.0);
    assert_eq!(line["y"], 30.0);
    assert_eq!(line["points"], serde_json::json!([[0.0, 0.0], [0.0, 200.0]]));
    assert_eq!(line["endArrowhead"], Value::Null);
    assert_eq!(canvas.document().counts(), (2, 0, 1));
}

#[test]
fn test_architecture_diagram_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut diagram = ArchitectureDiagram::new();
    diagram.user("user", "User", Point::new(100.0, 200.0)).unwrap();
    diagram
        .service("api", "API Gateway", Point::new(250.0, 200.0), None)
        .unwrap();
    diagram
        .database("db", "PostgreSQL", Point::new(450.0, 200.0), Some(PaletteColor::Teal))
        .unwrap();
    diagram
        .connect("user", "api", &LinkOptions::labeled("HTTPS"), false)
        .unwrap();
    diagram
        .connect("api", "db", &LinkOptions::labeled("SQL"), true)
        .unwrap();

    let path = diagram.save(dir.path().join("architecture")).unwrap();
    let json = parse(&std::fs::read_to_string(path).unwrap());

    let arrows = json["elements"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|record| record["type"] == "arrow")
        .count();
    assert_eq!(arrows, 3);
    assert_eq!(diagram.canvas().document().counts(), (3, 0, 3));
}

#[test]
fn test_config_background_reaches_file() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::default().with_background_color("#fafafa"),
    );
    let flowchart = Flowchart::with_config(&config).unwrap();

    let json = parse(&flowchart.to_json().unwrap());
    assert_eq!(json["appState"]["viewBackgroundColor"], "#fafafa");
}

#[test]
fn test_outline_builds_canvas() {
    let outline = Outline::from_json(
        r#"{
            "nodes": [
                { "id": "a", "label": "A", "x": 0, "y": 0 },
                { "id": "b", "label": "B", "x": 0, "y": 200, "color": "green", "shape": "diamond" }
            ],
            "edges": [{ "from": "a", "to": "b" }]
        }"#,
    )
    .unwrap();

    let canvas = Canvas::from_outline(&outline).unwrap();
    let connector = canvas
        .document()
        .iter()
        .find_map(Element::as_connector)
        .unwrap();

    assert_eq!(connector.from_side(), Side::Bottom);
    assert_eq!(connector.to_side(), Side::Top);
}

#[test]
fn test_unknown_color_name_rejected() {
    let result = "purple".parse::<PaletteColor>().map_err(DrafterError::from);
    assert!(matches!(result, Err(DrafterError::UnknownColor(name)) if name == "purple"));
}
