use scrawl_core::{DrawingConfig, Node};
use scrawl_replay::{ReplayError, Script, replay, to_svg};
use serde_json::json;
use std::io::Write;

fn pointer(phase: &str, id: i32, x: f64, y: f64) -> serde_json::Value {
    json!({"kind": "pointer", "phase": phase, "pointer_id": id, "position": {"x": x, "y": y}})
}

fn pen_pointer(phase: &str, x: f64, y: f64, pressure: f64) -> serde_json::Value {
    json!({
        "kind": "pointer",
        "phase": phase,
        "pointer_id": 1,
        "pointer_type": "pen",
        "position": {"x": x, "y": y},
        "pressure": pressure
    })
}

fn script(value: serde_json::Value) -> Script {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_pen_stroke_becomes_filled_path() {
    let script = script(json!({
        "surface": {"width": 200.0, "height": 100.0},
        "tool": "pen",
        "steps": [
            pen_pointer("down", 10.0, 10.0, 1.0),
            pen_pointer("move", 40.0, 30.0, 0.6),
            pen_pointer("move", 80.0, 20.0, 0.2),
            pen_pointer("up", 80.0, 20.0, 0.0),
        ]
    }));

    let canvas = replay(&script, DrawingConfig::default()).unwrap();
    assert_eq!(canvas.document().len(), 1);

    let svg = to_svg(&canvas).unwrap();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains("viewBox=\"0 0 200 100\""));
    assert!(svg.contains("fill=\"#000000\""));
    assert!(svg.contains("Z\""));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_marker_stroke_is_stroked() {
    let script = script(json!({
        "surface": {"width": 100.0, "height": 100.0},
        "steps": [
            pointer("down", 1, 10.0, 10.0),
            pointer("move", 1, 50.0, 50.0),
            pointer("up", 1, 50.0, 50.0),
        ]
    }));
    let svg = to_svg(&replay(&script, DrawingConfig::default()).unwrap()).unwrap();
    assert!(svg.contains("stroke=\"#FFFF00\""));
    assert!(svg.contains("stroke-width=\"14\""));
}

#[test]
fn test_second_pointer_is_ignored() {
    let script = script(json!({
        "surface": {"width": 100.0, "height": 100.0},
        "steps": [
            pointer("down", 1, 10.0, 10.0),
            pointer("down", 2, 90.0, 90.0),
            pointer("move", 2, 80.0, 80.0),
            pointer("up", 2, 80.0, 80.0),
            pointer("move", 1, 20.0, 10.0),
            pointer("up", 1, 20.0, 10.0),
        ]
    }));
    let canvas = replay(&script, DrawingConfig::default()).unwrap();
    assert_eq!(canvas.document().len(), 1);
    let Node::Stroke(stroke) = &canvas.document().nodes()[0] else {
        panic!("expected a stroke");
    };
    assert!(stroke.points.iter().all(|p| p.x <= 20.0 && p.y <= 10.0));
}

#[test]
fn test_pan_moves_view_box() {
    let script = script(json!({
        "surface": {"width": 100.0, "height": 100.0},
        "nodes": [{
            "type": "Image",
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "uri": "tall.png",
            "bounds": {"x": 0.0, "y": 0.0, "width": 50.0, "height": 500.0}
        }],
        "steps": [
            {"kind": "pan_trigger", "active": true},
            pointer("down", 1, 50.0, 50.0),
            pointer("move", 1, 50.0, 10.0),
            pointer("up", 1, 50.0, 10.0),
            {"kind": "pan_trigger", "active": false},
        ]
    }));
    let canvas = replay(&script, DrawingConfig::default()).unwrap();
    let view_box = canvas.viewport().view_box;
    assert!(view_box.x.abs() < f64::EPSILON);
    assert!((view_box.y - 40.0).abs() < f64::EPSILON);
    assert_eq!(canvas.document().len(), 1);

    let svg = to_svg(&canvas).unwrap();
    assert!(svg.contains("viewBox=\"0 40 100 100\""));
    assert!(svg.contains("<image href=\"tall.png\""));
}

#[test]
fn test_tool_switch_and_image_placement() {
    let script = script(json!({
        "surface": {"width": 400.0, "height": 400.0},
        "image_uri": "a&b.png",
        "steps": [
            {"kind": "tool", "tool": "image"},
            pointer("down", 1, 10.0, 20.0),
            pointer("up", 1, 10.0, 20.0),
            {"kind": "tool", "tool": "text"},
            pointer("down", 1, 300.0, 300.0),
            pointer("up", 1, 300.0, 300.0),
        ]
    }));
    let canvas = replay(&script, DrawingConfig::default()).unwrap();
    assert_eq!(canvas.document().len(), 2);

    let svg = to_svg(&canvas).unwrap();
    assert!(svg.contains("href=\"a&amp;b.png\" x=\"10\" y=\"20\" width=\"200\" height=\"200\""));
    assert!(svg.contains("<text x=\"300\" y=\"300\" font-size=\"24\""));
}

#[test]
fn test_missing_image_source_is_skipped() {
    let script = script(json!({
        "surface": {"width": 100.0, "height": 100.0},
        "tool": "image",
        "steps": [
            pointer("down", 1, 10.0, 20.0),
            pointer("up", 1, 10.0, 20.0),
        ]
    }));
    let canvas = replay(&script, DrawingConfig::default()).unwrap();
    assert!(canvas.document().is_empty());
}

#[test]
fn test_invalid_surface() {
    let script = script(json!({"surface": {"width": 0.0, "height": 100.0}, "steps": []}));
    let result = replay(&script, DrawingConfig::default());
    assert!(matches!(result, Err(ReplayError::InvalidSurface(_, _))));
}

#[test]
fn test_invalid_script() {
    assert!(matches!(
        Script::from_json_str(r#"{"surface": {"width": 10.0}}"#),
        Err(ReplayError::Script(_))
    ));
}

#[test]
fn test_load_script_and_config_from_files() {
    let mut script_file = tempfile::NamedTempFile::new().unwrap();
    let body = json!({
        "surface": {"width": 100.0, "height": 100.0},
        "steps": [
            pointer("down", 1, 10.0, 10.0),
            pointer("leave", 1, 30.0, 10.0),
        ]
    });
    write!(script_file, "{body}").unwrap();

    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    write!(config_file, r#"{{"commit_on_leave": false}}"#).unwrap();

    let script = Script::load(script_file.path()).unwrap();
    let config = DrawingConfig::load(config_file.path()).unwrap();
    let canvas = replay(&script, config).unwrap();
    assert!(canvas.document().is_empty());

    let canvas = replay(&script, DrawingConfig::default()).unwrap();
    assert_eq!(canvas.document().len(), 1);
}
