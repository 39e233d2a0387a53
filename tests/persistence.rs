use cat_sketch::state::{PersistenceError, REQUIRED_FIELDS, export_record, import_record};
use cat_sketch::{Assembly, EditorConfig, Editor, EditorEvent, EditorState};
use egui::{Color32, pos2, vec2};
use serde_json::Value;

fn customized_state() -> EditorState {
    let mut state = EditorState::new(vec2(800.0, 600.0));
    state.eye.drag_corner(cat_sketch::eye::Corner::Outer, pos2(-200.0, 40.0));
    state.eye.set_iris_color(Color32::from_rgb(0x30, 0x90, 0x40));
    state.eye.toggle_linkage(cat_sketch::eye::Corner::Inner);
    state.eyeball_color = Color32::from_rgb(0xee, 0xee, 0xdd);
    state.set_eye_spacing(340.0);
    state.nose.offset_y = 120.0;
    let texture = state.texture().clone();
    state.fur_mut().paint_at(pos2(400.0, 300.0), &texture);
    state
}

fn record_value(state: &EditorState) -> Value {
    let text = export_record(state).expect("export");
    serde_json::from_str(&text).expect("valid json")
}

#[test]
fn test_export_import_round_trip() {
    let original = customized_state();
    let text = export_record(&original).expect("export");

    let mut restored = EditorState::new(vec2(800.0, 600.0));
    import_record(&mut restored, &text).expect("import");

    assert_eq!(restored.eye.scale(), original.eye.scale());
    assert_eq!(restored.eye.linkage(), original.eye.linkage());
    assert_eq!(restored.eye.shape().iris.color, original.eye.shape().iris.color);
    assert_eq!(restored.eyeball_color, original.eyeball_color);
    assert_eq!(restored.eye_spacing(), original.eye_spacing());
    assert_eq!(restored.nose, original.nose);
    assert_eq!(restored.texture(), original.texture());
    assert_eq!(restored.fur().grid(), original.fur().grid());

    let a = original.eye.shape();
    let b = restored.eye.shape();
    for (p, q) in a.outline().iter().zip(b.outline().iter()) {
        assert!(p.distance(*q) < 1e-3);
    }
}

#[test]
fn test_record_carries_every_required_field() {
    let value = record_value(&customized_state());
    for field in REQUIRED_FIELDS {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    assert_eq!(value["version"], 1);
    let url = value["colorMapDataUrl"].as_str().unwrap_or_default();
    assert!(url.starts_with("data:image/png;base64,"));
}

#[test]
fn test_unpainted_record_has_empty_color_map() {
    let value = record_value(&EditorState::new(vec2(800.0, 600.0)));
    assert_eq!(value["colorMapDataUrl"], "");
}

#[test]
fn test_wrong_version_rejected_without_changes() {
    let mut value = record_value(&customized_state());
    value["version"] = Value::from(2);

    let mut state = EditorState::new(vec2(800.0, 600.0));
    let before = state.clone();
    let err = import_record(&mut state, &value.to_string()).unwrap_err();
    assert!(matches!(err, PersistenceError::UnsupportedVersion(2)));
    assert_eq!(state, before);
}

#[test]
fn test_missing_field_rejected_without_changes() {
    let mut value = record_value(&customized_state());
    if let Value::Object(map) = &mut value {
        map.remove("noseSettings");
    }

    let mut state = EditorState::new(vec2(800.0, 600.0));
    let before = state.clone();
    let err = import_record(&mut state, &value.to_string()).unwrap_err();
    assert!(matches!(err, PersistenceError::MissingField("noseSettings")));
    assert_eq!(state, before);
}

#[test]
fn test_garbage_rejected() {
    let mut state = EditorState::new(vec2(800.0, 600.0));
    let before = state.clone();
    assert!(import_record(&mut state, "not json").is_err());
    assert_eq!(state, before);
}

#[test]
fn test_editor_reports_failed_import() {
    let mut editor = Editor::new(Assembly::Full, EditorConfig::default(), vec2(800.0, 600.0));
    let before = editor.state().clone();
    editor.requests_mut().import.post(r#"{"version": 2}"#.to_string());
    editor.frame(0.0);

    let events = editor.drain_events();
    assert!(events.iter().any(|e| matches!(e, EditorEvent::ImportFailed(_))));
    assert!(!events.iter().any(|e| matches!(e, EditorEvent::Imported)));
    assert_eq!(editor.state(), &before);
}

#[test]
fn test_editor_import_keeps_session_settings() {
    let source = customized_state();
    let text = export_record(&source).expect("export");

    let mut editor = Editor::new(Assembly::Full, EditorConfig::default(), vec2(800.0, 600.0));
    editor.state_mut().blink_ratio = 0.8;
    editor.state_mut().pupil_tracking = true;
    editor.requests_mut().import.post(text);
    editor.frame(0.0);

    assert!(editor.drain_events().contains(&EditorEvent::Imported));
    assert_eq!(editor.state().blink_ratio, 0.8);
    assert!(editor.state().pupil_tracking);
    assert_eq!(editor.state().eye_spacing(), 340.0);
}

#[test]
fn test_import_at_other_canvas_size_keeps_paint() {
    let mut source = EditorState::new(vec2(860.0, 720.0));
    let texture = source.texture().clone();
    source.fur_mut().paint_at(pos2(100.0, 100.0), &texture);
    let painted = |state: &EditorState| {
        state
            .fur()
            .grid()
            .iter()
            .filter(|(_, _, cell)| !cell.uses_base_color)
            .count()
    };
    let before = painted(&source);
    assert!(before > 0);
    let text = export_record(&source).expect("export");

    let mut target = EditorState::new(vec2(800.0, 600.0));
    assert_ne!(target.fur().grid().cols(), source.fur().grid().cols());
    import_record(&mut target, &text).expect("import");

    assert_eq!(painted(&target), before);
    for (col, row, cell) in source.fur().grid().iter() {
        if !cell.uses_base_color {
            assert_eq!(target.fur().grid().cell(col, row), Some(cell));
        }
    }
}
