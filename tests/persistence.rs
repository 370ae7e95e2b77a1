use egui::{Key, Modifiers, Pos2, Vec2};
use paint_it::input::PointerEvent;
use paint_it::persistence::{load_snapshot, save_snapshot};
use paint_it::shape::{ImageSource, ShapeKind};
use paint_it::{Action, Document, PaintConfig, PersistenceError, Snapshot, Tool};

fn sample_document() -> Document {
    let mut document = Document::default();
    for (tool, from, to) in [
        (Tool::Rectangle, Pos2::new(0.0, 0.0), Pos2::new(40.0, 20.0)),
        (Tool::Circle, Pos2::new(100.0, 100.0), Pos2::new(110.0, 100.0)),
        (Tool::Arrow, Pos2::new(5.0, 5.0), Pos2::new(60.0, 80.0)),
        (Tool::Freehand, Pos2::new(1.0, 1.0), Pos2::new(2.0, 3.0)),
    ] {
        document.set_tool(tool);
        document.handle_pointer(PointerEvent::down(from));
        document.handle_pointer(PointerEvent::moved(to));
        document.handle_pointer(PointerEvent::up(to));
    }
    document.set_tool(Tool::Text);
    document.handle_pointer(PointerEvent::down(Pos2::new(300.0, 300.0)));
    document.set_text_draft("label");
    document.set_tool(Tool::Select);
    document.insert_image(ImageSource::new("file:///tmp/photo.png"));

    let mut filters = document.filters();
    filters.saturation = 1.5;
    document.set_filters(filters);
    document
}

#[test]
fn test_snapshot_round_trip_through_a_file() {
    let document = sample_document();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("drawing.json");

    save_snapshot(&document.snapshot(), &path).unwrap();
    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded.shape_count(), 6);

    let mut restored = Document::default();
    restored.restore(loaded).unwrap();
    assert_eq!(restored.layers(), document.layers());
    assert_eq!(restored.filters(), document.filters());
    assert_eq!(
        restored.image_sources().map(|s| s.as_str()).collect::<Vec<_>>(),
        vec!["file:///tmp/photo.png"]
    );
}

#[test]
fn test_restore_clears_selection_and_keeps_history() {
    let mut document = sample_document();
    let id = document.shapes(ShapeKind::Rectangle)[0].id();
    assert!(document.select(ShapeKind::Rectangle, id));
    let entries = document.history().len();

    document.restore(Snapshot::default()).unwrap();
    assert!(document.layers().is_empty());
    assert_eq!(document.selection(), None);
    assert_eq!(document.history().len(), entries);
}

#[test]
fn test_shapes_serialize_with_their_kind() {
    let json = sample_document().snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["rectangles"].as_array().unwrap().len(), 1);
    assert_eq!(value["strokes"][0]["mode"], "ink");
    assert_eq!(value["filters"]["saturation"], 1.5);
}

#[test]
fn test_corrupt_snapshot_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, PersistenceError::SerializationError(_)));
}

#[test]
fn test_failed_restore_leaves_the_document_untouched() {
    let mut document = sample_document();
    let before = document.layers().clone();
    let mut snapshot = document.snapshot();
    let duplicate = snapshot.circles[0].clone();
    snapshot.circles.push(duplicate);

    assert!(document.restore(snapshot).is_err());
    assert_eq!(document.layers(), &before);
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r##"{ "canvas_width": 1000.0, "default_color": "#336699" }"##).unwrap();

    let config = PaintConfig::load(&path).unwrap();
    assert_eq!(config.canvas_height, 550.0);

    let mut document = Document::new(config);
    assert_eq!(document.color(), "#336699");
    let id = document.insert_image(ImageSource::new("memory://wide"));
    let paint_it::Shape::Image(image) = document.shape(ShapeKind::Image, id).unwrap() else {
        panic!("expected an image");
    };
    assert_eq!(image.size, Vec2::splat(500.0));
}

#[test]
fn test_keybindings_drive_the_document() {
    let mut document = sample_document();
    let shapes = document.layers().len();

    let undo = Action::from_key(Key::Z, Modifiers::CTRL).unwrap();
    document.dispatch(undo);
    assert_eq!(document.layers().len(), shapes - 1);

    let rectangle = Action::from_key(Key::R, Modifiers::NONE).unwrap();
    document.dispatch(rectangle);
    assert_eq!(document.tool(), Tool::Rectangle);

    let clear = Action::from_key(Key::K, Modifiers::CTRL).unwrap();
    document.dispatch(clear);
    assert!(document.layers().is_empty());
}
