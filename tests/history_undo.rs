use egui::{Pos2, Vec2};
use paint_it::input::PointerEvent;
use paint_it::shape::{ImageSource, ShapeKind};
use paint_it::viewport::ZoomDirection;
use paint_it::{Action, Document, Operation, PaintError, ShapeId, Tool, UndoOutcome};

fn draw_rectangle(document: &mut Document, from: Pos2, to: Pos2) -> ShapeId {
    document.set_tool(Tool::Rectangle);
    document.handle_pointer(PointerEvent::down(from));
    document.handle_pointer(PointerEvent::moved(to));
    document.handle_pointer(PointerEvent::up(to));
    document
        .shapes(ShapeKind::Rectangle)
        .last()
        .expect("rectangle drawn")
        .id()
}

fn selected_rectangle(document: &mut Document) -> ShapeId {
    let id = draw_rectangle(document, Pos2::new(10.0, 10.0), Pos2::new(50.0, 50.0));
    document.set_tool(Tool::Select);
    assert!(document.select(ShapeKind::Rectangle, id));
    id
}

#[test]
fn test_undo_on_empty_history_is_a_no_op() {
    let mut document = Document::default();
    assert_eq!(document.undo(), UndoOutcome::NothingToUndo);
    assert!(document.layers().is_empty());
}

#[test]
fn test_delete_then_undo_re_appends_a_deep_copy() {
    let mut document = Document::default();
    let first = draw_rectangle(&mut document, Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
    let second = draw_rectangle(&mut document, Pos2::new(20.0, 20.0), Pos2::new(30.0, 35.0));
    let original = document.shape(ShapeKind::Rectangle, first).cloned().unwrap();

    document.set_tool(Tool::Select);
    assert!(document.select(ShapeKind::Rectangle, first));
    let removed = document.delete_selected().expect("selected shape removed");
    assert_eq!(removed, original);
    assert_eq!(document.selection(), None);
    assert_eq!(document.history().last().unwrap().operation(), Operation::Delete);

    assert!(document.undo().is_reverted());
    let ids: Vec<ShapeId> = document
        .shapes(ShapeKind::Rectangle)
        .iter()
        .map(|shape| shape.id())
        .collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(document.shape(ShapeKind::Rectangle, first), Some(&original));
}

#[test]
fn test_delete_without_selection_does_nothing() {
    let mut document = Document::default();
    draw_rectangle(&mut document, Pos2::ZERO, Pos2::new(5.0, 5.0));
    let entries = document.history().len();

    assert_eq!(document.delete_selected(), None);
    assert_eq!(document.layers().len(), 1);
    assert_eq!(document.history().len(), entries);
}

#[test]
fn test_drag_then_undo_restores_position() {
    let mut document = Document::default();
    let id = selected_rectangle(&mut document);

    document.begin_drag(ShapeKind::Rectangle, id).unwrap();
    assert!(document.end_drag(ShapeKind::Rectangle, id, Pos2::new(60.0, 70.0)));
    let moved = document.shape(ShapeKind::Rectangle, id).unwrap();
    assert_eq!(moved.position(), Pos2::new(60.0, 70.0));

    assert!(document.undo().is_reverted());
    let restored = document.shape(ShapeKind::Rectangle, id).unwrap();
    assert_eq!(restored.position(), Pos2::new(10.0, 10.0));
}

#[test]
fn test_resize_then_undo_restores_scale() {
    let mut document = Document::default();
    let id = selected_rectangle(&mut document);

    document.begin_resize(ShapeKind::Rectangle, id).unwrap();
    assert!(document.end_resize(ShapeKind::Rectangle, id, Vec2::new(2.0, 3.0)));
    assert_eq!(
        document.shape(ShapeKind::Rectangle, id).unwrap().scale(),
        Vec2::new(2.0, 3.0)
    );

    document.undo();
    assert_eq!(
        document.shape(ShapeKind::Rectangle, id).unwrap().scale(),
        Vec2::splat(1.0)
    );
}

#[test]
fn test_one_drag_gesture_is_one_entry() {
    let mut document = Document::default();
    let id = selected_rectangle(&mut document);
    let before = document.history().len();

    document.begin_drag(ShapeKind::Rectangle, id).unwrap();
    for step in 1..10 {
        let at = Pos2::new(10.0 + step as f32, 10.0);
        document.end_drag(ShapeKind::Rectangle, id, at);
    }
    assert_eq!(document.history().len(), before + 1);
}

#[test]
fn test_transforms_require_the_select_tool() {
    let mut document = Document::default();
    let id = draw_rectangle(&mut document, Pos2::ZERO, Pos2::new(5.0, 5.0));
    let entries = document.history().len();

    let err = document.begin_drag(ShapeKind::Rectangle, id).unwrap_err();
    assert!(matches!(err, PaintError::TransformDisabled { tool: Tool::Rectangle }));
    let err = document.begin_resize(ShapeKind::Rectangle, id).unwrap_err();
    assert!(matches!(err, PaintError::TransformDisabled { .. }));
    assert_eq!(document.history().len(), entries);
    assert!(!document.select(ShapeKind::Rectangle, id));
}

#[test]
fn test_transforming_a_missing_shape_is_an_error() {
    let mut document = Document::default();
    let id = draw_rectangle(&mut document, Pos2::ZERO, Pos2::new(5.0, 5.0));
    document.set_tool(Tool::Select);

    let err = document.begin_drag(ShapeKind::Circle, id).unwrap_err();
    assert!(matches!(err, PaintError::ShapeNotFound { kind: ShapeKind::Circle, .. }));
    assert!(!document.end_drag(ShapeKind::Circle, id, Pos2::ZERO));
}

#[test]
fn test_stale_entry_is_consumed() {
    let mut document = Document::default();
    let id = draw_rectangle(&mut document, Pos2::ZERO, Pos2::new(5.0, 5.0));
    document.clear();

    assert_eq!(
        document.undo(),
        UndoOutcome::TargetMissing {
            operation: Operation::Add,
            kind: ShapeKind::Rectangle,
            id,
        }
    );
    assert!(!document.can_undo());
}

#[test]
fn test_undoing_an_add_clears_its_selection() {
    let mut document = Document::default();
    selected_rectangle(&mut document);
    assert!(document.selection().is_some());

    document.undo();
    assert_eq!(document.selection(), None);
    assert!(document.layers().is_empty());
}

#[test]
fn test_clear_keeps_history_and_viewport() {
    let mut document = Document::default();
    selected_rectangle(&mut document);
    draw_rectangle(&mut document, Pos2::ZERO, Pos2::new(3.0, 3.0));
    document.zoom_at(Pos2::new(40.0, 40.0), ZoomDirection::In);
    let entries = document.history().len();
    let viewport = *document.viewport();

    document.dispatch(Action::ClearAll);
    assert!(document.layers().is_empty());
    assert_eq!(document.selection(), None);
    assert_eq!(document.history().len(), entries);
    assert_eq!(document.viewport(), &viewport);
}

#[test]
fn test_filters_are_not_recorded() {
    let mut document = Document::default();
    let mut filters = document.filters();
    filters.blur = 12.0;
    filters.hue = 900.0;
    document.set_filters(filters);

    assert_eq!(document.filters().blur, 12.0);
    assert_eq!(document.filters().hue, 259.0);
    assert!(!document.can_undo());
}

#[test]
fn test_image_import_is_undoable() {
    let mut document = Document::default();
    let id = document.insert_image(paint_it::shape::ImageSource::new("memory://photo"));

    let image = document.shape(ShapeKind::Image, id).unwrap();
    assert_eq!(image.position(), Pos2::ZERO);
    let paint_it::Shape::Image(image) = image else {
        panic!("expected an image");
    };
    assert_eq!(image.size, Vec2::splat(350.0));

    document.undo();
    assert!(document.layers().is_empty());
}

fn referenced(document: &Document) -> Vec<String> {
    document
        .referenced_image_sources()
        .map(|source| source.as_str().to_owned())
        .collect()
}

#[test]
fn test_deleted_images_stay_referenced_until_undo_cannot_reach_them() {
    let mut document = Document::default();
    let id = document.insert_image(ImageSource::new("memory://photo"));
    document.set_tool(Tool::Select);
    assert!(document.select(ShapeKind::Image, id));

    document.delete_selected();
    assert!(document.shapes(ShapeKind::Image).is_empty());
    assert_eq!(referenced(&document), ["memory://photo"]);

    document.undo();
    assert_eq!(referenced(&document), ["memory://photo"]);

    document.undo();
    assert!(referenced(&document).is_empty());
}
