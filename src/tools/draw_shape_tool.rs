use egui::Pos2;

use crate::id_generator::ShapeId;
use crate::shape::{Arrow, Circle, Rectangle, Shape, Stroke, StrokeMode};
use crate::tools::Tool;

/// Builds the degenerate shape a pointer-down creates with `tool`.
///
/// Returns `None` for tools that do not draw.
pub fn start_shape(tool: Tool, id: ShapeId, color: &str, at: Pos2) -> Option<Shape> {
    let shape = match tool {
        Tool::Freehand => Stroke::new(id, color, at, StrokeMode::Ink).into(),
        Tool::Eraser => Stroke::new(id, color, at, StrokeMode::Erase).into(),
        Tool::Rectangle => Rectangle::new(id, color, at).into(),
        Tool::Circle => Circle::new(id, color, at).into(),
        Tool::Arrow => Arrow::new(id, color, at).into(),
        Tool::Select | Tool::Move | Tool::ZoomIn | Tool::ZoomOut | Tool::Text => return None,
    };
    Some(shape)
}

/// Grows an in-progress shape to follow the pointer at `at`.
///
/// Strokes append, every other kind is recomputed from the pointer alone.
pub fn extend_shape(shape: &mut Shape, at: Pos2) {
    match shape {
        Shape::Stroke(stroke) => stroke.add_point(at),
        Shape::Circle(circle) => circle.reach_to(at),
        Shape::Rectangle(rect) => rect.stretch_to(at),
        Shape::Arrow(arrow) => arrow.point_to(at),
        Shape::Text(_) | Shape::Image(_) => {}
    }
}
