use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::id_generator::ShapeId;
use crate::shape::ShapeKind;

mod draw_shape_tool;
mod text_tool;

pub use draw_shape_tool::{extend_shape, start_shape};
pub use text_tool::PendingText;

/// Every tool the canvas understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Select,
    /// Pan the stage by dragging.
    Move,
    ZoomIn,
    ZoomOut,
    Text,
    Rectangle,
    Circle,
    Arrow,
    #[default]
    Freehand,
    Eraser,
}

impl Tool {
    /// Tools shown in the drawing tool bar, in order.
    pub const DRAWING: [Tool; 7] = [
        Tool::Select,
        Tool::Text,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Arrow,
        Tool::Freehand,
        Tool::Eraser,
    ];

    /// Stage navigation tools.
    pub const NAVIGATION: [Tool; 3] = [Tool::Move, Tool::ZoomIn, Tool::ZoomOut];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Move => "move",
            Tool::ZoomIn => "zoomIn",
            Tool::ZoomOut => "zoomOut",
            Tool::Text => "text",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Arrow => "arrow",
            Tool::Freehand => "freehand",
            Tool::Eraser => "eraser",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Select => "Select Shapes",
            Tool::Move => "Pan Canvas",
            Tool::ZoomIn => "Zoom In Canvas",
            Tool::ZoomOut => "Zoom Out Canvas",
            Tool::Text => "Text",
            Tool::Rectangle => "Draw Rectangle Shape",
            Tool::Circle => "Draw Circle Shape",
            Tool::Arrow => "Draw Arrow Shape",
            Tool::Freehand => "Scribble",
            Tool::Eraser => "Eraser",
        }
    }

    /// The kind of shape a pointer-down creates with this tool, if any.
    ///
    /// Text is absent: its shape only exists once the typed content is
    /// committed.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Arrow => Some(ShapeKind::Arrow),
            Tool::Freehand | Tool::Eraser => Some(ShapeKind::Stroke),
            Tool::Select | Tool::Move | Tool::ZoomIn | Tool::ZoomOut | Tool::Text => None,
        }
    }

    pub fn is_drawing(self) -> bool {
        self.shape_kind().is_some()
    }

    /// Shapes can only be dragged and resized under the select tool.
    pub fn allows_transform(self) -> bool {
        self == Tool::Select
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The pointer gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// A shape is being grown by pointer samples.
    Drawing { kind: ShapeKind, id: ShapeId },
    /// The stage follows the pointer; `last` is in screen space.
    Panning { last: Pos2 },
    /// Pointer is down but the active tool ignores movement.
    Idle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eraser_draws_strokes() {
        assert_eq!(Tool::Eraser.shape_kind(), Some(ShapeKind::Stroke));
        assert_eq!(Tool::Freehand.shape_kind(), Some(ShapeKind::Stroke));
    }

    #[test]
    fn only_select_allows_transform() {
        for tool in Tool::DRAWING.into_iter().chain(Tool::NAVIGATION) {
            assert_eq!(tool.allows_transform(), tool == Tool::Select);
        }
    }

    #[test]
    fn text_and_navigation_create_nothing_on_pointer_down() {
        assert!(!Tool::Text.is_drawing());
        assert!(!Tool::ZoomIn.is_drawing());
        assert!(!Tool::Move.is_drawing());
    }
}
