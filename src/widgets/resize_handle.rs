use egui::{CursorIcon, Pos2, Rect, Vec2};

use crate::geometry::hit_testing::is_point_near_handle;
use crate::id_generator::ShapeId;
use crate::shape::ShapeKind;

/// Smallest scale factor a resize can produce on either axis.
pub const MIN_SCALE: f32 = 0.05;

/// The bottom-right resize handle of the selection box, captured when a
/// resize drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle {
    pub kind: ShapeKind,
    pub id: ShapeId,
    origin: Pos2,
    start_extent: Vec2,
    start_scale: Vec2,
}

impl ResizeHandle {
    /// `bounds` is the shape's document-space box at drag start.
    pub fn new(kind: ShapeKind, id: ShapeId, bounds: Rect, start_scale: Vec2) -> Self {
        Self {
            kind,
            id,
            origin: bounds.min,
            start_extent: bounds.size().max(Vec2::splat(1.0)),
            start_scale,
        }
    }

    /// Whether a screen position grabs the handle of a screen-space box.
    pub fn hovered(pointer: Pos2, screen_bounds: Rect) -> bool {
        is_point_near_handle(pointer, screen_bounds)
    }

    /// Top-left corner of the box, which stays put while resizing.
    pub fn anchor(&self) -> Pos2 {
        self.origin
    }

    pub fn cursor_icon() -> CursorIcon {
        CursorIcon::ResizeNwSe
    }

    /// Scale that stretches the box from its top-left corner to `pointer`.
    pub fn scale_at(&self, pointer: Pos2) -> Vec2 {
        let extent = pointer - self.origin;
        let ratio = extent / self.start_extent;
        let scale = self.start_scale * ratio;
        Vec2::new(scale.x.max(MIN_SCALE), scale.y.max(MIN_SCALE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::generate_id;

    fn handle() -> ResizeHandle {
        let bounds = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(20.0, 40.0));
        ResizeHandle::new(ShapeKind::Rectangle, generate_id(), bounds, Vec2::splat(1.0))
    }

    #[test]
    fn dragging_the_corner_out_doubles_the_scale() {
        assert_eq!(handle().scale_at(Pos2::new(50.0, 90.0)), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn scale_never_collapses() {
        assert_eq!(handle().scale_at(Pos2::new(0.0, 0.0)), Vec2::splat(MIN_SCALE));
    }

    #[test]
    fn hover_uses_the_bottom_right_corner() {
        let bounds = Rect::from_min_size(Pos2::ZERO, Vec2::splat(100.0));
        assert!(ResizeHandle::hovered(Pos2::new(98.0, 103.0), bounds));
        assert!(!ResizeHandle::hovered(Pos2::new(0.0, 0.0), bounds));
    }
}
