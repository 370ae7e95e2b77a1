use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::ShapeBase;
use crate::id_generator::ShapeId;

/// Axis-aligned rectangle anchored at the pointer-down position.
///
/// `size` is signed: dragging left of or above the anchor yields a negative
/// width or height, which is kept as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub base: ShapeBase,
    pub size: Vec2,
}

impl Rectangle {
    pub fn new(id: ShapeId, color: impl Into<String>, anchor: Pos2) -> Self {
        Self {
            base: ShapeBase::new(id, color, anchor),
            size: Vec2::ZERO,
        }
    }

    /// Stretch the rectangle so its far corner sits on `corner`.
    pub fn stretch_to(&mut self, corner: Pos2) {
        self.size = corner - self.base.position;
    }

    /// Normalized document-space rect with scale applied.
    pub fn document_rect(&self) -> Rect {
        let far = self.base.position + self.size * self.base.scale;
        Rect::from_two_pos(self.base.position, far)
    }
}
