use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::ShapeBase;
use crate::id_generator::ShapeId;

/// Straight arrow from `points[0]` to `points[1]`, in the local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub base: ShapeBase,
    pub points: [Pos2; 2],
}

impl Arrow {
    pub fn new(id: ShapeId, color: impl Into<String>, start: Pos2) -> Self {
        Self {
            base: ShapeBase::new(id, color, Pos2::ZERO),
            points: [start, start],
        }
    }

    pub fn start(&self) -> Pos2 {
        self.points[0]
    }

    pub fn end(&self) -> Pos2 {
        self.points[1]
    }

    /// Moves the head; the tail never moves while drawing.
    pub fn point_to(&mut self, end: Pos2) {
        self.points[1] = end;
    }

    /// Flattened `[start_x, start_y, end_x, end_y]`.
    pub fn coords(&self) -> [f32; 4] {
        [self.points[0].x, self.points[0].y, self.points[1].x, self.points[1].y]
    }

    pub fn document_points(&self) -> [Pos2; 2] {
        [
            self.base.local_to_document(self.points[0]),
            self.base.local_to_document(self.points[1]),
        ]
    }
}
