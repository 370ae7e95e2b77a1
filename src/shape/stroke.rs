use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::ShapeBase;
use crate::id_generator::ShapeId;

/// How a freehand stroke is composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeMode {
    #[default]
    Ink,
    /// Cuts the stroke out of whatever was painted below it.
    Erase,
}

/// Freehand stroke. Points only ever grow while the gesture is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub base: ShapeBase,
    /// Points in the stroke's local frame (the node position starts at zero).
    pub points: Vec<Pos2>,
    #[serde(default)]
    pub mode: StrokeMode,
}

impl Stroke {
    /// A single-point stroke at `start`.
    pub fn new(id: ShapeId, color: impl Into<String>, start: Pos2, mode: StrokeMode) -> Self {
        Self {
            base: ShapeBase::new(id, color, Pos2::ZERO),
            points: vec![start],
            mode,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn is_eraser(&self) -> bool {
        self.mode == StrokeMode::Erase
    }

    /// Points mapped through the node position and scale.
    pub fn document_points(&self) -> Vec<Pos2> {
        self.points
            .iter()
            .map(|p| self.base.local_to_document(*p))
            .collect()
    }
}
