use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::ShapeBase;
use crate::id_generator::ShapeId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub base: ShapeBase,
    pub content: String,
}

impl Text {
    pub fn new(
        id: ShapeId,
        color: impl Into<String>,
        anchor: Pos2,
        content: impl Into<String>,
    ) -> Self {
        Self {
            base: ShapeBase::new(id, color, anchor),
            content: content.into(),
        }
    }

    /// Glyphs scale uniformly, following the vertical factor.
    pub fn font_scale(&self) -> f32 {
        self.base.scale.y.abs()
    }
}
