use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::ShapeBase;
use crate::id_generator::ShapeId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub base: ShapeBase,
    pub radius: f32,
}

impl Circle {
    pub fn new(id: ShapeId, color: impl Into<String>, center: Pos2) -> Self {
        Self {
            base: ShapeBase::new(id, color, center),
            radius: 0.0,
        }
    }

    pub fn center(&self) -> Pos2 {
        self.base.position
    }

    /// Radius becomes the distance from the center to `pointer`.
    pub fn reach_to(&mut self, pointer: Pos2) {
        let d = pointer - self.center();
        self.radius = (d.x * d.x + d.y * d.y).sqrt();
    }
}
