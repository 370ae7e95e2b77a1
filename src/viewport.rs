//! Stage-level pan and zoom.
//!
//! Screen and document space are related by
//! `screen = document * scale + offset`, so every pointer sample the tools
//! or hit testing see goes through [`Viewport::to_document`].

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Multiplier applied per zoom click.
pub const DEFAULT_ZOOM_FACTOR: f32 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    scale: f32,
    offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Pan offset in screen units.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn to_document(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.offset) / self.scale).to_pos2()
    }

    pub fn to_screen(&self, document: Pos2) -> Pos2 {
        (document.to_vec2() * self.scale + self.offset).to_pos2()
    }

    /// Scales around `pointer` so the document point under it stays put.
    pub fn zoom_at(&mut self, pointer: Pos2, direction: ZoomDirection, factor: f32) {
        let anchor = self.to_document(pointer);
        let new_scale = match direction {
            ZoomDirection::In => self.scale * factor,
            ZoomDirection::Out => self.scale / factor,
        };

        self.scale = new_scale;
        self.offset = pointer.to_vec2() - anchor.to_vec2() * new_scale;
        log::debug!("viewport: scale {:.3} offset {:?}", self.scale, self.offset);
    }

    /// Moves the stage by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
