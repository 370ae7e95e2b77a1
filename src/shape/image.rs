use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::ShapeBase;
use crate::id_generator::ShapeId;

/// Where the pixels of an image shape come from.
///
/// The document never holds decoded pixels; the host resolves the source
/// into a texture and may re-resolve it after a snapshot is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSource(pub String);

impl ImageSource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raster image placed on the canvas.
///
/// `size` is the placement size. The shared scale field is carried but not
/// applied to images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub base: ShapeBase,
    pub source: ImageSource,
    pub size: Vec2,
}

impl Image {
    pub fn new(id: ShapeId, source: ImageSource, position: Pos2, size: Vec2) -> Self {
        Self {
            base: ShapeBase::new(id, "", position),
            source,
            size,
        }
    }

    pub fn document_rect(&self) -> Rect {
        Rect::from_min_size(self.base.position, self.size)
    }
}
