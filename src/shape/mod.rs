use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::id_generator::ShapeId;

mod arrow;
mod circle;
mod image;
mod rectangle;
mod stroke;
mod text;

pub use arrow::Arrow;
pub use circle::Circle;
pub use image::{Image, ImageSource};
pub use rectangle::Rectangle;
pub use stroke::{Stroke, StrokeMode};
pub use text::Text;

/// The drawable kinds, declared in paint order (bottom first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Image,
    Rectangle,
    Circle,
    Stroke,
    Arrow,
    Text,
}

impl ShapeKind {
    /// All kinds in z-order, background side first.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Image,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Stroke,
        ShapeKind::Arrow,
        ShapeKind::Text,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Image => "image",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Stroke => "stroke",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Text => "text",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields every shape carries regardless of kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeBase {
    pub id: ShapeId,
    pub color: String,
    /// Node position. Anchor for rectangles, text and images, center for
    /// circles, and a translation applied to the points of strokes and arrows.
    pub position: Pos2,
    /// Only written by resize gestures.
    pub scale: Vec2,
}

impl ShapeBase {
    pub fn new(id: ShapeId, color: impl Into<String>, position: Pos2) -> Self {
        Self {
            id,
            color: color.into(),
            position,
            scale: Vec2::splat(1.0),
        }
    }

    /// Maps a point from the shape's local frame into document space.
    pub fn local_to_document(&self, local: Pos2) -> Pos2 {
        self.position + local.to_vec2() * self.scale
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Image(Image),
    Rectangle(Rectangle),
    Circle(Circle),
    Stroke(Stroke),
    Arrow(Arrow),
    Text(Text),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Image(_) => ShapeKind::Image,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Stroke(_) => ShapeKind::Stroke,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn base(&self) -> &ShapeBase {
        match self {
            Shape::Image(s) => &s.base,
            Shape::Rectangle(s) => &s.base,
            Shape::Circle(s) => &s.base,
            Shape::Stroke(s) => &s.base,
            Shape::Arrow(s) => &s.base,
            Shape::Text(s) => &s.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ShapeBase {
        match self {
            Shape::Image(s) => &mut s.base,
            Shape::Rectangle(s) => &mut s.base,
            Shape::Circle(s) => &mut s.base,
            Shape::Stroke(s) => &mut s.base,
            Shape::Arrow(s) => &mut s.base,
            Shape::Text(s) => &mut s.base,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.base().id
    }

    pub fn color(&self) -> &str {
        &self.base().color
    }

    pub fn position(&self) -> Pos2 {
        self.base().position
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.base_mut().position = position;
    }

    pub fn scale(&self) -> Vec2 {
        self.base().scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.base_mut().scale = scale;
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_kind!(Image, Rectangle, Circle, Stroke, Arrow, Text);
