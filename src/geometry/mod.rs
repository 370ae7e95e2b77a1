use egui::{Pos2, Rect, Vec2};

use crate::shape::Shape;

pub mod hit_testing;

pub use hit_testing::{hit_test, shape_contains};

/// Sizes that decide how much room a shape takes beyond its raw geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub stroke_width: f32,
    pub font_size: f32,
    /// Extra slack around thin shapes when hit testing.
    pub tolerance: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            stroke_width: 4.0,
            font_size: 16.0,
            tolerance: 4.0,
        }
    }
}

impl Metrics {
    /// Rough advance width of one glyph; good enough for picking.
    pub fn glyph_width(&self) -> f32 {
        self.font_size * 0.6
    }
}

/// Distance from `point` to the segment `start..end`.
pub fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let len_sq = segment.length_sq();
    if len_sq == 0.0 {
        return point.distance(start);
    }

    let t = ((point - start).dot(segment) / len_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}

/// Smallest rect holding every point, grown by `padding`.
pub fn points_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    Rect::from_points(points).expand(padding)
}

/// Document-space bounding box of a shape, including scale and line width.
pub fn shape_bounds(shape: &Shape, metrics: &Metrics) -> Rect {
    let half_width = metrics.stroke_width / 2.0;
    match shape {
        Shape::Image(image) => image.document_rect(),
        Shape::Rectangle(rect) => rect.document_rect().expand(half_width),
        Shape::Circle(circle) => {
            let radii = Vec2::splat(circle.radius) * circle.base.scale.abs();
            Rect::from_center_size(circle.center(), radii * 2.0).expand(half_width)
        }
        Shape::Stroke(stroke) => points_bounds(&stroke.document_points(), half_width),
        Shape::Arrow(arrow) => points_bounds(&arrow.document_points(), half_width),
        Shape::Text(text) => {
            let chars = text.content.chars().count().max(1) as f32;
            let size = Vec2::new(chars * metrics.glyph_width(), metrics.font_size);
            Rect::from_min_size(text.base.position, size * text.font_scale())
        }
    }
}
