use egui::{Pos2, Rect};

use super::{Metrics, distance_to_segment, shape_bounds};
use crate::id_generator::ShapeId;
use crate::layer::Layers;
use crate::shape::{Shape, ShapeKind};

pub const RESIZE_HANDLE_RADIUS: f32 = 8.0;

/// Whether a document-space point lands on `shape`.
pub fn shape_contains(shape: &Shape, point: Pos2, metrics: &Metrics) -> bool {
    let reach = metrics.stroke_width / 2.0 + metrics.tolerance;
    match shape {
        Shape::Image(image) => image.document_rect().contains(point),
        Shape::Rectangle(rect) => rect.document_rect().expand(reach).contains(point),
        Shape::Circle(circle) => {
            let radii = circle.base.scale.abs() * circle.radius;
            let d = point - circle.center();
            if radii.x <= 0.0 || radii.y <= 0.0 {
                return d.length() <= reach;
            }
            let (rx, ry) = (radii.x + reach, radii.y + reach);
            (d.x / rx).powi(2) + (d.y / ry).powi(2) <= 1.0
        }
        Shape::Stroke(stroke) => near_polyline(&stroke.document_points(), point, reach),
        Shape::Arrow(arrow) => near_polyline(&arrow.document_points(), point, reach),
        Shape::Text(_) => shape_bounds(shape, metrics).contains(point),
    }
}

fn near_polyline(points: &[Pos2], point: Pos2, reach: f32) -> bool {
    match points {
        [] => false,
        [only] => only.distance(point) <= reach,
        _ => points
            .windows(2)
            .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= reach),
    }
}

/// Topmost shape under `point`, walking the paint order from the top.
pub fn hit_test(layers: &Layers, point: Pos2, metrics: &Metrics) -> Option<(ShapeKind, ShapeId)> {
    layers
        .iter()
        .rev()
        .find(|shape| shape_contains(shape, point, metrics))
        .map(|shape| (shape.kind(), shape.id()))
}

/// The resize handle sits on the bottom-right corner of the selection box.
pub fn resize_handle(bounds: Rect) -> Rect {
    Rect::from_center_size(bounds.right_bottom(), egui::Vec2::splat(RESIZE_HANDLE_RADIUS * 2.0))
}

pub fn is_point_near_handle(point: Pos2, bounds: Rect) -> bool {
    point.distance(bounds.right_bottom()) <= RESIZE_HANDLE_RADIUS
}
