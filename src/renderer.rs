use egui::epaint::PathShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use crate::document::Document;
use crate::geometry::{self, Metrics, hit_testing};
use crate::shape::{Shape, StrokeMode};
use crate::texture_manager::TextureManager;
use crate::viewport::Viewport;

const CANVAS_COLOR: Color32 = Color32::WHITE;
const SELECTION_COLOR: Color32 = Color32::from_rgb(30, 120, 255);
const PLACEHOLDER_COLOR: Color32 = Color32::from_gray(200);
const ELLIPSE_SEGMENTS: usize = 64;

/// Parses a CSS-style hex color, falling back to black.
pub fn parse_color(color: &str) -> Color32 {
    Color32::from_hex(color).unwrap_or(Color32::BLACK)
}

/// `#rrggbb` form of a color, as stored on shapes.
pub fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Maps document coordinates into the painter's screen space.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    canvas: Rect,
    viewport: Viewport,
}

impl Projection {
    pub fn new(canvas: Rect, viewport: Viewport) -> Self {
        Self { canvas, viewport }
    }

    pub fn to_screen(&self, document: Pos2) -> Pos2 {
        self.canvas.min + self.viewport.to_screen(document).to_vec2()
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max))
    }

    /// Canvas-local position of an absolute screen position.
    pub fn canvas_local(&self, screen: Pos2) -> Pos2 {
        (screen - self.canvas.min).to_pos2()
    }

    pub fn scale(&self) -> f32 {
        self.viewport.scale()
    }
}

/// Paints a [`Document`] onto an egui painter.
#[derive(Debug, Default)]
pub struct Renderer {
    show_bounds: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_bounds(&self) -> bool {
        self.show_bounds
    }

    /// Outlines every shape's bounding box, handy when tuning hit testing.
    pub fn set_show_bounds(&mut self, show: bool) {
        self.show_bounds = show;
    }

    /// Paints every collection in z-order, then the selection box.
    pub fn render(
        &self,
        painter: &Painter,
        canvas: Rect,
        document: &Document,
        textures: &mut TextureManager,
    ) {
        let projection = Projection::new(canvas, *document.viewport());
        let metrics = document.metrics();
        painter.rect_filled(canvas, 0.0, CANVAS_COLOR);

        for shape in document.layers().iter() {
            self.paint_shape(painter, &projection, &metrics, document, textures, shape);
            if self.show_bounds {
                let bounds = projection.rect_to_screen(geometry::shape_bounds(shape, &metrics));
                painter.rect_stroke(bounds, 0.0, Stroke::new(1.0, PLACEHOLDER_COLOR));
            }
        }

        if let Some(shape) = document.selected_shape() {
            let bounds = projection.rect_to_screen(geometry::shape_bounds(shape, &metrics));
            draw_selection(painter, bounds);
        }
    }

    fn paint_shape(
        &self,
        painter: &Painter,
        projection: &Projection,
        metrics: &Metrics,
        document: &Document,
        textures: &mut TextureManager,
        shape: &Shape,
    ) {
        let zoom = projection.scale();
        let stroke = Stroke::new(metrics.stroke_width * zoom, parse_color(shape.color()));

        match shape {
            Shape::Image(image) => {
                let rect = projection.rect_to_screen(image.document_rect());
                match textures.texture(painter.ctx(), &image.source, document.filters()) {
                    Some(texture) => {
                        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                        painter.image(texture, rect, uv, Color32::WHITE);
                    }
                    None => {
                        painter.rect_filled(rect, 0.0, PLACEHOLDER_COLOR);
                        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::DARK_GRAY));
                    }
                }
            }
            Shape::Rectangle(rect) => {
                painter.rect_stroke(projection.rect_to_screen(rect.document_rect()), 0.0, stroke);
            }
            Shape::Circle(circle) => {
                let radii = Vec2::splat(circle.radius) * circle.base.scale.abs();
                let points = ellipse_points(projection.to_screen(circle.center()), radii * zoom);
                painter.add(PathShape::closed_line(points, stroke));
            }
            Shape::Stroke(line) => {
                let points: Vec<Pos2> = line
                    .document_points()
                    .into_iter()
                    .map(|p| projection.to_screen(p))
                    .collect();
                // Erasing paints the canvas color back over what lies below.
                let stroke = match line.mode {
                    StrokeMode::Ink => stroke,
                    StrokeMode::Erase => Stroke::new(stroke.width, CANVAS_COLOR),
                };
                if let [point] = points.as_slice() {
                    painter.circle_filled(*point, stroke.width / 2.0, stroke.color);
                } else {
                    painter.add(PathShape::line(points, stroke));
                }
            }
            Shape::Arrow(arrow) => {
                let [start, end] = arrow.document_points().map(|p| projection.to_screen(p));
                painter.arrow(start, end - start, stroke);
            }
            Shape::Text(text) => {
                let size = metrics.font_size * text.font_scale() * zoom;
                painter.text(
                    projection.to_screen(text.base.position),
                    Align2::LEFT_TOP,
                    &text.content,
                    FontId::proportional(size.max(1.0)),
                    stroke.color,
                );
            }
        }
    }
}

/// Selection box plus the bottom-right resize handle.
pub fn draw_selection(painter: &Painter, bounds: Rect) {
    painter.rect_stroke(bounds, 0.0, Stroke::new(1.0, SELECTION_COLOR));
    let handle = hit_testing::resize_handle(bounds);
    painter.rect_filled(handle, 2.0, SELECTION_COLOR);
    painter.rect_stroke(handle, 2.0, Stroke::new(1.0, Color32::WHITE));
}

fn ellipse_points(center: Pos2, radii: Vec2) -> Vec<Pos2> {
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            center + Vec2::new(radii.x * angle.cos(), radii.y * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerEvent;
    use crate::tools::Tool;
    use crate::viewport::ZoomDirection;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#000"), Color32::BLACK);
        assert_eq!(parse_color("#ff0000"), Color32::RED);
        assert_eq!(parse_color("not a color"), Color32::BLACK);
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(color_to_hex(Color32::from_rgb(255, 0, 16)), "#ff0010");
        assert_eq!(parse_color(&color_to_hex(Color32::GREEN)), Color32::GREEN);
    }

    #[test]
    fn test_projection_follows_viewport() {
        let canvas = Rect::from_min_size(Pos2::new(50.0, 20.0), Vec2::splat(500.0));
        let mut viewport = Viewport::default();
        viewport.zoom_at(Pos2::ZERO, ZoomDirection::In, 2.0);
        let projection = Projection::new(canvas, viewport);

        assert_eq!(projection.to_screen(Pos2::new(10.0, 10.0)), Pos2::new(70.0, 40.0));
        assert_eq!(projection.canvas_local(Pos2::new(70.0, 40.0)), Pos2::new(20.0, 20.0));
    }

    #[test]
    fn test_ellipse_points_lie_on_radii() {
        let points = ellipse_points(Pos2::ZERO, Vec2::new(4.0, 2.0));
        assert_eq!(points.len(), ELLIPSE_SEGMENTS);
        assert!((points[0] - Pos2::new(4.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_render_every_kind() {
        let mut document = Document::default();
        for tool in [Tool::Rectangle, Tool::Circle, Tool::Arrow, Tool::Freehand, Tool::Eraser] {
            document.set_tool(tool);
            document.handle_pointer(PointerEvent::down(Pos2::new(10.0, 10.0)));
            document.handle_pointer(PointerEvent::moved(Pos2::new(40.0, 30.0)));
            document.handle_pointer(PointerEvent::up(Pos2::new(40.0, 30.0)));
        }
        document.set_tool(Tool::Text);
        document.handle_pointer(PointerEvent::down(Pos2::new(5.0, 5.0)));
        document.set_text_draft("hello");
        document.commit_text();
        document.insert_image(crate::shape::ImageSource::new("memory://missing"));

        let renderer = Renderer::new();
        let mut textures = TextureManager::new();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(700.0, 550.0));
            let painter = ctx.layer_painter(egui::LayerId::background());
            renderer.render(&painter, rect, &document, &mut textures);
        });
        assert_eq!(document.layers().len(), 7);
    }
}
