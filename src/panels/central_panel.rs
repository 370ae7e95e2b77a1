use egui::{Rect, Sense, Vec2};

use crate::PaintApp;

/// Lays out the drawing stage, routes canvas input and paints the document.
/// Returns the stage rect in screen space.
pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) -> Rect {
    egui::CentralPanel::default()
        .show(ctx, |ui| {
            let config = app.document().config();
            let stage = Vec2::new(config.canvas_width, config.canvas_height);
            let (response, painter) = ui.allocate_painter(stage, Sense::click_and_drag());
            let canvas = response.rect;

            app.handle_canvas_input(ui, &response, canvas);
            app.render(&painter.with_clip_rect(canvas), canvas);

            ui.horizontal(|ui| {
                let viewport = app.document().viewport();
                ui.label(format!(
                    "Zoom {:.0}%  offset ({:.0}, {:.0})",
                    viewport.scale() * 100.0,
                    viewport.offset().x,
                    viewport.offset().y
                ));
                if ui.button("Reset view").clicked() {
                    app.document_mut().reset_view();
                }
            });
            canvas
        })
        .inner
}
