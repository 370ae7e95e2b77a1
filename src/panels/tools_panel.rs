use egui::Slider;

use crate::PaintApp;
use crate::filters::{BLUR_RANGE, BRIGHTNESS_RANGE, HUE_RANGE, SATURATION_RANGE};
use crate::renderer::{color_to_hex, parse_color};
use crate::tools::Tool;
use crate::widgets::ToolButton;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            tool_row(app, ui, &Tool::DRAWING);
            tool_row(app, ui, &Tool::NAVIGATION);
            ui.label(format!("Active: {}", app.document().tool().label()));
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = parse_color(app.document().color());
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.document_mut().set_color(color_to_hex(color));
                }
            });

            ui.horizontal(|ui| {
                let can_undo = app.document().can_undo();
                let has_selection = app.document().selection().is_some();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.document_mut().undo();
                }
                if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
                    app.document_mut().delete_selected();
                }
                if ui.button("Clear").clicked() {
                    app.document_mut().clear();
                }
            });
            ui.separator();

            filter_sliders(app, ui);
            ui.separator();

            ui.label("Image file:");
            ui.text_edit_singleline(app.image_path_mut());
            if ui.button("Import image").clicked() {
                app.import_image();
            }

            ui.label("Drawing file:");
            ui.text_edit_singleline(app.snapshot_path_mut());
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    app.save_snapshot();
                }
                if ui.button("Load").clicked() {
                    app.load_snapshot();
                }
            });

            if let Some(status) = app.status() {
                ui.colored_label(egui::Color32::RED, status);
            }
            ui.separator();

            let mut show_bounds = app.renderer_mut().show_bounds();
            if ui.checkbox(&mut show_bounds, "Show bounds").changed() {
                app.renderer_mut().set_show_bounds(show_bounds);
            }

            history_grid(app, ui);
        });
}

fn tool_row(app: &mut PaintApp, ui: &mut egui::Ui, tools: &[Tool]) {
    let active = app.document().tool();
    ui.horizontal_wrapped(|ui| {
        for &tool in tools {
            if ToolButton::new(tool, tool == active).show(ui).clicked() {
                log::info!("Tool selected from UI: {}", tool);
                app.set_tool(tool);
            }
        }
    });
}

/// Filter edits apply immediately and are not recorded in history.
fn filter_sliders(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.label("Image filters");
    let mut filters = app.document().filters();
    let mut changed = false;
    changed |= ui
        .add(Slider::new(&mut filters.brightness, BRIGHTNESS_RANGE).text("Brightness"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut filters.blur, BLUR_RANGE).text("Blur"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut filters.saturation, SATURATION_RANGE).text("Saturation"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut filters.hue, HUE_RANGE).text("Hue"))
        .changed();

    if changed {
        app.document_mut().set_filters(filters);
    }
}

fn history_grid(app: &PaintApp, ui: &mut egui::Ui) {
    let history = app.document().history();
    ui.label(format!("Undo stack size: {}", history.len()));

    egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
        egui::Grid::new("history_grid")
            .num_columns(2)
            .spacing([40.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Operation");
                ui.strong("Shape");
                ui.end_row();

                for entry in history.entries().iter().rev() {
                    ui.label(format!("{:?}", entry.operation()));
                    ui.label(entry.kind.name());
                    ui.end_row();
                }
            });
    });
}
