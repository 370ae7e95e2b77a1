use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui, Vec2};

use crate::tools::Tool;

/// Square icon button for one tool in the tool bar.
pub struct ToolButton {
    pub tool: Tool,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: Tool, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn icon(tool: Tool) -> &'static str {
        match tool {
            Tool::Select => "⬚",
            Tool::Move => "✋",
            Tool::ZoomIn => "+",
            Tool::ZoomOut => "-",
            Tool::Text => "T",
            Tool::Rectangle => "▭",
            Tool::Circle => "○",
            Tool::Arrow => "➜",
            Tool::Freehand => "✏",
            Tool::Eraser => "⌫",
        }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(32.0), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                Color32::from_rgb(100, 181, 246)
            } else if response.hovered() {
                Color32::from_gray(70)
            } else {
                Color32::from_gray(45)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                Color32::BLACK
            } else {
                Color32::WHITE
            };
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                Self::icon(self.tool),
                FontId::proportional(20.0),
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    Stroke::new(2.0, Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(self.tool.label())
    }
}
