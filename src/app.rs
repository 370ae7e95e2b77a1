use egui::{Pos2, Rect, Vec2};
use std::path::Path;

use crate::config::PaintConfig;
use crate::document::Document;
use crate::error::PaintResult;
use crate::file_handler;
use crate::geometry;
use crate::id_generator::ShapeId;
use crate::input::{self, PointerEvent, PointerEventKind};
use crate::panels;
use crate::persistence::{self, Snapshot};
use crate::renderer::{Projection, Renderer};
use crate::shape::ShapeKind;
use crate::texture_manager::TextureManager;
use crate::tools::Tool;
use crate::widgets::ResizeHandle;

/// What eframe keeps between runs.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct StoredState {
    config: PaintConfig,
    snapshot: Snapshot,
}

/// A select-tool drag in progress. The history entry is only recorded once
/// the pointer actually moves, so a plain click selects without one.
#[derive(Debug, Clone, Copy)]
enum TransformDrag {
    Move {
        kind: ShapeKind,
        id: ShapeId,
        grab: Vec2,
        started: bool,
    },
    Resize {
        handle: ResizeHandle,
        started: bool,
    },
}

/// How the floating text editor was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftExit {
    Commit,
    Cancel,
}

/// Enter and blur both commit; Escape cancels.
fn draft_exit(lost_focus: bool, escape: bool) -> Option<DraftExit> {
    match (lost_focus, escape) {
        (false, _) => None,
        (true, true) => Some(DraftExit::Cancel),
        (true, false) => Some(DraftExit::Commit),
    }
}

pub struct PaintApp {
    document: Document,
    renderer: Renderer,
    textures: TextureManager,
    transform: Option<TransformDrag>,
    focus_text: bool,
    image_path: String,
    snapshot_path: String,
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(PaintConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    ///
    /// `config` overrides the stored config; without it the stored one is
    /// used, then the defaults.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<PaintConfig>) -> Self {
        let stored: Option<StoredState> =
            cc.storage.and_then(|storage| eframe::get_value(storage, eframe::APP_KEY));

        let config = config
            .or_else(|| stored.as_ref().map(|state| state.config.clone()))
            .unwrap_or_default();
        let mut app = Self::with_config(config);

        if let Some(state) = stored {
            if let Err(err) = app.restore_snapshot(state.snapshot) {
                log::warn!("Discarding stored drawing: {err}");
            }
        }
        app
    }

    pub fn with_config(config: PaintConfig) -> Self {
        Self {
            document: Document::new(config),
            renderer: Renderer::new(),
            textures: TextureManager::new(),
            transform: None,
            focus_text: false,
            image_path: String::new(),
            snapshot_path: "drawing.json".to_owned(),
            status: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn image_path_mut(&mut self) -> &mut String {
        &mut self.image_path
    }

    pub fn snapshot_path_mut(&mut self) -> &mut String {
        &mut self.snapshot_path
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn report<T>(&mut self, result: PaintResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.status = None;
                Some(value)
            }
            Err(err) => {
                log::warn!("{err}");
                self.status = Some(err.to_string());
                None
            }
        }
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.transform = None;
        self.document.set_tool(tool);
    }

    /// Decodes the file at the import path and places it on the canvas.
    pub fn import_image(&mut self) {
        let path = self.image_path.trim().to_owned();
        let result = self.textures.load_path(Path::new(&path)).map_err(Into::into);
        if let Some(source) = self.report(result) {
            self.document.insert_image(source);
        }
    }

    pub fn save_snapshot(&mut self) {
        let result = persistence::save_snapshot(&self.document.snapshot(), &self.snapshot_path)
            .map_err(Into::into);
        self.report(result);
    }

    pub fn load_snapshot(&mut self) {
        let result = persistence::load_snapshot(&self.snapshot_path)
            .and_then(|snapshot| self.restore_snapshot(snapshot))
            .map_err(Into::into);
        self.report(result);
    }

    /// Replaces the drawing and re-decodes the images it refers to.
    fn restore_snapshot(&mut self, snapshot: Snapshot) -> persistence::PersistenceResult<()> {
        self.transform = None;
        self.document.restore(snapshot)?;
        let unresolved = self.textures.resolve_all(self.document.image_sources());
        if !unresolved.is_empty() {
            log::warn!("{} images could not be resolved", unresolved.len());
        }
        self.textures.retain(self.document.referenced_image_sources());
        Ok(())
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        file_handler::preview_files_being_dropped(ctx);
        for file in file_handler::dropped_images(ctx) {
            let result = file_handler::load_dropped(&file, &mut self.textures).map_err(Into::into);
            if let Some(source) = self.report(result) {
                self.document.insert_image(source);
            }
        }
    }

    pub fn render(&mut self, painter: &egui::Painter, canvas: Rect) {
        self.renderer
            .render(painter, canvas, &self.document, &mut self.textures);
    }

    /// Feeds this frame's pointer input on the canvas to the document.
    pub fn handle_canvas_input(&mut self, ui: &egui::Ui, response: &egui::Response, canvas: Rect) {
        let projection = Projection::new(canvas, *self.document.viewport());
        let (pressed, released, pointer, delta) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.pointer.delta(),
            )
        });
        let local = pointer.map(|p| projection.canvas_local(p));

        if let (Some(pointer), Some(bounds)) = (pointer, self.selected_screen_bounds(&projection)) {
            if ResizeHandle::hovered(pointer, bounds) {
                ui.ctx().set_cursor_icon(ResizeHandle::cursor_icon());
            }
        }

        if pressed && response.hovered() {
            self.pointer_pressed(&projection, pointer, local);
        }

        if delta != Vec2::ZERO {
            if self.transform.is_some() {
                self.update_transform(local);
            } else if self.document.is_gesture_active() {
                self.document
                    .handle_pointer(PointerEvent::new(PointerEventKind::Move, local));
            }
        }

        if released {
            if self.transform.take().is_some() {
                log::debug!("transform: finished");
            }
            if self.document.is_gesture_active() {
                self.document
                    .handle_pointer(PointerEvent::new(PointerEventKind::Up, local));
            }
        }

        if response.clicked() {
            self.document
                .handle_pointer(PointerEvent::new(PointerEventKind::Click, local));
        }
    }

    fn selected_screen_bounds(&self, projection: &Projection) -> Option<Rect> {
        let shape = self.document.selected_shape()?;
        let bounds = geometry::shape_bounds(shape, &self.document.metrics());
        Some(projection.rect_to_screen(bounds))
    }

    fn pointer_pressed(&mut self, projection: &Projection, pointer: Option<Pos2>, local: Option<Pos2>) {
        let transforming = self.document.tool().allows_transform();

        if transforming {
            let on_handle = pointer.zip(self.selected_screen_bounds(projection));
            if on_handle.is_some_and(|(pointer, bounds)| ResizeHandle::hovered(pointer, bounds)) {
                self.grab_resize_handle();
                return;
            }
        }

        self.document
            .handle_pointer(PointerEvent::new(PointerEventKind::Down, local));

        if self.document.tool() == Tool::Text {
            self.focus_text = true;
        }
        if transforming {
            if let Some((kind, id)) = self.document.hit_test(local) {
                self.document.select(kind, id);
                self.grab_shape(kind, id, self.document.to_document(local));
            }
        }
    }

    fn grab_shape(&mut self, kind: ShapeKind, id: ShapeId, at: Pos2) {
        if let Some(shape) = self.document.shape(kind, id) {
            self.transform = Some(TransformDrag::Move {
                kind,
                id,
                grab: at - shape.position(),
                started: false,
            });
        }
    }

    fn grab_resize_handle(&mut self) {
        let Some(shape) = self.document.selected_shape() else {
            return;
        };
        let bounds = geometry::shape_bounds(shape, &self.document.metrics());
        let handle = ResizeHandle::new(shape.kind(), shape.id(), bounds, shape.scale());
        self.transform = Some(TransformDrag::Resize {
            handle,
            started: false,
        });
    }

    fn update_transform(&mut self, local: Option<Pos2>) {
        let at = self.document.to_document(local);
        let Some(transform) = self.transform.as_mut() else {
            return;
        };

        match transform {
            TransformDrag::Move {
                kind,
                id,
                grab,
                started,
            } => {
                let (kind, id, grab) = (*kind, *id, *grab);
                if !*started {
                    *started = true;
                    let result = self.document.begin_drag(kind, id);
                    if self.report(result).is_none() {
                        self.transform = None;
                        return;
                    }
                }
                self.document.end_drag(kind, id, at - grab);
            }
            TransformDrag::Resize { handle, started } => {
                let handle = *handle;
                if !*started {
                    *started = true;
                    let result = self.document.begin_resize(handle.kind, handle.id);
                    if self.report(result).is_none() {
                        self.transform = None;
                        return;
                    }
                }
                self.document.end_resize_anchored(
                    handle.kind,
                    handle.id,
                    handle.scale_at(at),
                    handle.anchor(),
                );
            }
        }
    }

    /// Floating editor for the text being typed.
    fn show_pending_text(&mut self, ctx: &egui::Context, canvas: Rect) {
        let Some(pending) = self.document.pending_text() else {
            return;
        };
        let projection = Projection::new(canvas, *self.document.viewport());
        let mut draft = pending.draft.clone();

        let mut exit = None;
        egui::Area::new(egui::Id::new("pending_text"))
            .fixed_pos(projection.to_screen(pending.position))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut draft)
                        .hint_text("Type, then press Enter")
                        .desired_width(160.0),
                );
                // A fresh draft steals focus this frame; the editor it
                // replaced losing focus is not a blur of this one.
                let refocus = std::mem::take(&mut self.focus_text);
                if refocus {
                    response.request_focus();
                }
                let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));
                exit = draft_exit(response.lost_focus() && !refocus, escape);
            });

        self.document.set_text_draft(draft);
        match exit {
            Some(DraftExit::Commit) => {
                self.document.commit_text();
            }
            Some(DraftExit::Cancel) => self.document.cancel_text(),
            None => {}
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = StoredState {
            config: self.document.config().clone(),
            snapshot: self.document.snapshot(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &state);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !ctx.wants_keyboard_input() {
            for action in ctx.input(input::actions_from_input) {
                log::debug!("key action: {:?}", action);
                self.transform = None;
                self.document.dispatch(action);
            }
        }

        self.handle_dropped_files(ctx);
        panels::tools_panel(self, ctx);
        let canvas = panels::central_panel(self, ctx);
        self.show_pending_text(ctx, canvas);
        self.textures.retain(self.document.referenced_image_sources());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_without_enter_commits() {
        assert_eq!(draft_exit(true, false), Some(DraftExit::Commit));
    }

    #[test]
    fn escape_cancels() {
        assert_eq!(draft_exit(true, true), Some(DraftExit::Cancel));
    }

    #[test]
    fn focused_editor_stays_open() {
        assert_eq!(draft_exit(false, false), None);
        assert_eq!(draft_exit(false, true), None);
    }

    #[test]
    fn opening_the_editor_does_not_commit() {
        let mut app = PaintApp::default();
        app.set_tool(Tool::Text);
        app.document_mut()
            .handle_pointer(PointerEvent::new(PointerEventKind::Down, Some(Pos2::new(40.0, 40.0))));
        app.document_mut().set_text_draft("note");

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let canvas = Rect::from_min_size(Pos2::ZERO, Vec2::new(700.0, 550.0));
            app.show_pending_text(ctx, canvas);
        });
        assert!(app.document().pending_text().is_some());
        assert!(app.document().layers().is_empty());
    }
}
