//! The document aggregate.
//!
//! [`Document`] owns the shape collections, the undo log, the selection, the
//! viewport and the active tool and color. Every edit goes through one of
//! its methods, on one thread, in event order. History entries are always
//! pushed before the mutation they describe.

use egui::{Pos2, Vec2};

use crate::config::PaintConfig;
use crate::error::{PaintError, PaintResult};
use crate::filters::ImageFilters;
use crate::geometry::{self, Metrics};
use crate::history::{EntryPayload, History, HistoryEntry, UndoOutcome};
use crate::id_generator::{ShapeId, generate_id};
use crate::input::{Action, PointerEvent, PointerEventKind};
use crate::layer::Layers;
use crate::persistence::{PersistenceResult, Snapshot};
use crate::selection::Selection;
use crate::shape::{Image, ImageSource, Shape, ShapeKind};
use crate::tools::{self, Gesture, PendingText, Tool};
use crate::viewport::{Viewport, ZoomDirection};

#[derive(Debug, Clone)]
pub struct Document {
    layers: Layers,
    history: History,
    selection: Selection,
    viewport: Viewport,
    tool: Tool,
    color: String,
    filters: ImageFilters,
    gesture: Option<Gesture>,
    pending_text: Option<PendingText>,
    config: PaintConfig,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(PaintConfig::default())
    }
}

impl Document {
    pub fn new(config: PaintConfig) -> Self {
        Self {
            layers: Layers::new(),
            history: History::new(),
            selection: Selection::default(),
            viewport: Viewport::default(),
            tool: Tool::default(),
            color: config.default_color.clone(),
            filters: ImageFilters::default(),
            gesture: None,
            pending_text: None,
            config,
        }
    }

    // --- accessors ---

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    pub fn shapes(&self, kind: ShapeKind) -> &[Shape] {
        self.layers.layer(kind)
    }

    pub fn shape(&self, kind: ShapeKind, id: ShapeId) -> Option<&Shape> {
        self.layers.get(kind, id)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn selection(&self) -> Option<(ShapeKind, ShapeId)> {
        self.selection.get()
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        let (kind, id) = self.selection.get()?;
        self.layers.get(kind, id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn metrics(&self) -> Metrics {
        self.config.metrics()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn filters(&self) -> ImageFilters {
        self.filters
    }

    /// Stores new filter values. Filter changes are not recorded in history.
    pub fn set_filters(&mut self, filters: ImageFilters) {
        self.filters = filters.clamped();
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn pending_text(&self) -> Option<&PendingText> {
        self.pending_text.as_ref()
    }

    /// Switches tools, ending any gesture and committing pending text first.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.gesture.take().is_some() {
            log::debug!("tool switch ended an active gesture");
        }
        self.commit_text();

        if self.tool != tool {
            log::debug!("tool: {} -> {}", self.tool, tool);
            self.tool = tool;
        }
    }

    // --- input ---

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::DeleteSelected => {
                self.delete_selected();
            }
            Action::ClearAll => self.clear(),
            Action::UseTool(tool) => self.set_tool(tool),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event.position),
            PointerEventKind::Move => self.pointer_move(event.position),
            PointerEventKind::Up => self.pointer_up(),
            PointerEventKind::Click => self.click(event.position),
        }
    }

    /// Maps a screen position into document space. An unknown pointer is
    /// treated as the screen origin.
    pub fn to_document(&self, screen: Option<Pos2>) -> Pos2 {
        self.viewport.to_document(screen.unwrap_or(Pos2::ZERO))
    }

    /// Topmost shape under a screen position.
    pub fn hit_test(&self, screen: Option<Pos2>) -> Option<(ShapeKind, ShapeId)> {
        geometry::hit_test(&self.layers, self.to_document(screen), &self.metrics())
    }

    /// Starts a gesture. Drawing tools create their shape here and record
    /// its Add entry; later samples only grow it.
    pub fn pointer_down(&mut self, screen: Option<Pos2>) {
        let at = self.to_document(screen);
        if geometry::hit_test(&self.layers, at, &self.metrics()).is_none() {
            self.selection.clear();
        }

        match self.tool {
            Tool::Select => return,
            Tool::Move => {
                self.gesture = Some(Gesture::Panning {
                    last: screen.unwrap_or(Pos2::ZERO),
                });
                return;
            }
            Tool::Text => {
                self.commit_text();
                self.pending_text = Some(PendingText::new(generate_id(), at));
                self.gesture = Some(Gesture::Idle);
                return;
            }
            _ => {}
        }

        let id = generate_id();
        let Some(shape) = tools::start_shape(self.tool, id, &self.color, at) else {
            self.gesture = Some(Gesture::Idle);
            return;
        };

        let kind = shape.kind();
        log::debug!("gesture: begin {} {} at {:?}", kind, id, at);
        self.history.push(HistoryEntry::add(kind, id));
        self.layers.push(shape);
        self.gesture = Some(Gesture::Drawing { kind, id });
    }

    /// Feeds a pointer sample to the active gesture; ignored when idle.
    pub fn pointer_move(&mut self, screen: Option<Pos2>) {
        match self.gesture {
            Some(Gesture::Drawing { kind, id }) if self.tool.is_drawing() => {
                let at = self.to_document(screen);
                if let Some(shape) = self.layers.get_mut(kind, id) {
                    tools::extend_shape(shape, at);
                }
            }
            Some(Gesture::Panning { last }) => {
                let now = screen.unwrap_or(Pos2::ZERO);
                self.viewport.pan_by(now - last);
                self.gesture = Some(Gesture::Panning { last: now });
            }
            _ => {}
        }
    }

    /// Ends the gesture. Shapes were committed as they grew, so there is
    /// nothing to finalize.
    pub fn pointer_up(&mut self) {
        self.gesture = None;
    }

    /// Click handling: zoom under the zoom tools, picking under select.
    pub fn click(&mut self, screen: Option<Pos2>) {
        let pointer = screen.unwrap_or(Pos2::ZERO);
        match self.tool {
            Tool::ZoomIn => self.zoom_at(pointer, ZoomDirection::In),
            Tool::ZoomOut => self.zoom_at(pointer, ZoomDirection::Out),
            Tool::Select => match self.hit_test(screen) {
                Some((kind, id)) => {
                    self.select(kind, id);
                }
                None => self.selection.clear(),
            },
            _ => {}
        }
    }

    pub fn zoom_at(&mut self, pointer: Pos2, direction: ZoomDirection) {
        self.viewport.zoom_at(pointer, direction, self.config.zoom_factor);
    }

    /// Back to scale 1 and no pan.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    // --- text ---

    /// Replaces the content typed so far for the pending text.
    pub fn set_text_draft(&mut self, draft: impl Into<String>) {
        if let Some(pending) = &mut self.pending_text {
            pending.draft = draft.into();
        }
    }

    /// Commits the pending text as a shape and records its Add entry.
    ///
    /// A blank draft is discarded without creating a shape.
    pub fn commit_text(&mut self) -> Option<ShapeId> {
        let pending = self.pending_text.take()?;
        let Some(text) = pending.into_text(&self.color) else {
            log::debug!("text: discarded blank draft");
            return None;
        };

        let id = text.base.id;
        self.history.push(HistoryEntry::add(ShapeKind::Text, id));
        self.layers.push(text.into());
        Some(id)
    }

    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }

    // --- images ---

    /// Places an image at the origin with the default half-canvas size.
    pub fn insert_image(&mut self, source: ImageSource) -> ShapeId {
        let size = self.config.default_image_size();
        self.insert_image_sized(source, Pos2::ZERO, size)
    }

    pub fn insert_image_sized(&mut self, source: ImageSource, position: Pos2, size: Vec2) -> ShapeId {
        let id = generate_id();
        log::info!("Placing image {} from {}", id, source.as_str());
        self.history.push(HistoryEntry::add(ShapeKind::Image, id));
        self.layers.push(Image::new(id, source, position, size).into());
        id
    }

    // --- selection and transforms ---

    /// Selects a shape. Only the select tool can select, and the shape has
    /// to exist.
    pub fn select(&mut self, kind: ShapeKind, id: ShapeId) -> bool {
        if !self.tool.allows_transform() || !self.layers.contains(kind, id) {
            return false;
        }
        self.selection.set(kind, id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Removes the selected shape, recording a deep copy first.
    pub fn delete_selected(&mut self) -> Option<Shape> {
        let (kind, id) = self.selection.get()?;
        let Some(record) = self.layers.get(kind, id) else {
            self.selection.clear();
            return None;
        };

        self.history.push(HistoryEntry::delete(record));
        self.selection.clear();
        self.layers.remove(kind, id)
    }

    fn transform_target(&self, kind: ShapeKind, id: ShapeId) -> PaintResult<&Shape> {
        if !self.tool.allows_transform() {
            return Err(PaintError::TransformDisabled { tool: self.tool });
        }
        self.layers
            .get(kind, id)
            .ok_or(PaintError::ShapeNotFound { kind, id })
    }

    /// Records the shape's position ahead of a drag. Only the select tool
    /// may start one.
    pub fn begin_drag(&mut self, kind: ShapeKind, id: ShapeId) -> PaintResult<()> {
        let entry = HistoryEntry::drag(self.transform_target(kind, id)?);
        self.history.push(entry);
        Ok(())
    }

    /// Writes the dropped position. No clamping is applied.
    pub fn end_drag(&mut self, kind: ShapeKind, id: ShapeId, position: Pos2) -> bool {
        match self.layers.get_mut(kind, id) {
            Some(shape) => {
                shape.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Records the shape's scale ahead of a resize.
    pub fn begin_resize(&mut self, kind: ShapeKind, id: ShapeId) -> PaintResult<()> {
        let entry = HistoryEntry::resize(self.transform_target(kind, id)?);
        self.history.push(entry);
        Ok(())
    }

    pub fn end_resize(&mut self, kind: ShapeKind, id: ShapeId, scale: Vec2) -> bool {
        match self.layers.get_mut(kind, id) {
            Some(shape) => {
                shape.set_scale(scale);
                true
            }
            None => false,
        }
    }

    /// Applies `scale`, then shifts the shape so the top-left corner of its
    /// bounding box lands on `anchor`. This is how the resize handle keeps the
    /// opposite corner in place.
    pub fn end_resize_anchored(
        &mut self,
        kind: ShapeKind,
        id: ShapeId,
        scale: Vec2,
        anchor: Pos2,
    ) -> bool {
        let metrics = self.metrics();
        let Some(shape) = self.layers.get_mut(kind, id) else {
            return false;
        };
        shape.set_scale(scale);
        let shift = anchor - geometry::shape_bounds(shape, &metrics).min;
        shape.set_position(shape.position() + shift);
        true
    }

    // --- history ---

    pub fn undo(&mut self) -> UndoOutcome {
        if let Some(Gesture::Drawing { .. }) = self.gesture {
            self.gesture = None;
        }
        self.history.undo(&mut self.layers, &mut self.selection)
    }

    /// Empties every collection and the selection. History and viewport are
    /// left alone, so the clear itself cannot be undone.
    pub fn clear(&mut self) {
        log::info!("Clearing {} shapes", self.layers.len());
        self.layers.clear();
        self.selection.clear();
        self.gesture = None;
        self.pending_text = None;
    }

    // --- persistence ---

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.layers, self.filters)
    }

    /// Replaces the collections and filters with the snapshot's.
    ///
    /// On error the document is left untouched.
    pub fn restore(&mut self, snapshot: Snapshot) -> PersistenceResult<()> {
        let (layers, filters) = snapshot.into_layers()?;
        self.layers = layers;
        self.filters = filters;
        self.selection.clear();
        self.gesture = None;
        self.pending_text = None;
        Ok(())
    }

    /// Image sources the host needs to resolve before drawing.
    /// Sources of live images plus those of deleted images that undo can
    /// bring back.
    pub fn referenced_image_sources(&self) -> impl Iterator<Item = &ImageSource> {
        let deleted = self
            .history
            .entries()
            .iter()
            .filter_map(|entry| match &entry.payload {
                EntryPayload::Delete {
                    record: Shape::Image(image),
                } => Some(&image.source),
                _ => None,
            });
        self.image_sources().chain(deleted)
    }

    pub fn image_sources(&self) -> impl Iterator<Item = &ImageSource> {
        self.layers.layer(ShapeKind::Image).iter().filter_map(|shape| match shape {
            Shape::Image(image) => Some(&image.source),
            _ => None,
        })
    }
}
