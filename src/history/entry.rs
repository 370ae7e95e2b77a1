use egui::{Pos2, Vec2};

use crate::id_generator::ShapeId;
use crate::layer::Layers;
use crate::selection::Selection;
use crate::shape::{Shape, ShapeKind};

/// What a history entry recorded, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Delete,
    Resize,
    Drag,
}

/// State captured at gesture start, enough to revert the gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPayload {
    Add,
    /// Deep copy of the shape as it was when deleted.
    Delete { record: Shape },
    /// The position is captured too, since an anchored resize moves it.
    Resize { scale: Vec2, position: Pos2 },
    Drag { position: Pos2 },
}

/// One reversible record in the undo log.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub kind: ShapeKind,
    pub id: ShapeId,
    pub payload: EntryPayload,
}

/// Result of a single undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The log was empty.
    NothingToUndo,
    Reverted {
        operation: Operation,
        kind: ShapeKind,
        id: ShapeId,
    },
    /// The entry was consumed but its target no longer exists.
    TargetMissing {
        operation: Operation,
        kind: ShapeKind,
        id: ShapeId,
    },
}

impl UndoOutcome {
    pub fn is_reverted(&self) -> bool {
        matches!(self, UndoOutcome::Reverted { .. })
    }
}

impl HistoryEntry {
    pub fn add(kind: ShapeKind, id: ShapeId) -> Self {
        Self {
            kind,
            id,
            payload: EntryPayload::Add,
        }
    }

    pub fn delete(record: &Shape) -> Self {
        Self {
            kind: record.kind(),
            id: record.id(),
            payload: EntryPayload::Delete {
                record: record.clone(),
            },
        }
    }

    /// Captures the current scale and position of `shape`; call before resizing.
    pub fn resize(shape: &Shape) -> Self {
        Self {
            kind: shape.kind(),
            id: shape.id(),
            payload: EntryPayload::Resize {
                scale: shape.scale(),
                position: shape.position(),
            },
        }
    }

    /// Captures the current position of `shape`; call before dragging.
    pub fn drag(shape: &Shape) -> Self {
        Self {
            kind: shape.kind(),
            id: shape.id(),
            payload: EntryPayload::Drag {
                position: shape.position(),
            },
        }
    }

    pub fn operation(&self) -> Operation {
        match self.payload {
            EntryPayload::Add => Operation::Add,
            EntryPayload::Delete { .. } => Operation::Delete,
            EntryPayload::Resize { .. } => Operation::Resize,
            EntryPayload::Drag { .. } => Operation::Drag,
        }
    }

    /// Applies the inverse of this entry.
    pub(crate) fn revert(self, layers: &mut Layers, selection: &mut Selection) -> UndoOutcome {
        let (operation, kind, id) = (self.operation(), self.kind, self.id);

        let applied = match self.payload {
            EntryPayload::Add => {
                selection.forget(kind, id);
                layers.remove(kind, id).is_some()
            }
            EntryPayload::Delete { record } => {
                if layers.contains(kind, id) {
                    false
                } else {
                    layers.push(record);
                    true
                }
            }
            EntryPayload::Resize { scale, position } => match layers.get_mut(kind, id) {
                Some(shape) => {
                    shape.set_scale(scale);
                    shape.set_position(position);
                    true
                }
                None => false,
            },
            EntryPayload::Drag { position } => match layers.get_mut(kind, id) {
                Some(shape) => {
                    shape.set_position(position);
                    true
                }
                None => false,
            },
        };

        if applied {
            UndoOutcome::Reverted { operation, kind, id }
        } else {
            UndoOutcome::TargetMissing { operation, kind, id }
        }
    }
}
