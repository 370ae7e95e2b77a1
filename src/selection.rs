use crate::id_generator::ShapeId;
use crate::shape::ShapeKind;

/// The single selected shape, referenced by kind and id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<(ShapeKind, ShapeId)>,
}

impl Selection {
    pub fn get(&self) -> Option<(ShapeKind, ShapeId)> {
        self.current
    }

    /// Replaces whatever was selected before.
    pub fn set(&mut self, kind: ShapeKind, id: ShapeId) {
        self.current = Some((kind, id));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_selected(&self, kind: ShapeKind, id: ShapeId) -> bool {
        self.current == Some((kind, id))
    }

    /// Drops the selection if it points at `(kind, id)`.
    pub fn forget(&mut self, kind: ShapeKind, id: ShapeId) {
        if self.is_selected(kind, id) {
            self.current = None;
        }
    }
}
