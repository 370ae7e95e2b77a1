use egui::Pos2;

use crate::id_generator::ShapeId;
use crate::shape::Text;

/// A text placement waiting for its content.
///
/// Created on pointer-down with the text tool; the host feeds typed
/// characters into `draft` and commits on blur or Enter.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingText {
    pub id: ShapeId,
    pub position: Pos2,
    pub draft: String,
}

impl PendingText {
    pub fn new(id: ShapeId, position: Pos2) -> Self {
        Self {
            id,
            position,
            draft: String::new(),
        }
    }

    /// Turns the draft into a text shape. Blank drafts produce nothing.
    pub fn into_text(self, color: &str) -> Option<Text> {
        if self.draft.trim().is_empty() {
            return None;
        }
        Some(Text::new(self.id, color, self.position, self.draft))
    }
}
