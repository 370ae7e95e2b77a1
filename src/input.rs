use egui::{Key, Modifiers, Pos2};

use crate::tools::Tool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Click,
}

/// A pointer sample in screen coordinates.
///
/// `position` is `None` when the host could not resolve the pointer (for
/// example an event fired outside the canvas); the document treats that as
/// the screen origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Option<Pos2>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Option<Pos2>) -> Self {
        Self { kind, position }
    }

    pub fn down(position: Pos2) -> Self {
        Self::new(PointerEventKind::Down, Some(position))
    }

    pub fn moved(position: Pos2) -> Self {
        Self::new(PointerEventKind::Move, Some(position))
    }

    pub fn up(position: Pos2) -> Self {
        Self::new(PointerEventKind::Up, Some(position))
    }

    pub fn click(position: Pos2) -> Self {
        Self::new(PointerEventKind::Click, Some(position))
    }

    /// Screen position with the origin fallback applied.
    pub fn screen_pos(&self) -> Pos2 {
        self.position.unwrap_or(Pos2::ZERO)
    }
}

/// Discrete editor commands coming from buttons or key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Undo,
    DeleteSelected,
    ClearAll,
    UseTool(Tool),
}

impl Action {
    /// Maps a key press to its binding.
    ///
    /// Ctrl+Z undo, Ctrl+D delete, Ctrl+K clear; bare `s`, `r`, `c`, `a`
    /// and `f` pick the select, rectangle, circle, arrow and freehand tools.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Action> {
        if modifiers.command || modifiers.ctrl {
            return match key {
                Key::Z => Some(Action::Undo),
                Key::D => Some(Action::DeleteSelected),
                Key::K => Some(Action::ClearAll),
                _ => None,
            };
        }
        if modifiers.alt || modifiers.shift {
            return None;
        }

        let tool = match key {
            Key::S => Tool::Select,
            Key::R => Tool::Rectangle,
            Key::C => Tool::Circle,
            Key::A => Tool::Arrow,
            Key::F => Tool::Freehand,
            _ => return None,
        };
        Some(Action::UseTool(tool))
    }
}

/// Collects the actions bound to keys pressed this frame.
pub fn actions_from_input(input: &egui::InputState) -> Vec<Action> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => Action::from_key(*key, *modifiers),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_bindings() {
        assert_eq!(Action::from_key(Key::Z, Modifiers::CTRL), Some(Action::Undo));
        assert_eq!(Action::from_key(Key::D, Modifiers::CTRL), Some(Action::DeleteSelected));
        assert_eq!(Action::from_key(Key::K, Modifiers::CTRL), Some(Action::ClearAll));
        assert_eq!(Action::from_key(Key::Q, Modifiers::CTRL), None);
    }

    #[test]
    fn bare_letters_pick_tools() {
        assert_eq!(
            Action::from_key(Key::R, Modifiers::NONE),
            Some(Action::UseTool(Tool::Rectangle))
        );
        assert_eq!(
            Action::from_key(Key::F, Modifiers::NONE),
            Some(Action::UseTool(Tool::Freehand))
        );
        assert_eq!(Action::from_key(Key::Z, Modifiers::NONE), None);
    }

    #[test]
    fn missing_pointer_falls_back_to_origin() {
        let event = PointerEvent::new(PointerEventKind::Down, None);
        assert_eq!(event.screen_pos(), Pos2::ZERO);
    }
}
