mod entry;

pub use entry::{EntryPayload, HistoryEntry, Operation, UndoOutcome};

use crate::layer::Layers;
use crate::selection::Selection;

/// Append-only undo log. There is no redo.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        log::debug!(
            "history: push {:?} {} {}",
            entry.operation(),
            entry.kind,
            entry.id
        );
        self.entries.push(entry);
    }

    /// Pops the newest entry and reverts it against `layers`.
    pub fn undo(&mut self, layers: &mut Layers, selection: &mut Selection) -> UndoOutcome {
        let Some(entry) = self.entries.pop() else {
            log::debug!("history: nothing to undo");
            return UndoOutcome::NothingToUndo;
        };

        let outcome = entry.revert(layers, selection);
        if let UndoOutcome::TargetMissing { operation, kind, id } = outcome {
            log::debug!("history: dropped stale {operation:?} entry for {kind} {id}");
        }
        outcome
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
