//! History manager: a linear, cursor-addressed log of adjacency snapshots.
//!
//! ```text
//! entries:  [bootstrap] [3-5] [8-2] [4-1]
//! cursor:                       ^
//! ```
//!
//! Undo and redo only move the cursor. Recording a new action first drops
//! everything after the cursor, so an undone branch can never be redone
//! once something else has happened.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::model::{ActionLabel, AdjacencySnapshot};

/// One recorded state and the action that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub label: ActionLabel,
    pub snapshot: AdjacencySnapshot,
    pub recorded_at: Timestamp,
}

/// Linear undo/redo log.
///
/// The cursor always points at the entry matching the live tree.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot, discarding any entries after the cursor.
    ///
    /// The first call seeds index 0 and leaves the cursor there.
    pub fn record(&mut self, label: ActionLabel, snapshot: AdjacencySnapshot) {
        let entry = HistoryEntry {
            label,
            snapshot,
            recorded_at: Timestamp::now(),
        };
        if self.entries.is_empty() {
            self.entries.push(entry);
            self.cursor = 0;
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry and returns the snapshot to restore.
    ///
    /// `None` at the start of history.
    pub fn undo(&mut self) -> Option<&AdjacencySnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].snapshot)
    }

    /// Steps forward one entry and returns the snapshot to restore.
    ///
    /// `None` at the end of history.
    pub fn redo(&mut self) -> Option<&AdjacencySnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor].snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at the cursor.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut HistoryEntry> {
        self.entries.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use crate::model::{AdjacencyEntry, EmployeeId};

    /// A distinguishable snapshot: a single root with the given id.
    fn snapshot(raw: u64) -> AdjacencySnapshot {
        let mut entries = BTreeMap::new();
        entries.insert(EmployeeId::new(raw), AdjacencyEntry::default());
        AdjacencySnapshot::from_entries(entries)
    }

    fn label(employee: u64, supervisor: u64) -> ActionLabel {
        ActionLabel::Move {
            employee: EmployeeId::new(employee),
            supervisor: EmployeeId::new(supervisor),
        }
    }

    fn seeded() -> History {
        let mut history = History::new();
        history.record(ActionLabel::Bootstrap, snapshot(0));
        history
    }

    #[test]
    fn bootstrap_seeds_index_zero() {
        let history = seeded();

        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current().unwrap().label, ActionLabel::Bootstrap);
    }

    #[test]
    fn record_advances_cursor_to_last() {
        let mut history = seeded();
        history.record(label(2, 1), snapshot(1));
        history.record(label(3, 1), snapshot(2));

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn undo_and_redo_step_by_one() {
        let mut history = seeded();
        history.record(label(2, 1), snapshot(1));
        history.record(label(3, 1), snapshot(2));

        assert_eq!(history.undo(), Some(&snapshot(1)));
        assert_eq!(history.undo(), Some(&snapshot(0)));
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.redo(), Some(&snapshot(1)));
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn undo_at_start_is_a_no_op() {
        let mut history = seeded();

        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn redo_at_end_is_a_no_op() {
        let mut history = seeded();
        history.record(label(2, 1), snapshot(1));

        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn recording_after_undo_discards_redo_branch() {
        let mut history = seeded();
        history.record(label(2, 1), snapshot(1));
        history.undo();
        history.record(label(3, 1), snapshot(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert!(history.redo().is_none());
        assert_eq!(history.entries()[1].label, label(3, 1));
    }

    #[test]
    fn empty_history_has_nothing_to_traverse() {
        let mut history = History::new();

        assert!(history.is_empty());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }
}
