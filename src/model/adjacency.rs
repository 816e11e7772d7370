//! Adjacency: who reports to whom.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// One employee's place in the hierarchy.
///
/// `supervisor` and the supervisor's `subordinates` always agree: if A names
/// B as supervisor, A appears exactly once in B's subordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacencyEntry {
    /// `None` only for the root.
    pub supervisor: Option<EmployeeId>,

    /// Direct reports, in the order they were attached.
    pub subordinates: Vec<EmployeeId>,
}

/// A full copy of the id → adjacency mapping at one point in time.
///
/// Snapshots own their data and expose no mutation, so a stored snapshot
/// cannot drift when the live tree changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencySnapshot {
    entries: BTreeMap<EmployeeId, AdjacencyEntry>,
}

impl AdjacencySnapshot {
    pub(crate) fn from_entries(entries: BTreeMap<EmployeeId, AdjacencyEntry>) -> Self {
        Self { entries }
    }

    pub(crate) fn entries(&self) -> &BTreeMap<EmployeeId, AdjacencyEntry> {
        &self.entries
    }

    pub fn get(&self, id: EmployeeId) -> Option<&AdjacencyEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> btree_map::Iter<'_, EmployeeId, AdjacencyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first employee without a supervisor, if any.
    pub fn root(&self) -> Option<EmployeeId> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.supervisor.is_none())
            .map(|(id, _)| *id)
    }
}

impl<'a> IntoIterator for &'a AdjacencySnapshot {
    type Item = (&'a EmployeeId, &'a AdjacencyEntry);
    type IntoIter = btree_map::Iter<'a, EmployeeId, AdjacencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
