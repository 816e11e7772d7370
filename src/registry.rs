//! Node registry: owns every employee record, keyed by id.
//!
//! Records are only ever added. Ids come from an [`IdSequence`] owned by the
//! registry, so two organizations in one process never share a counter.

use std::collections::{BTreeMap, btree_map};

use crate::{
    error::{Lookup, OrgError, Result},
    model::{Employee, EmployeeId},
};

/// Monotonic id allocator. Ids are never reused.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// A sequence whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    fn allocate(&mut self) -> EmployeeId {
        let id = EmployeeId::new(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// All employee records of one organization.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    records: BTreeMap<EmployeeId, Employee>,
    /// First id registered under each name.
    by_name: BTreeMap<String, EmployeeId>,
    ids: IdSequence,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::with_sequence(IdSequence::new())
    }

    pub fn with_sequence(ids: IdSequence) -> Self {
        Self {
            records: BTreeMap::new(),
            by_name: BTreeMap::new(),
            ids,
        }
    }

    /// Allocates a fresh id and stores a record for `name`.
    pub fn register(&mut self, name: impl Into<String>) -> &Employee {
        let id = self.ids.allocate();
        let name = name.into();
        self.by_name.entry(name.clone()).or_insert(id);
        self.records.entry(id).or_insert(Employee { id, name })
    }

    pub fn resolve(&self, id: EmployeeId) -> Result<&Employee> {
        self.records
            .get(&id)
            .ok_or(OrgError::NotFound(Lookup::Id(id)))
    }

    /// Resolves a display name. With duplicate names the lowest id wins.
    pub fn resolve_by_name(&self, name: &str) -> Result<&Employee> {
        self.by_name
            .get(name)
            .and_then(|id| self.records.get(id))
            .ok_or_else(|| OrgError::NotFound(Lookup::Name(name.to_string())))
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending id order.
    pub fn iter(&self) -> btree_map::Values<'_, EmployeeId, Employee> {
        self.records.values()
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.records.keys().copied()
    }
}
