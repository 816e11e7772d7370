//! Tree store: supervisor/subordinate relationships over the registry.
//!
//! The id-keyed adjacency map is the single source of truth. Every mutation
//! is checked before anything is written, so a rejected mutation leaves the
//! store exactly as it was.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{
    error::{Lookup, OrgError, Result},
    model::{AdjacencyEntry, AdjacencySnapshot, EmployeeId, OrgNode},
    moves::MovePlan,
    registry::{IdSequence, NodeRegistry},
};

/// Live hierarchy of one organization.
#[derive(Debug, Clone)]
pub struct TreeStore {
    registry: NodeRegistry,
    adjacency: BTreeMap<EmployeeId, AdjacencyEntry>,
    root: EmployeeId,
}

impl TreeStore {
    /// Starts building a tree whose root is named `root_name`.
    pub fn builder(root_name: impl Into<String>) -> TreeBuilder {
        TreeBuilder::new(root_name)
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn root(&self) -> EmployeeId {
        self.root
    }

    pub fn adjacency_of(&self, id: EmployeeId) -> Result<&AdjacencyEntry> {
        self.adjacency
            .get(&id)
            .ok_or(OrgError::NotFound(Lookup::Id(id)))
    }

    pub fn supervisor_of(&self, id: EmployeeId) -> Result<Option<EmployeeId>> {
        Ok(self.adjacency_of(id)?.supervisor)
    }

    pub fn subordinates_of(&self, id: EmployeeId) -> Result<&[EmployeeId]> {
        Ok(&self.adjacency_of(id)?.subordinates)
    }

    /// Whether `candidate` sits strictly below `ancestor`.
    ///
    /// Walks the supervisor chain up from `candidate`: O(depth).
    pub fn is_descendant(&self, ancestor: EmployeeId, candidate: EmployeeId) -> bool {
        chain_reaches(&self.adjacency, candidate, ancestor)
    }

    /// Number of supervisor links between `id` and the root.
    pub fn depth_of(&self, id: EmployeeId) -> Result<usize> {
        let mut depth = 0;
        let mut current = self.supervisor_of(id)?;
        while let Some(next) = current {
            depth += 1;
            current = self.supervisor_of(next)?;
        }
        Ok(depth)
    }

    /// Deep copy of the full adjacency mapping.
    pub fn snapshot(&self) -> AdjacencySnapshot {
        AdjacencySnapshot::from_entries(self.adjacency.clone())
    }

    /// Replaces the live adjacency with `snapshot`.
    ///
    /// The snapshot must cover exactly the registered employees and form a
    /// valid tree. Employee records are left untouched.
    pub fn restore(&mut self, snapshot: &AdjacencySnapshot) -> Result<()> {
        let entries = snapshot.entries();
        let registered: BTreeSet<EmployeeId> = self.registry.ids().collect();
        let covered: BTreeSet<EmployeeId> = entries.keys().copied().collect();
        if registered != covered {
            return Err(OrgError::InvalidTopology(format!(
                "snapshot covers {} employees, registry has {}",
                covered.len(),
                registered.len()
            )));
        }

        let root = check_topology(entries)?;
        self.adjacency = entries.clone();
        self.root = root;
        Ok(())
    }

    /// Nested view of the whole hierarchy, rooted at the root.
    ///
    /// Built bottom-up from a pre-order walk, so depth costs heap, not stack.
    pub fn org_view(&self) -> OrgNode {
        let mut order = Vec::with_capacity(self.adjacency.len());
        let mut pending = self.children(self.root).to_vec();
        while let Some(id) = pending.pop() {
            order.push(id);
            pending.extend_from_slice(self.children(id));
        }

        // Reversed pre-order visits every child before its supervisor.
        let mut built = BTreeMap::new();
        for id in order.into_iter().rev() {
            let node = self.assemble(id, &mut built);
            built.insert(id, node);
        }
        self.assemble(self.root, &mut built)
    }

    fn children(&self, id: EmployeeId) -> &[EmployeeId] {
        self.adjacency
            .get(&id)
            .map(|entry| entry.subordinates.as_slice())
            .unwrap_or_default()
    }

    /// Takes the finished views of `id`'s reports out of `built`.
    fn assemble(&self, id: EmployeeId, built: &mut BTreeMap<EmployeeId, OrgNode>) -> OrgNode {
        let name = self
            .registry
            .resolve(id)
            .map(|employee| employee.name.clone())
            .unwrap_or_default();
        let subordinates = self
            .children(id)
            .iter()
            .filter_map(|child| built.remove(child))
            .collect();
        OrgNode {
            id,
            name,
            subordinates,
        }
    }

    /// Applies a move computed by [`crate::moves::plan`].
    ///
    /// Re-checks the plan against the live tree first; a plan that would
    /// break the tree, or that no longer matches it, is refused with
    /// [`OrgError::InvalidTopology`].
    pub(crate) fn apply_move(&mut self, plan: &MovePlan) -> Result<()> {
        let MovePlan {
            employee,
            from,
            to,
            ref promoted,
        } = *plan;

        for id in [employee, from, to] {
            if !self.adjacency.contains_key(&id) {
                return Err(OrgError::InvalidTopology(format!(
                    "{id} is not a registered employee"
                )));
            }
        }
        if employee == self.root {
            return Err(OrgError::InvalidTopology(format!(
                "moving {employee} would leave the tree without a root"
            )));
        }
        if employee == to || self.is_descendant(employee, to) {
            return Err(OrgError::InvalidTopology(format!(
                "placing {employee} under {to} would create a cycle"
            )));
        }
        let current = self.adjacency_of(employee)?;
        if current.supervisor != Some(from) || current.subordinates != *promoted {
            return Err(OrgError::InvalidTopology(format!(
                "move plan for {employee} is stale"
            )));
        }

        // All ids were checked above; nothing below can fail.
        let carried = std::mem::take(&mut self.entry_mut(employee)?.subordinates);
        for subordinate in &carried {
            self.entry_mut(*subordinate)?.supervisor = Some(from);
        }
        let previous = self.entry_mut(from)?;
        previous.subordinates.retain(|id| *id != employee);
        previous.subordinates.extend(carried);

        self.entry_mut(employee)?.supervisor = Some(to);
        self.entry_mut(to)?.subordinates.push(employee);
        Ok(())
    }

    fn entry_mut(&mut self, id: EmployeeId) -> Result<&mut AdjacencyEntry> {
        self.adjacency
            .get_mut(&id)
            .ok_or(OrgError::NotFound(Lookup::Id(id)))
    }
}

/// Builds a [`TreeStore`]: register employees, wire edges, then validate.
///
/// Newly registered employees start unattached. [`TreeBuilder::build`]
/// refuses to finish until every one of them has a supervisor.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    registry: NodeRegistry,
    adjacency: BTreeMap<EmployeeId, AdjacencyEntry>,
    root: EmployeeId,
}

impl TreeBuilder {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self::with_sequence(IdSequence::new(), root_name)
    }

    pub fn with_sequence(ids: IdSequence, root_name: impl Into<String>) -> Self {
        let mut registry = NodeRegistry::with_sequence(ids);
        let root = registry.register(root_name).id;
        let mut adjacency = BTreeMap::new();
        adjacency.insert(root, AdjacencyEntry::default());
        Self {
            registry,
            adjacency,
            root,
        }
    }

    pub fn root(&self) -> EmployeeId {
        self.root
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Registers an employee, not yet attached to anyone.
    pub fn employee(&mut self, name: impl Into<String>) -> EmployeeId {
        let id = self.registry.register(name).id;
        self.adjacency.insert(id, AdjacencyEntry::default());
        id
    }

    /// Places `employee` under `supervisor`.
    ///
    /// The employee must be unattached and not the root, and the supervisor
    /// must not already report (transitively) to the employee.
    pub fn attach(&mut self, employee: EmployeeId, supervisor: EmployeeId) -> Result<()> {
        self.registry.resolve(employee)?;
        self.registry.resolve(supervisor)?;

        if employee == self.root {
            return Err(OrgError::InvalidTopology(format!(
                "root {employee} cannot report to anyone"
            )));
        }
        if let Some(existing) = self.adjacency.get(&employee).and_then(|e| e.supervisor) {
            return Err(OrgError::InvalidTopology(format!(
                "{employee} already reports to {existing}"
            )));
        }
        if employee == supervisor || chain_reaches(&self.adjacency, supervisor, employee) {
            return Err(OrgError::InvalidTopology(format!(
                "placing {employee} under {supervisor} would create a cycle"
            )));
        }

        if let Some(entry) = self.adjacency.get_mut(&employee) {
            entry.supervisor = Some(supervisor);
        }
        if let Some(entry) = self.adjacency.get_mut(&supervisor) {
            entry.subordinates.push(employee);
        }
        Ok(())
    }

    /// Like [`TreeBuilder::attach`], resolving both sides by display name.
    pub fn attach_by_name(&mut self, supervisor: &str, employee: &str) -> Result<()> {
        let supervisor = self.registry.resolve_by_name(supervisor)?.id;
        let employee = self.registry.resolve_by_name(employee)?.id;
        self.attach(employee, supervisor)
    }

    /// Employees other than the root that have no supervisor yet.
    pub fn unattached(&self) -> Vec<EmployeeId> {
        self.adjacency
            .iter()
            .filter(|(id, entry)| **id != self.root && entry.supervisor.is_none())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Attaches every unattached employee directly under the root.
    ///
    /// Returns the ids that were adopted, in ascending order.
    pub fn adopt_orphans(&mut self) -> Vec<EmployeeId> {
        let orphans = self.unattached();
        for orphan in &orphans {
            if let Some(entry) = self.adjacency.get_mut(orphan) {
                entry.supervisor = Some(self.root);
            }
        }
        if let Some(root) = self.adjacency.get_mut(&self.root) {
            root.subordinates.extend(orphans.iter().copied());
        }
        orphans
    }

    /// Validates the complete topology and produces the store.
    pub fn build(self) -> Result<TreeStore> {
        let root = check_topology(&self.adjacency)?;
        Ok(TreeStore {
            registry: self.registry,
            adjacency: self.adjacency,
            root,
        })
    }
}

/// Whether following supervisor links up from `start` reaches `target`.
///
/// Bounded by the number of entries, so a corrupt cycle cannot loop forever.
fn chain_reaches(
    adjacency: &BTreeMap<EmployeeId, AdjacencyEntry>,
    start: EmployeeId,
    target: EmployeeId,
) -> bool {
    let mut current = adjacency.get(&start).and_then(|entry| entry.supervisor);
    for _ in 0..adjacency.len() {
        match current {
            Some(id) if id == target => return true,
            Some(id) => current = adjacency.get(&id).and_then(|entry| entry.supervisor),
            None => return false,
        }
    }
    false
}

/// Checks the tree invariant and returns the root.
///
/// Exactly one entry lacks a supervisor, every supervisor/subordinate link
/// is mirrored exactly once on the other side, every reference is to a known
/// id, and every entry is reachable from the root.
fn check_topology(adjacency: &BTreeMap<EmployeeId, AdjacencyEntry>) -> Result<EmployeeId> {
    let roots: Vec<EmployeeId> = adjacency
        .iter()
        .filter(|(_, entry)| entry.supervisor.is_none())
        .map(|(id, _)| *id)
        .collect();
    let root = match roots.as_slice() {
        [root] => *root,
        [] => return Err(OrgError::InvalidTopology("no root employee".into())),
        many => {
            let ids: Vec<String> = many.iter().map(ToString::to_string).collect();
            return Err(OrgError::InvalidTopology(format!(
                "multiple employees without a supervisor: {}",
                ids.join(", ")
            )));
        }
    };

    for (id, entry) in adjacency {
        if let Some(supervisor) = entry.supervisor {
            let Some(parent) = adjacency.get(&supervisor) else {
                return Err(OrgError::InvalidTopology(format!(
                    "{id} reports to unregistered {supervisor}"
                )));
            };
            let mentions = parent.subordinates.iter().filter(|s| *s == id).count();
            if mentions != 1 {
                return Err(OrgError::InvalidTopology(format!(
                    "{supervisor} lists {id} as a subordinate {mentions} times"
                )));
            }
        }
        for subordinate in &entry.subordinates {
            let Some(child) = adjacency.get(subordinate) else {
                return Err(OrgError::InvalidTopology(format!(
                    "{id} lists unregistered {subordinate} as a subordinate"
                )));
            };
            if child.supervisor != Some(*id) {
                return Err(OrgError::InvalidTopology(format!(
                    "{id} lists {subordinate} as a subordinate, but it reports elsewhere"
                )));
            }
        }
    }

    let mut seen = BTreeSet::from([root]);
    let mut queue = VecDeque::from([root]);
    while let Some(id) = queue.pop_front() {
        let subordinates = adjacency
            .get(&id)
            .map(|entry| entry.subordinates.as_slice())
            .unwrap_or_default();
        for subordinate in subordinates {
            if !seen.insert(*subordinate) {
                return Err(OrgError::InvalidTopology(format!(
                    "{subordinate} is reachable along more than one path"
                )));
            }
            queue.push_back(*subordinate);
        }
    }
    if seen.len() != adjacency.len() {
        return Err(OrgError::InvalidTopology(format!(
            "{} employees are not reachable from the root",
            adjacency.len() - seen.len()
        )));
    }

    Ok(root)
}
