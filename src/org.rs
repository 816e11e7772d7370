//! The organization: tree store plus history, moved as one unit.
//!
//! [`OrgApp`] is the only way to change an organization once it exists.
//! Each call reads and writes both the tree and the history, so every method
//! that mutates takes `&mut self`.

use tracing::{debug, warn};

use crate::{
    error::{OrgError, Result},
    history::History,
    model::{ActionLabel, AdjacencyEntry, AdjacencySnapshot, Employee, EmployeeId, OrgNode},
    moves::{self, ActionRecord},
    registry::NodeRegistry,
    seed::Seed,
    tree::TreeStore,
};

/// An organization chart with linear undo/redo.
#[derive(Debug, Clone)]
pub struct OrgApp {
    tree: TreeStore,
    history: History,
}

impl OrgApp {
    /// Builds an organization from names and `(supervisor, employee)` edges.
    ///
    /// The root is registered first, then `employee_names` in order, so ids
    /// follow that order starting at 1. Edges are wired in order with
    /// first-match name resolution. Edges naming an unknown employee are
    /// skipped, as are edges that would give someone a second supervisor or
    /// close a cycle. Anyone still unattached afterwards reports to the root.
    pub fn bootstrap<N, E, S, T>(root_name: &str, employee_names: N, edges: E) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut builder = TreeStore::builder(root_name);
        for name in employee_names {
            builder.employee(name);
        }

        for (supervisor, employee) in edges {
            let (supervisor, employee) = (supervisor.as_ref(), employee.as_ref());
            match builder.attach_by_name(supervisor, employee) {
                Ok(()) => {}
                Err(OrgError::NotFound(lookup)) => {
                    debug!(supervisor, employee, %lookup, "skipping edge with unregistered name");
                }
                Err(err) => {
                    warn!(supervisor, employee, %err, "skipping edge");
                }
            }
        }

        for orphan in builder.adopt_orphans() {
            warn!(employee = %orphan, "no supervisor after wiring edges; reporting to root");
        }

        let tree = builder.build()?;
        let mut history = History::new();
        history.record(ActionLabel::Bootstrap, tree.snapshot());
        debug!(employees = tree.registry().len(), root = %tree.root(), "organization bootstrapped");

        Ok(Self { tree, history })
    }

    pub fn from_seed(seed: &Seed) -> Result<Self> {
        Self::bootstrap(
            &seed.root,
            seed.employees.iter().cloned(),
            seed.edges
                .iter()
                .map(|edge| (edge.supervisor.as_str(), edge.employee.as_str())),
        )
    }

    /// Moves `employee` under `supervisor` and records the new state.
    ///
    /// Any forward history left over from earlier undos is discarded.
    pub fn move_employee(
        &mut self,
        employee: EmployeeId,
        supervisor: EmployeeId,
    ) -> Result<ActionRecord> {
        let record = moves::execute(&mut self.tree, employee, supervisor)?;
        self.history.record(record.label, self.tree.snapshot());
        debug!(
            label = %record.label,
            promoted = record.plan.promoted.len(),
            cursor = self.history.cursor(),
            "move applied"
        );
        Ok(record)
    }

    /// Restores the previous state. Returns `false` if there is none.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(snapshot) = self.history.undo() else {
            debug!("nothing to undo");
            return Ok(false);
        };
        if let Err(err) = self.tree.restore(snapshot) {
            self.history.redo();
            return Err(err);
        }
        debug!(cursor = self.history.cursor(), "undo");
        Ok(true)
    }

    /// Re-applies the next state. Returns `false` if there is none.
    pub fn redo(&mut self) -> Result<bool> {
        let Some(snapshot) = self.history.redo() else {
            debug!("nothing to redo");
            return Ok(false);
        };
        if let Err(err) = self.tree.restore(snapshot) {
            self.history.undo();
            return Err(err);
        }
        debug!(cursor = self.history.cursor(), "redo");
        Ok(true)
    }

    /// The hierarchy as nested nodes, rooted at the root.
    pub fn current_tree(&self) -> OrgNode {
        self.tree.org_view()
    }

    pub fn root(&self) -> EmployeeId {
        self.tree.root()
    }

    pub fn employee(&self, id: EmployeeId) -> Result<&Employee> {
        self.tree.registry().resolve(id)
    }

    /// First employee with this display name, by id.
    pub fn find_by_name(&self, name: &str) -> Result<&Employee> {
        self.tree.registry().resolve_by_name(name)
    }

    pub fn adjacency_of(&self, id: EmployeeId) -> Result<&AdjacencyEntry> {
        self.tree.adjacency_of(id)
    }

    pub fn snapshot(&self) -> AdjacencySnapshot {
        self.tree.snapshot()
    }

    pub fn registry(&self) -> &NodeRegistry {
        self.tree.registry()
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
