//! Nested read-side view of the hierarchy, for rendering.

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// An employee with their reports nested beneath them.
///
/// Derived from adjacency on demand; never stored or mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgNode {
    pub id: EmployeeId,
    pub name: String,
    pub subordinates: Vec<OrgNode>,
}

impl OrgNode {
    /// Number of employees in this subtree, including this one.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.subordinates.iter());
        }
        count
    }

    /// Finds the node for `id` within this subtree, depth-first.
    pub fn find(&self, id: EmployeeId) -> Option<&OrgNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.subordinates.iter().rev());
        }
        None
    }

    /// Ids of direct reports, in order.
    pub fn subordinate_ids(&self) -> Vec<EmployeeId> {
        self.subordinates.iter().map(|child| child.id).collect()
    }
}

// The derived drop glue recurses once per level.
impl Drop for OrgNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.subordinates);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.subordinates);
        }
    }
}
