//! Move operator: reparent one employee.
//!
//! A move extracts the employee from their chain. Their direct reports are
//! promoted to the employee's former supervisor, and the employee arrives
//! under the new supervisor with no reports of their own.

use serde::{Deserialize, Serialize};

use crate::{
    error::{MoveRejection, Result},
    model::{ActionLabel, EmployeeId},
    tree::TreeStore,
};

/// The adjacency change a move will make, computed against the live tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlan {
    /// The employee being moved.
    pub employee: EmployeeId,

    /// The employee's supervisor before the move.
    pub from: EmployeeId,

    /// The employee's supervisor after the move.
    pub to: EmployeeId,

    /// The employee's direct reports, which end up reporting to `from`.
    pub promoted: Vec<EmployeeId>,
}

/// A move that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub label: ActionLabel,
    pub plan: MovePlan,
}

/// Checks every precondition and computes the move, without mutating.
pub fn plan(tree: &TreeStore, employee: EmployeeId, supervisor: EmployeeId) -> Result<MovePlan> {
    let Ok(entry) = tree.adjacency_of(employee) else {
        return Err(MoveRejection::UnknownEmployee(employee).into());
    };
    if tree.adjacency_of(supervisor).is_err() {
        return Err(MoveRejection::UnknownSupervisor(supervisor).into());
    }
    if employee == supervisor {
        return Err(MoveRejection::SelfSupervision(employee).into());
    }
    let Some(from) = entry.supervisor else {
        return Err(MoveRejection::RootImmovable(employee).into());
    };
    if tree.is_descendant(employee, supervisor) {
        return Err(MoveRejection::IntoOwnSubtree {
            employee,
            supervisor,
        }
        .into());
    }

    Ok(MovePlan {
        employee,
        from,
        to: supervisor,
        promoted: entry.subordinates.clone(),
    })
}

/// Moves `employee` under `supervisor`, all or nothing.
pub fn execute(
    tree: &mut TreeStore,
    employee: EmployeeId,
    supervisor: EmployeeId,
) -> Result<ActionRecord> {
    let plan = plan(tree, employee, supervisor)?;
    tree.apply_move(&plan)?;
    Ok(ActionRecord {
        label: ActionLabel::Move {
            employee,
            supervisor,
        },
        plan,
    })
}
