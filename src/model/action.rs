//! Action labels: what produced a history entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Identifies the action that produced a history entry.
///
/// Diagnostic only: history restores full snapshots and never replays labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionLabel {
    /// The state the organization was bootstrapped with.
    Bootstrap,

    /// An employee was moved under a new supervisor.
    Move {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bootstrap => f.write_str("bootstrap"),
            Self::Move {
                employee,
                supervisor,
            } => write!(f, "{}-{}", employee.get(), supervisor.get()),
        }
    }
}
