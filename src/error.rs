//! Errors raised by the organization core.

use std::fmt;

use crate::model::EmployeeId;

/// Errors that can occur while querying or mutating an organization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrgError {
    #[error("employee not found: {0}")]
    NotFound(Lookup),

    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveRejection),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

pub type Result<T> = core::result::Result<T, OrgError>;

/// What a failed lookup was searching for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(EmployeeId),
    Name(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// Why a move was refused. Each precondition has its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("employee {0} does not exist")]
    UnknownEmployee(EmployeeId),

    #[error("supervisor {0} does not exist")]
    UnknownSupervisor(EmployeeId),

    #[error("employee {0} cannot supervise themselves")]
    SelfSupervision(EmployeeId),

    #[error("{supervisor} reports to {employee}, so {employee} cannot move under them")]
    IntoOwnSubtree {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },

    #[error("employee {0} is the root and has no supervisor to leave")]
    RootImmovable(EmployeeId),
}
