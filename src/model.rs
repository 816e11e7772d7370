//! Core data model for the organization chart.
//!
//! Employees carry identity, adjacency carries structure. The two are kept
//! apart so history can roll structure back without touching identity.

mod action;
mod adjacency;
mod employee;
mod view;

pub use action::ActionLabel;
pub use adjacency::{AdjacencyEntry, AdjacencySnapshot};
pub use employee::{Employee, EmployeeId};
pub use view::OrgNode;
