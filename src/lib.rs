//! Organization chart with reparenting moves and linear undo/redo.
//!
//! Layers, leaves first:
//!
//! - [`registry`]: employee records and id allocation.
//! - [`tree`]: who reports to whom, with the tree invariant enforced.
//! - [`moves`]: the move operation (extract, promote reports, reattach).
//! - [`history`]: snapshot log with an undo/redo cursor.
//! - [`org`]: [`OrgApp`], which drives all of the above as one unit.
//!
//! ```
//! use orgchart::{EmployeeId, OrgApp};
//!
//! let mut app = OrgApp::bootstrap("R", ["X", "Y"], [("R", "X"), ("X", "Y")])?;
//! let (x, y) = (EmployeeId::new(2), EmployeeId::new(3));
//!
//! app.move_employee(y, app.root())?;
//! assert!(app.adjacency_of(x)?.subordinates.is_empty());
//!
//! app.undo()?;
//! assert_eq!(app.adjacency_of(x)?.subordinates, vec![y]);
//! # Ok::<(), orgchart::OrgError>(())
//! ```

pub mod error;
pub mod history;
pub mod model;
pub mod moves;
pub mod org;
pub mod registry;
pub mod seed;
pub mod tree;

pub use error::{Lookup, MoveRejection, OrgError};
pub use history::{History, HistoryEntry};
pub use model::{ActionLabel, AdjacencyEntry, AdjacencySnapshot, Employee, EmployeeId, OrgNode};
pub use moves::{ActionRecord, MovePlan};
pub use org::OrgApp;
pub use registry::{IdSequence, NodeRegistry};
pub use seed::{Seed, SeedEdge, SeedError};
pub use tree::{TreeBuilder, TreeStore};
