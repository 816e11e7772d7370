//! Property tests: tree invariant, move semantics and undo/redo over random
//! operation sequences.

use std::collections::BTreeSet;

use orgchart::{AdjacencySnapshot, EmployeeId, OrgApp, OrgError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Move(u64, u64),
    Undo,
    Redo,
}

/// A random tree: employee `i` (2..=n) reports to some employee in `1..i`.
fn arb_org() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (2usize..12).prop_flat_map(|n| {
        let parents: Vec<_> = (2..=n).map(|i| 1..i).collect();
        (Just(n), parents)
    })
}

fn arb_steps(n: usize) -> impl Strategy<Value = Vec<Step>> {
    let max = n as u64;
    let step = prop_oneof![
        4 => (1..=max + 1, 1..=max + 1).prop_map(|(e, s)| Step::Move(e, s)),
        2 => Just(Step::Undo),
        1 => Just(Step::Redo),
    ];
    prop::collection::vec(step, 0..40)
}

fn build(n: usize, parents: &[usize]) -> OrgApp {
    let names: Vec<String> = (2..=n).map(|i| format!("E{i}")).collect();
    let edges: Vec<(String, String)> = parents
        .iter()
        .enumerate()
        .map(|(offset, parent)| (format!("E{parent}"), format!("E{}", offset + 2)))
        .collect();
    OrgApp::bootstrap("E1", names, edges).unwrap()
}

/// Exactly one root, every link mirrored exactly once, everyone reachable.
fn assert_tree(snapshot: &AdjacencySnapshot) -> Result<(), TestCaseError> {
    let roots: Vec<_> = snapshot
        .iter()
        .filter(|(_, entry)| entry.supervisor.is_none())
        .collect();
    prop_assert_eq!(roots.len(), 1);

    for (id, entry) in snapshot {
        if let Some(supervisor) = entry.supervisor {
            let mentions = snapshot
                .iter()
                .filter(|(_, other)| other.subordinates.contains(id))
                .map(|(other, _)| *other)
                .collect::<Vec<_>>();
            prop_assert_eq!(mentions, vec![supervisor]);
            let count = snapshot
                .get(supervisor)
                .map(|parent| parent.subordinates.iter().filter(|s| *s == id).count());
            prop_assert_eq!(count, Some(1));
        }
    }

    let mut seen = BTreeSet::new();
    let mut stack = vec![*roots[0].0];
    while let Some(id) = stack.pop() {
        prop_assert!(seen.insert(id));
        if let Some(entry) = snapshot.get(id) {
            stack.extend(entry.subordinates.iter().copied());
        }
    }
    prop_assert_eq!(seen.len(), snapshot.len());
    Ok(())
}

proptest! {
    #[test]
    fn every_reachable_state_is_a_tree(
        (n, parents) in arb_org(),
        steps in arb_steps(11),
    ) {
        let mut app = build(n, &parents);
        assert_tree(&app.snapshot())?;

        for step in steps {
            match step {
                Step::Move(e, s) => {
                    let _ = app.move_employee(EmployeeId::new(e), EmployeeId::new(s));
                }
                Step::Undo => {
                    app.undo().unwrap();
                }
                Step::Redo => {
                    app.redo().unwrap();
                }
            }
            assert_tree(&app.snapshot())?;
        }
    }

    #[test]
    fn app_tracks_a_linear_snapshot_model(
        (n, parents) in arb_org(),
        steps in arb_steps(11),
    ) {
        let mut app = build(n, &parents);
        let mut model = vec![app.snapshot()];
        let mut cursor = 0usize;

        for step in steps {
            match step {
                Step::Move(e, s) => {
                    let before = app.snapshot();
                    match app.move_employee(EmployeeId::new(e), EmployeeId::new(s)) {
                        Ok(_) => {
                            model.truncate(cursor + 1);
                            model.push(app.snapshot());
                            cursor = model.len() - 1;
                        }
                        Err(err) => {
                            prop_assert!(
                                matches!(err, OrgError::InvalidMove(_)),
                                "unexpected error: {err}"
                            );
                            prop_assert_eq!(app.snapshot(), before);
                        }
                    }
                }
                Step::Undo => {
                    let changed = app.undo().unwrap();
                    prop_assert_eq!(changed, cursor > 0);
                    cursor = cursor.saturating_sub(1);
                }
                Step::Redo => {
                    let changed = app.redo().unwrap();
                    prop_assert_eq!(changed, cursor + 1 < model.len());
                    if changed {
                        cursor += 1;
                    }
                }
            }
            prop_assert_eq!(&app.snapshot(), &model[cursor]);
            prop_assert_eq!(app.history().cursor(), cursor);
            prop_assert_eq!(app.history().len(), model.len());
        }
    }

    #[test]
    fn successful_move_has_move_semantics_and_round_trips(
        (n, parents) in arb_org(),
        e in 1u64..12,
        s in 1u64..12,
    ) {
        let mut app = build(n, &parents);
        let (employee, supervisor) = (EmployeeId::new(e), EmployeeId::new(s));
        let before = app.snapshot();

        let Ok(record) = app.move_employee(employee, supervisor) else {
            prop_assert_eq!(app.snapshot(), before);
            return Ok(());
        };
        let after = app.snapshot();

        let old = record.plan.from;
        let promoted = before.get(employee).unwrap().subordinates.clone();
        prop_assert_eq!(after.get(employee).unwrap().supervisor, Some(supervisor));
        prop_assert!(after.get(employee).unwrap().subordinates.is_empty());
        prop_assert!(after.get(supervisor).unwrap().subordinates.contains(&employee));
        let old_subordinates = &after.get(old).unwrap().subordinates;
        for subordinate in &promoted {
            prop_assert!(old_subordinates.contains(subordinate));
            prop_assert_eq!(after.get(*subordinate).unwrap().supervisor, Some(old));
        }
        if old != supervisor {
            prop_assert!(!old_subordinates.contains(&employee));
        }

        prop_assert!(app.undo().unwrap());
        prop_assert_eq!(app.snapshot(), before);
        prop_assert!(app.redo().unwrap());
        prop_assert_eq!(app.snapshot(), after);
    }

    #[test]
    fn moving_after_undo_discards_redo(
        (n, parents) in arb_org(),
        first in (1u64..12, 1u64..12),
        second in (1u64..12, 1u64..12),
    ) {
        let mut app = build(n, &parents);
        if app.move_employee(EmployeeId::new(first.0), EmployeeId::new(first.1)).is_err() {
            return Ok(());
        }
        app.undo().unwrap();
        if app.move_employee(EmployeeId::new(second.0), EmployeeId::new(second.1)).is_err() {
            prop_assert!(app.history().can_redo());
            return Ok(());
        }

        let current = app.snapshot();
        prop_assert!(!app.redo().unwrap());
        prop_assert_eq!(app.snapshot(), current);
        prop_assert_eq!(app.history().len(), 2);
    }
}
