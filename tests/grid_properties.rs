// Property-based tests for grid invariants under random edits
mod fixtures;

use fixtures::{event, workweek};
use proptest::prelude::*;
use timetable_weaver::models::coordinate::{AxisKind, Coordinate};
use timetable_weaver::services::grid::ScheduleGrid;

#[derive(Debug, Clone)]
enum Op {
    Place(usize, usize),
    Span(usize, usize, u32),
    MergeRun(usize, usize, usize),
    Unmerge(usize, usize),
    Move(usize, usize, usize, usize),
    Remove(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..5, 0usize..8).prop_map(|(d, t)| Op::Place(d, t)),
        (0usize..5, 0usize..8, 1u32..5).prop_map(|(d, t, s)| Op::Span(d, t, s)),
        (0usize..5, 0usize..8, 1usize..4).prop_map(|(d, t, n)| Op::MergeRun(d, t, n)),
        (0usize..5, 0usize..8).prop_map(|(d, t)| Op::Unmerge(d, t)),
        (0usize..5, 0usize..8, 0usize..5, 0usize..8).prop_map(|(a, b, c, d)| Op::Move(a, b, c, d)),
        (0usize..5, 0usize..8).prop_map(|(d, t)| Op::Remove(d, t)),
    ]
}

/// Applies `op` and reports whether the grid accepted it
fn apply(grid: &mut ScheduleGrid, op: &Op) -> bool {
    match *op {
        Op::Place(d, t) => grid.place_or_replace(Coordinate::new(d, t), event("Single")).is_ok(),
        Op::Span(d, t, span) => {
            let key = Coordinate::new(d, t);
            let covered = key.following(AxisKind::TimeSlots, span as usize - 1);
            grid.place_with_span(key, event("Block"), span, &covered).is_ok()
        }
        Op::MergeRun(d, t, len) => {
            let start = Coordinate::new(d, t);
            let mut cells = vec![start];
            cells.extend(start.following(AxisKind::TimeSlots, len - 1));
            grid.merge_selection(&cells, event("Run")).is_ok()
        }
        Op::Unmerge(d, t) => grid.unmerge(Coordinate::new(d, t)).is_ok(),
        Op::Move(a, b, c, d) => grid
            .move_event(Coordinate::new(a, b), Coordinate::new(c, d))
            .is_ok(),
        Op::Remove(d, t) => grid.remove(Coordinate::new(d, t)).is_some(),
    }
}

proptest! {
    /// Property: no sequence of edits can break the coverage invariant,
    /// and rejected edits leave the grid untouched
    #[test]
    fn prop_coverage_invariant_holds(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let mut grid = workweek();
        for op in &ops {
            let before = grid.snapshot();
            let accepted = apply(&mut grid, op);
            if !accepted {
                prop_assert_eq!(grid.snapshot(), before, "rejected {:?} changed the grid", op);
            }
            prop_assert!(grid.validate_invariants().is_ok(), "after {:?}: {:?}", op, grid.validate_invariants());
        }
    }

    /// Property: a snapshot reloads into an identical grid
    #[test]
    fn prop_snapshot_reloads_identically(ops in proptest::collection::vec(arb_op(), 1..30)) {
        let mut grid = workweek();
        for op in &ops {
            apply(&mut grid, op);
        }
        let snapshot = grid.snapshot();
        let (reloaded, dropped) = ScheduleGrid::from_state(snapshot.clone(), AxisKind::TimeSlots);
        prop_assert!(dropped.is_empty());
        prop_assert_eq!(reloaded.snapshot(), snapshot);
    }

    /// Property: unmerging returns exactly the cells the block covered
    #[test]
    fn prop_unmerge_returns_covered(day in 0usize..5, start in 0usize..8, span in 2u32..5) {
        let mut grid = workweek();
        let key = Coordinate::new(day, start);
        let covered = key.following(AxisKind::TimeSlots, span as usize - 1);
        if grid.place_with_span(key, event("Block"), span, &covered).is_ok() {
            prop_assert_eq!(grid.unmerge(key).unwrap(), covered);
            prop_assert!(grid.coordinates_covered_by(key).is_empty());
        } else {
            prop_assert!(start + span as usize > 8);
        }
    }
}
