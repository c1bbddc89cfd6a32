use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::warn;

use crate::heuristics::{sanitize, Heuristic, ZeroHeuristic};
use crate::memory::MemoryGuard;
use crate::models::{SearchOutcome, SearchReport};
use crate::problem::{SearchAction, SearchState};
use crate::visited::VisitedSet;

use super::arena::{NodeArena, NodeId};
use super::{Run, Strategy};

#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f64,
    // Insertion order; equal f pops first-in first-out
    seq: u64,
    id: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for OpenEntry {}
impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap; invert ordering for min-heap behavior
        other.f.total_cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Best-first search on `f = g + h`.
///
/// Duplicate frontier entries for one state are allowed; the first one popped
/// expands the state and later ones are discarded.
pub struct AStarSearch<H> {
    guard: MemoryGuard,
    heuristic: H,
}

impl<H> AStarSearch<H> {
    pub fn new(guard: MemoryGuard, heuristic: H) -> Self {
        Self { guard, heuristic }
    }
}

impl AStarSearch<ZeroHeuristic> {
    /// A* without a heuristic, i.e. uniform-cost search.
    pub fn uniform_cost(guard: MemoryGuard) -> Self {
        Self::new(guard, ZeroHeuristic)
    }
}

impl<H> std::fmt::Debug for AStarSearch<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AStarSearch").field("guard", &self.guard).finish_non_exhaustive()
    }
}

impl<S, H> Strategy<S> for AStarSearch<H>
where
    S: SearchState,
    H: Heuristic<S>,
{
    fn search(&self, init: &S) -> SearchReport<S::Action> {
        let mut run = Run::start("astar", &self.guard);
        let mut arena: NodeArena<S, S::Action> = NodeArena::new();
        let mut open = BinaryHeap::new();
        let mut visited = VisitedSet::new();
        let mut seq: u64 = 0;
        let bad_estimate = Cell::new(false);

        let estimate = |state: &S| -> f64 {
            let h = self.heuristic.distance_lower_bound(state);
            sanitize(h).unwrap_or_else(|| {
                if !bad_estimate.replace(true) {
                    warn!(h, "heuristic returned a negative or NaN estimate; using 0");
                }
                0.0
            })
        };

        let root = arena.root(init.clone());
        open.push(OpenEntry { f: 0.0, seq, id: root });
        run.observe_frontier(open.len());

        while let Some(OpenEntry { id, .. }) = open.pop() {
            if let Some(reason) = run.over_budget() {
                return run.finish(SearchOutcome::Aborted(reason));
            }
            let node = arena.get(id);
            if node.state.is_final() {
                return run.finish(SearchOutcome::Found(arena.path_to(id)));
            }
            if visited.contains(&node.state) {
                continue;
            }
            let state = node.state.clone();
            let g = node.g;
            visited.insert(state.clone());
            run.stats.expanded += 1;

            for action in state.actions() {
                if let Some(reason) = run.over_budget() {
                    return run.finish(SearchOutcome::Aborted(reason));
                }
                let next = action.execute(&state);
                if visited.contains(&next) {
                    continue;
                }
                let next_g = g + action.cost();
                let f = next_g + estimate(&next);
                let child = arena.child(id, next_g, next, action);
                seq += 1;
                open.push(OpenEntry { f, seq, id: child });
                run.stats.generated += 1;
            }
            run.observe_frontier(open.len());
        }
        run.finish(SearchOutcome::NotFound)
    }
}
