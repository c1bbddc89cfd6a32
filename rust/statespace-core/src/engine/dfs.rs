use crate::memory::MemoryGuard;
use crate::models::{SearchOutcome, SearchReport};
use crate::problem::{SearchAction, SearchState};
use crate::visited::VisitedSet;

use super::{Run, Strategy};

/// Depth-limited depth-first search.
///
/// Neither complete nor optimal: solutions deeper than `depth_limit` are never
/// found, and the first final state popped wins regardless of path length.
#[derive(Debug)]
pub struct DepthFirstSearch {
    guard: MemoryGuard,
    depth_limit: usize,
}

impl DepthFirstSearch {
    pub fn new(guard: MemoryGuard, depth_limit: usize) -> Self {
        Self { guard, depth_limit }
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }
}

impl<S: SearchState> Strategy<S> for DepthFirstSearch {
    fn search(&self, init: &S) -> SearchReport<S::Action> {
        let mut run = Run::start("dfs", &self.guard);
        let mut stack: Vec<(S, Vec<S::Action>)> = vec![(init.clone(), Vec::new())];
        let mut visited = VisitedSet::new();
        run.observe_frontier(stack.len());

        while let Some((state, path)) = stack.pop() {
            if let Some(reason) = run.over_budget() {
                return run.finish(SearchOutcome::Aborted(reason));
            }
            // Final check precedes the cutoff: a goal exactly at the limit still counts.
            if state.is_final() {
                return run.finish(SearchOutcome::Found(path));
            }
            // Cutoff after popping, so the entry is consumed without being marked visited.
            if path.len() >= self.depth_limit {
                continue;
            }
            if !visited.insert(state.clone()) {
                continue;
            }
            run.stats.expanded += 1;
            for action in state.actions() {
                let next = action.execute(&state);
                if visited.contains(&next) {
                    continue;
                }
                let mut next_path = path.clone();
                next_path.push(action);
                stack.push((next, next_path));
                run.stats.generated += 1;
            }
            run.observe_frontier(stack.len());
        }
        run.finish(SearchOutcome::NotFound)
    }
}
