use std::collections::VecDeque;

use crate::memory::MemoryGuard;
use crate::models::{SearchOutcome, SearchReport};
use crate::problem::{SearchAction, SearchState};
use crate::visited::VisitedSet;

use super::{Run, Strategy};

/// Level-order search. Shortest solution by action count.
#[derive(Debug)]
pub struct BreadthFirstSearch {
    guard: MemoryGuard,
}

impl BreadthFirstSearch {
    pub fn new(guard: MemoryGuard) -> Self {
        Self { guard }
    }
}

impl<S: SearchState> Strategy<S> for BreadthFirstSearch {
    fn search(&self, init: &S) -> SearchReport<S::Action> {
        let mut run = Run::start("bfs", &self.guard);
        let mut queue: VecDeque<(S, Vec<S::Action>)> = VecDeque::new();
        let mut visited = VisitedSet::new();

        queue.push_back((init.clone(), Vec::new()));
        run.observe_frontier(queue.len());

        while let Some((state, path)) = queue.pop_front() {
            if let Some(reason) = run.over_budget() {
                return run.finish(SearchOutcome::Aborted(reason));
            }
            if state.is_final() {
                return run.finish(SearchOutcome::Found(path));
            }
            // Queued more than once before its first expansion
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
                queue.push_back((next, next_path));
                run.stats.generated += 1;
            }
            run.observe_frontier(queue.len());
        }
        run.finish(SearchOutcome::NotFound)
    }
}
