pub mod arena;
pub mod astar;
pub mod bfs;
pub mod dfs;

pub use arena::{NodeArena, NodeId, SearchNode};
pub use astar::AStarSearch;
pub use bfs::BreadthFirstSearch;
pub use dfs::DepthFirstSearch;

use tracing::{debug, info, warn};

use crate::errors::ConfigError;
use crate::heuristics::Heuristic;
use crate::memory::MemoryGuard;
use crate::models::{AbortReason, SearchOutcome, SearchReport, SearchStats};
use crate::options::{SearchOptions, StrategyKind};
use crate::problem::SearchState;

/// A search strategy over any problem domain.
pub trait Strategy<S: SearchState> {
    fn search(&self, init: &S) -> SearchReport<S::Action>;

    /// Plain action list; empty on every kind of failure and on a final initial state.
    fn solve(&self, init: &S) -> Vec<S::Action> {
        self.search(init).into_legacy_path()
    }
}

/// Build the strategy `options` selects and run it from `init`.
///
/// `heuristic` is only consulted by A*.
pub fn run<S, H>(options: &SearchOptions, init: &S, heuristic: H) -> Result<SearchReport<S::Action>, ConfigError>
where
    S: SearchState,
    H: Heuristic<S>,
{
    options.validate()?;
    let guard = options.memory_guard();
    let report = match options.strategy {
        StrategyKind::Bfs => BreadthFirstSearch::new(guard).search(init),
        StrategyKind::Dfs => DepthFirstSearch::new(guard, options.depth_limit).search(init),
        StrategyKind::Astar => AStarSearch::new(guard, heuristic).search(init),
    };
    Ok(report)
}

/// Bookkeeping for a single `search` call.
pub(crate) struct Run<'g> {
    strategy: &'static str,
    guard: &'g MemoryGuard,
    polls_at_start: u64,
    pub stats: SearchStats,
}

impl<'g> Run<'g> {
    pub fn start(strategy: &'static str, guard: &'g MemoryGuard) -> Self {
        debug!(strategy, ceiling_bytes = guard.ceiling_bytes(), "search started");
        Self { strategy, guard, polls_at_start: guard.polls(), stats: SearchStats::default() }
    }

    /// Poll the memory guard once.
    #[inline]
    pub fn over_budget(&self) -> Option<AbortReason> {
        self.guard
            .check()
            .map(|t| AbortReason::MemoryLimit { resident_bytes: t.resident_bytes, ceiling_bytes: t.ceiling_bytes })
    }

    #[inline]
    pub fn observe_frontier(&mut self, len: usize) {
        self.stats.max_frontier = self.stats.max_frontier.max(len as u64);
    }

    pub fn finish<A>(mut self, outcome: SearchOutcome<A>) -> SearchReport<A> {
        self.stats.memory_polls = self.guard.polls() - self.polls_at_start;
        let s = &self.stats;
        match &outcome {
            SearchOutcome::Found(path) => info!(
                strategy = self.strategy,
                actions = path.len(),
                expanded = s.expanded,
                generated = s.generated,
                max_frontier = s.max_frontier,
                "solution found"
            ),
            SearchOutcome::NotFound => debug!(
                strategy = self.strategy,
                expanded = s.expanded,
                generated = s.generated,
                "frontier exhausted"
            ),
            SearchOutcome::Aborted(AbortReason::MemoryLimit { resident_bytes, ceiling_bytes }) => warn!(
                strategy = self.strategy,
                resident_bytes,
                ceiling_bytes,
                expanded = s.expanded,
                "memory guard tripped; search aborted"
            ),
        }
        SearchReport { outcome, stats: self.stats }
    }
}
