use serde::Serialize;

/// Why a search stopped before exhausting its frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbortReason {
    MemoryLimit { resident_bytes: u64, ceiling_bytes: u64 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SearchOutcome<A> {
    /// Actions leading from the initial state to a final state, in application order.
    /// Empty when the initial state is already final.
    Found(Vec<A>),
    NotFound,
    Aborted(AbortReason),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States whose successors were generated.
    pub expanded: u64,
    /// Successor states pushed onto the frontier.
    pub generated: u64,
    pub max_frontier: u64,
    pub memory_polls: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchReport<A> {
    pub outcome: SearchOutcome<A>,
    pub stats: SearchStats,
}

impl<A> SearchReport<A> {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Aborted(_))
    }

    pub fn path(&self) -> Option<&[A]> {
        match &self.outcome {
            SearchOutcome::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Collapse into the plain action list: a solution, or empty for every failure.
    ///
    /// An empty list is ambiguous here: the initial state was final, nothing was
    /// found, or the memory guard tripped.
    pub fn into_legacy_path(self) -> Vec<A> {
        match self.outcome {
            SearchOutcome::Found(p) => p,
            SearchOutcome::NotFound | SearchOutcome::Aborted(_) => Vec::new(),
        }
    }
}
