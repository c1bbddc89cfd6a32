//! State-space search over caller-defined problems.
//!
//! Three interchangeable strategies share one visited-set policy and one
//! resident-memory guard: breadth-first, depth-limited depth-first and A*.

pub mod engine;
pub mod errors;
pub mod heuristics;
pub mod memory;
pub mod models;
pub mod options;
pub mod problem;
pub mod visited;

pub use engine::{run, AStarSearch, BreadthFirstSearch, DepthFirstSearch, Strategy};
pub use errors::{ConfigError, ProbeError};
pub use heuristics::{Heuristic, ZeroHeuristic};
pub use memory::{MemoryGuard, MemoryProbe, ProcRssProbe};
pub use models::{AbortReason, SearchOutcome, SearchReport, SearchStats};
pub use options::{SearchOptions, StrategyKind};
pub use problem::{SearchAction, SearchState};
pub use visited::VisitedSet;
