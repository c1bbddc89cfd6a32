#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use statespace_core::{MemoryGuard, SearchAction, SearchState};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test harness; filter with `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
}

/// Collects the message of every `WARN` event.
#[derive(Clone, Default)]
struct WarningLayer {
    messages: Arc<Mutex<Vec<String>>>,
}

#[derive(Default)]
struct MessageField(String);

impl Visit for MessageField {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for WarningLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            let mut message = MessageField::default();
            event.record(&mut message);
            self.messages.lock().unwrap().push(message.0);
        }
    }
}

/// Run `f` on this thread with a subscriber that records warnings; returns them with `f`'s result.
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let layer = WarningLayer::default();
    let messages = Arc::clone(&layer.messages);
    let out = tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), f);
    let warnings = messages.lock().unwrap().clone();
    (out, warnings)
}

/// Explicit directed graph that records every expansion.
#[derive(Debug, Default)]
pub struct Graph {
    edges: HashMap<u32, Vec<Edge>>,
    goals: HashSet<u32>,
    expansions: RefCell<Vec<u32>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub label: &'static str,
    pub to: u32,
    pub cost: f64,
}

#[derive(Clone)]
pub struct Node {
    pub id: u32,
    pub graph: Rc<Graph>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Node {}
impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.id)
    }
}

impl SearchAction<Node> for Edge {
    fn execute(&self, state: &Node) -> Node {
        Node { id: self.to, graph: Rc::clone(&state.graph) }
    }

    fn cost(&self) -> f64 {
        self.cost
    }
}

impl SearchState for Node {
    type Action = Edge;

    fn is_final(&self) -> bool {
        self.graph.goals.contains(&self.id)
    }

    fn actions(&self) -> Vec<Edge> {
        self.graph.expansions.borrow_mut().push(self.id);
        self.graph.edges.get(&self.id).cloned().unwrap_or_default()
    }
}

impl Graph {
    pub fn expansions(&self) -> Vec<u32> {
        self.expansions.borrow().clone()
    }

    pub fn reset(&self) {
        self.expansions.borrow_mut().clear();
    }
}

#[derive(Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge(self, from: u32, to: u32, label: &'static str) -> Self {
        self.weighted(from, to, label, 1.0)
    }

    pub fn weighted(mut self, from: u32, to: u32, label: &'static str, cost: f64) -> Self {
        self.graph.edges.entry(from).or_default().push(Edge { label, to, cost });
        self
    }

    pub fn goal(mut self, id: u32) -> Self {
        self.graph.goals.insert(id);
        self
    }

    pub fn start(self, id: u32) -> Node {
        Node { id, graph: Rc::new(self.graph) }
    }
}

/// `w` x `h` four-connected grid starting at the top-left corner, goal bottom-right.
pub fn grid(w: u32, h: u32) -> Node {
    grid_with_goal(w, h, w * h - 1)
}

pub fn grid_with_goal(w: u32, h: u32, goal: u32) -> Node {
    let mut b = GraphBuilder::new();
    for y in 0..h {
        for x in 0..w {
            let id = y * w + x;
            if x + 1 < w {
                b = b.edge(id, id + 1, "R");
            }
            if y + 1 < h {
                b = b.edge(id, id + w, "D");
            }
            if x > 0 {
                b = b.edge(id, id - 1, "L");
            }
            if y > 0 {
                b = b.edge(id, id - w, "U");
            }
        }
    }
    b.goal(goal).start(0)
}

pub fn labels(path: &[Edge]) -> Vec<&'static str> {
    path.iter().map(|e| e.label).collect()
}

pub fn total_cost(path: &[Edge]) -> f64 {
    path.iter().map(|e| e.cost).sum()
}

/// Apply `path` from `start`, checking each action is legal where it is applied.
pub fn replay(start: &Node, path: &[Edge]) -> Node {
    let mut cur = start.clone();
    for action in path {
        let legal = cur.graph.edges.get(&cur.id).map(|es| es.contains(action)).unwrap_or(false);
        assert!(legal, "{action:?} is not an action of {cur:?}");
        cur = action.execute(&cur);
    }
    cur
}

/// Guard whose probe reports zero for `ok_polls` readings, then an enormous footprint.
pub fn guard_tripping_after(ok_polls: u64) -> MemoryGuard {
    let polls = Rc::new(Cell::new(0u64));
    MemoryGuard::new(
        move || {
            let n = polls.get();
            polls.set(n + 1);
            if n >= ok_polls { u64::MAX } else { 0 }
        },
        1_000,
        100,
    )
}
