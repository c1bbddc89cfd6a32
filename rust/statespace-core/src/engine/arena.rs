//! Parent-chain storage for A*.
//!
//! Every generated node lives in one arena owned by the running search and
//! points at its parent by index. Frontier entries sharing an ancestor share the
//! same arena slot. Nothing is freed until the search returns; the whole arena
//! is dropped at once.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

#[derive(Clone, Debug)]
pub struct SearchNode<S, A> {
    /// Accumulated path cost from the root.
    pub g: f64,
    pub state: S,
    /// `None` only for the root.
    pub action: Option<A>,
    pub parent: Option<NodeId>,
}

#[derive(Debug)]
pub struct NodeArena<S, A> {
    nodes: Vec<SearchNode<S, A>>,
}

impl<S, A: Clone> NodeArena<S, A> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn root(&mut self, state: S) -> NodeId {
        self.push(SearchNode { g: 0.0, state, action: None, parent: None })
    }

    pub fn child(&mut self, parent: NodeId, g: f64, state: S, action: A) -> NodeId {
        self.push(SearchNode { g, state, action: Some(action), parent: Some(parent) })
    }

    fn push(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Actions from the root to `id`, oldest first. Walks `depth(id)` parents.
    pub fn path_to(&self, id: NodeId) -> Vec<A> {
        let mut actions = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = self.get(c);
            if let Some(a) = &node.action {
                actions.push(a.clone());
            }
            cur = node.parent;
        }
        actions.reverse();
        actions
    }
}

impl<S, A: Clone> Default for NodeArena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
