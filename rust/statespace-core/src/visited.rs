use rustc_hash::FxHashSet;

/// Insert-only membership set over states.
///
/// Once a state is in, it stays in; there is no removal.
#[derive(Debug)]
pub struct VisitedSet<S> {
    inner: FxHashSet<S>,
}

impl<S: std::hash::Hash + Eq> VisitedSet<S> {
    pub fn new() -> Self {
        Self { inner: FxHashSet::default() }
    }

    #[inline]
    pub fn contains(&self, state: &S) -> bool {
        self.inner.contains(state)
    }

    /// Returns true if the state was not present before.
    #[inline]
    pub fn insert(&mut self, state: S) -> bool {
        self.inner.insert(state)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S: std::hash::Hash + Eq> Default for VisitedSet<S> {
    fn default() -> Self {
        Self::new()
    }
}
