//! Contracts the search engine expects from a problem domain.
//!
//! The engine never inspects states or actions beyond these traits: what a
//! state looks like, which actions are legal and how they transform a state
//! is entirely up to the caller.

use std::hash::Hash;

/// A point in the search space.
///
/// Equality and hashing define identity for the visited set: two states that
/// compare equal are the same state no matter which path produced them.
pub trait SearchState: Clone + Eq + Hash {
    type Action: SearchAction<Self>;

    /// True when this state solves the problem.
    fn is_final(&self) -> bool;

    /// Legal actions from this state, in the order the domain prefers them.
    fn actions(&self) -> Vec<Self::Action>;
}

/// A transition applicable to a state.
pub trait SearchAction<S>: Clone {
    /// Produce the successor state. Must not mutate `state`.
    fn execute(&self, state: &S) -> S;

    /// Step cost accumulated by A*. Breadth- and depth-first search ignore it.
    fn cost(&self) -> f64 {
        1.0
    }
}
