/// Lower bound on the remaining cost from a state to the nearest final state.
///
/// A* is only optimal when the bound is admissible (never overestimates).
/// The engine does not check admissibility.
pub trait Heuristic<S> {
    fn distance_lower_bound(&self, state: &S) -> f64;
}

/// Placeholder heuristic; turns A* into uniform-cost search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    fn distance_lower_bound(&self, _state: &S) -> f64 {
        0.0
    }
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> f64,
{
    fn distance_lower_bound(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Clamp an estimate into the contract range. Returns `None` when clamping was needed.
pub(crate) fn sanitize(h: f64) -> Option<f64> {
    if h.is_nan() || h < 0.0 {
        None
    } else {
        Some(h)
    }
}
