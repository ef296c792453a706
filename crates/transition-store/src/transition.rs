use std::any::Any;

use crate::side_effect::SideEffect;

/// The result of running one reducer: the state to adopt plus any side effects
///
/// A transition is immutable once built. [`Transition::effect`] consumes the value
/// and returns a new one, so it can be chained while building but never used to
/// modify a transition that has already been handed to the store.
#[derive(Debug, Clone)]
pub struct Transition<S> {
    to_state: S,
    side_effects: Vec<SideEffect>,
}

impl<S> Transition<S> {
    /// A transition to `to_state` with no side effects
    pub fn new(to_state: S) -> Self {
        Self {
            to_state,
            side_effects: Vec::new(),
        }
    }

    /// A transition to `to_state` carrying the given side effects, in order
    pub fn with_side_effects(
        to_state: S,
        side_effects: impl IntoIterator<Item = SideEffect>,
    ) -> Self {
        Self {
            to_state,
            side_effects: side_effects.into_iter().collect(),
        }
    }

    /// Append a side effect payload
    pub fn effect<T: Any>(mut self, payload: T) -> Self {
        self.side_effects.push(SideEffect::new(payload));
        self
    }

    pub fn to_state(&self) -> &S {
        &self.to_state
    }

    pub fn side_effects(&self) -> &[SideEffect] {
        &self.side_effects
    }

    pub fn has_side_effects(&self) -> bool {
        !self.side_effects.is_empty()
    }

    /// Iterate over the side effects whose payload is a `T`, skipping all others
    pub fn side_effects_of<T: Any>(&self) -> impl Iterator<Item = &T> + '_ {
        self.side_effects
            .iter()
            .filter_map(|effect| effect.downcast_ref::<T>())
    }

    pub fn into_state(self) -> S {
        self.to_state
    }

    pub fn into_parts(self) -> (S, Vec<SideEffect>) {
        (self.to_state, self.side_effects)
    }
}
