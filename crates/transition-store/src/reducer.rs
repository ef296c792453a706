//! Named reducer functions
//!
//! A reducer maps `(action, current state)` to a [`Transition`]. It is expected to be
//! pure: no hidden inputs, no mutation of anything outside its return value. The
//! store does not enforce this.

use std::fmt;

use crate::transition::Transition;

type ReduceFn<S, A> = dyn Fn(&A, &S) -> anyhow::Result<Transition<S>>;

/// A reducer plus the name it is reported under in logs and errors
pub struct Reducer<S, A> {
    name: String,
    reduce: Box<ReduceFn<S, A>>,
}

impl<S: 'static, A: 'static> Reducer<S, A> {
    /// Wrap a reducer that cannot fail
    ///
    /// # Example
    ///
    /// ```rust
    /// use transition_store::{Reducer, Transition};
    ///
    /// fn append_a(_action: &(), state: &String) -> Transition<String> {
    ///     Transition::new(format!("{state}A"))
    /// }
    ///
    /// let reducer = Reducer::new("append_a", append_a);
    /// assert_eq!(reducer.name(), "append_a");
    /// ```
    pub fn new<F>(name: impl Into<String>, reduce: F) -> Self
    where
        F: Fn(&A, &S) -> Transition<S> + 'static,
    {
        Self {
            name: name.into(),
            reduce: Box::new(
                move |action: &A, state: &S| -> anyhow::Result<Transition<S>> {
                    Ok(reduce(action, state))
                },
            ),
        }
    }

    /// Wrap a reducer whose failure aborts the dispatch it runs in
    pub fn fallible<F>(name: impl Into<String>, reduce: F) -> Self
    where
        F: Fn(&A, &S) -> anyhow::Result<Transition<S>> + 'static,
    {
        Self {
            name: name.into(),
            reduce: Box::new(reduce),
        }
    }
}

impl<S, A> Reducer<S, A> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the reducer against `state`
    pub fn reduce(&self, action: &A, state: &S) -> anyhow::Result<Transition<S>> {
        (self.reduce)(action, state)
    }
}

impl<S, A> fmt::Debug for Reducer<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    enum Action {
        Add(i64),
        Divide(i64),
    }

    fn add(action: &Action, state: &i64) -> Transition<i64> {
        match action {
            Action::Add(n) => Transition::new(state + n),
            _ => Transition::new(*state),
        }
    }

    fn divide(action: &Action, state: &i64) -> anyhow::Result<Transition<i64>> {
        match action {
            Action::Divide(0) => anyhow::bail!("division by zero"),
            Action::Divide(n) => Ok(Transition::new(state / n)),
            _ => Ok(Transition::new(*state)),
        }
    }

    #[test]
    fn test_infallible_reducer_always_succeeds() {
        let reducer = Reducer::new("add", add);

        let transition = reducer.reduce(&Action::Add(3), &4).unwrap();
        assert_eq!(*transition.to_state(), 7);

        let transition = reducer.reduce(&Action::Divide(2), &4).unwrap();
        assert_eq!(*transition.to_state(), 4);
    }

    #[test]
    fn test_fallible_reducer_reports_error() {
        let reducer = Reducer::fallible("divide", divide);

        let transition = reducer.reduce(&Action::Divide(2), &10).unwrap();
        assert_eq!(*transition.to_state(), 5);

        let err = reducer.reduce(&Action::Divide(0), &10).unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn test_closure_reducer() {
        let offset = 100;
        let reducer: Reducer<i64, Action> =
            Reducer::new("offset", move |_action: &Action, state: &i64| {
                Transition::new(state + offset)
            });

        assert_eq!(format!("{:?}", reducer), "Reducer { name: \"offset\" }");
        let transition = reducer.reduce(&Action::Add(0), &1).unwrap();
        assert_eq!(*transition.to_state(), 101);
    }
}
