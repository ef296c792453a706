//! Opaque side-effect payloads carried by a [`Transition`](crate::Transition).

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

/// A type-erased marker emitted by a reducer for some external actor to react to
///
/// The store never looks inside a side effect. Subscribers recover the concrete
/// payload with [`SideEffect::downcast_ref`]. Cloning is cheap (reference counted).
#[derive(Clone)]
pub struct SideEffect {
    payload: Rc<dyn Any>,
    type_name: &'static str,
}

impl SideEffect {
    /// Wrap any `'static` value as a side effect
    pub fn new<T: Any>(payload: T) -> Self {
        Self {
            payload: Rc::new(payload),
            type_name: type_name::<T>(),
        }
    }

    /// Returns `true` if the payload is of type `T`
    pub fn is<T: Any>(&self) -> bool {
        (*self.payload).is::<T>()
    }

    /// Borrow the payload as `T`, if that is its concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.payload).downcast_ref::<T>()
    }

    /// Name of the payload type, for diagnostics only
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffect")
            .field("type", &self.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct PersistTodos(usize);

    #[test]
    fn test_downcast_to_concrete_type() {
        let effect = SideEffect::new(PersistTodos(3));

        assert!(effect.is::<PersistTodos>());
        assert!(!effect.is::<String>());
        assert_eq!(effect.downcast_ref::<PersistTodos>(), Some(&PersistTodos(3)));
        assert_eq!(effect.downcast_ref::<u32>(), None);
    }

    #[test]
    fn test_clone_shares_payload() {
        let effect = SideEffect::new(String::from("flush"));
        let copy = effect.clone();

        let a = effect.downcast_ref::<String>().map(|s| s as *const String);
        let b = copy.downcast_ref::<String>().map(|s| s as *const String);
        assert_eq!(a, b);
    }

    #[test]
    fn test_debug_shows_type_name_only() {
        let effect = SideEffect::new(42u8);
        assert_eq!(format!("{:?}", effect), "SideEffect { type: \"u8\" }");
    }
}
