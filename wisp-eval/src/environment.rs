//! Lexical scope chain.
//!
//! An environment is a binding frame plus an optional outer frame. Lookup
//! walks outward; `let` always writes to the innermost frame regardless of
//! whether an outer frame already binds the same name (shadowing, not
//! mutation-through).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Value;

/// Environments are shared: a function literal captures a strong reference
/// to the environment it was defined in, and several call frames may in
/// turn share that same captured environment as their `outer`.
///
/// Self-referential closures (`let f = fn() { f() };`) create a reference
/// cycle between this environment and the function value it stores. We do
/// not break the cycle here — a REPL session is expected to run for a
/// bounded time and exit, at which point the process reclaims everything at
/// once. A long-lived embedding should periodically recreate the top-level
/// environment, or swap this for an arena, rather than rely on `Rc` to free
/// self-referential closures mid-session.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// A fresh frame whose `outer` is the given environment. Used both for
    /// call frames (`outer` = the function's captured environment, not the
    /// caller's) and for any other nested scope the evaluator introduces.
    pub fn enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            bindings: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            Some(value.clone())
        } else {
            self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::native_bool;

    fn as_integer(value: Option<Value>) -> i64 {
        match value {
            Some(Value::Integer(i)) => i,
            other => panic!("expected Some(Integer), got {other:?}"),
        }
    }

    #[test]
    fn lookup_walks_outward_through_enclosing_frames() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Value::Integer(5));
        let inner = Environment::enclosed(outer.clone());

        assert_eq!(as_integer(inner.borrow().get("x")), 5);
    }

    #[test]
    fn binding_in_an_inner_frame_shadows_without_touching_the_outer_one() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Value::Integer(1));
        let inner = Environment::enclosed(outer.clone());
        inner.borrow_mut().set("x", Value::Integer(2));

        assert_eq!(as_integer(inner.borrow().get("x")), 2);
        assert_eq!(as_integer(outer.borrow().get("x")), 1);
    }

    #[test]
    fn missing_name_resolves_to_none_at_the_outermost_frame() {
        let env = Environment::new();
        assert!(env.borrow().get("missing").is_none());
    }

    #[test]
    fn values_round_trip_through_the_environment() {
        let env = Environment::new();
        env.borrow_mut().set("flag", native_bool(true));
        assert!(matches!(env.borrow().get("flag"), Some(Value::Boolean(true))));
    }
}
