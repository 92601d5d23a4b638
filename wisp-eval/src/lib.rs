//! Tree-walking evaluator for the Wisp scripting language: runtime values,
//! lexically scoped environments, and the `eval` dispatch that ties them to
//! the AST produced by `wisp-syntax`.

mod builtins;
pub mod environment;
pub mod evaluator;
pub mod object;

pub use environment::{Env, Environment};
pub use evaluator::eval_program;
pub use object::Value;
