//! Runtime values.
//!
//! Values are a closed sum: dispatch everywhere is an exhaustive `match`, not
//! a trait-object hierarchy. `Function` owns a strong reference to its
//! defining environment, which is how closures capture; `ReturnWrapper` and
//! `Error` are in-band control-flow tokens rather than a separate result
//! type (see [`crate::evaluator`]).

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;
use wisp_syntax::ast::{BlockStatement, Identifier};

use crate::environment::Env;

pub type BuiltinFn = fn(&[Value]) -> Value;

#[derive(Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

#[derive(Debug)]
pub struct FunctionValue {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

/// A value produced by evaluation. Closed over the variants the language
/// actually has; adding a case means touching every `match` on purpose, not
/// by accident.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
    Null,
    Array(Rc<Vec<Value>>),
    Hash(Rc<IndexMap<HashKey, (Value, Value)>>),
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
    /// Pending non-local return. Unwrapped at function-call boundaries and
    /// at the top of a program; propagated as-is through everything else.
    ReturnWrapper(Box<Value>),
    Error(Rc<str>),
}

/// Canonical boolean singletons. Every boolean-producing operation must
/// route through [`native_bool`] rather than constructing `Boolean` ad hoc,
/// so callers can rely on there being exactly one truth and one falsehood.
pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);

pub fn native_bool(value: bool) -> Value {
    if value {
        TRUE
    } else {
        FALSE
    }
}

pub fn new_string(value: impl Into<Rc<str>>) -> Value {
    Value::String(value.into())
}

pub fn error(message: impl fmt::Display) -> Value {
    Value::Error(message.to_string().into())
}

impl Value {
    /// The type name used in error messages, e.g. `type mismatch: INTEGER + BOOLEAN`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnWrapper(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// `NULL` and `FALSE` are false; every other value, including `0` and
    /// `""`, is true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// Structural key for use in a `Hash` value. Only `Integer`, `Boolean`
    /// and `String` are hashable; anything else is a runtime error, not a
    /// panic, since it can be reached from ordinary user code (`{[]: 1}`).
    pub fn hash_key(&self) -> Result<HashKey, Value> {
        let mut hasher = DefaultHasher::new();
        let tag = match self {
            Value::Integer(i) => {
                i.hash(&mut hasher);
                HashKeyTag::Integer
            }
            Value::Boolean(b) => {
                b.hash(&mut hasher);
                HashKeyTag::Boolean
            }
            Value::String(s) => {
                s.hash(&mut hasher);
                HashKeyTag::String
            }
            other => return Err(error(format!("unusable as hash key: {}", other.type_name()))),
        };
        Ok(HashKey {
            tag,
            digest: hasher.finish(),
        })
    }

    /// The form printed by a REPL, per the value inspection rules: bare
    /// values with no Rust-debug quoting or type noise.
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::String(s) => s.to_string(),
            Value::Null => "null".to_string(),
            Value::Array(elements) => {
                let items: Vec<String> = elements.iter().map(Value::inspect).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Hash(pairs) => {
                let items: Vec<String> = pairs
                    .values()
                    .map(|(key, value)| format!("{}: {}", key.inspect(), value.inspect()))
                    .collect();
                format!("{{{}}}", items.join(", "))
            }
            Value::Function(function) => {
                let params: Vec<String> =
                    function.parameters.iter().map(|p| p.value.clone()).collect();
                format!("fn({}) {{\n{}\n}}", params.join(", "), function.body)
            }
            Value::Builtin(_) => "builtin function".to_string(),
            Value::ReturnWrapper(inner) => inner.inspect(),
            Value::Error(message) => format!("ERROR: {message}"),
        }
    }
}

/// `(type_tag, 64-bit digest)`. Tagging keeps `Integer(0)` and `Boolean(false)`
/// from colliding even if a hasher happened to produce the same digest for
/// both, which a bare digest comparison would not guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    tag: HashKeyTag,
    digest: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum HashKeyTag {
    Integer,
    Boolean,
    String,
}
