//! Native functions callable from Wisp code.
//!
//! Builtins are looked up by name as a fallback when an identifier does not
//! resolve in the environment chain (see [`crate::evaluator::eval_identifier`]),
//! so a program can still shadow a builtin with `let len = 5;`.

use crate::object::{error, Value};

pub fn lookup(name: &str) -> Option<Value> {
    match name {
        "len" => Some(Value::Builtin(crate::object::Builtin {
            name: "len",
            func: len,
        })),
        _ => None,
    }
}

fn len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.len() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}
