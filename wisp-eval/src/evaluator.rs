//! Structural dispatch from AST node to runtime [`Value`].
//!
//! Two in-band control tokens, `Error` and `ReturnWrapper`, thread through
//! every function here: an `Error` is returned immediately by whichever node
//! produced or received it, and a `ReturnWrapper` is returned immediately by
//! every node except a function-call boundary (and the top-level program),
//! which unwrap it. There is no separate `Result`-shaped evaluation type —
//! see the module doc on [`crate::object::Value`] for why.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::info_span;
use wisp_syntax::ast::{
    ArrayLiteral, BlockStatement, CallExpression, Expression, FunctionLiteral, HashLiteral,
    IfExpression, IndexExpression, InfixExpression, PrefixExpression, Program, Statement,
};

use crate::builtins;
use crate::environment::{Env, Environment};
use crate::object::{error, native_bool, new_string, FunctionValue, HashKey, Value};

/// Evaluates a whole program against a (possibly session-persistent)
/// top-level environment. Unwraps a bare top-level `return`, unlike
/// [`eval_block`], which lets `ReturnWrapper` keep propagating.
pub fn eval_program(program: &Program, env: &Env) -> Value {
    let mut result = Value::Null;
    for statement in &program.statements {
        result = eval_statement(statement, env);
        match result {
            Value::Error(_) => return result,
            Value::ReturnWrapper(inner) => return *inner,
            _ => {}
        }
    }
    result
}

fn eval_block(block: &BlockStatement, env: &Env) -> Value {
    let mut result = Value::Null;
    for statement in &block.statements {
        result = eval_statement(statement, env);
        if matches!(result, Value::Error(_) | Value::ReturnWrapper(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Value {
    match statement {
        Statement::Let(let_stmt) => {
            let value = eval_expression(&let_stmt.value, env);
            if value.is_error() {
                return value;
            }
            env.borrow_mut()
                .set(let_stmt.name.value.clone(), value.clone());
            value
        }
        Statement::Return(return_stmt) => {
            let value = eval_expression(&return_stmt.value, env);
            if value.is_error() {
                return value;
            }
            Value::ReturnWrapper(Box::new(value))
        }
        Statement::Expression(expr_stmt) => eval_expression(&expr_stmt.expression, env),
        Statement::Block(block) => eval_block(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Env) -> Value {
    match expression {
        Expression::IntegerLiteral(node) => Value::Integer(node.value),
        Expression::StringLiteral(node) => new_string(node.value.clone()),
        Expression::Boolean(node) => native_bool(node.value),
        Expression::Identifier(node) => eval_identifier(&node.value, env),
        Expression::Prefix(node) => eval_prefix_expression(node, env),
        Expression::Infix(node) => eval_infix_expression(node, env),
        Expression::If(node) => eval_if_expression(node, env),
        Expression::Function(node) => eval_function_literal(node, env),
        Expression::Call(node) => eval_call_expression(node, env),
        Expression::Array(node) => eval_array_literal(node, env),
        Expression::Hash(node) => eval_hash_literal(node, env),
        Expression::Index(node) => eval_index_expression(node, env),
    }
}

/// Falls back to a builtin lookup so ordinary code can still shadow a
/// builtin name with a `let` binding of its own.
fn eval_identifier(name: &str, env: &Env) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    error(format!("identifier not found: {name}"))
}

fn eval_prefix_expression(node: &PrefixExpression, env: &Env) -> Value {
    let right = eval_expression(&node.right, env);
    if right.is_error() {
        return right;
    }
    match node.operator.as_str() {
        "!" => native_bool(!right.is_truthy()),
        "-" => match right {
            Value::Integer(i) => Value::Integer(-i),
            other => error(format!("unknown operator: -{}", other.type_name())),
        },
        other => error(format!("unknown operator: {other}{}", right.type_name())),
    }
}

fn eval_infix_expression(node: &InfixExpression, env: &Env) -> Value {
    let left = eval_expression(&node.left, env);
    if left.is_error() {
        return left;
    }
    let right = eval_expression(&node.right, env);
    if right.is_error() {
        return right;
    }
    apply_infix_operator(&node.operator, left, right)
}

fn apply_infix_operator(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r),
        (Value::Boolean(l), Value::Boolean(r)) => eval_boolean_infix(operator, *l, *r),
        _ if left.type_name() != right.type_name() => error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
        _ => error(format!(
            "unknown operator: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left + right),
        "-" => Value::Integer(left - right),
        "*" => Value::Integer(left * right),
        "/" => Value::Integer(left / right),
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        other => error(format!("unknown operator: INTEGER {other} INTEGER")),
    }
}

fn eval_string_infix(operator: &str, left: &Rc<str>, right: &Rc<str>) -> Value {
    match operator {
        "+" => new_string(format!("{left}{right}")),
        other => error(format!("unknown operator: STRING {other} STRING")),
    }
}

fn eval_boolean_infix(operator: &str, left: bool, right: bool) -> Value {
    match operator {
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        other => error(format!("unknown operator: BOOLEAN {other} BOOLEAN")),
    }
}

fn eval_if_expression(node: &IfExpression, env: &Env) -> Value {
    let condition = eval_expression(&node.condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block(&node.consequence, env)
    } else if let Some(alternative) = &node.alternative {
        eval_block(alternative, env)
    } else {
        Value::Null
    }
}

fn eval_function_literal(node: &FunctionLiteral, env: &Env) -> Value {
    Value::Function(Rc::new(FunctionValue {
        parameters: node.parameters.clone(),
        body: node.body.clone(),
        env: env.clone(),
    }))
}

fn eval_call_expression(node: &CallExpression, env: &Env) -> Value {
    let function = eval_expression(&node.function, env);
    if function.is_error() {
        return function;
    }

    let mut arguments = Vec::with_capacity(node.arguments.len());
    for argument in &node.arguments {
        let value = eval_expression(argument, env);
        if value.is_error() {
            return value;
        }
        arguments.push(value);
    }

    apply_function(function, &arguments)
}

/// Extra arguments are silently ignored and missing parameters are simply
/// never bound (a later reference to them fails with "identifier not
/// found", the same as any other unbound name) — arity is not checked,
/// matching the lenient behavior the language's origin allows.
fn apply_function(function: Value, arguments: &[Value]) -> Value {
    match function {
        Value::Function(function) => {
            let _span = info_span!(
                "apply_function",
                parameters = function.parameters.len(),
                arguments = arguments.len()
            )
            .entered();
            let call_env = Environment::enclosed(function.env.clone());
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                call_env
                    .borrow_mut()
                    .set(parameter.value.clone(), argument.clone());
            }
            match eval_block(&function.body, &call_env) {
                Value::ReturnWrapper(inner) => *inner,
                other => other,
            }
        }
        Value::Builtin(builtin) => (builtin.func)(arguments),
        other => error(format!("not a function: {}", other.type_name())),
    }
}

fn eval_array_literal(node: &ArrayLiteral, env: &Env) -> Value {
    let mut elements = Vec::with_capacity(node.elements.len());
    for element in &node.elements {
        let value = eval_expression(element, env);
        if value.is_error() {
            return value;
        }
        elements.push(value);
    }
    Value::Array(Rc::new(elements))
}

fn eval_hash_literal(node: &HashLiteral, env: &Env) -> Value {
    let mut pairs = IndexMap::new();
    for (key_expr, value_expr) in &node.pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }
        let hash_key = match key.hash_key() {
            Ok(hash_key) => hash_key,
            Err(unhashable) => return unhashable,
        };
        pairs.insert(hash_key, (key, value));
    }
    Value::Hash(Rc::new(pairs))
}

fn eval_index_expression(node: &IndexExpression, env: &Env) -> Value {
    let left = eval_expression(&node.left, env);
    if left.is_error() {
        return left;
    }
    let index = eval_expression(&node.index, env);
    if index.is_error() {
        return index;
    }

    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => index_array(elements.as_slice(), *i),
        (Value::Hash(pairs), key) => index_hash(pairs, key),
        _ => error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}

fn index_array(elements: &[Value], index: i64) -> Value {
    if index < 0 || index as usize >= elements.len() {
        return Value::Null;
    }
    elements[index as usize].clone()
}

fn index_hash(pairs: &IndexMap<HashKey, (Value, Value)>, key: &Value) -> Value {
    match key.hash_key() {
        Ok(hash_key) => pairs
            .get(&hash_key)
            .map(|(_, value)| value.clone())
            .unwrap_or(Value::Null),
        Err(unhashable) => unhashable,
    }
}
