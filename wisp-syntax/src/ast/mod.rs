pub mod expression;
pub mod statement;

use std::fmt;

pub use expression::{
    ArrayLiteral, BooleanLiteral, CallExpression, Expression, FunctionLiteral, HashLiteral,
    Identifier, IfExpression, IndexExpression, InfixExpression, IntegerLiteral, PrefixExpression,
    StringLiteral,
};
pub use statement::{BlockStatement, ExpressionStatement, LetStatement, ReturnStatement, Statement};

/// A program is an ordered sequence of top-level statements.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
