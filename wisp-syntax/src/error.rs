use thiserror::Error;
use wisp_lexer::TokenKind;

/// A single parser diagnostic.
///
/// The parser never raises these as Rust errors — it records them and keeps
/// going, since a caller needs the full list before it can decide whether to
/// trust the tree (see [`crate::parser::Parser::errors`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected peek type was = {expected} got = {got} instead")]
    UnexpectedPeek { expected: TokenKind, got: TokenKind },

    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),

    #[error("could not parse {0:?} as integer")]
    InvalidInteger(String),
}
