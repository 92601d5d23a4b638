//! Lexical analysis for the Wisp scripting language.
//!
//! The lexer is a single-pass forward scanner: it holds no lookahead beyond a single
//! character and produces one [`Token`] per call to [`Lexer::next_token`].

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{lookup_ident, Token, TokenKind};
