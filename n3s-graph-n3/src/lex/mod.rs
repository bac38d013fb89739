//! N3 lexer module.
//!
//! Tokenizes N3 input using winnow.

pub mod chars;
pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
