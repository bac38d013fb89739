//! N3 parser emitting quads.
//!
//! Covers Turtle plus the N3 constructs that matter to the compact form:
//! `{ ... }` formulas (each becomes a named graph context), `?variables`,
//! `=>` / `<=` and `=`.
//!
//! # Example
//!
//! ```
//! use n3s_graph_ir::QuadStore;
//! use n3s_graph_n3::parse;
//!
//! let n3 = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:says { ex:sky ex:is ex:blue } .
//! "#;
//!
//! let mut store = QuadStore::new();
//! parse(n3, &mut store).unwrap();
//! assert_eq!(store.len(), 2);
//! ```

pub mod error;
pub mod iri;
pub mod lex;
pub mod parser;

pub use error::{N3Error, Result};
pub use lex::{tokenize, Lexer, Token, TokenKind};
pub use parser::{parse, Parser};

use n3s_graph_ir::QuadStore;

/// Parse one N3 document into a fresh ingestion snapshot.
pub fn parse_to_store(input: &str) -> Result<QuadStore> {
    let mut store = QuadStore::new();
    parse(input, &mut store)?;
    Ok(store)
}
