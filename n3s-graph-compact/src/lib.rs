//! Bidirectional codec between RDF quads and the compact form
//!
//! The compact form is a Prolog-style encoding with one fact per line:
//!
//! ```text
//! :- dynamic('<http://example.org/knows>'/2).
//! '<http://example.org/knows>'('<http://example.org/alice>','_:b').
//! '<http://example.org/says>'('_:b',('<http://example.org/is>'('<http://example.org/sky>','blue'))).
//! '<http://example.org/likes>'('_:b',[1,2,literal('2.5','http://www.w3.org/2001/XMLSchema#decimal')]).
//! ```
//!
//! - **Decode** ([`decode`]): a [`QuadStore`] snapshot is folded into a term
//!   tree by the [`Reconstructor`] (lists and nested graphs become structured
//!   terms) and rendered by the [`writer`].
//! - **Encode** ([`encode`]): compact text is tokenized by the [`Lexer`] and
//!   run through the [`CompactParser`] state machine, which lowers lists and
//!   conjunctions back into quads for a [`QuadSink`].
//!
//! # Example
//!
//! ```
//! use n3s_graph_compact::{decode, encode, DecodeOptions, EncodeOptions};
//! use n3s_graph_ir::{GraphName, Quad, QuadStore, Term};
//!
//! let store: QuadStore = vec![Quad::in_default(
//!     Term::iri("http://example.org/s"),
//!     Term::iri("http://example.org/p"),
//!     Term::integer(7),
//! )]
//! .into_iter()
//! .collect();
//!
//! let text = decode(&store, &DecodeOptions::default()).unwrap();
//! assert_eq!(text, "'<http://example.org/p>'('<http://example.org/s>',7).");
//!
//! let mut quads: Vec<Quad> = Vec::new();
//! encode(&text, &mut quads, &EncodeOptions::default()).unwrap();
//! assert_eq!(quads[0].o, Term::integer(7));
//! assert_eq!(quads[0].g, GraphName::Default);
//! ```

pub mod diagnostics;
pub mod error;
pub mod lex;
pub mod parser;
pub mod reconstruct;
pub mod writer;

pub use diagnostics::{DiagnosticEvent, Diagnostics, NoDiagnostics, TracingDiagnostics};
pub use error::{Error, Result};
pub use lex::{tokenize, Lexer, Token, TokenKind};
pub use parser::{parse, parse_with, transition, CompactParser, Expect, ParseOptions};
pub use reconstruct::{reconstruct, ReconstructOptions, Reconstructor};
pub use writer::{write_document, write_dynamic, write_graph, write_triple, WriteOptions};

use n3s_graph_ir::{GraphName, QuadSink, QuadStore};

/// Options for the decode direction
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    pub reconstruct: ReconstructOptions,
    pub write: WriteOptions,
}

/// Options for the encode direction
pub type EncodeOptions = ParseOptions;

/// Decode the default graph of `store` to compact-form text.
pub fn decode(store: &QuadStore, options: &DecodeOptions) -> Result<String> {
    decode_with(store, options, NoDiagnostics)
}

/// Decode the default graph of `store`, reporting to `diagnostics`.
pub fn decode_with<D: Diagnostics>(
    store: &QuadStore,
    options: &DecodeOptions,
    diagnostics: D,
) -> Result<String> {
    let graph = Reconstructor::with_diagnostics(store, diagnostics)
        .with_options(options.reconstruct.clone())
        .run(&GraphName::Default)?;
    Ok(write_document(&graph, &options.write))
}

/// Encode compact-form text into quads. Returns the number of facts read.
pub fn encode<S: QuadSink>(text: &str, sink: S, options: &EncodeOptions) -> Result<usize> {
    parse_with(text, sink, options, NoDiagnostics)
}

/// Encode compact-form text into quads, reporting to `diagnostics`.
pub fn encode_with<S: QuadSink, D: Diagnostics>(
    text: &str,
    sink: S,
    options: &EncodeOptions,
    diagnostics: D,
) -> Result<usize> {
    parse_with(text, sink, options, diagnostics)
}
