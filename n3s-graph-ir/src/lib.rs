//! Term, triple, graph and quad model shared by the N3 and compact-form codecs
//!
//! Two views of the same data live here:
//!
//! 1. **Quads** - flat `(subject, predicate, object, graph)` tuples as parsers
//!    produce them. Quads only carry IRIs, blank nodes, literals and variables.
//!
//! 2. **Term trees** - [`Graph`]s of [`Triple`]s whose terms may themselves be
//!    lists or nested graphs, folded out of `rdf:first`/`rdf:rest` chains and
//!    graph contexts.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!
//! 2. **Explicit datatypes** - Literals always have an explicit datatype. Plain
//!    strings use `xsd:string`, language-tagged strings use `rdf:langString`.
//!
//! 3. **Ingestion order is preserved** - [`QuadStore`] assigns every distinct
//!    quad a position the first time it is seen, and reconstructed graphs keep
//!    that order.
//!
//! # Example
//!
//! ```
//! use n3s_graph_ir::{Quad, QuadSink, QuadStore, Term};
//!
//! let mut store = QuadStore::new();
//! store.emit_quad(Quad::in_default(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! ));
//! assert_eq!(store.len(), 1);
//! ```

mod blank;
pub mod datatype;
mod graph;
mod nquads;
mod quad;
mod sink;
mod store;
mod term;
mod triple;

pub use blank::BlankNodeAllocator;
pub use datatype::Datatype;
pub use graph::Graph;
pub use nquads::{format_quad, NQuadsWriter};
pub use quad::{GraphName, Quad};
pub use sink::QuadSink;
pub use store::QuadStore;
pub use term::{BlankId, Term};
pub use triple::{TermShapeError, Triple};
