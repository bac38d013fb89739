//! QuadSink trait for event-driven quad production
//!
//! Parsers call `emit_quad()` on a sink as soon as each quad is complete,
//! without knowing the concrete sink type. The sink can be:
//! - `QuadStore`: collects quads into an indexed ingestion snapshot
//! - `NQuadsWriter`: writes each quad straight to an output stream
//! - `Vec<Quad>`: plain collection, handy in tests

use crate::Quad;

/// Event-driven interface for quad construction
///
/// # Example
///
/// ```
/// use n3s_graph_ir::{Quad, QuadSink, Term};
///
/// let mut sink: Vec<Quad> = Vec::new();
/// sink.on_prefix("foaf", "http://xmlns.com/foaf/0.1/");
/// sink.emit_quad(Quad::in_default(
///     Term::iri("http://example.org/alice"),
///     Term::iri("http://xmlns.com/foaf/0.1/name"),
///     Term::string("Alice"),
/// ));
/// assert_eq!(sink.len(), 1);
/// ```
pub trait QuadSink {
    /// Called when a base IRI is declared
    ///
    /// In N3: `@base <http://example.org/> .`
    fn on_base(&mut self, base_iri: &str) {
        let _ = base_iri;
    }

    /// Called when a prefix is declared
    ///
    /// In N3: `@prefix foaf: <http://xmlns.com/foaf/0.1/> .`
    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        let _ = (prefix, namespace_iri);
    }

    /// Receive one complete quad
    fn emit_quad(&mut self, quad: Quad);
}

impl QuadSink for Vec<Quad> {
    fn emit_quad(&mut self, quad: Quad) {
        self.push(quad);
    }
}

impl<S: QuadSink + ?Sized> QuadSink for &mut S {
    fn on_base(&mut self, base_iri: &str) {
        (**self).on_base(base_iri);
    }

    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        (**self).on_prefix(prefix, namespace_iri);
    }

    fn emit_quad(&mut self, quad: Quad) {
        (**self).emit_quad(quad);
    }
}
