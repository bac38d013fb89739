//! Structured diagnostics for decode and encode
//!
//! Conversions report what they do through an injected [`Diagnostics`] sink
//! instead of logging directly. Tests collect events into a `Vec`; the CLI
//! forwards them to `tracing`.

use n3s_graph_ir::{BlankId, Term, Triple};

/// One observable step of a conversion
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticEvent {
    /// The lexer produced a token
    TokenRead { token: String, line: usize },
    /// The parser completed a fact
    TripleEmitted(Triple),
    /// A list term was expanded into `rdf:first`/`rdf:rest` quads
    ListLowered { head: Term, len: usize },
    /// A conjunction was expanded into quads in a fresh graph context
    GraphLowered { node: BlankId, triples: usize },
    /// A first/rest chain was folded into a list term
    ListFolded { head: BlankId, len: usize },
    /// A blank node carried link quads but did not form a valid list
    ListDegraded { node: BlankId },
    /// A graph context was folded into a nested graph term
    GraphFolded { node: BlankId, triples: usize },
    /// A reconstruction run finished
    GraphReconstructed {
        triples: usize,
        quads: usize,
        consumed: usize,
    },
}

/// Receiver of diagnostic events
pub trait Diagnostics {
    fn event(&mut self, event: DiagnosticEvent);
}

impl Diagnostics for Vec<DiagnosticEvent> {
    fn event(&mut self, event: DiagnosticEvent) {
        self.push(event);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn event(&mut self, event: DiagnosticEvent) {
        (**self).event(event);
    }
}

/// Discards every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn event(&mut self, _event: DiagnosticEvent) {}
}

/// Forwards events to `tracing`: structural events at debug, per-token and
/// per-triple events at trace.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn event(&mut self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::TokenRead { token, line } => {
                tracing::trace!(line, "Reading token {}", token);
            }
            DiagnosticEvent::TripleEmitted(triple) => {
                tracing::trace!("Emitting {} {} {}", triple.s, triple.p, triple.o);
            }
            DiagnosticEvent::ListLowered { head, len } => {
                tracing::debug!(len, "Lowered list at {}", head);
            }
            DiagnosticEvent::GraphLowered { node, triples } => {
                tracing::debug!(triples, "Lowered conjunction into {}", node);
            }
            DiagnosticEvent::ListFolded { head, len } => {
                tracing::debug!(len, "Folded list at {}", head);
            }
            DiagnosticEvent::ListDegraded { node } => {
                tracing::debug!("{} has link quads but is not a list", node);
            }
            DiagnosticEvent::GraphFolded { node, triples } => {
                tracing::debug!(triples, "Folded graph {}", node);
            }
            DiagnosticEvent::GraphReconstructed {
                triples,
                quads,
                consumed,
            } => {
                tracing::debug!(triples, quads, consumed, "reconstructed graph");
            }
        }
    }
}
