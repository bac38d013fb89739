//! QuadStore - an indexed, ordered snapshot of ingested quads
//!
//! Every distinct quad receives a strictly increasing ingestion position the
//! first time it is seen. The position is keyed on the quad's content, so
//! re-ingesting an identical quad keeps its original position (set
//! semantics). Readers use the positions to restore document order.

use crate::{GraphName, Quad, QuadSink, Term};
use std::collections::{BTreeMap, HashMap};

/// An ordered, indexed quad snapshot
#[derive(Clone, Debug, Default)]
pub struct QuadStore {
    /// Quads in ingestion order; the index is the ingestion position
    quads: Vec<Quad>,
    /// Quad content -> ingestion position
    positions: HashMap<Quad, usize>,
    /// Subject -> positions, ascending
    by_subject: HashMap<Term, Vec<usize>>,
    /// Graph context -> positions, ascending
    by_graph: HashMap<GraphName, Vec<usize>>,
    /// Base IRI from parsing
    pub base: Option<String>,
    /// Prefix mappings from parsing (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
}

impl QuadStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a quad, returning its ingestion position.
    ///
    /// A quad already present keeps (and returns) its first position.
    pub fn insert(&mut self, quad: Quad) -> usize {
        if let Some(&pos) = self.positions.get(&quad) {
            return pos;
        }
        let pos = self.quads.len();
        tracing::trace!(
            position = pos,
            "{} || {} || {} IN {}",
            quad.s,
            quad.p,
            quad.o,
            quad.g
        );
        self.by_subject.entry(quad.s.clone()).or_default().push(pos);
        self.by_graph.entry(quad.g.clone()).or_default().push(pos);
        self.positions.insert(quad.clone(), pos);
        self.quads.push(quad);
        pos
    }

    /// Get the number of distinct quads
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Get the quad at an ingestion position
    pub fn get(&self, position: usize) -> Option<&Quad> {
        self.quads.get(position)
    }

    /// Ingestion position of a quad, looked up by content
    pub fn position(&self, quad: &Quad) -> Option<usize> {
        self.positions.get(quad).copied()
    }

    /// Iterate quads in ingestion order
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Positions of quads with the given subject, in ingestion order
    pub fn with_subject(&self, subject: &Term) -> &[usize] {
        self.by_subject
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Positions of quads with the given subject and predicate IRI, in ingestion order
    pub fn with_subject_predicate<'a>(
        &'a self,
        subject: &Term,
        predicate: &'a str,
    ) -> impl Iterator<Item = usize> + 'a {
        self.with_subject(subject)
            .iter()
            .copied()
            .filter(move |&pos| self.quads[pos].p.as_iri() == Some(predicate))
    }

    /// Positions of quads in the given graph context, in ingestion order
    pub fn in_graph(&self, graph: &GraphName) -> &[usize] {
        self.by_graph
            .get(graph)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl QuadSink for QuadStore {
    fn on_base(&mut self, base_iri: &str) {
        self.base = Some(base_iri.to_string());
    }

    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        self.prefixes
            .insert(prefix.to_string(), namespace_iri.to_string());
    }

    fn emit_quad(&mut self, quad: Quad) {
        self.insert(quad);
    }
}

impl FromIterator<Quad> for QuadStore {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        let mut store = QuadStore::new();
        for quad in iter {
            store.insert(quad);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(s: &str, p: &str, o: Term) -> Quad {
        Quad::in_default(Term::iri(s), Term::iri(p), o)
    }

    #[test]
    fn test_positions_follow_ingestion_order() {
        let mut store = QuadStore::new();
        let q1 = quad("urn:c", "urn:p", Term::integer(1));
        let q2 = quad("urn:a", "urn:p", Term::integer(2));
        let q3 = quad("urn:b", "urn:p", Term::integer(3));

        assert_eq!(store.insert(q1.clone()), 0);
        assert_eq!(store.insert(q2.clone()), 1);
        assert_eq!(store.insert(q3.clone()), 2);

        assert_eq!(store.position(&q1), Some(0));
        assert_eq!(store.position(&q2), Some(1));
        assert_eq!(store.position(&q3), Some(2));
        assert_eq!(store.get(1), Some(&q2));
    }

    #[test]
    fn test_duplicate_keeps_first_position() {
        let mut store = QuadStore::new();
        let q = quad("urn:s", "urn:p", Term::string("x"));
        store.insert(q.clone());
        store.insert(quad("urn:t", "urn:p", Term::string("y")));

        assert_eq!(store.insert(q.clone()), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_indexes() {
        let graph = GraphName::Node(Term::blank("f"));
        let store: QuadStore = vec![
            quad("urn:s", "urn:p", Term::integer(1)),
            quad("urn:s", "urn:q", Term::integer(2)),
            Quad::new(Term::iri("urn:a"), Term::iri("urn:b"), Term::iri("urn:c"), graph.clone()),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.with_subject(&Term::iri("urn:s")), &[0, 1]);
        assert_eq!(
            store
                .with_subject_predicate(&Term::iri("urn:s"), "urn:q")
                .collect::<Vec<_>>(),
            vec![1]
        );
        assert_eq!(store.in_graph(&GraphName::Default), &[0, 1]);
        assert_eq!(store.in_graph(&graph), &[2]);
        assert!(store.in_graph(&GraphName::Node(Term::blank("none"))).is_empty());
    }

    #[test]
    fn test_sink_records_prefixes() {
        let mut store = QuadStore::new();
        store.on_base("http://example.org/");
        store.on_prefix("ex", "http://example.org/");
        assert_eq!(store.base.as_deref(), Some("http://example.org/"));
        assert_eq!(
            store.prefixes.get("ex").map(String::as_str),
            Some("http://example.org/")
        );
    }
}
