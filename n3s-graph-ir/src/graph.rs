//! Graph - an ordered collection of triples
//!
//! Order is significant: when a graph is reconstructed from quads, the
//! triple order follows the original ingestion order, not a canonical sort.

use crate::{Term, Triple};
use std::collections::HashSet;

/// An ordered collection of triples
///
/// # Example
///
/// ```
/// use n3s_graph_ir::{Graph, Term, Triple};
///
/// let mut graph = Graph::new();
///
/// graph.add(Triple::new(
///     Term::iri("http://example.org/alice"),
///     Term::iri("http://xmlns.com/foaf/0.1/name"),
///     Term::string("Alice"),
/// ).unwrap());
///
/// assert_eq!(graph.dynamic_predicates(), vec!["http://xmlns.com/foaf/0.1/name"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple to the graph
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Get a reference to the triples
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Get all triples (consuming the graph)
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    /// Distinct predicate IRIs reachable from this graph, in first-occurrence order.
    ///
    /// Recurses into nested `Term::Graph` values in subject and object
    /// position, including graphs held inside lists.
    pub fn dynamic_predicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        collect_predicates(&self.triples, &mut seen, &mut out);
        out
    }
}

fn collect_predicates<'a>(
    triples: &'a [Triple],
    seen: &mut HashSet<&'a str>,
    out: &mut Vec<&'a str>,
) {
    for triple in triples {
        collect_term_predicates(&triple.s, seen, out);
        if let Some(iri) = triple.p.as_iri() {
            if seen.insert(iri) {
                out.push(iri);
            }
        }
        collect_term_predicates(&triple.o, seen, out);
    }
}

fn collect_term_predicates<'a>(
    term: &'a Term,
    seen: &mut HashSet<&'a str>,
    out: &mut Vec<&'a str>,
) {
    match term {
        Term::Graph(triples) => collect_predicates(triples, seen, out),
        Term::List(items) => {
            for item in items {
                collect_term_predicates(item, seen, out);
            }
        }
        _ => {}
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

impl From<Graph> for Term {
    fn from(graph: Graph) -> Self {
        Term::Graph(graph.triples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(s: Term, p: &str, o: Term) -> Triple {
        Triple::new(s, Term::iri(p), o).unwrap()
    }

    #[test]
    fn test_graph_preserves_insertion_order() {
        let mut graph = Graph::new();
        graph.add(triple(Term::iri("urn:b"), "urn:p", Term::integer(1)));
        graph.add(triple(Term::iri("urn:a"), "urn:p", Term::integer(2)));

        let subjects: Vec<_> = graph.iter().map(|t| t.s.as_iri().unwrap()).collect();
        assert_eq!(subjects, vec!["urn:b", "urn:a"]);
    }

    #[test]
    fn test_dynamic_predicates_are_distinct() {
        let graph: Graph = vec![
            triple(Term::iri("urn:a"), "urn:p1", Term::integer(1)),
            triple(Term::iri("urn:b"), "urn:p2", Term::integer(2)),
            triple(Term::iri("urn:c"), "urn:p1", Term::integer(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(graph.dynamic_predicates(), vec!["urn:p1", "urn:p2"]);
    }

    #[test]
    fn test_dynamic_predicates_recurse_into_nested_graphs() {
        let inner = Term::Graph(vec![triple(Term::iri("urn:a"), "urn:inner", Term::iri("urn:c"))]);
        let in_list = Term::List(vec![Term::Graph(vec![triple(
            Term::blank("x"),
            "urn:listed",
            Term::iri("urn:d"),
        )])]);

        let graph: Graph = vec![
            triple(Term::iri("urn:s"), "urn:outer", inner),
            triple(in_list, "urn:outer", Term::iri("urn:o")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            graph.dynamic_predicates(),
            vec!["urn:outer", "urn:inner", "urn:listed"]
        );
    }

    #[test]
    fn test_empty_graph_has_no_predicates() {
        assert!(Graph::new().dynamic_predicates().is_empty());
    }
}
