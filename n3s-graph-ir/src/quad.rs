//! Quad: a subject/predicate/object triple scoped to a graph context

use crate::Term;

/// The graph context of a quad
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphName {
    /// The default graph
    Default,
    /// A named graph; in N3 this is the blank node standing for a formula
    Node(Term),
}

impl GraphName {
    /// Check if this is the default graph
    pub fn is_default(&self) -> bool {
        matches!(self, GraphName::Default)
    }

    /// The term naming this graph, if any
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            GraphName::Default => None,
            GraphName::Node(term) => Some(term),
        }
    }
}

impl From<Term> for GraphName {
    fn from(term: Term) -> Self {
        GraphName::Node(term)
    }
}

impl std::fmt::Display for GraphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphName::Default => write!(f, "DEFAULT"),
            GraphName::Node(term) => write!(f, "{}", term),
        }
    }
}

/// A quad as produced by a triple parser
///
/// Quads only carry IRI, blank node, literal and variable terms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quad {
    /// Subject
    pub s: Term,
    /// Predicate
    pub p: Term,
    /// Object
    pub o: Term,
    /// Graph context
    pub g: GraphName,
}

impl Quad {
    /// Create a quad in the given graph context
    pub fn new(s: Term, p: Term, o: Term, g: GraphName) -> Self {
        Self { s, p, o, g }
    }

    /// Create a quad in the default graph
    pub fn in_default(s: Term, p: Term, o: Term) -> Self {
        Self::new(s, p, o, GraphName::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_name() {
        assert!(GraphName::Default.is_default());
        assert_eq!(GraphName::Default.as_term(), None);

        let named = GraphName::from(Term::blank("f0"));
        assert!(!named.is_default());
        assert_eq!(named.as_term(), Some(&Term::blank("f0")));
        assert_eq!(named.to_string(), "_:f0");
    }

    #[test]
    fn test_quad_equality_is_content_based() {
        let a = Quad::in_default(Term::iri("urn:s"), Term::iri("urn:p"), Term::integer(1));
        let b = Quad::in_default(Term::iri("urn:s"), Term::iri("urn:p"), Term::integer(1));
        let c = Quad::new(
            Term::iri("urn:s"),
            Term::iri("urn:p"),
            Term::integer(1),
            GraphName::Node(Term::blank("g")),
        );
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
