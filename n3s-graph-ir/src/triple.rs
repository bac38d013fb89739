//! Triple (predicate-subject-object) type

use crate::{GraphName, Quad, Term};

/// Error raised when a term appears in a position its kind does not allow
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermShapeError {
    /// The predicate position holds something other than an IRI
    #[error("predicate must be a NamedNode, found {0}")]
    Predicate(&'static str),

    /// A list or graph term where only a quad-level term is allowed
    #[error("{kind} term cannot appear in {position} position")]
    Position {
        kind: &'static str,
        position: &'static str,
    },
}

/// A triple of terms
///
/// The predicate is always a `Term::Iri`; [`Triple::new`] enforces this.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub s: Term,
    /// Predicate (always an IRI)
    pub p: Term,
    /// Object
    pub o: Term,
}

impl Triple {
    /// Create a triple, rejecting a predicate that is not an IRI
    pub fn new(s: Term, p: Term, o: Term) -> Result<Self, TermShapeError> {
        if !p.is_iri() {
            return Err(TermShapeError::Predicate(p.kind()));
        }
        Ok(Self { s, p, o })
    }

    /// The predicate IRI
    pub fn predicate_iri(&self) -> &str {
        self.p.as_iri().unwrap_or_default()
    }

    /// Place this triple in a graph context.
    ///
    /// Lists and graphs have no quad representation; they must be lowered
    /// to blank nodes first.
    pub fn into_quad(self, g: GraphName) -> Result<Quad, TermShapeError> {
        for (term, position) in [(&self.s, "subject"), (&self.o, "object")] {
            if term.is_structured() {
                return Err(TermShapeError::Position {
                    kind: term.kind(),
                    position,
                });
            }
        }
        Ok(Quad::new(self.s, self.p, self.o, g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_iri_predicate() {
        let triple = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        )
        .unwrap();
        assert_eq!(triple.predicate_iri(), "http://example.org/p");
    }

    #[test]
    fn test_new_rejects_non_iri_predicate() {
        let err = Triple::new(
            Term::iri("http://example.org/s"),
            Term::blank("p"),
            Term::string("o"),
        )
        .unwrap_err();
        assert_eq!(err, TermShapeError::Predicate("BlankNode"));
        assert_eq!(err.to_string(), "predicate must be a NamedNode, found BlankNode");

        assert!(Triple::new(Term::iri("urn:s"), Term::nil(), Term::iri("urn:o")).is_err());
    }

    #[test]
    fn test_into_quad_rejects_structured_terms() {
        let flat = Triple::new(Term::iri("urn:s"), Term::iri("urn:p"), Term::integer(1)).unwrap();
        let quad = flat.into_quad(GraphName::Default).unwrap();
        assert_eq!(quad.o, Term::integer(1));

        let listed = Triple::new(Term::iri("urn:s"), Term::iri("urn:p"), Term::nil()).unwrap();
        let err = listed.into_quad(GraphName::Default).unwrap_err();
        assert_eq!(err.to_string(), "List term cannot appear in object position");
    }
}
