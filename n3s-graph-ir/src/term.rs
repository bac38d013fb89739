//! Term types: IRI, blank node, literal, variable, list and graph
//!
//! Terms are the building blocks of triples. A term can be:
//! - An IRI (always expanded, never prefixed)
//! - A blank node (with stable identifier)
//! - A literal (lexical value + explicit datatype + optional language tag)
//! - A variable (an N3 input artifact)
//! - A list (ordered terms, folded from an `rdf:first`/`rdf:rest` chain)
//! - A graph (ordered triples, folded from a nested graph context)
//!
//! Only the first four kinds ever appear inside a [`Quad`](crate::Quad).
//! Lists and graphs exist in the term tree produced by reconstruction and
//! are lowered back to quads when encoding.

use crate::{Datatype, Triple};
use std::sync::Arc;

/// Blank node identifier
///
/// Blank node IDs are stable within a graph but have no global meaning.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label
    ///
    /// The label should NOT include the `_:` prefix.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label (without `_:` prefix)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The short form of this identifier: everything after the last `_` or `.`.
    ///
    /// Producers scope labels per document (`b0_x`); the short form drops that
    /// scope again. Identifiers without a separator are returned unchanged.
    pub fn short(&self) -> BlankId {
        match self.0.rfind(|c: char| c == '_' || c == '.') {
            Some(pos) if pos + 1 < self.0.len() => BlankId::new(&self.0[pos + 1..]),
            _ => self.clone(),
        }
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// A term in subject, predicate, object or graph position
///
/// # Invariants
///
/// - `Term::Iri` always contains an **expanded** IRI, never a prefixed form.
/// - Only `Term::Literal` carries a datatype.
/// - The predicate position of a triple can only be `Term::Iri`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// Full expanded IRI (a named node)
    Iri(Arc<str>),

    /// Blank node with stable identifier
    BlankNode(BlankId),

    /// Literal value with explicit datatype
    Literal {
        /// Lexical form of the value
        value: Arc<str>,
        /// Datatype (always present)
        datatype: Datatype,
        /// Language tag (only valid when datatype is rdf:langString)
        language: Option<Arc<str>>,
    },

    /// Variable name (without the leading `?`)
    Variable(Arc<str>),

    /// Ordered list of terms
    List(Vec<Term>),

    /// Ordered nested graph
    Graph(Vec<Triple>),
}

impl Term {
    /// Create an IRI term from an expanded IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::BlankNode(BlankId::new(label))
    }

    /// Create a plain string literal (xsd:string)
    pub fn string(value: impl AsRef<str>) -> Self {
        Self::typed(value, Datatype::xsd_string())
    }

    /// Create a boolean literal (xsd:boolean)
    pub fn boolean(value: bool) -> Self {
        Self::typed(value.to_string(), Datatype::xsd_boolean())
    }

    /// Create an integer literal (xsd:integer)
    pub fn integer(value: i64) -> Self {
        Self::typed(value.to_string(), Datatype::xsd_integer())
    }

    /// Create a language-tagged string literal (rdf:langString)
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            value: Arc::from(value.as_ref()),
            datatype: Datatype::rdf_lang_string(),
            language: Some(Arc::from(lang.as_ref())),
        }
    }

    /// Create a literal with an explicit datatype from its lexical form
    pub fn typed(value: impl AsRef<str>, datatype: Datatype) -> Self {
        Term::Literal {
            value: Arc::from(value.as_ref()),
            datatype,
            language: None,
        }
    }

    /// Create a variable term
    pub fn variable(name: impl AsRef<str>) -> Self {
        Term::Variable(Arc::from(name.as_ref()))
    }

    /// The empty list, the folded form of `rdf:nil`
    pub fn nil() -> Self {
        Term::List(Vec::new())
    }

    /// Check if this is an IRI term
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// Check if this is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Check if this term is structured (list or graph) and so cannot appear in a quad
    pub fn is_structured(&self) -> bool {
        matches!(self, Term::List(_) | Term::Graph(_))
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get as blank node ID
    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            Term::BlankNode(id) => Some(id),
            _ => None,
        }
    }

    /// Try to get literal components
    pub fn as_literal(&self) -> Option<(&str, &Datatype, Option<&str>)> {
        match self {
            Term::Literal {
                value,
                datatype,
                language,
            } => Some((value, datatype, language.as_deref())),
            _ => None,
        }
    }

    /// Name of the term kind, for diagnostics and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Iri(_) => "NamedNode",
            Term::BlankNode(_) => "BlankNode",
            Term::Literal { .. } => "Literal",
            Term::Variable(_) => "Variable",
            Term::List(_) => "List",
            Term::Graph(_) => "Graph",
        }
    }
}

/// Escape a string for an N-Triples/N-Quads quoted literal.
pub(crate) fn escape_ntriples(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "{}", id),
            Term::Literal {
                value,
                datatype,
                language,
            } => {
                let mut quoted = String::with_capacity(value.len() + 2);
                escape_ntriples(value, &mut quoted);
                write!(f, "\"{}\"", quoted)?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)
                } else if !datatype.is_xsd_string() {
                    write!(f, "^^<{}>", datatype.as_iri())
                } else {
                    Ok(())
                }
            }
            Term::Variable(name) => write!(f, "?{}", name),
            Term::List(items) => {
                write!(f, "(")?;
                for item in items {
                    write!(f, " {}", item)?;
                }
                write!(f, " )")
            }
            Term::Graph(triples) => {
                write!(f, "{{")?;
                for triple in triples {
                    write!(f, " {} {} {} .", triple.s, triple.p, triple.o)?;
                }
                write!(f, " }}")
            }
        }
    }
}
