//! Term-tree writer: a graph to compact-form text
//!
//! One line per triple, `predicate(subject,object).`, optionally preceded by
//! a `:- dynamic('<iri>'/2).` line for each predicate the graph uses.

use n3s_graph_ir::{Graph, Term, Triple};
use regex::Regex;

/// Configuration for writing compact-form text
#[derive(Clone, Debug, Default)]
pub struct WriteOptions {
    /// Emit the `:- dynamic` preamble
    pub dynamic_preamble: bool,

    /// Predicates matching any of these are left out of the preamble
    pub exclude: Vec<Regex>,
}

impl WriteOptions {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the dynamic preamble is written
    pub fn with_dynamic_preamble(mut self, enabled: bool) -> Self {
        self.dynamic_preamble = enabled;
        self
    }

    /// Add a preamble exclusion pattern
    pub fn with_exclude(mut self, pattern: Regex) -> Self {
        self.exclude.push(pattern);
        self
    }
}

fn escape(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}

/// A plain string whose quoted form would lex as an IRI or a blank node.
fn reads_as_node(value: &str) -> bool {
    value.starts_with('<') || value.starts_with("_:")
}

fn write_quoted(value: &str, out: &mut String) {
    out.push('\'');
    escape(value, out);
    out.push('\'');
}

/// Append the compact form of `term` to `out`.
pub fn write_term(term: &Term, out: &mut String) {
    match term {
        Term::Iri(iri) => {
            out.push_str("'<");
            out.push_str(iri);
            out.push_str(">'");
        }
        Term::BlankNode(id) => {
            out.push('\'');
            out.push_str(&id.to_string());
            out.push('\'');
        }
        Term::Literal {
            value, datatype, ..
        } => {
            if datatype.is_xsd_string() && !reads_as_node(value) {
                write_quoted(value, out);
            } else if datatype.is_xsd_integer() || datatype.is_xsd_boolean() {
                out.push_str(value);
            } else {
                out.push_str("literal(");
                write_quoted(value, out);
                out.push(',');
                write_quoted(datatype.as_iri(), out);
                out.push(')');
            }
        }
        Term::Variable(name) => out.push_str(name),
        Term::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_term(item, out);
            }
            out.push(']');
        }
        Term::Graph(triples) => {
            out.push('(');
            for (i, triple) in triples.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_fact(triple, out);
            }
            out.push(')');
        }
    }
}

/// `predicate(subject,object)` without the terminating dot
fn write_fact(triple: &Triple, out: &mut String) {
    write_term(&triple.p, out);
    out.push('(');
    write_term(&triple.s, out);
    out.push(',');
    write_term(&triple.o, out);
    out.push(')');
}

/// Render one triple as a compact-form line, `predicate(subject,object).`
pub fn write_triple(triple: &Triple) -> String {
    let mut out = String::new();
    write_fact(triple, &mut out);
    out.push('.');
    out
}

/// Render every triple of `graph`, one per line.
pub fn write_graph(graph: &Graph) -> String {
    graph
        .iter()
        .map(write_triple)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the `:- dynamic` preamble: one line per predicate of `graph`
/// (nested graphs included) not matched by any `exclude` pattern.
pub fn write_dynamic(graph: &Graph, exclude: &[Regex]) -> String {
    graph
        .dynamic_predicates()
        .into_iter()
        .filter(|iri| !exclude.iter().any(|pattern| pattern.is_match(iri)))
        .map(|iri| format!(":- dynamic('<{}>'/2).", iri))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a full document: the optional preamble, then the triples.
pub fn write_document(graph: &Graph, options: &WriteOptions) -> String {
    let body = write_graph(graph);
    if !options.dynamic_preamble {
        return body;
    }
    let preamble = write_dynamic(graph, &options.exclude);
    if preamble.is_empty() {
        body
    } else {
        format!("{}\n{}", preamble, body)
    }
}
