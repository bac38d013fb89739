//! Graph reconstruction: quads to a nested term tree
//!
//! Each blank node met in subject or object position is classified, in this
//! order, as
//!
//! 1. a list head, when it starts an `rdf:first`/`rdf:rest` chain with exactly
//!    one of each link at every node, ending in `rdf:nil`;
//! 2. a graph head, when unvisited quads use it as their graph context;
//! 3. a plain blank node, shortened to its local label. Two nodes never
//!    share a short label: a clash falls back to the full label, then to a
//!    numbered `label-N`.
//!
//! Quads are read from an immutable [`QuadStore`] snapshot. A consumed set
//! records every quad already visited, so link and nested-graph quads are
//! never emitted twice. Triples of one context come out in two passes, each
//! in ingestion order: ordinary quads first, then leftover list links.

use std::collections::{HashMap, HashSet};

use n3s_graph_ir::{BlankId, Graph, GraphName, Quad, QuadStore, Term, Triple};
use n3s_vocab::rdf;

use crate::diagnostics::{DiagnosticEvent, Diagnostics, NoDiagnostics};
use crate::error::{Error, Result};

/// Options for reconstruction
#[derive(Clone, Debug, Default)]
pub struct ReconstructOptions {
    /// Pass variables through instead of failing with `UnsupportedTermKind`
    pub allow_variables: bool,
}

impl ReconstructOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether variables are allowed
    pub fn with_allow_variables(mut self, allow: bool) -> Self {
        self.allow_variables = allow;
        self
    }
}

fn is_link(predicate: &Term) -> bool {
    matches!(predicate.as_iri(), Some(rdf::FIRST | rdf::REST))
}

fn is_nil(term: &Term) -> bool {
    term.as_iri() == Some(rdf::NIL)
}

/// Rebuilds a term tree from one quad snapshot.
///
/// One reconstructor serves one `run`; the consumed set is discarded with it.
pub struct Reconstructor<'a, D = NoDiagnostics> {
    store: &'a QuadStore,
    options: ReconstructOptions,
    consumed: HashSet<usize>,
    /// Graph nodes currently being folded
    active: HashSet<Term>,
    /// Full blank id -> label written for it
    labels: HashMap<BlankId, BlankId>,
    /// Labels handed out so far
    taken: HashSet<BlankId>,
    diagnostics: D,
}

impl<'a> Reconstructor<'a> {
    /// Create a reconstructor over `store`.
    pub fn new(store: &'a QuadStore) -> Self {
        Self::with_diagnostics(store, NoDiagnostics)
    }
}

impl<'a, D: Diagnostics> Reconstructor<'a, D> {
    /// Create a reconstructor over `store` reporting to `diagnostics`.
    pub fn with_diagnostics(store: &'a QuadStore, diagnostics: D) -> Self {
        Self {
            store,
            options: ReconstructOptions::default(),
            consumed: HashSet::new(),
            active: HashSet::new(),
            labels: HashMap::new(),
            taken: HashSet::new(),
            diagnostics,
        }
    }

    /// Set the options.
    pub fn with_options(mut self, options: ReconstructOptions) -> Self {
        self.options = options;
        self
    }

    /// Reconstruct the graph for `context`.
    pub fn run(mut self, context: &GraphName) -> Result<Graph> {
        let triples = self.graph(context)?;
        self.diagnostics.event(DiagnosticEvent::GraphReconstructed {
            triples: triples.len(),
            quads: self.store.len(),
            consumed: self.consumed.len(),
        });
        Ok(triples.into_iter().collect())
    }

    /// The label written for `id`, unique within this run.
    fn label(&mut self, id: &BlankId) -> BlankId {
        if let Some(label) = self.labels.get(id) {
            return label.clone();
        }
        let short = id.short();
        let label = [short.clone(), id.clone()]
            .into_iter()
            .chain((1..).map(|n| BlankId::new(format!("{}-{}", short, n))))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_else(|| id.clone());
        self.taken.insert(label.clone());
        self.labels.insert(id.clone(), label.clone());
        label
    }

    fn graph(&mut self, context: &GraphName) -> Result<Vec<Triple>> {
        let store = self.store;
        let (links, facts): (Vec<_>, Vec<_>) = store
            .in_graph(context)
            .iter()
            .filter_map(|&pos| store.get(pos).map(|quad| (pos, quad)))
            .partition(|(_, quad)| is_link(&quad.p));

        let mut triples = Vec::new();
        for (pos, quad) in facts {
            if self.consumed.insert(pos) {
                let s = self.resolve(&quad.s)?;
                triples.push(self.triple(s, quad)?);
            }
        }
        // Leftover links belong to chains that did not fold; their subject
        // stays a plain blank node.
        for (pos, quad) in links {
            if self.consumed.insert(pos) {
                let s = match &quad.s {
                    Term::BlankNode(id) => Term::BlankNode(self.label(id)),
                    other => self.resolve(other)?,
                };
                triples.push(self.triple(s, quad)?);
            }
        }
        Ok(triples)
    }

    fn triple(&mut self, s: Term, quad: &Quad) -> Result<Triple> {
        if quad.p.is_variable() && !self.options.allow_variables {
            return Err(Error::unsupported(&quad.p));
        }
        let o = self.resolve(&quad.o)?;
        Ok(Triple::new(s, quad.p.clone(), o)?)
    }

    fn resolve(&mut self, term: &Term) -> Result<Term> {
        match term {
            Term::Iri(_) if is_nil(term) => Ok(Term::nil()),
            Term::Variable(_) if !self.options.allow_variables => Err(Error::unsupported(term)),
            Term::BlankNode(id) => self.resolve_blank(term, id),
            other => Ok(other.clone()),
        }
    }

    fn resolve_blank(&mut self, term: &Term, id: &BlankId) -> Result<Term> {
        if let Some(items) = self.fold_list(term, id)? {
            return Ok(Term::List(items));
        }

        let context = GraphName::Node(term.clone());
        let pending = self
            .store
            .in_graph(&context)
            .iter()
            .any(|pos| !self.consumed.contains(pos));
        if pending && self.active.insert(term.clone()) {
            let triples = self.graph(&context);
            self.active.remove(term);
            let triples = triples?;
            self.diagnostics.event(DiagnosticEvent::GraphFolded {
                node: id.clone(),
                triples: triples.len(),
            });
            return Ok(Term::Graph(triples));
        }

        Ok(Term::BlankNode(self.label(id)))
    }

    fn unconsumed(&self, node: &Term, predicate: &'a str) -> Vec<usize> {
        self.store
            .with_subject_predicate(node, predicate)
            .filter(|pos| !self.consumed.contains(pos))
            .collect()
    }

    /// Fold the chain starting at `head`, or `None` if it is not a list.
    fn fold_list(&mut self, head: &Term, id: &BlankId) -> Result<Option<Vec<Term>>> {
        let store = self.store;
        let mut links: Vec<(usize, usize)> = Vec::new();
        let mut seen = HashSet::new();
        let mut node = head.clone();

        let valid = loop {
            if !node.is_blank() || !seen.insert(node.clone()) {
                break false;
            }
            let firsts = self.unconsumed(&node, rdf::FIRST);
            let rests = self.unconsumed(&node, rdf::REST);
            if links.is_empty() && firsts.is_empty() && rests.is_empty() {
                return Ok(None);
            }
            let ([first], [rest]) = (firsts.as_slice(), rests.as_slice()) else {
                break false;
            };
            let Some(next) = store.get(*rest).map(|quad| &quad.o) else {
                break false;
            };
            links.push((*first, *rest));
            if is_nil(next) {
                break true;
            }
            node = next.clone();
        };

        if !valid {
            self.diagnostics
                .event(DiagnosticEvent::ListDegraded { node: id.clone() });
            return Ok(None);
        }

        for &(first, rest) in &links {
            self.consumed.insert(first);
            self.consumed.insert(rest);
        }
        let mut items = Vec::with_capacity(links.len());
        for (first, _) in links {
            if let Some(quad) = store.get(first) {
                items.push(self.resolve(&quad.o)?);
            }
        }
        self.diagnostics.event(DiagnosticEvent::ListFolded {
            head: id.clone(),
            len: items.len(),
        });
        Ok(Some(items))
    }
}

/// Reconstruct the graph for `context` from `store`.
pub fn reconstruct(store: &QuadStore, context: &GraphName) -> Result<Graph> {
    Reconstructor::new(store).run(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use n3s_graph_n3::parse_to_store;
    use pretty_assertions::assert_eq;

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    fn triple(s: Term, p: &str, o: Term) -> Triple {
        Triple::new(s, iri(p), o).unwrap()
    }

    fn decode(n3: &str) -> Vec<Triple> {
        let store = parse_to_store(n3).unwrap();
        reconstruct(&store, &GraphName::Default)
            .unwrap()
            .into_triples()
    }

    #[test]
    fn test_plain_quads_keep_ingestion_order() {
        let triples = decode("<urn:c> <urn:p> 1 . <urn:a> <urn:p> true . <urn:b> <urn:p> \"x\" .");
        assert_eq!(
            triples,
            vec![
                triple(iri("urn:c"), "urn:p", Term::integer(1)),
                triple(iri("urn:a"), "urn:p", Term::boolean(true)),
                triple(iri("urn:b"), "urn:p", Term::string("x")),
            ]
        );
    }

    #[test]
    fn test_list_is_folded() {
        let triples = decode("<urn:s> <urn:p> (1 (2) ()) .");
        assert_eq!(
            triples,
            vec![triple(
                iri("urn:s"),
                "urn:p",
                Term::List(vec![
                    Term::integer(1),
                    Term::List(vec![Term::integer(2)]),
                    Term::nil(),
                ])
            )]
        );
    }

    #[test]
    fn test_nil_is_empty_list() {
        let triples = decode("<urn:s> <urn:p> () .");
        assert_eq!(triples, vec![triple(iri("urn:s"), "urn:p", Term::nil())]);
    }

    #[test]
    fn test_list_in_subject_position() {
        let triples = decode("(<urn:a>) <urn:p> <urn:o> .");
        assert_eq!(
            triples,
            vec![triple(Term::List(vec![iri("urn:a")]), "urn:p", iri("urn:o"))]
        );
    }

    #[test]
    fn test_formula_is_folded() {
        let triples = decode("<urn:s> <urn:p> { <urn:a> <urn:b> <urn:c> . <urn:a> <urn:b> (1) } .");
        assert_eq!(
            triples,
            vec![triple(
                iri("urn:s"),
                "urn:p",
                Term::Graph(vec![
                    triple(iri("urn:a"), "urn:b", iri("urn:c")),
                    triple(iri("urn:a"), "urn:b", Term::List(vec![Term::integer(1)])),
                ])
            )]
        );
    }

    #[test]
    fn test_blank_nodes_are_shortened() {
        let triples = decode("_:alice <urn:knows> _:bob .");
        assert_eq!(
            triples,
            vec![triple(Term::blank("alice"), "urn:knows", Term::blank("bob"))]
        );
    }

    #[test]
    fn test_degraded_list_is_plain_blank() {
        let node = Term::blank("b0_x");
        let store: QuadStore = vec![
            Quad::in_default(node.clone(), iri(rdf::FIRST), Term::integer(1)),
            Quad::in_default(iri("urn:s"), iri("urn:p"), node.clone()),
            Quad::in_default(node.clone(), iri(rdf::FIRST), Term::integer(2)),
            Quad::in_default(node.clone(), iri(rdf::REST), iri(rdf::NIL)),
            Quad::in_default(iri("urn:t"), iri("urn:p"), iri("urn:o")),
        ]
        .into_iter()
        .collect();

        let mut events = Vec::new();
        let graph = Reconstructor::with_diagnostics(&store, &mut events)
            .run(&GraphName::Default)
            .unwrap();
        let x = Term::blank("x");
        assert_eq!(
            graph.into_triples(),
            vec![
                triple(iri("urn:s"), "urn:p", x.clone()),
                triple(iri("urn:t"), "urn:p", iri("urn:o")),
                triple(x.clone(), rdf::FIRST, Term::integer(1)),
                triple(x.clone(), rdf::FIRST, Term::integer(2)),
                triple(x, rdf::REST, Term::nil()),
            ]
        );
        assert!(events.contains(&DiagnosticEvent::ListDegraded {
            node: BlankId::new("b0_x")
        }));
    }

    #[test]
    fn test_chain_without_nil_is_not_a_list() {
        let a = Term::blank("a");
        let b = Term::blank("b");
        let store: QuadStore = vec![
            Quad::in_default(iri("urn:s"), iri("urn:p"), a.clone()),
            Quad::in_default(a.clone(), iri(rdf::FIRST), Term::integer(1)),
            Quad::in_default(a.clone(), iri(rdf::REST), b.clone()),
            Quad::in_default(b.clone(), iri(rdf::FIRST), Term::integer(2)),
            Quad::in_default(b.clone(), iri(rdf::REST), a.clone()),
        ]
        .into_iter()
        .collect();

        let triples = reconstruct(&store, &GraphName::Default)
            .unwrap()
            .into_triples();
        assert_eq!(triples.len(), 5);
        assert_eq!(triples[0], triple(iri("urn:s"), "urn:p", a));
    }

    #[test]
    fn test_folded_graph_is_visited_once() {
        let g = Term::blank("g");
        let store: QuadStore = vec![
            Quad::new(iri("urn:a"), iri("urn:b"), iri("urn:c"), g.clone().into()),
            Quad::in_default(iri("urn:s"), iri("urn:p"), g.clone()),
            Quad::in_default(iri("urn:t"), iri("urn:p"), g.clone()),
        ]
        .into_iter()
        .collect();

        let triples = reconstruct(&store, &GraphName::Default)
            .unwrap()
            .into_triples();
        assert_eq!(
            triples,
            vec![
                triple(
                    iri("urn:s"),
                    "urn:p",
                    Term::Graph(vec![triple(iri("urn:a"), "urn:b", iri("urn:c"))])
                ),
                triple(iri("urn:t"), "urn:p", g),
            ]
        );
    }

    #[test]
    fn test_self_referencing_graph_terminates() {
        let g = Term::blank("g");
        let store: QuadStore = vec![
            Quad::new(g.clone(), iri("urn:b"), iri("urn:c"), g.clone().into()),
            Quad::new(iri("urn:a"), iri("urn:b"), iri("urn:c"), g.clone().into()),
            Quad::in_default(iri("urn:s"), iri("urn:p"), g.clone()),
        ]
        .into_iter()
        .collect();

        let triples = reconstruct(&store, &GraphName::Default)
            .unwrap()
            .into_triples();
        assert_eq!(
            triples,
            vec![triple(
                iri("urn:s"),
                "urn:p",
                Term::Graph(vec![
                    triple(g, "urn:b", iri("urn:c")),
                    triple(iri("urn:a"), "urn:b", iri("urn:c")),
                ])
            )]
        );
    }

    #[test]
    fn test_variables_are_rejected_by_default() {
        let store = parse_to_store("{ ?x <urn:p> <urn:o> } => { ?x <urn:q> <urn:o> } .").unwrap();
        let err = reconstruct(&store, &GraphName::Default).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedTermKind {
                kind: "Variable",
                ..
            }
        ));

        let graph = Reconstructor::new(&store)
            .with_options(ReconstructOptions::new().with_allow_variables(true))
            .run(&GraphName::Default)
            .unwrap();
        let rule = &graph.triples()[0];
        assert_eq!(rule.predicate_iri(), n3s_vocab::log::IMPLIES);
        let Term::Graph(body) = &rule.s else {
            panic!("expected a graph, got {}", rule.s);
        };
        assert_eq!(body[0].s, Term::variable("x"));
    }

    #[test]
    fn test_non_iri_predicate_is_malformed() {
        let store: QuadStore = vec![Quad::in_default(iri("urn:s"), Term::blank("p"), iri("urn:o"))]
            .into_iter()
            .collect();
        let err = reconstruct(&store, &GraphName::Default).unwrap_err();
        assert!(matches!(err, Error::MalformedTermShape(_)));
    }

    #[test]
    fn test_folding_events() {
        let store = parse_to_store("<urn:s> <urn:p> { <urn:a> <urn:b> (1 2) } .").unwrap();
        let mut events = Vec::new();
        Reconstructor::with_diagnostics(&store, &mut events)
            .run(&GraphName::Default)
            .unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], DiagnosticEvent::ListFolded { len: 2, .. }));
        assert!(matches!(
            events[1],
            DiagnosticEvent::GraphFolded { triples: 1, .. }
        ));
        assert!(matches!(
            events[2],
            DiagnosticEvent::GraphReconstructed {
                triples: 1,
                quads: 6,
                consumed: 6
            }
        ));
    }

    #[test]
    fn test_clashing_short_labels_stay_distinct() {
        let store: QuadStore = vec![
            Quad::in_default(Term::blank("b0_n0"), iri("urn:p"), iri("urn:o")),
            Quad::in_default(Term::blank("n0"), iri("urn:r"), Term::integer(1)),
            Quad::in_default(Term::blank("b1_n0"), iri("urn:q"), Term::blank("b0_n0")),
            Quad::in_default(Term::blank("a_x"), iri("urn:p"), Term::blank("b_x")),
        ]
        .into_iter()
        .collect();
        let graph = reconstruct(&store, &GraphName::Default).unwrap();
        let triples: Vec<_> = graph.iter().collect();

        assert_eq!(triples[0].s, Term::blank("n0"));
        assert_eq!(triples[1].s, Term::blank("n0-1"));
        assert_eq!(triples[2].s, Term::blank("b1_n0"));
        assert_eq!(triples[2].o, Term::blank("n0"));
        assert_eq!(triples[3].s, Term::blank("x"));
        assert_eq!(triples[3].o, Term::blank("b_x"));
    }
}
