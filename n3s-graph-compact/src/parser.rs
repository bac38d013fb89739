//! Compact-form parser that emits to a QuadSink.
//!
//! A finite-state machine over the token stream. [`transition`] is pure: it
//! maps the current expectation and the next token to the following
//! expectation plus an [`Action`] for the driver to perform. The driver
//! ([`CompactParser`]) holds the fact under construction, the open list and
//! the stack of open conjunctions.
//!
//! Completed facts are lowered before they reach the sink: a list becomes an
//! `rdf:first`/`rdf:rest` chain over fresh blank nodes, and a conjunction
//! `( ... )` becomes a fresh blank node naming the graph context of its
//! inner facts.

use n3s_graph_ir::{BlankId, BlankNodeAllocator, GraphName, Quad, QuadSink, Term, Triple};
use n3s_vocab::rdf;

use crate::diagnostics::{DiagnosticEvent, Diagnostics, NoDiagnostics};
use crate::error::{Error, Result};
use crate::lex::{Lexer, Token, TokenKind};

/// Term position of a fact that can hold a list or a conjunction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Subject,
    Object,
}

impl Slot {
    /// The expectation once this slot is filled
    fn after(self) -> Expect {
        match self {
            Slot::Subject => Expect::Comma,
            Slot::Object => Expect::RightParen,
        }
    }
}

/// What the parser expects next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expect {
    Predicate,
    LeftParen,
    Subject,
    Comma,
    Object,
    RightParen,
    Dot,
    /// Inside `[ ... ]`; `first` while no element has been read
    ListItem { slot: Slot, first: bool },
    /// After a list element
    ListSeparator { slot: Slot },
}

/// Nesting the transition function needs to know about
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Context {
    /// Slot of the innermost open conjunction
    pub conjunction: Option<Slot>,
}

/// Work for the driver after a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    SetPredicate,
    SetSlot(Slot),
    OpenList,
    PushItem,
    CloseList(Slot),
    OpenConjunction(Slot),
    NextConjunct,
    CloseConjunction,
    EmitFact,
    Finish,
}

/// Result of one transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub next: Expect,
    pub action: Action,
}

impl Step {
    fn new(next: Expect, action: Action) -> Self {
        Self { next, action }
    }
}

fn is_term(token: &TokenKind) -> bool {
    matches!(
        token,
        TokenKind::Iri(_) | TokenKind::Blank(_) | TokenKind::Literal { .. }
    )
}

/// Advance the state machine by one token.
///
/// On failure returns a description of what was expected instead.
pub fn transition(
    state: Expect,
    token: &TokenKind,
    context: Context,
) -> std::result::Result<Step, &'static str> {
    use Action as A;
    use TokenKind as T;

    if let T::Comment(_) = token {
        return Ok(Step::new(state, A::None));
    }
    let top_level = context.conjunction.is_none();

    match state {
        Expect::Predicate => match token {
            T::Iri(_) | T::Blank(_) => Ok(Step::new(Expect::LeftParen, A::SetPredicate)),
            T::Directive(_) if top_level => Ok(Step::new(Expect::Predicate, A::None)),
            T::Eof if top_level => Ok(Step::new(Expect::Predicate, A::Finish)),
            _ => Err("IRI or blank"),
        },
        Expect::LeftParen => match token {
            T::LParen => Ok(Step::new(Expect::Subject, A::None)),
            _ => Err("'('"),
        },
        Expect::Subject | Expect::Object => {
            let slot = if state == Expect::Subject {
                Slot::Subject
            } else {
                Slot::Object
            };
            match token {
                t if is_term(t) => Ok(Step::new(slot.after(), A::SetSlot(slot))),
                T::LBracket => Ok(Step::new(
                    Expect::ListItem { slot, first: true },
                    A::OpenList,
                )),
                T::LParen => Ok(Step::new(Expect::Predicate, A::OpenConjunction(slot))),
                _ => Err("term, '[' or '('"),
            }
        }
        Expect::Comma => match token {
            T::Comma => Ok(Step::new(Expect::Object, A::None)),
            _ => Err("','"),
        },
        Expect::RightParen => match token {
            T::RParen => Ok(Step::new(Expect::Dot, A::None)),
            _ => Err("')'"),
        },
        Expect::Dot => match (token, context.conjunction) {
            (T::Dot, None) => Ok(Step::new(Expect::Predicate, A::EmitFact)),
            (T::Comma, Some(_)) => Ok(Step::new(Expect::Predicate, A::NextConjunct)),
            (T::RParen, Some(slot)) => Ok(Step::new(slot.after(), A::CloseConjunction)),
            (_, None) => Err("'.'"),
            (_, Some(_)) => Err("',' or ')'"),
        },
        Expect::ListItem { slot, first } => match token {
            t if is_term(t) => Ok(Step::new(Expect::ListSeparator { slot }, A::PushItem)),
            T::RBracket if first => Ok(Step::new(slot.after(), A::CloseList(slot))),
            _ if first => Err("term or ']'"),
            _ => Err("term"),
        },
        Expect::ListSeparator { slot } => match token {
            T::Comma => Ok(Step::new(
                Expect::ListItem { slot, first: false },
                A::None,
            )),
            T::RBracket => Ok(Step::new(slot.after(), A::CloseList(slot))),
            _ => Err("',' or ']'"),
        },
    }
}

/// Options for encoding compact-form text
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Surface `%` comments as tokens (they never affect the result)
    pub comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { comments: true }
    }
}

impl ParseOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether comments are tokenized
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }
}

/// The fact under construction
#[derive(Debug, Default)]
struct Fact {
    subject: Option<Term>,
    predicate: Option<Term>,
    object: Option<Term>,
}

impl Fact {
    fn set(&mut self, slot: Slot, term: Term) {
        match slot {
            Slot::Subject => self.subject = Some(term),
            Slot::Object => self.object = Some(term),
        }
    }

    fn take_triple(&mut self, token: &Token) -> Result<Triple> {
        let fact = std::mem::take(self);
        match (fact.subject, fact.predicate, fact.object) {
            (Some(s), Some(p), Some(o)) => Ok(Triple::new(s, p, o)?),
            _ => Err(Error::syntax("complete fact", token.kind.to_string(), token.line)),
        }
    }
}

/// An open `( ... )` conjunction
struct Frame {
    /// The enclosing fact, waiting for the conjunction to fill `slot`
    outer: Fact,
    slot: Slot,
    triples: Vec<Triple>,
}

/// A structured term replaced by a blank node, still to be written out
enum Pending {
    List(Term, Vec<Term>),
    Graph(BlankId, Vec<Triple>),
}

/// Compact-form parser driving [`transition`] over a token stream.
pub struct CompactParser<S, D = NoDiagnostics> {
    sink: S,
    diagnostics: D,
    blanks: BlankNodeAllocator,
    state: Expect,
    fact: Fact,
    list: Vec<Term>,
    frames: Vec<Frame>,
    facts: usize,
}

impl<S: QuadSink> CompactParser<S> {
    /// Create a parser writing to `sink`.
    pub fn new(sink: S) -> Self {
        Self::with_diagnostics(sink, NoDiagnostics)
    }
}

impl<S: QuadSink, D: Diagnostics> CompactParser<S, D> {
    /// Create a parser writing to `sink` and reporting to `diagnostics`.
    pub fn with_diagnostics(sink: S, diagnostics: D) -> Self {
        Self {
            sink,
            diagnostics,
            blanks: BlankNodeAllocator::default(),
            state: Expect::Predicate,
            fact: Fact::default(),
            list: Vec::new(),
            frames: Vec::new(),
            facts: 0,
        }
    }

    /// Parse a token stream ending in EOF. Returns the number of top-level
    /// facts emitted.
    pub fn parse(mut self, tokens: Vec<Token>) -> Result<usize> {
        for token in &tokens {
            if let TokenKind::Blank(label) = &token.kind {
                self.blanks.observe(label);
            }
        }

        let mut line = 1;
        for token in tokens {
            line = token.line;
            self.diagnostics.event(DiagnosticEvent::TokenRead {
                token: token.kind.to_string(),
                line: token.line,
            });

            let context = Context {
                conjunction: self.frames.last().map(|frame| frame.slot),
            };
            let step = transition(self.state, &token.kind, context)
                .map_err(|expected| Error::syntax(expected, token.kind.to_string(), token.line))?;
            if step.action == Action::Finish {
                return Ok(self.facts);
            }
            self.apply(step.action, &token)?;
            self.state = step.next;
        }

        Err(Error::syntax("end of input", "no more tokens", line))
    }

    fn term(token: &Token) -> Result<Term> {
        match &token.kind {
            TokenKind::Iri(iri) => Ok(Term::iri(iri)),
            TokenKind::Blank(label) => Ok(Term::blank(label)),
            TokenKind::Literal { value, datatype } => Ok(Term::typed(value, datatype.clone())),
            other => Err(Error::syntax("term", other.to_string(), token.line)),
        }
    }

    fn apply(&mut self, action: Action, token: &Token) -> Result<()> {
        match action {
            Action::None | Action::Finish => {}
            Action::SetPredicate => self.fact.predicate = Some(Self::term(token)?),
            Action::SetSlot(slot) => self.fact.set(slot, Self::term(token)?),
            Action::OpenList => self.list.clear(),
            Action::PushItem => self.list.push(Self::term(token)?),
            Action::CloseList(slot) => {
                let items = std::mem::take(&mut self.list);
                self.fact.set(slot, Term::List(items));
            }
            Action::OpenConjunction(slot) => {
                self.frames.push(Frame {
                    outer: std::mem::take(&mut self.fact),
                    slot,
                    triples: Vec::new(),
                });
            }
            Action::NextConjunct => {
                let triple = self.fact.take_triple(token)?;
                if let Some(frame) = self.frames.last_mut() {
                    frame.triples.push(triple);
                }
            }
            Action::CloseConjunction => {
                let triple = self.fact.take_triple(token)?;
                if let Some(mut frame) = self.frames.pop() {
                    frame.triples.push(triple);
                    self.fact = frame.outer;
                    self.fact.set(frame.slot, Term::Graph(frame.triples));
                }
            }
            Action::EmitFact => {
                let triple = self.fact.take_triple(token)?;
                self.diagnostics
                    .event(DiagnosticEvent::TripleEmitted(triple.clone()));
                self.write(triple, &GraphName::Default)?;
                self.facts += 1;
            }
        }
        Ok(())
    }

    /// Write a triple as quads in context `g`, lowering lists and
    /// conjunctions after the quad that refers to them.
    fn write(&mut self, triple: Triple, g: &GraphName) -> Result<()> {
        let Triple { s, p, o } = triple;
        let (s, s_pending) = self.flatten(s);
        let (o, o_pending) = self.flatten(o);
        let quad = Triple::new(s, p, o)?.into_quad(g.clone())?;
        self.sink.emit_quad(quad);
        self.lower(s_pending, g)?;
        self.lower(o_pending, g)
    }

    fn flatten(&mut self, term: Term) -> (Term, Option<Pending>) {
        match term {
            Term::List(items) if items.is_empty() => (Term::iri(rdf::NIL), None),
            Term::List(items) => {
                let head = self.blanks.fresh_term();
                (head.clone(), Some(Pending::List(head, items)))
            }
            Term::Graph(triples) => {
                let node = self.blanks.fresh();
                (Term::BlankNode(node.clone()), Some(Pending::Graph(node, triples)))
            }
            other => (other, None),
        }
    }

    fn lower(&mut self, pending: Option<Pending>, g: &GraphName) -> Result<()> {
        match pending {
            None => Ok(()),
            Some(Pending::List(head, items)) => self.lower_list(head, items, g),
            Some(Pending::Graph(node, triples)) => {
                let count = triples.len();
                let context = GraphName::Node(Term::BlankNode(node.clone()));
                for triple in triples {
                    self.write(triple, &context)?;
                }
                self.diagnostics.event(DiagnosticEvent::GraphLowered {
                    node,
                    triples: count,
                });
                Ok(())
            }
        }
    }

    fn lower_list(&mut self, head: Term, items: Vec<Term>, g: &GraphName) -> Result<()> {
        let len = items.len();
        let mut node = head.clone();
        for (i, item) in items.into_iter().enumerate() {
            let (value, pending) = self.flatten(item);
            self.lower(pending, g)?;

            let next = if i + 1 == len {
                Term::iri(rdf::NIL)
            } else {
                self.blanks.fresh_term()
            };
            self.write_link(node.clone(), rdf::FIRST, value, g);
            self.write_link(node, rdf::REST, next.clone(), g);
            node = next;
        }
        self.diagnostics
            .event(DiagnosticEvent::ListLowered { head, len });
        Ok(())
    }

    fn write_link(&mut self, node: Term, predicate: &str, value: Term, g: &GraphName) {
        self.sink
            .emit_quad(Quad::new(node, Term::iri(predicate), value, g.clone()));
    }
}

/// Parse compact-form text into `sink`.
pub fn parse<S: QuadSink>(input: &str, sink: S) -> Result<usize> {
    parse_with(input, sink, &ParseOptions::default(), NoDiagnostics)
}

/// Parse compact-form text into `sink`, reporting to `diagnostics`.
pub fn parse_with<S: QuadSink, D: Diagnostics>(
    input: &str,
    sink: S,
    options: &ParseOptions,
    diagnostics: D,
) -> Result<usize> {
    let tokens = Lexer::new(input)
        .with_comments(options.comments)
        .tokenize()?;
    CompactParser::with_diagnostics(sink, diagnostics).parse(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use n3s_vocab::xsd;
    use std::sync::Arc;

    const TOP: Context = Context { conjunction: None };

    fn quads(input: &str) -> Vec<Quad> {
        let mut out = Vec::new();
        parse(input, &mut out).unwrap();
        out
    }

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    #[test]
    fn test_transition_walks_a_fact() {
        let tokens = [
            TokenKind::Iri(Arc::from("urn:p")),
            TokenKind::LParen,
            TokenKind::Iri(Arc::from("urn:s")),
            TokenKind::Comma,
            TokenKind::Iri(Arc::from("urn:o")),
            TokenKind::RParen,
            TokenKind::Dot,
        ];
        let mut state = Expect::Predicate;
        let mut actions = Vec::new();
        for token in &tokens {
            let step = transition(state, token, TOP).unwrap();
            actions.push(step.action);
            state = step.next;
        }
        assert_eq!(state, Expect::Predicate);
        assert_eq!(
            actions,
            vec![
                Action::SetPredicate,
                Action::None,
                Action::SetSlot(Slot::Subject),
                Action::None,
                Action::SetSlot(Slot::Object),
                Action::None,
                Action::EmitFact,
            ]
        );
    }

    #[test]
    fn test_transition_rejections() {
        assert_eq!(
            transition(Expect::RightParen, &TokenKind::Dot, TOP),
            Err("')'")
        );
        assert_eq!(
            transition(Expect::ListItem { slot: Slot::Object, first: true }, &TokenKind::LBracket, TOP),
            Err("term or ']'")
        );
        assert_eq!(
            transition(Expect::ListItem { slot: Slot::Object, first: false }, &TokenKind::RBracket, TOP),
            Err("term")
        );
        assert_eq!(
            transition(Expect::Predicate, &TokenKind::literal("1", n3s_graph_ir::Datatype::xsd_integer()), TOP),
            Err("IRI or blank")
        );
    }

    #[test]
    fn test_transition_inside_conjunction() {
        let inner = Context {
            conjunction: Some(Slot::Object),
        };
        assert_eq!(
            transition(Expect::Dot, &TokenKind::RParen, inner).unwrap(),
            Step::new(Expect::RightParen, Action::CloseConjunction)
        );
        assert_eq!(
            transition(Expect::Dot, &TokenKind::Comma, inner).unwrap().action,
            Action::NextConjunct
        );
        assert_eq!(transition(Expect::Dot, &TokenKind::Dot, inner), Err("',' or ')'"));
        assert_eq!(transition(Expect::Predicate, &TokenKind::Eof, inner), Err("IRI or blank"));
    }

    #[test]
    fn test_comments_and_directives_are_skipped() {
        assert_eq!(
            transition(Expect::Comma, &TokenKind::Comment(Arc::from("x")), TOP).unwrap(),
            Step::new(Expect::Comma, Action::None)
        );
        let out = quads(":- dynamic('<urn:p>'/2).\n% note\n'<urn:p>'('<urn:s>', % inline\n'<urn:o>').\n");
        assert_eq!(out, vec![Quad::in_default(iri("urn:s"), iri("urn:p"), iri("urn:o"))]);
    }

    #[test]
    fn test_literals_keep_datatype() {
        let out = quads("'<urn:p>'('_:a',literal('x','urn:dt')).'<urn:p>'('_:a',-1.5).");
        assert_eq!(out[0].s, Term::blank("a"));
        assert_eq!(out[0].o, Term::typed("x", n3s_graph_ir::Datatype::from_iri("urn:dt")));
        assert_eq!(out[1].o.as_literal().unwrap().1.as_iri(), xsd::DECIMAL);
    }

    #[test]
    fn test_list_lowering() {
        let out = quads("'<urn:p>'('<urn:s>',[1,2]).");
        let g0 = Term::blank("g0");
        let g1 = Term::blank("g1");
        assert_eq!(
            out,
            vec![
                Quad::in_default(iri("urn:s"), iri("urn:p"), g0.clone()),
                Quad::in_default(g0.clone(), iri(rdf::FIRST), Term::integer(1)),
                Quad::in_default(g0, iri(rdf::REST), g1.clone()),
                Quad::in_default(g1.clone(), iri(rdf::FIRST), Term::integer(2)),
                Quad::in_default(g1, iri(rdf::REST), iri(rdf::NIL)),
            ]
        );
    }

    #[test]
    fn test_empty_list_is_nil() {
        let out = quads("'<urn:p>'([],'<urn:o>').");
        assert_eq!(out, vec![Quad::in_default(iri(rdf::NIL), iri("urn:p"), iri("urn:o"))]);
    }

    #[test]
    fn test_fresh_nodes_avoid_input_labels() {
        let out = quads("'<urn:p>'('_:g0',['x']).");
        assert_eq!(out[0].s, Term::blank("g0"));
        assert_eq!(out[0].o, Term::blank("g1"));
    }

    #[test]
    fn test_conjunction_lowering() {
        let out = quads("'<urn:p>'('<urn:s>',('<urn:b>'('<urn:a>','<urn:c>'),'<urn:d>'('<urn:a>',['x']))).");
        let g0 = Term::blank("g0");
        let inner = GraphName::Node(g0.clone());
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], Quad::in_default(iri("urn:s"), iri("urn:p"), g0.clone()));
        assert_eq!(out[1], Quad::new(iri("urn:a"), iri("urn:b"), iri("urn:c"), inner.clone()));
        assert_eq!(out[2], Quad::new(iri("urn:a"), iri("urn:d"), Term::blank("g1"), inner.clone()));
        assert_eq!(out[3].g, inner);
        assert_eq!(out[4].o, iri(rdf::NIL));
    }

    #[test]
    fn test_nested_conjunction_in_subject() {
        let out = quads("'<urn:p>'(('<urn:q>'(('<urn:r>'('<urn:a>','<urn:b>')),'<urn:c>')),'<urn:o>').");
        let outer = Term::blank("g0");
        let inner = Term::blank("g1");
        assert_eq!(
            out,
            vec![
                Quad::in_default(outer.clone(), iri("urn:p"), iri("urn:o")),
                Quad::new(inner.clone(), iri("urn:q"), iri("urn:c"), outer.into()),
                Quad::new(iri("urn:a"), iri("urn:r"), iri("urn:b"), inner.into()),
            ]
        );
    }

    #[test]
    fn test_missing_right_paren() {
        let err = parse("'<urn:p>'('<urn:s>','<urn:o>'.", Vec::new()).unwrap_err();
        match err {
            Error::Syntax { expected, found, line } => {
                assert_eq!(expected, "')'");
                assert_eq!(found, "'.'");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nested_list_is_rejected() {
        let err = parse("'<urn:p>'('<urn:s>',[[1]]).", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Syntax { expected: "term or ']'", .. }));
        let err = parse("'<urn:p>'('<urn:s>',[1,('<urn:a>'('<urn:b>','<urn:c>'))]).", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Syntax { expected: "term", .. }));
    }

    #[test]
    fn test_separators_are_required() {
        assert!(parse("'<urn:p>'('<urn:s>' '<urn:o>').", Vec::new()).is_err());
        assert!(parse("'<urn:p>'('<urn:s>',,'<urn:o>').", Vec::new()).is_err());
        assert!(parse("'<urn:p>'('<urn:s>',[1 2]).", Vec::new()).is_err());
    }

    #[test]
    fn test_truncated_input() {
        let err = parse("'<urn:p>'('<urn:s>',\n'<urn:o>')", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Syntax { expected: "'.'", line: 2, .. }));
    }

    #[test]
    fn test_blank_predicate_is_malformed() {
        let err = parse("'_:p'('<urn:s>','<urn:o>').", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedTermShape(_)));
    }

    #[test]
    fn test_diagnostics() {
        let mut events = Vec::new();
        let mut out = Vec::new();
        let facts = parse_with(
            "'<urn:p>'('<urn:s>',[1]).",
            &mut out,
            &ParseOptions::new().with_comments(false),
            &mut events,
        )
        .unwrap();
        assert_eq!(facts, 1);
        assert_eq!(out.len(), 3);
        let tokens = events
            .iter()
            .filter(|e| matches!(e, DiagnosticEvent::TokenRead { .. }))
            .count();
        assert_eq!(tokens, 10);
        assert!(events.contains(&DiagnosticEvent::ListLowered {
            head: Term::blank("g0"),
            len: 1
        }));
        assert!(events
            .iter()
            .any(|e| matches!(e, DiagnosticEvent::TripleEmitted(t) if t.predicate_iri() == "urn:p")));
    }
}
