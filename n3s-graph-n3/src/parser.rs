//! N3 parser that emits to a QuadSink.
//!
//! Recursive descent over the token stream. Quads are emitted as soon as
//! they are complete, so nested structures (property lists, collections,
//! formulas) reach the sink before the statement that refers to them.

use std::collections::HashMap;

use n3s_graph_ir::{BlankNodeAllocator, Datatype, GraphName, Quad, QuadSink, Term};
use n3s_vocab::{log, owl, rdf};

use crate::error::{N3Error, Result};
use crate::iri;
use crate::lex::{tokenize, Token, TokenKind};

/// N3 parser state.
pub struct Parser<'a, S> {
    tokens: Vec<Token>,
    pos: usize,
    sink: &'a mut S,
    /// Prefix mappings (prefix -> namespace IRI)
    prefixes: HashMap<String, String>,
    /// Base IRI for relative IRI resolution
    base: Option<String>,
    /// Document number used to scope labeled blank nodes
    document: usize,
    /// Anonymous blank nodes and formula nodes
    blanks: BlankNodeAllocator,
    /// Graph context of the statements being parsed
    graph: GraphName,
    emitted: usize,
}

/// A verb in a predicate-object list. `<=` flips subject and object.
struct Verb {
    predicate: Term,
    inverted: bool,
}

impl<'a, S: QuadSink> Parser<'a, S> {
    /// Create a new parser.
    pub fn new(input: &str, sink: &'a mut S) -> Result<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            sink,
            prefixes: HashMap::new(),
            base: None,
            document: 0,
            blanks: BlankNodeAllocator::new("n"),
            graph: GraphName::Default,
            emitted: 0,
        })
    }

    /// Set the document number used in labeled blank node identifiers.
    ///
    /// `_:x` in document `d` becomes the blank node `b<d>_x`, so labels
    /// from different documents loaded into one sink never collide.
    pub fn with_document(mut self, document: usize) -> Self {
        self.document = document;
        self
    }

    /// Parse the entire document.
    pub fn parse(mut self) -> Result<()> {
        while !self.is_at_end() {
            self.parse_statement()?;
        }
        tracing::debug!(quads = self.emitted, "parsed N3 document");
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", kind)))
        }
    }

    fn unexpected(&self, expected: &str) -> N3Error {
        N3Error::parse(
            self.current().start,
            format!("expected {}, found '{}'", expected, self.current().kind),
        )
    }

    fn emit(&mut self, s: Term, p: Term, o: Term) {
        self.emitted += 1;
        self.sink.emit_quad(Quad::new(s, p, o, self.graph.clone()));
    }

    fn parse_statement(&mut self) -> Result<()> {
        match &self.current().kind {
            TokenKind::KwPrefix | TokenKind::KwSparqlPrefix => self.parse_prefix_directive(),
            TokenKind::KwBase | TokenKind::KwSparqlBase => self.parse_base_directive(),
            _ => {
                self.parse_triples()?;
                self.expect(&TokenKind::Dot)
            }
        }
    }

    /// Parse `@prefix p: <iri> .` or `PREFIX p: <iri>`.
    fn parse_prefix_directive(&mut self) -> Result<()> {
        let sparql_style = matches!(self.current().kind, TokenKind::KwSparqlPrefix);
        self.advance();

        let prefix = match &self.current().kind {
            TokenKind::PrefixedNameNs(p) => p.to_string(),
            _ => return Err(self.unexpected("prefix namespace")),
        };
        self.advance();

        let namespace = match &self.current().kind {
            TokenKind::Iri(reference) => iri::resolve(self.base.as_deref(), reference),
            _ => return Err(self.unexpected("IRI for prefix namespace")),
        };
        self.advance();

        self.sink.on_prefix(&prefix, &namespace);
        self.prefixes.insert(prefix, namespace);

        if !sparql_style {
            self.expect(&TokenKind::Dot)?;
        }
        Ok(())
    }

    /// Parse `@base <iri> .` or `BASE <iri>`.
    fn parse_base_directive(&mut self) -> Result<()> {
        let sparql_style = matches!(self.current().kind, TokenKind::KwSparqlBase);
        self.advance();

        let base = match &self.current().kind {
            TokenKind::Iri(reference) => iri::resolve(self.base.as_deref(), reference),
            _ => return Err(self.unexpected("IRI for base")),
        };
        self.advance();

        self.sink.on_base(&base);
        self.base = Some(base);

        if !sparql_style {
            self.expect(&TokenKind::Dot)?;
        }
        Ok(())
    }

    /// Parse a subject followed by its predicate-object list (no terminator).
    fn parse_triples(&mut self) -> Result<()> {
        let property_list = self.check(&TokenKind::LBracket);
        let subject = self.parse_term("subject")?;

        // `[ ex:p 1 ] .` stands alone
        if property_list
            && matches!(self.current().kind, TokenKind::Dot | TokenKind::RBrace)
        {
            return Ok(());
        }
        self.parse_predicate_object_list(&subject)
    }

    fn parse_predicate_object_list(&mut self, subject: &Term) -> Result<()> {
        loop {
            let verb = self.parse_verb()?;
            self.parse_object_list(subject, &verb)?;

            if !self.check(&TokenKind::Semicolon) {
                break;
            }
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
            if matches!(
                self.current().kind,
                TokenKind::Dot | TokenKind::RBracket | TokenKind::RBrace | TokenKind::Eof
            ) {
                break;
            }
        }
        Ok(())
    }

    fn parse_verb(&mut self) -> Result<Verb> {
        let (predicate, inverted) = match self.current().kind.clone() {
            TokenKind::KwA => (Term::iri(rdf::TYPE), false),
            TokenKind::Implies => (Term::iri(log::IMPLIES), false),
            TokenKind::ImpliedBy => (Term::iri(log::IMPLIES), true),
            TokenKind::SameAs => (Term::iri(owl::SAME_AS), false),
            TokenKind::Variable(name) => (Term::variable(&*name), false),
            TokenKind::Iri(_) | TokenKind::PrefixedName { .. } | TokenKind::PrefixedNameNs(_) => {
                return Ok(Verb {
                    predicate: Term::iri(self.parse_iri("predicate")?),
                    inverted: false,
                })
            }
            _ => return Err(self.unexpected("predicate")),
        };
        self.advance();
        Ok(Verb {
            predicate,
            inverted,
        })
    }

    fn parse_object_list(&mut self, subject: &Term, verb: &Verb) -> Result<()> {
        loop {
            let object = self.parse_term("object")?;
            if verb.inverted {
                self.emit(object, verb.predicate.clone(), subject.clone());
            } else {
                self.emit(subject.clone(), verb.predicate.clone(), object);
            }

            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Parse a term in subject or object position.
    fn parse_term(&mut self, position: &str) -> Result<Term> {
        match self.current().kind.clone() {
            TokenKind::Iri(_) | TokenKind::PrefixedName { .. } | TokenKind::PrefixedNameNs(_) => {
                Ok(Term::iri(self.parse_iri(position)?))
            }
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                Ok(Term::blank(format!("b{}_{}", self.document, label)))
            }
            TokenKind::Anon => {
                self.advance();
                Ok(self.blanks.fresh_term())
            }
            TokenKind::Variable(name) => {
                self.advance();
                Ok(Term::variable(&*name))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Term::iri(rdf::NIL))
            }
            TokenKind::LBracket => self.parse_blank_node_property_list(),
            TokenKind::LParen => self.parse_collection(),
            TokenKind::LBrace => self.parse_formula(),
            TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Decimal(_)
            | TokenKind::Double(_)
            | TokenKind::KwTrue
            | TokenKind::KwFalse => self.parse_literal(),
            _ => Err(self.unexpected(position)),
        }
    }

    /// Parse an IRI, prefixed name or bare prefix into an expanded IRI.
    fn parse_iri(&mut self, position: &str) -> Result<String> {
        let iri = match &self.current().kind {
            TokenKind::Iri(reference) => iri::resolve(self.base.as_deref(), reference),
            TokenKind::PrefixedName { prefix, local } => self.expand_prefixed_name(prefix, local)?,
            TokenKind::PrefixedNameNs(prefix) => self.expand_prefixed_name(prefix, "")?,
            _ => return Err(self.unexpected(position)),
        };
        self.advance();
        Ok(iri)
    }

    fn parse_literal(&mut self) -> Result<Term> {
        let term = match self.current().kind.clone() {
            TokenKind::String(value) => {
                self.advance();
                return match self.current().kind.clone() {
                    TokenKind::LangTag(lang) => {
                        self.advance();
                        Ok(Term::lang_string(&*value, &*lang))
                    }
                    TokenKind::DoubleCaret => {
                        self.advance();
                        let datatype = self.parse_iri("datatype IRI")?;
                        Ok(Term::typed(&*value, Datatype::from_iri(datatype)))
                    }
                    _ => Ok(Term::string(&*value)),
                };
            }
            TokenKind::Integer(text) => Term::typed(&*text, Datatype::xsd_integer()),
            TokenKind::Decimal(text) => Term::typed(&*text, Datatype::xsd_decimal()),
            TokenKind::Double(text) => Term::typed(&*text, Datatype::xsd_double()),
            TokenKind::KwTrue => Term::boolean(true),
            TokenKind::KwFalse => Term::boolean(false),
            _ => return Err(self.unexpected("literal")),
        };
        self.advance();
        Ok(term)
    }

    /// Parse `[ predicate object ; ... ]`
    fn parse_blank_node_property_list(&mut self) -> Result<Term> {
        self.expect(&TokenKind::LBracket)?;
        let node = self.blanks.fresh_term();

        if !self.check(&TokenKind::RBracket) {
            self.parse_predicate_object_list(&node)?;
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(node)
    }

    /// Parse `( item1 item2 ... )` into an `rdf:first`/`rdf:rest` chain.
    fn parse_collection(&mut self) -> Result<Term> {
        self.expect(&TokenKind::LParen)?;

        if self.check(&TokenKind::RParen) {
            self.advance();
            return Ok(Term::iri(rdf::NIL));
        }

        let head = self.blanks.fresh_term();
        let mut node = head.clone();
        loop {
            let item = self.parse_term("collection item")?;
            self.emit(node.clone(), Term::iri(rdf::FIRST), item);

            if self.check(&TokenKind::RParen) {
                self.emit(node, Term::iri(rdf::REST), Term::iri(rdf::NIL));
                break;
            }
            let next = self.blanks.fresh_term();
            self.emit(node, Term::iri(rdf::REST), next.clone());
            node = next;
        }

        self.expect(&TokenKind::RParen)?;
        Ok(head)
    }

    /// Parse `{ statements }`.
    ///
    /// The formula is named by a fresh blank node which becomes the graph
    /// context of every statement inside it.
    fn parse_formula(&mut self) -> Result<Term> {
        self.expect(&TokenKind::LBrace)?;
        let formula = self.blanks.fresh_term();
        let outer = std::mem::replace(&mut self.graph, GraphName::Node(formula.clone()));

        while !self.check(&TokenKind::RBrace) {
            self.parse_triples()?;
            if self.check(&TokenKind::Dot) {
                self.advance();
            } else if !self.check(&TokenKind::RBrace) {
                return Err(self.unexpected("'.' or '}'"));
            }
        }
        self.expect(&TokenKind::RBrace)?;

        self.graph = outer;
        Ok(formula)
    }

    fn expand_prefixed_name(&self, prefix: &str, local: &str) -> Result<String> {
        match self.prefixes.get(prefix) {
            Some(namespace) => Ok(format!("{}{}", namespace, local)),
            None => Err(N3Error::UndefinedPrefix(prefix.to_string())),
        }
    }
}

/// Parse an N3 document into QuadSink events.
pub fn parse<S: QuadSink>(input: &str, sink: &mut S) -> Result<()> {
    Parser::new(input, sink)?.parse()
}
