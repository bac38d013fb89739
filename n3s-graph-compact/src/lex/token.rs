//! Compact-form token types.

use n3s_graph_ir::Datatype;
use std::sync::Arc;

/// A token with its line and source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The token kind
    pub kind: TokenKind,
    /// Line the token starts on (1-based)
    pub line: usize,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, line: usize, start: usize, end: usize) -> Self {
        Self {
            kind,
            line,
            start,
            end,
        }
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// The prefix marker of a term token: `_` for a blank node, the datatype
    /// IRI for a literal.
    pub fn prefix(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Blank(_) => Some("_"),
            TokenKind::Literal { datatype, .. } => Some(datatype.as_iri()),
            _ => None,
        }
    }
}

/// Token kinds of the compact form.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `:- ...` directive, holding the rest of the line
    Directive(Arc<str>),

    /// Quoted IRI: `'<http://example.org/>'`
    Iri(Arc<str>),

    /// Quoted blank node: `'_:name'` (stored without `_:`)
    Blank(Arc<str>),

    /// Quoted string, bare boolean, bare number or `literal(value,'datatype')`
    Literal {
        /// Lexical form (unescaped)
        value: Arc<str>,
        /// Datatype
        datatype: Datatype,
    },

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,

    /// `% ...` comment text, only produced when comments are enabled
    Comment(Arc<str>),

    /// End of input
    Eof,
}

impl TokenKind {
    /// Build a literal token kind.
    pub fn literal(value: impl AsRef<str>, datatype: Datatype) -> Self {
        TokenKind::Literal {
            value: Arc::from(value.as_ref()),
            datatype,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Directive(s) => write!(f, "directive ':- {}'", s),
            TokenKind::Iri(s) => write!(f, "IRI '<{}>'", s),
            TokenKind::Blank(s) => write!(f, "blank '_:{}'", s),
            TokenKind::Literal { value, datatype } => {
                write!(f, "literal({},'{}')", value, datatype.as_iri())
            }
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Comment(s) => write!(f, "comment '%{}'", s),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
