//! Error types for compact-form conversion

use n3s_graph_ir::TermShapeError;

/// Error type for decode and encode operations
///
/// Every error is fatal to the conversion that raised it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A term kind the compact form cannot carry (a variable, unless allowed)
    #[error("Unsupported term kind {kind}: {term}")]
    UnsupportedTermKind { kind: &'static str, term: String },

    /// The lexer found no rule for the input at this point
    #[error("Unexpected \"{issue}\" on line {line}.")]
    Lexical { line: usize, issue: String },

    /// The parser received a token not valid in its current state
    #[error("Expecting {expected} but got {found} on line {line}.")]
    Syntax {
        expected: &'static str,
        found: String,
        line: usize,
    },

    /// A term in a position its kind does not allow
    #[error("Malformed term shape: {0}")]
    MalformedTermShape(#[from] TermShapeError),

    /// Reading the source or writing the result failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for compact-form operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unsupported-term error for `term`
    pub fn unsupported(term: &n3s_graph_ir::Term) -> Self {
        Self::UnsupportedTermKind {
            kind: term.kind(),
            term: term.to_string(),
        }
    }

    /// Create a lexical error
    pub fn lexical(line: usize, issue: impl Into<String>) -> Self {
        Self::Lexical {
            line,
            issue: issue.into(),
        }
    }

    /// Create a syntax error
    pub fn syntax(expected: &'static str, found: impl Into<String>, line: usize) -> Self {
        Self::Syntax {
            expected,
            found: found.into(),
            line,
        }
    }
}
