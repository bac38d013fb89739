//! Compact-form lexer implementation using winnow.
//!
//! Line-oriented: line breaks (with any trailing whitespace and `%` comment
//! before them) are consumed between tokens and counted. The token rule is
//! chosen by the first character of the remaining input.

use std::sync::Arc;

use n3s_graph_ir::Datatype;
use winnow::ascii::{digit0, digit1, line_ending};
use winnow::combinator::{alt, delimited, opt, peek, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{Location, Stream};
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

const BOM: char = '\u{feff}';

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Lexer for compact-form documents.
pub struct Lexer<'a> {
    input: &'a str,
    comments: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input. Comments are surfaced as tokens.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            comments: true,
        }
    }

    /// Whether `%` comments produce [`TokenKind::Comment`] tokens.
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    /// Tokenize the entire input.
    pub fn tokenize(self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        self.tokenize_with(|token| tokens.push(token))?;
        Ok(tokens)
    }

    /// Tokenize the entire input, handing each token to `emit` as it is read.
    ///
    /// The last token emitted on success is always [`TokenKind::Eof`]. Byte
    /// offsets are relative to the input with any leading BOM removed.
    pub fn tokenize_with<F: FnMut(Token)>(self, mut emit: F) -> Result<()> {
        let source = self.input.strip_prefix(BOM).unwrap_or(self.input);
        let mut input = LocatingSlice::new(source);
        let mut line = 1;

        loop {
            loop {
                let start = input.checkpoint();
                let offset = input.current_token_start();
                match line_break.parse_next(&mut input) {
                    Ok(comment) => {
                        if let (true, Some(text)) = (self.comments, comment) {
                            emit(Token::new(
                                TokenKind::Comment(Arc::from(text)),
                                line,
                                offset,
                                input.current_token_start(),
                            ));
                        }
                        line += 1;
                    }
                    Err(_) => {
                        input.reset(&start);
                        break;
                    }
                }
            }
            let _: ModalResult<&str> = take_while(0.., is_inline_ws).parse_next(&mut input);

            let start = input.current_token_start();
            if at_end(&input) {
                emit(Token::new(TokenKind::Eof, line, start, start));
                return Ok(());
            }

            match next_token(&mut input) {
                Ok(kind) => emit(Token::new(kind, line, start, input.current_token_start())),
                Err(_) => {
                    let issue = source[start..]
                        .split(char::is_whitespace)
                        .next()
                        .unwrap_or_default();
                    return Err(Error::lexical(line, issue));
                }
            }
        }
    }
}

fn is_inline_ws(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_line_char(c: char) -> bool {
    c != '\n' && c != '\r'
}

/// Remaining input is empty or a single trailing comment.
fn at_end(input: &Input<'_>) -> bool {
    input.is_empty() || (input.starts_with('%') && !input.contains(['\n', '\r']))
}

/// Trailing whitespace, optional `%` comment, one line ending and the leading
/// whitespace of the next line. Yields the comment text without the `%`.
fn line_break<'a>(input: &mut Input<'a>) -> ModalResult<Option<&'a str>> {
    let _ = take_while(0.., is_inline_ws).parse_next(input)?;
    let comment = opt(preceded('%', take_while(0.., is_line_char))).parse_next(input)?;
    alt((line_ending, "\r")).parse_next(input)?;
    let _ = take_while(0.., is_inline_ws).parse_next(input)?;
    Ok(comment)
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let first = peek(any).parse_next(input)?;
    match first {
        ':' => parse_directive(input),
        '\'' => alt((parse_quoted_iri, parse_quoted_blank, parse_quoted_string)).parse_next(input),
        'l' => parse_typed_literal(input),
        't' | 'f' => parse_boolean(input),
        '0'..='9' | '+' | '-' => parse_number(input),
        _ => parse_punctuation(input),
    }
}

// =============================================================================
// Directives
// =============================================================================

fn parse_directive(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded(
        (":-", take_while(0.., is_inline_ws)),
        take_while(0.., is_line_char),
    )
    .map(|text: &str| TokenKind::Directive(Arc::from(text)))
    .parse_next(input)
}

// =============================================================================
// Quoted terms
// =============================================================================

fn is_iri_char(c: char) -> bool {
    !matches!(c, '\x00'..=' ' | '<' | '>' | '\\' | '"' | '{' | '}' | '|' | '^' | '`')
}

fn parse_quoted_iri(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited("'<", take_while(0.., is_iri_char), ">'")
        .map(|iri: &str| TokenKind::Iri(Arc::from(iri)))
        .parse_next(input)
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || matches!(c,
            '\u{C0}'..='\u{D6}'
            | '\u{D8}'..='\u{F6}'
            | '\u{F8}'..='\u{2FF}'
            | '\u{370}'..='\u{37D}'
            | '\u{37F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start(c)
        || c == '-'
        || c == '\u{B7}'
        || matches!(c, '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Blank-node label: name characters joined by single interior dots.
fn parse_blank_label(input: &mut Input<'_>) -> ModalResult<String> {
    let first: char = one_of(is_name_start).parse_next(input)?;
    let mut label = String::from(first);
    loop {
        let chunk: &str = take_while(0.., is_name_char).parse_next(input)?;
        label.push_str(chunk);

        let continues = input.starts_with('.')
            && input.as_ref()[1..].starts_with(is_name_char);
        if !continues {
            break;
        }
        '.'.parse_next(input)?;
        label.push('.');
    }
    Ok(label)
}

fn parse_quoted_blank(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited("'_:", parse_blank_label, '\'')
        .map(|label: String| TokenKind::Blank(Arc::from(label)))
        .parse_next(input)
}

fn parse_quoted_string(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    quoted_content
        .map(|value: String| TokenKind::literal(value, Datatype::xsd_string()))
        .parse_next(input)
}

/// `'...'` with backslash escapes, returning the unescaped content.
fn quoted_content(input: &mut Input<'_>) -> ModalResult<String> {
    '\''.parse_next(input)?;
    let mut result = String::new();
    loop {
        let chunk: &str = take_till(0.., ['\'', '\\', '\n', '\r']).parse_next(input)?;
        result.push_str(chunk);

        if !input.starts_with('\\') {
            break;
        }
        '\\'.parse_next(input)?;
        let escaped = any
            .verify_map(|c| match c {
                '\\' | '\'' | '"' => Some(c),
                '0' => Some('\0'),
                'n' => Some('\n'),
                'r' => Some('\r'),
                't' => Some('\t'),
                _ => None,
            })
            .parse_next(input)?;
        result.push(escaped);
    }
    '\''.parse_next(input)?;
    Ok(result)
}

// =============================================================================
// Literals
// =============================================================================

fn parse_typed_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let value = preceded(
        "literal(",
        alt((
            quoted_content,
            take_till(1.., [',', '\'', ')', '\n', '\r']).map(String::from),
        )),
    )
    .parse_next(input)?;
    let datatype: &str = delimited(",'", take_till(1.., ['\'', '\n', '\r']), "')").parse_next(input)?;
    Ok(TokenKind::literal(value, Datatype::from_iri(datatype)))
}

fn parse_boolean(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let word: &str = alt(("true", "false")).parse_next(input)?;
    if peek(opt(one_of(is_name_char))).parse_next(input)?.is_some() {
        return backtrack();
    }
    Ok(TokenKind::literal(word, Datatype::xsd_boolean()))
}

fn sign(input: &mut Input<'_>) -> ModalResult<Option<char>> {
    opt(one_of(['+', '-'])).parse_next(input)
}

fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((parse_double, parse_decimal, parse_integer)).parse_next(input)
}

fn parse_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (
        sign,
        alt(((digit1, '.', digit0).take(), ('.', digit1).take(), digit1)),
        one_of(['e', 'E']),
        sign,
        digit1,
    )
        .take()
        .parse_next(input)?;
    Ok(TokenKind::literal(text, Datatype::xsd_double()))
}

fn parse_decimal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (sign, digit0, '.', digit1).take().parse_next(input)?;
    Ok(TokenKind::literal(text, Datatype::xsd_decimal()))
}

/// `1.` lexes as the integer `1` followed by a dot.
fn parse_integer(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (sign, digit1).take().parse_next(input)?;
    Ok(TokenKind::literal(text, Datatype::xsd_integer()))
}

// =============================================================================
// Punctuation
// =============================================================================

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| match c {
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        ',' => Some(TokenKind::Comma),
        '.' => Some(TokenKind::Dot),
        _ => None,
    })
    .parse_next(input)
}

/// Tokenize a compact-form document string.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}
