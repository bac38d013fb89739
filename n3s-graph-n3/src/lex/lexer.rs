//! N3 lexer implementation using winnow.
//!
//! Tokenizes N3 input into a stream of tokens with source spans.
//! Fails fast on the first lexical error with a line/column message.

use std::sync::Arc;

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt, peek, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location, Stream};
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::token::{Token, TokenKind};
use crate::error::{N3Error, Result};

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Lexer for N3 documents.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Tokenize the entire input.
    pub fn tokenize(self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut input = LocatingSlice::new(self.input);

        loop {
            skip_ws_and_comments(&mut input);

            if input.is_empty() {
                let pos = input.current_token_start();
                tokens.push(Token::new(TokenKind::Eof, pos, pos));
                break;
            }

            let start = input.current_token_start();
            match next_token(&mut input) {
                Ok(kind) => {
                    let end = input.current_token_start();
                    tokens.push(Token::new(kind, start, end));
                }
                Err(_) => return Err(self.make_error(start, &input)),
            }
        }

        Ok(tokens)
    }

    fn make_error(&self, position: usize, input: &Input<'_>) -> N3Error {
        let bad_char = input.chars().next().unwrap_or('?');
        let (line, col) = line_col(self.input, position);
        let line_content = self.input.lines().nth(line - 1).unwrap_or("");
        let pointer = " ".repeat(col.saturating_sub(1));

        let what = match bad_char {
            '"' | '\'' => "unterminated string literal".to_string(),
            '<' => "invalid or unterminated IRI".to_string(),
            c => format!("unexpected character '{}'", c),
        };
        N3Error::lexer(
            position,
            format!(
                "{} at line {}, column {}\n  |\n{} | {}\n  | {}^",
                what, line, col, line, line_content, pointer
            ),
        )
    }
}

/// Convert a byte position to (line, column), 1-indexed.
pub(crate) fn line_col(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in source.char_indices() {
        if i >= position {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn skip_ws_and_comments(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str, ContextError> = take_while(0.., is_ws).parse_next(input);

        if input.starts_with('#') {
            let _: ModalResult<&str, ContextError> =
                take_till(0.., |c| c == '\n' || c == '\r').parse_next(input);
        } else {
            break;
        }
    }
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        parse_double_caret,
        parse_iri_ref,
        parse_operator,
        parse_blank_node_label,
        parse_anon,
        parse_nil,
        parse_variable,
        parse_at_directive,
        parse_default_prefix,
        parse_prefixed_name_or_keyword,
        parse_string_literal,
        parse_number,
        parse_punctuation,
    ))
    .parse_next(input)
}

// =============================================================================
// IRIs
// =============================================================================

fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('<', parse_iri_content, '>')
        .map(|s: String| TokenKind::Iri(Arc::from(s)))
        .parse_next(input)
}

fn parse_iri_content(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., is_iri_char).parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with('>') {
            break;
        }
        if !input.starts_with('\\') {
            return backtrack();
        }
        '\\'.parse_next(input)?;
        match parse_unicode_escape(input)? {
            Some(c) => result.push(c),
            None => return backtrack(),
        }
    }

    Ok(result)
}

/// Parse the hex part of `\uXXXX` / `\UXXXXXXXX` (the backslash is already consumed).
fn parse_unicode_escape(input: &mut Input<'_>) -> ModalResult<Option<char>> {
    let width: usize = if input.starts_with('u') {
        4
    } else if input.starts_with('U') {
        8
    } else {
        return Ok(None);
    };
    any.parse_next(input)?;
    let hex: &str = take_while(width..=width, AsChar::is_hex_digit).parse_next(input)?;
    Ok(u32::from_str_radix(hex, 16).ok().and_then(char::from_u32))
}

// =============================================================================
// N3 operators
// =============================================================================

fn parse_operator(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        "=>".value(TokenKind::Implies),
        "<=".value(TokenKind::ImpliedBy),
        '='.value(TokenKind::SameAs),
    ))
    .parse_next(input)
}

// =============================================================================
// Directives and language tags
// =============================================================================

fn parse_at_directive(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '@'.parse_next(input)?;
    let word: &str =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-').parse_next(input)?;

    match word.to_lowercase().as_str() {
        "prefix" => Ok(TokenKind::KwPrefix),
        "base" => Ok(TokenKind::KwBase),
        _ => Ok(TokenKind::LangTag(Arc::from(word))),
    }
}

// =============================================================================
// Prefixed names and keywords
// =============================================================================

fn parse_default_prefix(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ':'.parse_next(input)?;
    match opt(parse_pn_local).parse_next(input)? {
        Some(local) => Ok(TokenKind::PrefixedName {
            prefix: Arc::from(""),
            local: Arc::from(local.as_str()),
        }),
        None => Ok(TokenKind::PrefixedNameNs(Arc::from(""))),
    }
}

/// Read a dotted name: PN_CHARS runs joined by single interior dots.
fn take_dotted_name(input: &mut Input<'_>, extra: fn(char) -> bool) -> ModalResult<String> {
    let mut word = String::new();
    loop {
        let chunk: &str = take_while(0.., |c: char| is_pn_chars(c) || extra(c)).parse_next(input)?;
        word.push_str(chunk);

        let continues = input.starts_with('.')
            && input.as_ref()[1..]
                .chars()
                .next()
                .is_some_and(|c| is_pn_chars(c) || extra(c));
        if !continues {
            break;
        }
        '.'.parse_next(input)?;
        word.push('.');
    }
    Ok(word)
}

fn no_extra(_: char) -> bool {
    false
}

fn parse_prefixed_name_or_keyword(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let start = input.checkpoint();
    let first: char = any.parse_next(input)?;
    if !is_pn_chars_base(first) {
        input.reset(&start);
        return backtrack();
    }

    let mut word = String::from(first);
    word.push_str(&take_dotted_name(input, no_extra)?);

    if peek(opt(':')).parse_next(input)?.is_some() {
        ':'.parse_next(input)?;
        return match opt(parse_pn_local).parse_next(input)? {
            Some(local) => Ok(TokenKind::PrefixedName {
                prefix: Arc::from(word.as_str()),
                local: Arc::from(local.as_str()),
            }),
            None => Ok(TokenKind::PrefixedNameNs(Arc::from(word.as_str()))),
        };
    }

    match word.as_str() {
        "a" => Ok(TokenKind::KwA),
        "true" => Ok(TokenKind::KwTrue),
        "false" => Ok(TokenKind::KwFalse),
        "PREFIX" => Ok(TokenKind::KwSparqlPrefix),
        "BASE" => Ok(TokenKind::KwSparqlBase),
        _ => {
            input.reset(&start);
            backtrack()
        }
    }
}

fn parse_pn_local(input: &mut Input<'_>) -> ModalResult<String> {
    let first = input.chars().next().ok_or_else(|| ErrMode::Backtrack(ContextError::new()))?;
    if !is_name_start(first) && first != ':' {
        return backtrack();
    }
    let local = take_dotted_name(input, |c| c == ':')?;
    if local.is_empty() {
        return backtrack();
    }
    Ok(local)
}

// =============================================================================
// Blank nodes and variables
// =============================================================================

fn parse_blank_node_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded("_:", parse_name)
        .map(|name: String| TokenKind::BlankNodeLabel(Arc::from(name)))
        .parse_next(input)
}

fn parse_variable(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded('?', parse_name)
        .map(|name: String| TokenKind::Variable(Arc::from(name)))
        .parse_next(input)
}

fn parse_name(input: &mut Input<'_>) -> ModalResult<String> {
    let first: char = one_of(is_name_start).parse_next(input)?;
    let mut name = String::from(first);
    name.push_str(&take_dotted_name(input, no_extra)?);
    Ok(name)
}

fn parse_anon(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ('[', take_while(0.., is_ws), ']')
        .value(TokenKind::Anon)
        .parse_next(input)
}

fn parse_nil(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ('(', take_while(0.., is_ws), ')')
        .value(TokenKind::Nil)
        .parse_next(input)
}

// =============================================================================
// String literals
// =============================================================================

fn parse_string_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        delimited("\"\"\"", long_double, "\"\"\""),
        delimited("'''", long_single, "'''"),
        delimited('"', short_double, '"'),
        delimited('\'', short_single, '\''),
    ))
    .map(|s: String| TokenKind::String(Arc::from(s)))
    .parse_next(input)
}

fn long_double(input: &mut Input<'_>) -> ModalResult<String> {
    long_string_content(input, '"')
}

fn long_single(input: &mut Input<'_>) -> ModalResult<String> {
    long_string_content(input, '\'')
}

fn short_double(input: &mut Input<'_>) -> ModalResult<String> {
    short_string_content(input, '"')
}

fn short_single(input: &mut Input<'_>) -> ModalResult<String> {
    short_string_content(input, '\'')
}

fn short_string_content(input: &mut Input<'_>, quote: char) -> ModalResult<String> {
    let mut result = String::new();
    loop {
        let chunk: &str = take_while(0.., |c| c != quote && c != '\\' && c != '\n' && c != '\r')
            .parse_next(input)?;
        result.push_str(chunk);

        if !input.starts_with('\\') {
            break;
        }
        '\\'.parse_next(input)?;
        result.push(parse_escape_char(input)?);
    }
    Ok(result)
}

fn long_string_content(input: &mut Input<'_>, quote: char) -> ModalResult<String> {
    let closing: String = std::iter::repeat(quote).take(3).collect();
    let mut result = String::new();
    loop {
        let chunk: &str = take_while(0.., |c| c != quote && c != '\\').parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with(closing.as_str()) {
            break;
        }
        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            result.push(parse_escape_char(input)?);
        } else {
            // a lone quote inside a long string
            result.push(any.parse_next(input)?);
        }
    }
    Ok(result)
}

fn parse_escape_char(input: &mut Input<'_>) -> ModalResult<char> {
    if let Some(c) = parse_unicode_escape(input)? {
        return Ok(c);
    }
    let c: char = any.parse_next(input)?;
    match c {
        't' => Ok('\t'),
        'b' => Ok('\x08'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\x0C'),
        '"' | '\'' | '\\' => Ok(c),
        _ => backtrack(),
    }
}

// =============================================================================
// Numbers
// =============================================================================

fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((parse_double, parse_decimal, parse_integer)).parse_next(input)
}

fn parse_integer(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (opt(one_of(['+', '-'])), digit1).take().parse_next(input)?;

    if peek(opt(one_of(['e', 'E']))).parse_next(input)?.is_some() {
        return backtrack();
    }
    if input.starts_with('.') && input.as_ref()[1..].starts_with(|c: char| c.is_ascii_digit()) {
        return backtrack();
    }
    Ok(TokenKind::Integer(Arc::from(text)))
}

fn parse_decimal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (
        opt(one_of(['+', '-'])),
        alt(((digit1, '.', digit1).take(), ('.', digit1).take())),
    )
        .take()
        .parse_next(input)?;

    if peek(opt(one_of(['e', 'E']))).parse_next(input)?.is_some() {
        return backtrack();
    }
    Ok(TokenKind::Decimal(Arc::from(text)))
}

fn parse_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (
        opt(one_of(['+', '-'])),
        alt(((digit1, '.', opt(digit1)).take(), ('.', digit1).take(), digit1)),
        one_of(['e', 'E']),
        opt(one_of(['+', '-'])),
        digit1,
    )
        .take()
        .parse_next(input)?;
    Ok(TokenKind::Double(Arc::from(text)))
}

// =============================================================================
// Punctuation
// =============================================================================

fn parse_double_caret(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "^^".value(TokenKind::DoubleCaret).parse_next(input)
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| match c {
        '.' => Some(TokenKind::Dot),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '{' => Some(TokenKind::LBrace),
        '}' => Some(TokenKind::RBrace),
        _ => None,
    })
    .parse_next(input)
}

/// Tokenize an N3 document string.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Eof))
            .collect()
    }

    #[test]
    fn test_iri_and_prefixed_names() {
        assert_eq!(
            tok("<http://example.org/> ex:name :local ex:"),
            vec![
                TokenKind::Iri(Arc::from("http://example.org/")),
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("name"),
                },
                TokenKind::PrefixedName {
                    prefix: Arc::from(""),
                    local: Arc::from("local"),
                },
                TokenKind::PrefixedNameNs(Arc::from("ex")),
            ]
        );
    }

    #[test]
    fn test_prefixed_name_before_dot() {
        assert_eq!(
            tok("ex:a.b ex:c."),
            vec![
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("a.b"),
                },
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("c"),
                },
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn test_blank_nodes_and_variables() {
        assert_eq!(
            tok("_:b1 [] [ ] ?who ()"),
            vec![
                TokenKind::BlankNodeLabel(Arc::from("b1")),
                TokenKind::Anon,
                TokenKind::Anon,
                TokenKind::Variable(Arc::from("who")),
                TokenKind::Nil,
            ]
        );
    }

    #[test]
    fn test_formula_operators() {
        assert_eq!(
            tok("{ } => <= = ="),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Implies,
                TokenKind::ImpliedBy,
                TokenKind::SameAs,
                TokenKind::SameAs,
            ]
        );
    }

    #[test]
    fn test_keywords_and_lang_tags() {
        assert_eq!(
            tok("a true false @prefix @base PREFIX BASE @en-US"),
            vec![
                TokenKind::KwA,
                TokenKind::KwTrue,
                TokenKind::KwFalse,
                TokenKind::KwPrefix,
                TokenKind::KwBase,
                TokenKind::KwSparqlPrefix,
                TokenKind::KwSparqlBase,
                TokenKind::LangTag(Arc::from("en-US")),
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            tok("\"hello\\nworld\" 'x' \"\"\"a \"quoted\" b\"\"\""),
            vec![
                TokenKind::String(Arc::from("hello\nworld")),
                TokenKind::String(Arc::from("x")),
                TokenKind::String(Arc::from("a \"quoted\" b")),
            ]
        );
        assert_eq!(tok(r#""é""#), vec![TokenKind::String(Arc::from("é"))]);
    }

    #[test]
    fn test_numbers_keep_lexical_form() {
        assert_eq!(
            tok("42 -7 +3.50 1e10 .5"),
            vec![
                TokenKind::Integer(Arc::from("42")),
                TokenKind::Integer(Arc::from("-7")),
                TokenKind::Decimal(Arc::from("+3.50")),
                TokenKind::Double(Arc::from("1e10")),
                TokenKind::Decimal(Arc::from(".5")),
            ]
        );
    }

    #[test]
    fn test_integer_then_dot() {
        assert_eq!(
            tok("1."),
            vec![TokenKind::Integer(Arc::from("1")), TokenKind::Dot]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            tok("ex:a # comment\nex:b"),
            vec![
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("a"),
                },
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("b"),
                },
            ]
        );
    }

    #[test]
    fn test_error_with_line_info() {
        let err = tokenize("ex:a ex:b \"ok\" .\nex:c $ .").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unexpected character '$'"));
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn test_error_unterminated_string() {
        let err = tokenize("ex:a ex:b \"open").unwrap_err();
        assert!(err.to_string().contains("unterminated string literal"));
    }
}
