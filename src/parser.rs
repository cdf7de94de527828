// ABOUTME: Parser module turning source text into expression trees using nom combinators

use nom::{
    branch::alt,
    bytes::complete::{escaped, take_while, take_while1},
    character::complete::{char, multispace1, none_of, one_of},
    combinator::value,
    multi::many0,
    IResult, Parser,
};

use crate::error::ParseError;
use crate::value::{Symbol, Value};

/// Characters permitted in symbol tokens.
fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\=<>!&".contains(c)
}

/// Characters that may appear in any bare word. The dot is not a symbol
/// character but is needed to lex double literals as one token.
fn is_word_char(c: char) -> bool {
    is_symbol_char(c) || c == '.'
}

/// Matches `-?[0-9]+`.
fn is_integer(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Matches `-?[0-9]+\.[0-9]+`. The `.5` and `5.` forms are rejected.
fn is_double(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    match digits.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

// ============================================================================
// Whitespace and Comments
// ============================================================================

/// Parse a comment (from ; to end of line)
fn parse_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = char(';')(input)?;
    let (input, _) = take_while(|c| c != '\n')(input)?;
    Ok((input, ()))
}

/// Skip whitespace and comments
fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    many0(alt((value((), multispace1), parse_comment)))
        .map(|_| ())
        .parse(input)
}

// ============================================================================
// Atoms
// ============================================================================

fn classify_atom(word: &str) -> Option<Value> {
    match word {
        "true" => Some(Value::Boolean(true)),
        "false" => Some(Value::Boolean(false)),
        _ if is_integer(word) => word.parse::<i64>().ok().map(Value::Integer),
        _ if is_double(word) => word.parse::<f64>().ok().map(Value::Double),
        _ if word.chars().all(is_symbol_char) => Some(Value::Symbol(Symbol::new(word))),
        _ => None,
    }
}

/// Parse a bare word and classify it as boolean, integer, double, or symbol
fn parse_atom(input: &str) -> IResult<&str, Value> {
    let (rest, word) = take_while1(is_word_char)(input)?;
    match classify_atom(word) {
        Some(atom) => Ok((rest, atom)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        ))),
    }
}

/// Parse a string literal with escape sequences: \", \\, \n, \t
fn parse_string(input: &str) -> IResult<&str, Value> {
    let start = input;
    let (input, _) = char('"')(input)?;

    // Handle empty strings
    if let Ok((input, _)) = char::<_, nom::error::Error<_>>('"')(input) {
        return Ok((input, Value::Str(String::new())));
    }

    let (input, content) = escaped(none_of("\"\\"), '\\', one_of("\"\\nt"))(input)?;

    // A missing closing quote is reported at the opening quote, not at
    // wherever the content ran out.
    let (input, _) = char::<_, nom::error::Error<_>>('"')(input).map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(start, nom::error::ErrorKind::Char))
    })?;

    // Process escape sequences
    let mut result = String::new();
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                match next {
                    'n' => result.push('\n'),
                    't' => result.push('\t'),
                    '\\' => result.push('\\'),
                    '"' => result.push('"'),
                    _ => {
                        result.push('\\');
                        result.push(next);
                    }
                }
            }
        } else {
            result.push(c);
        }
    }

    Ok((input, Value::Str(result)))
}

// ============================================================================
// Grouped Expressions
// ============================================================================

/// Parse the cells between a matched pair of brackets
fn parse_delimited(input: &str, open: char, close: char) -> IResult<&str, Vec<Value>> {
    let (input, _) = char(open)(input)?;
    let (input, _) = ws_and_comments(input)?;

    let mut cells = Vec::new();
    let mut remaining = input;

    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(close)(remaining) {
            return Ok((rest, cells));
        }

        if remaining.is_empty() {
            return Err(nom::Err::Error(nom::error::Error::new(
                remaining,
                nom::error::ErrorKind::Eof,
            )));
        }

        let (rest, cell) = parse_expr(remaining)?;
        cells.push(cell);

        let (rest, _) = ws_and_comments(rest)?;
        remaining = rest;
    }
}

/// Parse an S-expression: (expr ...)
fn parse_sexpr(input: &str) -> IResult<&str, Value> {
    let (rest, cells) = parse_delimited(input, '(', ')')?;
    Ok((rest, Value::Sexpr(cells)))
}

/// Parse a Q-expression: {expr ...}
fn parse_qexpr(input: &str) -> IResult<&str, Value> {
    let (rest, cells) = parse_delimited(input, '{', '}')?;
    Ok((rest, Value::Qexpr(cells)))
}

/// Main expression parser - tries all alternatives
fn parse_expr(input: &str) -> IResult<&str, Value> {
    let (input, _) = ws_and_comments(input)?;
    alt((parse_sexpr, parse_qexpr, parse_string, parse_atom)).parse(input)
}

// ============================================================================
// Entry Point
// ============================================================================

fn snippet(input: &str) -> String {
    input.chars().take(24).collect()
}

/// Turn the input a nom failure points at into a specific diagnostic.
fn diagnose(input: &str) -> ParseError {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return ParseError::MismatchedBrackets("end of input".to_string());
    }
    if trimmed.starts_with(')') || trimmed.starts_with('}') {
        return ParseError::MismatchedBrackets(snippet(trimmed));
    }
    if trimmed.starts_with('"') {
        return ParseError::UnterminatedString;
    }

    let word: String = trimmed.chars().take_while(|&c| is_word_char(c)).collect();
    if is_integer(&word) && word.parse::<i64>().is_err() {
        return ParseError::IntegerOverflow(word);
    }

    ParseError::Malformed(snippet(trimmed))
}

/// Public entry point for parsing.
///
/// Parses any number of top-level forms and returns them as the children
/// of a root S-expression. Comment-only or empty input yields an empty
/// root.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    let mut forms = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) = ws_and_comments(remaining).unwrap_or((remaining, ()));
        if rest.is_empty() {
            break;
        }

        if rest.starts_with(')') || rest.starts_with('}') {
            return Err(ParseError::MismatchedBrackets(snippet(rest)));
        }

        match parse_expr(rest) {
            Ok((next, form)) => {
                forms.push(form);
                remaining = next;
            }
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(diagnose(e.input));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(ParseError::MismatchedBrackets("end of input".to_string()));
            }
        }
    }

    Ok(Value::Sexpr(forms))
}

/// Parses the input and returns the top-level forms directly.
pub fn parse_forms(input: &str) -> Result<Vec<Value>, ParseError> {
    match parse(input)? {
        Value::Sexpr(forms) => Ok(forms),
        _ => unreachable!("parse always yields a root S-expression"),
    }
}
