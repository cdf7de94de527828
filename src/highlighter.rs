// ABOUTME: Syntax highlighter for the REPL
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for slisp syntax elements while preserving display width

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_BRACKETS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)

const BUILTIN_NAMES: &[&str] = &[
    "+", "-", "*", "/", "<", "<=", ">", ">=", "eq", "neq", "list", "head", "tail", "join", "eval",
    "if", "def", "\\", "load", "print", "show", "error", "true", "false",
];

/// Rustyline helper providing syntax-aware color highlighting
pub struct SlispHelper;

impl SlispHelper {
    pub fn new() -> Self {
        SlispHelper
    }
}

impl Default for SlispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for SlispHelper {}

impl Completer for SlispHelper {
    type Candidate = String;
}

impl Hinter for SlispHelper {
    type Hint = String;
}

impl Validator for SlispHelper {}

impl Highlighter for SlispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\=<>!&.".contains(c)
}

fn is_number(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Tokenize a line and wrap recognized tokens in color codes
fn highlight_line(line: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Comments: everything from ; to end of line
            ';' => {
                result.push_str(COLOR_COMMENT);
                while i < chars.len() {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            // Strings: preserve exact content but colorize
            '"' => {
                result.push_str(COLOR_STRING);
                result.push(chars[i]);
                i += 1;
                while i < chars.len() {
                    result.push(chars[i]);
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        i += 1;
                        result.push(chars[i]);
                    } else if chars[i] == '"' {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            c @ ('(' | ')' | '{' | '}') => {
                result.push_str(COLOR_BRACKETS);
                result.push(c);
                result.push_str(COLOR_RESET);
                i += 1;
            }

            c if is_word_char(c) => {
                let mut word = String::new();
                while i < chars.len() && is_word_char(chars[i]) {
                    word.push(chars[i]);
                    i += 1;
                }
                if is_number(&word) {
                    result.push_str(COLOR_NUMBER);
                    result.push_str(&word);
                    result.push_str(COLOR_RESET);
                } else if BUILTIN_NAMES.contains(&word.as_str()) {
                    result.push_str(COLOR_BUILTIN);
                    result.push_str(&word);
                    result.push_str(COLOR_RESET);
                } else {
                    result.push_str(&word);
                }
            }

            c => {
                result.push(c);
                i += 1;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_symbols_pass_through() {
        assert_eq!(highlight_line("my-function"), "my-function");
    }

    #[test]
    fn test_numbers_and_builtins_are_colored() {
        let highlighted = highlight_line("(+ 1 2)");
        assert!(highlighted.contains(COLOR_NUMBER));
        assert!(highlighted.contains(COLOR_BUILTIN));
        assert!(highlighted.contains(COLOR_BRACKETS));
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let highlighted = highlight_line("1 ; note (+ 1 2)");
        let comment_start = highlighted.find(COLOR_COMMENT).expect("comment color");
        // Nothing after the comment marker gets bracket colors.
        assert!(!highlighted[comment_start..].contains(COLOR_BRACKETS));
    }
}
