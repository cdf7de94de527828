// ABOUTME: Error types for parsing and evaluation failures

use crate::value::Value;
use thiserror::Error;

// ===== Arity constant strings (eliminates allocations in error paths) =====
pub const ARITY_ONE: &str = "1";
pub const ARITY_TWO: &str = "2";
pub const ARITY_THREE: &str = "3";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";
pub const ARITY_AT_LEAST_TWO: &str = "at least 2";

/// Evaluation failure. Carried as an ordinary return value through the
/// reduction; the REPL and `load` print it and continue.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Type mismatch with function name, expected type, actual type, and position
    #[error("{function}: expected {expected}, got {actual} at argument {position}")]
    TypeMismatch {
        function: String,
        expected: String,
        actual: String,
        position: usize,
    },

    /// Arity error with function name, expected count/range, and actual count
    #[error("{function}: expected {expected} argument{}, got {actual}", if *.expected == "1" { "" } else { "s" })]
    ArityMismatch {
        function: String,
        expected: String, // "2", "at least 1"
        actual: usize,
    },

    /// Runtime error with function context
    #[error("{function}: {message}")]
    RuntimeError { function: String, message: String },

    // ===== Special variants with stable message text =====
    #[error("{0} not found")]
    UndefinedSymbol(String),

    #[error("Operation is not callable")]
    NotCallable,

    #[error("Passed too many arguments to function")]
    TooManyArguments,

    #[error("Division by zero")]
    DivisionByZero,
}

impl EvalError {
    /// Create a type mismatch error with full context
    pub fn type_error(function: &str, expected: &str, actual: &Value, position: usize) -> Self {
        EvalError::TypeMismatch {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
            position,
        }
    }

    /// Create an arity error with expected and actual counts
    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::ArityMismatch {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create a runtime error with function context
    pub fn runtime_error(function: &str, message: impl Into<String>) -> Self {
        EvalError::RuntimeError {
            function: function.to_string(),
            message: message.into(),
        }
    }
}

/// Parse failure. Unlike [`EvalError`] this is fatal to the current input:
/// the REPL prints the diagnostic and discards the line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("mismatched brackets near '{0}'")]
    MismatchedBrackets(String),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("integer literal '{0}' is out of range")]
    IntegerOverflow(String),

    #[error("malformed expression near '{0}'")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_message_text() {
        assert_eq!(
            EvalError::UndefinedSymbol("x".to_string()).to_string(),
            "x not found"
        );
        assert_eq!(
            EvalError::NotCallable.to_string(),
            "Operation is not callable"
        );
        assert_eq!(
            EvalError::TooManyArguments.to_string(),
            "Passed too many arguments to function"
        );
        assert_eq!(EvalError::DivisionByZero.to_string(), "Division by zero");
    }

    #[test]
    fn test_arity_message_pluralization() {
        let one = EvalError::arity_error("head", ARITY_ONE, 2);
        assert_eq!(one.to_string(), "head: expected 1 argument, got 2");

        let two = EvalError::arity_error("<", ARITY_TWO, 3);
        assert_eq!(two.to_string(), "<: expected 2 arguments, got 3");
    }

    #[test]
    fn test_type_error_reports_position() {
        let err = EvalError::type_error("+", "an integer", &Value::Boolean(true), 2);
        assert_eq!(
            err.to_string(),
            "+: expected an integer, got a boolean at argument 2"
        );
    }
}
