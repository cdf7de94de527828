//! Binding and function construction: def, \
//!
//! `(def {s0 s1 ...} v0 v1 ...)` binds each value under the matching
//! symbol at the root environment and reduces to `()`.
//!
//! `(\ {formals} {body})` builds a function. Formals are symbols; a `&`
//! introduces a single trailing rest formal that collects surplus
//! arguments into a Q-expression.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_TWO, ARITY_TWO};
use crate::value::{Builtin, Lambda, Symbol, Value};
use std::rc::Rc;

pub fn builtin_def(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("def", ARITY_AT_LEAST_TWO, 0));
    }

    let names = match args.remove(0) {
        Value::Qexpr(cells) => cells,
        other => return Err(EvalError::type_error("def", "a Q-expression", &other, 1)),
    };

    if names.is_empty() {
        return Err(EvalError::runtime_error(
            "def",
            "expected at least one symbol to bind",
        ));
    }

    let mut symbols = Vec::with_capacity(names.len());
    for name in names {
        match name {
            Value::Symbol(symbol) => symbols.push(symbol),
            other => {
                return Err(EvalError::runtime_error(
                    "def",
                    format!("cannot bind to {}", other.type_name()),
                ));
            }
        }
    }

    if symbols.len() != args.len() {
        return Err(EvalError::runtime_error(
            "def",
            format!(
                "expected {} values for {} symbols, got {}",
                symbols.len(),
                symbols.len(),
                args.len()
            ),
        ));
    }

    for (symbol, value) in symbols.into_iter().zip(args) {
        env.define_root(symbol, value);
    }
    Ok(Value::unit())
}

/// Splits the formals Q-expression into required parameters and an
/// optional rest parameter, rejecting anything else.
fn normalize_formals(cells: Vec<Value>) -> Result<(Vec<Symbol>, Option<Symbol>), EvalError> {
    let mut symbols = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Value::Symbol(symbol) => symbols.push(symbol),
            other => {
                return Err(EvalError::runtime_error(
                    "\\",
                    format!("formals must be symbols, got {}", other.type_name()),
                ));
            }
        }
    }

    match symbols.iter().position(|s| s.as_str() == "&") {
        None => Ok((symbols, None)),
        Some(position) => {
            if position + 2 != symbols.len() {
                return Err(EvalError::runtime_error(
                    "\\",
                    "'&' must be followed by exactly one symbol",
                ));
            }
            let rest = symbols.pop();
            symbols.pop(); // the sentinel itself
            if rest.as_ref().is_some_and(|s| s.as_str() == "&") {
                return Err(EvalError::runtime_error(
                    "\\",
                    "'&' may appear at most once",
                ));
            }
            Ok((symbols, rest))
        }
    }
}

pub fn builtin_lambda(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("\\", ARITY_TWO, args.len()));
    }

    let body = match args.remove(1) {
        Value::Qexpr(cells) => cells,
        other => return Err(EvalError::type_error("\\", "a Q-expression", &other, 2)),
    };
    let formals = match args.remove(0) {
        Value::Qexpr(cells) => cells,
        other => return Err(EvalError::type_error("\\", "a Q-expression", &other, 1)),
    };

    let (params, rest) = normalize_formals(formals)?;
    Ok(Value::lambda(Lambda::new(params, rest, body)))
}

/// Register the binding builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define_local(
        Symbol::from("def"),
        Value::Builtin(Builtin {
            name: "def",
            func: builtin_def,
        }),
    );
    env.define_local(
        Symbol::from("\\"),
        Value::Builtin(Builtin {
            name: "\\",
            func: builtin_lambda,
        }),
    );
}
