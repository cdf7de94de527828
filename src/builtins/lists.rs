//! Quote and list operations: list, head, tail, join, eval
//!
//! These are the only operations that look inside Q-expressions.
//!
//! - `list`: pack the argument frame into a Q-expression
//! - `head`: Q-expression holding only the first cell
//! - `tail`: Q-expression without its first cell
//! - `join`: concatenation of Q-expressions
//! - `eval`: unquote - reduce a Q-expression as an S-expression

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE, ARITY_ONE};
use crate::eval::evaluate;
use crate::value::{Builtin, Symbol, Value};
use std::rc::Rc;

/// Checks for a single Q-expression argument and returns its cells.
fn single_qexpr(function: &str, mut args: Vec<Value>) -> Result<Vec<Value>, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error(function, ARITY_ONE, args.len()));
    }
    match args.remove(0) {
        Value::Qexpr(cells) => Ok(cells),
        other => Err(EvalError::type_error(function, "a Q-expression", &other, 1)),
    }
}

pub fn builtin_list(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    Ok(Value::Qexpr(args))
}

pub fn builtin_head(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let mut cells = single_qexpr("head", args)?;
    if cells.is_empty() {
        return Err(EvalError::runtime_error(
            "head",
            "expected a non-empty Q-expression",
        ));
    }
    cells.truncate(1);
    Ok(Value::Qexpr(cells))
}

pub fn builtin_tail(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let mut cells = single_qexpr("tail", args)?;
    if cells.is_empty() {
        return Err(EvalError::runtime_error(
            "tail",
            "expected a non-empty Q-expression",
        ));
    }
    cells.remove(0);
    Ok(Value::Qexpr(cells))
}

pub fn builtin_join(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("join", ARITY_AT_LEAST_ONE, 0));
    }

    let mut joined = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        match arg {
            Value::Qexpr(cells) => joined.extend(cells),
            other => return Err(EvalError::type_error("join", "a Q-expression", &other, i + 1)),
        }
    }
    Ok(Value::Qexpr(joined))
}

pub fn builtin_eval(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let cells = single_qexpr("eval", args)?;
    evaluate(env, Value::Sexpr(cells))
}

/// Register all list builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define_local(
        Symbol::from("list"),
        Value::Builtin(Builtin {
            name: "list",
            func: builtin_list,
        }),
    );
    env.define_local(
        Symbol::from("head"),
        Value::Builtin(Builtin {
            name: "head",
            func: builtin_head,
        }),
    );
    env.define_local(
        Symbol::from("tail"),
        Value::Builtin(Builtin {
            name: "tail",
            func: builtin_tail,
        }),
    );
    env.define_local(
        Symbol::from("join"),
        Value::Builtin(Builtin {
            name: "join",
            func: builtin_join,
        }),
    );
    env.define_local(
        Symbol::from("eval"),
        Value::Builtin(Builtin {
            name: "eval",
            func: builtin_eval,
        }),
    );
}
