//! Conditional operation: if
//!
//! `(if cond {then} {else})` - the condition must be a boolean and the
//! chosen branch a Q-expression. The chosen branch is re-read as an
//! S-expression and evaluated; the other branch is never touched.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_THREE};
use crate::eval::evaluate;
use crate::value::{Builtin, Symbol, Value};
use std::rc::Rc;

pub fn builtin_if(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity_error("if", ARITY_THREE, args.len()));
    }

    let condition = match args[0] {
        Value::Boolean(b) => b,
        ref other => return Err(EvalError::type_error("if", "a boolean", other, 1)),
    };

    let branch = if condition {
        args.swap_remove(1)
    } else {
        args.swap_remove(2)
    };
    let position = if condition { 2 } else { 3 };

    match branch {
        Value::Qexpr(cells) => evaluate(env, Value::Sexpr(cells)),
        other => Err(EvalError::type_error("if", "a Q-expression", &other, position)),
    }
}

/// Register the conditional builtin in the environment
pub fn register(env: &Rc<Environment>) {
    env.define_local(
        Symbol::from("if"),
        Value::Builtin(Builtin {
            name: "if",
            func: builtin_if,
        }),
    );
}
