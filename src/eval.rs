// ABOUTME: Evaluator module reducing expression trees against an environment

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Lambda, Value};
use std::rc::Rc;

/// Reduces an expression to a value.
///
/// Symbols are replaced by their binding, S-expressions are reduced per
/// [`evaluate_sexpr`], and everything else is already a value. Evaluation
/// is idempotent on fully reduced values.
pub fn evaluate(env: &Rc<Environment>, expr: Value) -> Result<Value, EvalError> {
    match expr {
        Value::Symbol(name) => env
            .lookup(&name)
            .ok_or_else(|| EvalError::UndefinedSymbol(name.to_string())),
        Value::Sexpr(cells) => evaluate_sexpr(env, cells),
        other => Ok(other),
    }
}

/// Reduces the cells of an S-expression.
///
/// Children are reduced left to right; the first error value collapses the
/// whole expression. An empty expression is the unit value `()` and a
/// single-cell expression collapses to its cell. Otherwise the first cell
/// is the operator. A unit operator is dropped and the remaining cells are
/// reduced again as a new top-level sequence, which is what lets multiple
/// top-level forms stack inside one root expression.
fn evaluate_sexpr(env: &Rc<Environment>, cells: Vec<Value>) -> Result<Value, EvalError> {
    let mut reduced = Vec::with_capacity(cells.len());
    for cell in cells {
        let value = evaluate(env, cell)?;
        if value.is_error() {
            return Ok(value);
        }
        reduced.push(value);
    }

    loop {
        if reduced.is_empty() {
            return Ok(Value::unit());
        }
        if reduced.len() == 1 {
            return Ok(reduced.remove(0));
        }

        let operator = reduced.remove(0);
        match operator {
            Value::Builtin(builtin) => return (builtin.func)(env, reduced),
            Value::Lambda(lambda) => return apply_lambda(*lambda, env, reduced),
            Value::Sexpr(cells) if cells.is_empty() => continue,
            _ => return Err(EvalError::NotCallable),
        }
    }
}

/// Applies a lambda to already-reduced arguments.
///
/// Arguments bind to the remaining formals left to right. Once the
/// positional formals are exhausted, a rest formal collects whatever is
/// left into a Q-expression; without one, surplus arguments are an error.
/// If arguments run out first, the result is a new lambda holding the
/// bindings made so far (partial application), unless only the rest formal
/// is left, which binds to the empty Q-expression and the call completes.
pub fn apply_lambda(
    mut lambda: Lambda,
    env: &Rc<Environment>,
    mut args: Vec<Value>,
) -> Result<Value, EvalError> {
    while !args.is_empty() {
        if !lambda.params.is_empty() {
            let param = lambda.params.remove(0);
            lambda.captured.insert(param, args.remove(0));
        } else if let Some(rest) = lambda.rest.take() {
            lambda.captured.insert(rest, Value::Qexpr(std::mem::take(&mut args)));
        } else {
            return Err(EvalError::TooManyArguments);
        }
    }

    if !lambda.params.is_empty() {
        return Ok(Value::lambda(lambda));
    }

    if let Some(rest) = lambda.rest.take() {
        lambda.captured.insert(rest, Value::Qexpr(Vec::new()));
    }

    let scope = Environment::new_child(Rc::clone(env));
    for (name, value) in lambda.captured {
        scope.define_local(name, value);
    }
    evaluate(&scope, Value::Sexpr(lambda.body))
}
