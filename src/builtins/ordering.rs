//! Ordering and equality operations: <, <=, >, >=, eq, neq
//!
//! The relational operators take exactly two arguments of the same numeric
//! variant and return a boolean. `eq` takes two or more arguments and is
//! true iff every pair is structurally equal; an integer and a double are
//! never equal. `neq` is its complement.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_TWO, ARITY_TWO};
use crate::value::{Builtin, Symbol, Value};
use std::rc::Rc;

fn evaluate_compare(
    function: &str,
    args: &[Value],
    integer_cmp: fn(i64, i64) -> bool,
    double_cmp: fn(f64, f64) -> bool,
) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(function, ARITY_TWO, args.len()));
    }

    match (&args[0], &args[1]) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Boolean(integer_cmp(*a, *b))),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Boolean(double_cmp(*a, *b))),
        (Value::Integer(_), other) => Err(EvalError::type_error(function, "an integer", other, 2)),
        (Value::Double(_), other) => Err(EvalError::type_error(function, "a double", other, 2)),
        (other, _) => Err(EvalError::type_error(function, "a number", other, 1)),
    }
}

pub fn builtin_lt(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    evaluate_compare("<", &args, |a, b| a < b, |a, b| a < b)
}

pub fn builtin_le(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    evaluate_compare("<=", &args, |a, b| a <= b, |a, b| a <= b)
}

pub fn builtin_gt(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    evaluate_compare(">", &args, |a, b| a > b, |a, b| a > b)
}

pub fn builtin_ge(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    evaluate_compare(">=", &args, |a, b| a >= b, |a, b| a >= b)
}

pub fn builtin_eq(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity_error("eq", ARITY_AT_LEAST_TWO, args.len()));
    }

    let all_equal = args.windows(2).all(|pair| pair[0] == pair[1]);
    Ok(Value::Boolean(all_equal))
}

pub fn builtin_neq(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    match builtin_eq(env, args)? {
        Value::Boolean(equal) => Ok(Value::Boolean(!equal)),
        other => Ok(other),
    }
}

/// Register all ordering builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define_local(
        Symbol::from("<"),
        Value::Builtin(Builtin {
            name: "<",
            func: builtin_lt,
        }),
    );
    env.define_local(
        Symbol::from("<="),
        Value::Builtin(Builtin {
            name: "<=",
            func: builtin_le,
        }),
    );
    env.define_local(
        Symbol::from(">"),
        Value::Builtin(Builtin {
            name: ">",
            func: builtin_gt,
        }),
    );
    env.define_local(
        Symbol::from(">="),
        Value::Builtin(Builtin {
            name: ">=",
            func: builtin_ge,
        }),
    );
    env.define_local(
        Symbol::from("eq"),
        Value::Builtin(Builtin {
            name: "eq",
            func: builtin_eq,
        }),
    );
    env.define_local(
        Symbol::from("neq"),
        Value::Builtin(Builtin {
            name: "neq",
            func: builtin_neq,
        }),
    );
}
