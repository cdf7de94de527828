//! Arithmetic operations: +, -, *, /
//!
//! Each operator takes at least one argument and folds left to right.
//! Arguments must all be the same numeric variant: the first argument
//! decides whether the operation runs over integers or doubles. A single
//! argument to `-` negates it; a single argument to any other operator is
//! returned unchanged.
//!
//! Integer division by zero is an error. Double division follows IEEE-754.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE};
use crate::value::{Builtin, Symbol, Value};
use std::rc::Rc;

/// Homogeneous numeric arguments, split by the variant of the first one.
enum NumericArgs {
    Integers(Vec<i64>),
    Doubles(Vec<f64>),
}

fn numeric_args(function: &str, args: &[Value]) -> Result<NumericArgs, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error(function, ARITY_AT_LEAST_ONE, 0));
    }

    match args[0] {
        Value::Integer(_) => {
            let mut values = Vec::with_capacity(args.len());
            for (i, arg) in args.iter().enumerate() {
                match arg {
                    Value::Integer(n) => values.push(*n),
                    other => return Err(EvalError::type_error(function, "an integer", other, i + 1)),
                }
            }
            Ok(NumericArgs::Integers(values))
        }
        Value::Double(_) => {
            let mut values = Vec::with_capacity(args.len());
            for (i, arg) in args.iter().enumerate() {
                match arg {
                    Value::Double(n) => values.push(*n),
                    other => return Err(EvalError::type_error(function, "a double", other, i + 1)),
                }
            }
            Ok(NumericArgs::Doubles(values))
        }
        ref other => Err(EvalError::type_error(function, "a number", other, 1)),
    }
}

pub fn builtin_add(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    match numeric_args("+", &args)? {
        NumericArgs::Integers(xs) => Ok(Value::Integer(xs.into_iter().sum())),
        NumericArgs::Doubles(xs) => Ok(Value::Double(xs.into_iter().sum())),
    }
}

pub fn builtin_sub(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    match numeric_args("-", &args)? {
        NumericArgs::Integers(xs) => {
            if xs.len() == 1 {
                return Ok(Value::Integer(-xs[0]));
            }
            Ok(Value::Integer(xs[1..].iter().fold(xs[0], |acc, x| acc - x)))
        }
        NumericArgs::Doubles(xs) => {
            if xs.len() == 1 {
                return Ok(Value::Double(-xs[0]));
            }
            Ok(Value::Double(xs[1..].iter().fold(xs[0], |acc, x| acc - x)))
        }
    }
}

pub fn builtin_mul(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    match numeric_args("*", &args)? {
        NumericArgs::Integers(xs) => Ok(Value::Integer(xs.into_iter().product())),
        NumericArgs::Doubles(xs) => Ok(Value::Double(xs.into_iter().product())),
    }
}

pub fn builtin_div(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    match numeric_args("/", &args)? {
        NumericArgs::Integers(xs) => {
            let mut result = xs[0];
            for &x in &xs[1..] {
                if x == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                result /= x;
            }
            Ok(Value::Integer(result))
        }
        NumericArgs::Doubles(xs) => {
            // IEEE-754: dividing by 0.0 yields an infinity or NaN.
            Ok(Value::Double(xs[1..].iter().fold(xs[0], |acc, x| acc / x)))
        }
    }
}

/// Register all arithmetic builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define_local(
        Symbol::from("+"),
        Value::Builtin(Builtin {
            name: "+",
            func: builtin_add,
        }),
    );
    env.define_local(
        Symbol::from("-"),
        Value::Builtin(Builtin {
            name: "-",
            func: builtin_sub,
        }),
    );
    env.define_local(
        Symbol::from("*"),
        Value::Builtin(Builtin {
            name: "*",
            func: builtin_mul,
        }),
    );
    env.define_local(
        Symbol::from("/"),
        Value::Builtin(Builtin {
            name: "/",
            func: builtin_div,
        }),
    );
}
