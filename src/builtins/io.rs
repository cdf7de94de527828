//! Boundary operations: load, print, show, error
//!
//! - `load`: read a source file, evaluate every top-level form, print any
//!   error results, and reduce to `()`. A failing form does not stop the
//!   rest of the file.
//! - `print`: write the display forms of the arguments separated by
//!   spaces, then a newline; reduces to `()`.
//! - `show`: write each argument as an indented expression tree; reduces
//!   to `()`.
//! - `error`: construct a user error value that absorbs further reduction.
//!
//! This module also hosts the standard-library preload used on startup.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE};
use crate::eval::evaluate;
use crate::parser::parse_forms;
use crate::traversal::render_tree;
use crate::value::{Builtin, Symbol, Value};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// Reads, parses, and evaluates a source file in `env`. Error results are
/// printed per form; the return value is always unit unless the file
/// cannot be read or parsed at all.
pub fn load_path(env: &Rc<Environment>, path: &str) -> Result<Value, EvalError> {
    let text = std::fs::read_to_string(path).map_err(|_| {
        EvalError::runtime_error("load", format!("could not read file '{}'", path))
    })?;

    let forms = parse_forms(&text)
        .map_err(|e| EvalError::runtime_error("load", format!("{}: {}", path, e)))?;

    for form in forms {
        match evaluate(env, form) {
            Ok(value) if value.is_error() => println!("{}", value),
            Ok(_) => {}
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(Value::unit())
}

/// Recursively collects every `.slisp` file under `dir`, sorted for a
/// deterministic load order.
fn collect_library_files(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_library_files(&path, found);
        } else if path.extension().is_some_and(|ext| ext == "slisp") {
            found.push(path);
        }
    }
}

/// Evaluates every `.slisp` file under `dir` in `env`. A failing file
/// prints its error and loading continues with the next one.
pub fn load_standard_library(env: &Rc<Environment>, dir: &Path) {
    let mut files = Vec::new();
    collect_library_files(dir, &mut files);

    for file in files {
        debug!("loading standard library file {}", file.display());
        if let Err(e) = load_path(env, &file.to_string_lossy()) {
            println!("Error: {}", e);
        }
    }
}

pub fn builtin_load(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("load", ARITY_ONE, args.len()));
    }

    match args.remove(0) {
        Value::Str(path) => load_path(env, &path),
        other => Err(EvalError::type_error("load", "a string", &other, 1)),
    }
}

pub fn builtin_print(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let line = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    Ok(Value::unit())
}

pub fn builtin_show(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    for arg in &args {
        print!("{}", render_tree(arg));
    }
    Ok(Value::unit())
}

pub fn builtin_error(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("error", ARITY_ONE, args.len()));
    }

    match args.remove(0) {
        Value::Str(message) => Ok(Value::Error(message)),
        other => Err(EvalError::type_error("error", "a string", &other, 1)),
    }
}

/// Register all boundary builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define_local(
        Symbol::from("load"),
        Value::Builtin(Builtin {
            name: "load",
            func: builtin_load,
        }),
    );
    env.define_local(
        Symbol::from("print"),
        Value::Builtin(Builtin {
            name: "print",
            func: builtin_print,
        }),
    );
    env.define_local(
        Symbol::from("show"),
        Value::Builtin(Builtin {
            name: "show",
            func: builtin_show,
        }),
    );
    env.define_local(
        Symbol::from("error"),
        Value::Builtin(Builtin {
            name: "error",
            func: builtin_error,
        }),
    );
}
