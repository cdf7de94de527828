// ABOUTME: Environment module for managing variable bindings and scopes

use crate::value::{Symbol, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write;
use std::rc::Rc;

/// A chain of per-scope binding maps. Lookup recurses into the parent;
/// `define_local` writes into this scope; `define_root` follows parent
/// links to the outermost scope. Parent links never form a cycle.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<Symbol, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new root environment with no parent
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent. The child holds a
    /// shared reference, so the parent outlives every lookup through it.
    pub fn new_child(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Looks up a symbol in this scope and parent scopes recursively
    pub fn lookup(&self, name: &Symbol) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(parent) = &self.parent {
            return parent.lookup(name);
        }

        None
    }

    /// Binds in THIS scope, overwriting any existing local binding
    pub fn define_local(&self, name: Symbol, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Walks parent links to the outermost scope and binds there.
    /// This is the semantics of `def`.
    pub fn define_root(&self, name: Symbol, value: Value) {
        match &self.parent {
            Some(parent) => parent.define_root(name, value),
            None => self.define_local(name, value),
        }
    }

    /// Renders the bindings of this scope sorted by symbol, one
    /// `symbol value` pair per line. Used by the REPL `env` command.
    pub fn render(&self) -> String {
        let bindings = self.bindings.borrow();
        let mut entries: Vec<_> = bindings.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::new();
        for (name, value) in entries {
            let _ = writeln!(out, "{} {}", name, value);
        }
        out
    }
}
