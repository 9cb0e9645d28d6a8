use std::collections::HashMap;

use argon_diag::Diagnostics;

use crate::symbol::{Symbol, SymbolType};

/// A stack of lexical scopes, innermost last. A name may shadow an outer
/// binding but never collide within its own scope. Lookup failures in
/// `get`/`get_type` are diagnosed once and answered with a poison value;
/// callers must not re-report errors derived from it.
pub struct SymbolTable<'a> {
    scopes: Vec<HashMap<String, Symbol>>,
    diag: &'a Diagnostics,
}

impl<'a> SymbolTable<'a> {
    pub fn new(diag: &'a Diagnostics) -> Self {
        Self {
            scopes: Vec::new(),
            diag,
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn exit_scope(&mut self) {
        if self.scopes.pop().is_none() {
            self.diag.error("no scope to exit from");
        }
    }

    /// Number of currently open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn insert(&mut self, name: &str, symbol: Symbol) {
        match self.scopes.last_mut() {
            Some(scope) => {
                if scope.contains_key(name) {
                    self.diag
                        .error(&format!("redeclaration of identifier: {name}"));
                } else {
                    scope.insert(name.to_string(), symbol);
                }
            }
            None => self.diag.error("no scope to insert into"),
        }
    }

    /// Innermost-to-outermost search; absence is the caller's problem.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn check(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn get(&self, name: &str) -> Symbol {
        match self.lookup(name) {
            Some(symbol) => symbol.clone(),
            None => {
                self.diag.error(&format!("symbol not found: {name}"));
                Symbol::poison()
            }
        }
    }

    pub fn get_type(&self, name: &str) -> SymbolType {
        match self.lookup(name) {
            Some(symbol) => symbol.ty,
            None => {
                self.diag.error(&format!("symbol not found: {name}"));
                SymbolType::Err
            }
        }
    }
}
