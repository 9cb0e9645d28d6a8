use argon_ast::ast::{Block, Decl, Expr, Program, Stmt, TypeName};
use argon_diag::Diagnostics;

use crate::symbol::{Symbol, SymbolType};
use crate::table::SymbolTable;

/// Walks a program and exercises the symbol table over it: one global
/// scope, one scope per function (parameters and body share it), one per
/// nested block. Declarations are inserted, identifier uses resolved;
/// everything suspicious lands in the shared diagnostics sink.
pub struct Binder<'a> {
    table: SymbolTable<'a>,
    diag: &'a Diagnostics,
}

impl<'a> Binder<'a> {
    pub fn new(diag: &'a Diagnostics) -> Self {
        Self {
            table: SymbolTable::new(diag),
            diag,
        }
    }

    pub fn bind(&mut self, program: &Program) {
        self.table.enter_scope();
        for decl in &program.declarations {
            self.bind_declaration(decl);
        }
        self.table.exit_scope();
    }

    fn declare(&mut self, name: &str, ty: SymbolType) {
        let level = self.table.depth().saturating_sub(1);
        self.table.insert(name, Symbol::new(name, ty, level));
    }

    fn bind_declaration(&mut self, decl: &Decl) {
        match decl {
            Decl::Function(func) => {
                self.declare(&func.name, SymbolType::Function);
                if let Some(ref ret) = func.return_type {
                    let _ = self.type_of(ret);
                }
                self.table.enter_scope();
                for param in &func.params {
                    let ty = self.type_of(&param.ty);
                    self.declare(&param.name, ty);
                }
                for stmt in &func.body.statements {
                    self.bind_statement(stmt);
                }
                self.table.exit_scope();
            }
            Decl::Enum(decl) => self.declare(&decl.name, SymbolType::Enum),
            Decl::Struct(decl) => {
                self.declare(&decl.name, SymbolType::Struct);
                for field in &decl.fields {
                    let _ = self.type_of(&field.ty);
                }
            }
        }
    }

    /// Resolves a type annotation to a symbol kind. An empty name is the
    /// parser's poison and was diagnosed there; it passes through as
    /// `Err` without a second report.
    fn type_of(&mut self, ty: &TypeName) -> SymbolType {
        if ty.name.is_empty() {
            return SymbolType::Err;
        }
        if let Some(kind) = SymbolType::from_type_name(&ty.name) {
            return kind;
        }
        match self.table.get_type(&ty.name) {
            kind @ (SymbolType::Struct | SymbolType::Enum | SymbolType::Err) => kind,
            _ => {
                self.diag
                    .error(&format!("'{}' does not name a type", ty.name));
                SymbolType::Err
            }
        }
    }

    fn bind_block(&mut self, block: &Block) {
        self.table.enter_scope();
        for stmt in &block.statements {
            self.bind_statement(stmt);
        }
        self.table.exit_scope();
    }

    fn bind_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.bind_block(block),
            Stmt::If(stmt) => {
                self.resolve_expr(&stmt.condition);
                self.bind_block(&stmt.then_block);
                for clause in &stmt.elif_clauses {
                    self.resolve_expr(&clause.condition);
                    self.bind_block(&clause.block);
                }
                if let Some(ref block) = stmt.else_block {
                    self.bind_block(block);
                }
            }
            Stmt::Loop(stmt) => self.bind_block(&stmt.body),
            Stmt::VarDecl(decl) => {
                // the initializer is resolved in the scope as it stands
                // before the name itself becomes visible
                if let Some(ref init) = decl.initializer {
                    self.resolve_expr(init);
                }
                let ty = self.type_of(&decl.ty);
                self.declare(&decl.name, ty);
            }
            Stmt::Expression(expr) => self.resolve_expr(expr),
            Stmt::Match(stmt) => {
                for case in &stmt.cases {
                    self.bind_block(&case.block);
                }
                if let Some(ref block) = stmt.default_block {
                    self.bind_block(block);
                }
            }
            Stmt::Break | Stmt::Continue => {}
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Unary { operand, .. } => self.resolve_expr(operand),
            Expr::Identifier { name } => {
                // empty name: parser poison, already diagnosed
                if !name.is_empty() {
                    let _ = self.table.get(name);
                }
            }
            Expr::Literal(_) => {}
        }
    }
}
