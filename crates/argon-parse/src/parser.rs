use argon_ast::ast::{
    Block, CaseClause, Decl, ElifClause, EnumDecl, Expr, FunctionDecl, IfStmt, Literal,
    LiteralKind, LoopStmt, MatchStmt, Param, Program, Stmt, StructDecl, TypeName, VarDecl,
};
use argon_diag::Diagnostics;

use crate::lexer::lex;
use crate::token::{Token, TokenKind};

/// Lexes and parses in one call; the usual entry point for callers that
/// do not need the token stream itself.
pub fn parse_source(file_id: &str, src: &str, diag: &Diagnostics) -> Program {
    let tokens = lex(src, file_id, diag);
    Parser::new(&tokens, src, diag).parse()
}

/// Recursive-descent parser over a pre-materialized token slice.
///
/// `match_token` is the sole consumption primitive and advances the
/// cursor even on a mismatch, so every path through the parser makes
/// strict forward progress: `parse` always returns a `Program`, trading
/// grammar conformance for maximal diagnostic yield.
pub struct Parser<'a> {
    tokens: &'a [Token],
    src: &'a str,
    index: usize,
    eof: Token,
    diag: &'a Diagnostics,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], src: &'a str, diag: &'a Diagnostics) -> Self {
        Self {
            tokens,
            src,
            index: 0,
            eof: Token::new(TokenKind::Eof, 0, 0, ""),
            diag,
        }
    }

    // ======= cursor primitives =======

    fn current(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn next(&self) -> &Token {
        self.tokens.get(self.index + 1).unwrap_or(&self.eof)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn at_eof(&self) -> bool {
        self.index >= self.tokens.len() || self.current().kind == TokenKind::Eof
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn at_lexeme(&self, kind: TokenKind, lexeme: &str) -> bool {
        let tok = self.current();
        tok.kind == kind && tok.lexeme == lexeme
    }

    fn error_at_current(&self, message: &str) {
        let tok = self.current();
        self.diag.error_at(message, tok.line, tok.offset, self.src);
    }

    /// Consumes and returns the current token. A kind (or lexeme)
    /// mismatch is diagnosed but the cursor advances anyway.
    fn match_token(&mut self, kind: TokenKind, lexeme: Option<&str>) -> Token {
        let tok = self.current().clone();
        let matches = tok.kind == kind && lexeme.map_or(true, |l| tok.lexeme == l);
        if !matches {
            let expected = match lexeme {
                Some(l) => format!("expected {kind} '{l}', found '{}'", tok.lexeme),
                None => format!("expected {kind}, found '{}'", tok.lexeme),
            };
            self.error_at_current(&expected);
        }
        self.advance();
        tok
    }

    // ======= declarations =======

    /// Loops over top-level declarations until end of input. A token that
    /// cannot start a declaration is reported and skipped, one token at a
    /// time.
    pub fn parse(&mut self) -> Program {
        let mut declarations = Vec::new();
        while !self.at_eof() {
            if let Some(decl) = self.parse_declaration() {
                declarations.push(decl);
            } else {
                self.error_at_current("unable to parse declaration");
                self.advance();
            }
        }
        Program { declarations }
    }

    fn parse_declaration(&mut self) -> Option<Decl> {
        if !self.at(TokenKind::Keyword) {
            return None;
        }
        let keyword = self.current().lexeme.clone();
        match keyword.as_str() {
            "fn" => Some(Decl::Function(self.parse_function_declaration())),
            "enum" => Some(Decl::Enum(self.parse_enum_declaration())),
            "struct" => Some(Decl::Struct(self.parse_struct_declaration())),
            _ => None,
        }
    }

    fn parse_function_declaration(&mut self) -> FunctionDecl {
        self.match_token(TokenKind::Keyword, Some("fn"));
        let name = self.match_token(TokenKind::Identifier, None).lexeme;
        self.match_token(TokenKind::Separator, Some("("));
        let params = self.parse_parameters();
        self.match_token(TokenKind::Separator, Some(")"));
        // the return-type marker arrives as two operator tokens: '-' '>'
        let return_type = if self.at_lexeme(TokenKind::Operator, "-")
            && self.next().kind == TokenKind::Operator
            && self.next().lexeme == ">"
        {
            self.advance();
            self.advance();
            Some(self.parse_type())
        } else {
            None
        };
        let body = self.parse_block();
        FunctionDecl {
            name,
            params,
            return_type,
            body,
        }
    }

    fn parse_parameters(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        if !self.at_lexeme(TokenKind::Separator, ")") && !self.at_eof() {
            params.push(self.parse_parameter());
            while self.at_lexeme(TokenKind::Separator, ",") {
                self.advance();
                params.push(self.parse_parameter());
            }
        }
        params
    }

    fn parse_parameter(&mut self) -> Param {
        let ty = self.parse_type();
        let name = self.match_token(TokenKind::Identifier, None).lexeme;
        Param { ty, name }
    }

    fn parse_enum_declaration(&mut self) -> EnumDecl {
        self.match_token(TokenKind::Keyword, Some("enum"));
        let name = self.match_token(TokenKind::Identifier, None).lexeme;
        self.match_token(TokenKind::Separator, Some("{"));
        let mut fields = Vec::new();
        while self.at(TokenKind::Identifier) {
            fields.push(self.match_token(TokenKind::Identifier, None).lexeme);
            if self.at_lexeme(TokenKind::Separator, ",") {
                self.advance();
            }
        }
        self.match_token(TokenKind::Separator, Some("}"));
        EnumDecl { name, fields }
    }

    fn parse_struct_declaration(&mut self) -> StructDecl {
        self.match_token(TokenKind::Keyword, Some("struct"));
        let name = self.match_token(TokenKind::Identifier, None).lexeme;
        self.match_token(TokenKind::Separator, Some("{"));
        let mut fields = Vec::new();
        while self.at(TokenKind::Datatype) || self.at(TokenKind::Identifier) {
            fields.push(self.parse_parameter());
            if self.at_lexeme(TokenKind::Separator, ",") {
                self.advance();
            }
        }
        self.match_token(TokenKind::Separator, Some("}"));
        StructDecl { name, fields }
    }

    /// Always yields a `TypeName`; an unreadable type is diagnosed, the
    /// offending token consumed, and an empty name returned as poison.
    fn parse_type(&mut self) -> TypeName {
        match self.current().kind {
            TokenKind::Datatype | TokenKind::Identifier => {
                let name = self.current().lexeme.clone();
                self.advance();
                TypeName { name }
            }
            TokenKind::Keyword if matches!(self.current().lexeme.as_str(), "struct" | "enum") => {
                let name = self.current().lexeme.clone();
                self.advance();
                TypeName { name }
            }
            _ => {
                self.error_at_current("unable to parse type");
                self.advance();
                TypeName {
                    name: String::new(),
                }
            }
        }
    }

    // ======= statements =======

    fn parse_block(&mut self) -> Block {
        self.match_token(TokenKind::Separator, Some("{"));
        let mut statements = Vec::new();
        while !self.at_lexeme(TokenKind::Separator, "}") && !self.at_eof() {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            } else {
                self.error_at_current("unable to parse statement");
                self.advance();
            }
        }
        self.match_token(TokenKind::Separator, Some("}"));
        Block { statements }
    }

    /// Keyword-driven dispatch. A bare `{` opens a nested block; datatypes
    /// and declaration-shaped identifier pairs become variable
    /// declarations; expression-shaped leading tokens become expression
    /// statements. Anything else is left for the caller to skip.
    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current().kind {
            TokenKind::Keyword => {
                let keyword = self.current().lexeme.clone();
                match keyword.as_str() {
                    "if" => Some(Stmt::If(self.parse_if_statement())),
                    "loop" => Some(Stmt::Loop(self.parse_loop_statement())),
                    "match" => Some(Stmt::Match(self.parse_match_statement())),
                    "break" => {
                        self.advance();
                        self.match_token(TokenKind::Separator, Some(";"));
                        Some(Stmt::Break)
                    }
                    "continue" => {
                        self.advance();
                        self.match_token(TokenKind::Separator, Some(";"));
                        Some(Stmt::Continue)
                    }
                    _ => Some(Stmt::VarDecl(self.parse_var_declaration())),
                }
            }
            TokenKind::Separator if self.current().lexeme == "{" => {
                Some(Stmt::Block(self.parse_block()))
            }
            TokenKind::Separator if self.current().lexeme == "(" => {
                Some(Stmt::Expression(self.parse_expression_statement()))
            }
            TokenKind::Datatype => Some(Stmt::VarDecl(self.parse_var_declaration())),
            TokenKind::Identifier => {
                if self.next().kind == TokenKind::Identifier {
                    Some(Stmt::VarDecl(self.parse_var_declaration()))
                } else {
                    Some(Stmt::Expression(self.parse_expression_statement()))
                }
            }
            TokenKind::Operator => Some(Stmt::Expression(self.parse_expression_statement())),
            kind if kind.is_literal() => Some(Stmt::Expression(self.parse_expression_statement())),
            _ => None,
        }
    }

    fn parse_if_statement(&mut self) -> IfStmt {
        self.match_token(TokenKind::Keyword, Some("if"));
        self.match_token(TokenKind::Separator, Some("("));
        let condition = self.parse_expression();
        self.match_token(TokenKind::Separator, Some(")"));
        let then_block = self.parse_block();

        let mut elif_clauses = Vec::new();
        while self.at_lexeme(TokenKind::Keyword, "elif") {
            self.advance();
            self.match_token(TokenKind::Separator, Some("("));
            let condition = self.parse_expression();
            self.match_token(TokenKind::Separator, Some(")"));
            let block = self.parse_block();
            elif_clauses.push(ElifClause { condition, block });
        }

        let else_block = if self.at_lexeme(TokenKind::Keyword, "else") {
            self.advance();
            Some(self.parse_block())
        } else {
            None
        };

        IfStmt {
            condition,
            then_block,
            elif_clauses,
            else_block,
        }
    }

    fn parse_loop_statement(&mut self) -> LoopStmt {
        self.match_token(TokenKind::Keyword, Some("loop"));
        LoopStmt {
            body: self.parse_block(),
        }
    }

    fn parse_var_declaration(&mut self) -> VarDecl {
        let ty = self.parse_type();
        let name = self.match_token(TokenKind::Identifier, None).lexeme;
        let initializer = if self.at_lexeme(TokenKind::Operator, "=") {
            self.advance();
            Some(self.parse_expression())
        } else {
            None
        };
        self.match_token(TokenKind::Separator, Some(";"));
        VarDecl {
            ty,
            name,
            initializer,
        }
    }

    fn parse_expression_statement(&mut self) -> Expr {
        let expr = self.parse_expression();
        self.match_token(TokenKind::Separator, Some(";"));
        expr
    }

    fn parse_match_statement(&mut self) -> MatchStmt {
        self.match_token(TokenKind::Keyword, Some("match"));
        self.match_token(TokenKind::Separator, Some("{"));
        let mut cases = Vec::new();
        while self.current().kind.is_literal() {
            cases.push(self.parse_case_clause());
        }
        let default_block = if self.at_lexeme(TokenKind::Identifier, "_") {
            self.advance();
            self.match_token(TokenKind::Separator, Some(":"));
            Some(self.parse_block())
        } else {
            None
        };
        self.match_token(TokenKind::Separator, Some("}"));
        MatchStmt {
            cases,
            default_block,
        }
    }

    fn parse_case_clause(&mut self) -> CaseClause {
        let literal = self.parse_literal();
        self.match_token(TokenKind::Separator, Some(":"));
        let block = self.parse_block();
        CaseClause { literal, block }
    }

    // ======= expressions =======
    //
    // Precedence (low -> high): term (+ -), factor (* / %), unary
    // (+ - ! ~), primary. Operator lexemes are carried verbatim.

    fn parse_expression(&mut self) -> Expr {
        self.parse_term()
    }

    fn parse_term(&mut self) -> Expr {
        let mut node = self.parse_factor();
        while self.at(TokenKind::Operator)
            && matches!(self.current().lexeme.as_str(), "+" | "-")
        {
            let op = self.current().lexeme.clone();
            self.advance();
            let right = self.parse_factor();
            node = Expr::Binary {
                left: Box::new(node),
                op,
                right: Box::new(right),
            };
        }
        node
    }

    fn parse_factor(&mut self) -> Expr {
        let mut node = self.parse_unary();
        while self.at(TokenKind::Operator)
            && matches!(self.current().lexeme.as_str(), "*" | "/" | "%")
        {
            let op = self.current().lexeme.clone();
            self.advance();
            let right = self.parse_unary();
            node = Expr::Binary {
                left: Box::new(node),
                op,
                right: Box::new(right),
            };
        }
        node
    }

    fn parse_unary(&mut self) -> Expr {
        if self.at(TokenKind::Operator)
            && matches!(self.current().lexeme.as_str(), "+" | "-" | "!" | "~")
        {
            let op = self.current().lexeme.clone();
            self.advance();
            let operand = self.parse_unary();
            return Expr::Unary {
                op,
                operand: Box::new(operand),
            };
        }
        self.parse_primary()
    }

    /// A primary that cannot be read is diagnosed and consumed; the
    /// poison result is an identifier with an empty name.
    fn parse_primary(&mut self) -> Expr {
        match self.current().kind {
            kind if kind.is_literal() => Expr::Literal(self.parse_literal()),
            TokenKind::Identifier => {
                let name = self.match_token(TokenKind::Identifier, None).lexeme;
                Expr::Identifier { name }
            }
            TokenKind::Separator if self.current().lexeme == "(" => {
                self.advance();
                let inner = self.parse_expression();
                self.match_token(TokenKind::Separator, Some(")"));
                inner
            }
            _ => {
                self.error_at_current("unable to parse expression");
                self.advance();
                Expr::Identifier {
                    name: String::new(),
                }
            }
        }
    }

    fn parse_literal(&mut self) -> Literal {
        let (kind, expected) = match self.current().kind {
            TokenKind::Int => (LiteralKind::Int, TokenKind::Int),
            TokenKind::Float => (LiteralKind::Float, TokenKind::Float),
            TokenKind::Char => (LiteralKind::Char, TokenKind::Char),
            TokenKind::Str => (LiteralKind::Str, TokenKind::Str),
            _ => {
                self.error_at_current("unable to parse literal");
                self.advance();
                return Literal {
                    value: String::new(),
                    kind: LiteralKind::Int,
                };
            }
        };
        let value = self.match_token(expected, None).lexeme;
        Literal { value, kind }
    }
}
