use argon_diag::Diagnostics;

use crate::token::{Token, TokenKind};

const DATA_TYPES: [&str; 12] = [
    "u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "f32", "f64", "char", "bool",
];

// Lexically accepted everywhere, but flagged for the build target.
const ARCH_DATA_TYPES: [&str; 4] = ["u128", "i128", "f80", "f128"];

const KEYWORDS: [&str; 20] = [
    "if", "elif", "else", "loop", "fn", "ret", "true", "false", "ref", "deref", "struct", "sync",
    "enum", "void", "volatile", "null", "import", "break", "continue", "match",
];

const SEPARATORS: [u8; 8] = [b';', b',', b'{', b'}', b'[', b']', b'(', b')'];
const OPERATORS: [u8; 12] = [
    b'>', b'<', b'=', b'!', b'^', b'|', b'&', b'+', b'-', b'*', b'/', b'%',
];

/// Tokenizes `src` in one pass. The returned sequence is fully
/// materialized and always ends in exactly one end-of-input token; every
/// error path records a diagnostic and keeps consuming, so the token count
/// is bounded by the input length.
pub fn lex(src: &str, file_id: &str, diag: &Diagnostics) -> Vec<Token> {
    diag.set_file(file_id);
    Lexer::new(src, diag).run()
}

pub struct Lexer<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
    diag: &'a Diagnostics,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str, diag: &'a Diagnostics) -> Self {
        Self {
            src: src.as_bytes(),
            text: src,
            pos: 0,
            line: 1,
            tokens: Vec::new(),
            diag,
        }
    }

    pub fn run(mut self) -> Vec<Token> {
        while self.pos < self.src.len() {
            let c = self.current();
            if c.is_ascii_alphabetic() || c == b'_' {
                self.ident_or_keyword();
            } else if c.is_ascii_digit() {
                self.number();
            } else if SEPARATORS.contains(&c) {
                self.push(TokenKind::Separator, self.pos, (c as char).to_string());
                self.advance();
            } else if OPERATORS.contains(&c) {
                self.operator();
            } else if c.is_ascii_whitespace() {
                if c == b'\n' {
                    self.line += 1;
                }
                self.advance();
            } else if c == b'"' {
                self.string_literal();
            } else if c == b'\'' {
                self.char_literal();
            } else {
                self.error_at("unexpected character found", self.pos);
                self.push(TokenKind::Error, self.pos, (c as char).to_string());
                self.advance();
            }
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, self.line, self.pos, ""));
        self.tokens
    }

    fn current(&self) -> u8 {
        self.src[self.pos]
    }

    fn peek(&self) -> u8 {
        if self.pos + 1 < self.src.len() {
            self.src[self.pos + 1]
        } else {
            0
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn push(&mut self, kind: TokenKind, offset: usize, lexeme: impl Into<String>) {
        self.tokens.push(Token::new(kind, self.line, offset, lexeme));
    }

    fn error_at(&self, message: &str, offset: usize) {
        self.diag.error_at(message, self.line, offset, self.text);
    }

    fn ident_or_keyword(&mut self) {
        let start = self.pos;
        while !self.at_end() && (self.current().is_ascii_alphanumeric() || self.current() == b'_') {
            self.advance();
        }
        let s = self.text[start..self.pos].to_string();

        if DATA_TYPES.contains(&s.as_str()) {
            self.push(TokenKind::Datatype, start, s);
        } else if KEYWORDS.contains(&s.as_str()) {
            self.push(TokenKind::Keyword, start, s);
        } else if ARCH_DATA_TYPES.contains(&s.as_str()) {
            let message = format!(
                "found '{}' which is not supported for {}",
                s,
                std::env::consts::ARCH
            );
            self.error_at(&message, start);
            // still usable by the parser and later checks
            self.push(TokenKind::Keyword, start, s);
        } else {
            self.push(TokenKind::Identifier, start, s);
        }
    }

    /// Numbers are captured as one permissive run; whether the run is a
    /// well-formed literal is decided by the parse attempt afterwards.
    fn number(&mut self) {
        let start = self.pos;
        while !self.at_end()
            && matches!(self.current(), b'0'..=b'9' | b'.' | b'x' | b'e' | b'E' | b'+' | b'-')
        {
            self.advance();
        }
        let s = self.text[start..self.pos].to_string();

        let ok = if s.contains(['.', 'e', 'E']) {
            s.parse::<f64>().is_ok()
        } else if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            i64::from_str_radix(hex, 16).is_ok()
        } else {
            s.parse::<i64>().is_ok()
        };

        if !ok {
            self.error_at("invalid number format", start);
            self.push(TokenKind::Error, start, s);
        } else if s.contains(['.', 'e', 'E']) {
            self.push(TokenKind::Float, start, s);
        } else {
            self.push(TokenKind::Int, start, s);
        }
    }

    fn operator(&mut self) {
        if self.current() == b'/' && (self.peek() == b'/' || self.peek() == b'*') {
            self.comment();
            return;
        }
        let start = self.pos;
        let c = self.current();
        let p = self.peek();
        let mut op = String::new();
        op.push(c as char);
        // greedy two-character forms: shifts, logical pairs, inc/dec, and
        // any operator followed by '='
        if (c == b'>' && p == b'>')
            || (c == b'<' && p == b'<')
            || p == b'='
            || (c == b'&' && p == b'&')
            || (c == b'|' && p == b'|')
            || (c == b'+' && p == b'+')
            || (c == b'-' && p == b'-')
        {
            op.push(p as char);
            self.advance();
        }
        self.push(TokenKind::Operator, start, op);
        self.advance();
    }

    fn comment(&mut self) {
        if self.peek() == b'*' {
            self.advance();
            self.advance();
            loop {
                if self.at_end() {
                    self.error_at("unterminated block comment", self.pos);
                    return;
                }
                if self.current() == b'*' && self.peek() == b'/' {
                    self.advance();
                    self.advance();
                    return;
                }
                if self.current() == b'\n' {
                    self.line += 1;
                }
                self.advance();
            }
        } else {
            while !self.at_end() && self.current() != b'\n' {
                self.advance();
            }
        }
    }

    fn string_literal(&mut self) {
        let start = self.pos;
        self.advance();
        let mut value = String::new();
        while !self.at_end() && self.current() != b'"' {
            if self.current() == b'\\' {
                self.advance();
                if let Some(c) = self.escape() {
                    value.push(c);
                }
            } else {
                if self.current() == b'\n' {
                    self.line += 1;
                }
                value.push(self.current() as char);
                self.advance();
            }
        }
        if self.at_end() {
            self.error_at("unterminated string literal", start);
        } else {
            self.advance();
        }
        self.push(TokenKind::Str, start, value);
    }

    fn char_literal(&mut self) {
        let start = self.pos;
        self.advance();
        if self.at_end() {
            self.error_at("unterminated character literal", start);
            self.push(TokenKind::Char, start, "");
            return;
        }
        let value = if self.current() == b'\\' {
            self.advance();
            self.escape()
        } else {
            let c = self.current() as char;
            self.advance();
            Some(c)
        };
        if !self.at_end() && self.current() == b'\'' {
            self.advance();
        } else {
            self.error_at("unterminated character literal", start);
        }
        let lexeme = value.map(String::from).unwrap_or_default();
        self.push(TokenKind::Char, start, lexeme);
    }

    /// Decodes the character after a backslash; the cursor sits on that
    /// character on entry and past the escape on exit. `\uXXXX` decodes
    /// four hex digits to a single narrow byte.
    fn escape(&mut self) -> Option<char> {
        if self.at_end() {
            return None;
        }
        let c = self.current();
        self.advance();
        if c == b'u' {
            let seq_start = self.pos;
            for _ in 0..4 {
                if !self.at_end() && self.current().is_ascii_hexdigit() {
                    self.advance();
                }
            }
            let digits = &self.text[seq_start..self.pos];
            match (digits.len() == 4)
                .then(|| u32::from_str_radix(digits, 16).ok())
                .flatten()
            {
                Some(v) => Some((v as u8) as char),
                None => {
                    self.error_at("invalid unicode escape", seq_start);
                    None
                }
            }
        } else {
            Some(match c {
                b'n' => '\n',
                b't' => '\t',
                b'r' => '\r',
                b'0' => '\0',
                other => other as char,
            })
        }
    }
}
