//! Shared diagnostics sink for the Argon front end.
//!
//! One `Diagnostics` value is created per invocation and threaded by
//! reference through the lexer, parser, symbol table, and binder. Errors
//! are sticky: once any component reports one, `has_errors` stays true
//! until `reset` is called, so a multi-file run can keep collecting
//! diagnostics and still fail as a whole.

#![forbid(unsafe_code)]
#![deny(unused_must_use)]

use std::cell::{Cell, RefCell};

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warn,
    Info,
}

impl Severity {
    fn prefix(self) -> String {
        match self {
            Severity::Error => "error:".red().bold().to_string(),
            Severity::Warn => "warn:".yellow().bold().to_string(),
            Severity::Info => "info:".cyan().bold().to_string(),
        }
    }
}

/// One recorded diagnostic. `excerpt` holds the rendered two-line source
/// snippet when the report carried a position.
#[derive(Debug, Clone)]
pub struct Entry {
    pub severity: Severity,
    pub message: String,
    pub excerpt: Option<String>,
}

#[derive(Default)]
pub struct Diagnostics {
    erroneous: Cell<bool>,
    entries: RefCell<Vec<Entry>>,
    pending_file: RefCell<Option<String>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the sticky error flag. Recorded entries are kept; the flag
    /// alone decides whether a run is considered failed.
    pub fn reset(&self) {
        self.erroneous.set(false);
    }

    pub fn has_errors(&self) -> bool {
        self.erroneous.get()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .count()
    }

    /// Names the file subsequent diagnostics belong to. The name is
    /// printed once, ahead of the first diagnostic that follows, so quiet
    /// files stay quiet.
    pub fn set_file(&self, name: &str) {
        *self.pending_file.borrow_mut() = Some(name.to_string());
    }

    pub fn error(&self, message: &str) {
        self.emit(Severity::Error, message, None);
    }

    pub fn error_at(&self, message: &str, line: usize, offset: usize, src: &str) {
        self.emit(Severity::Error, message, render_excerpt(src, line, offset));
    }

    pub fn warn(&self, message: &str) {
        self.emit(Severity::Warn, message, None);
    }

    pub fn warn_at(&self, message: &str, line: usize, offset: usize, src: &str) {
        self.emit(Severity::Warn, message, render_excerpt(src, line, offset));
    }

    pub fn info(&self, message: &str) {
        self.emit(Severity::Info, message, None);
    }

    pub fn info_at(&self, message: &str, line: usize, offset: usize, src: &str) {
        self.emit(Severity::Info, message, render_excerpt(src, line, offset));
    }

    fn emit(&self, severity: Severity, message: &str, excerpt: Option<String>) {
        if severity == Severity::Error {
            self.erroneous.set(true);
        }
        if let Some(name) = self.pending_file.borrow_mut().take() {
            eprintln!("{} {}", Severity::Info.prefix(), name);
        }
        eprintln!("{} {}", severity.prefix(), message);
        if let Some(ref e) = excerpt {
            eprintln!("{e}");
        }
        self.entries.borrow_mut().push(Entry {
            severity,
            message: message.to_string(),
            excerpt,
        });
    }
}

/// Renders the numbered source line plus a caret aligned under `offset`
/// (an absolute character offset from file start). Returns `None` when the
/// position does not land inside `src`.
fn render_excerpt(src: &str, line: usize, offset: usize) -> Option<String> {
    if line == 0 {
        return None;
    }
    let mut current_line = 1usize;
    let mut start_of_line = 0usize;
    let chars: Vec<char> = src.chars().collect();
    let mut idx = 0usize;
    while idx < chars.len() && current_line < line {
        if chars[idx] == '\n' {
            current_line += 1;
            start_of_line = idx + 1;
        }
        idx += 1;
    }
    if current_line != line || start_of_line > chars.len() {
        return None;
    }
    let end_of_line = chars[start_of_line..]
        .iter()
        .position(|&c| c == '\n')
        .map(|p| start_of_line + p)
        .unwrap_or(chars.len());

    let text: String = chars[start_of_line..end_of_line].iter().collect();
    let width = end_of_line - start_of_line;
    let col = offset.saturating_sub(start_of_line).min(width);

    let gutter = line.to_string();
    let caret = format!("{}^", " ".repeat(col));
    Some(format!(
        "{gutter} | {text}\n{pad} | {caret}",
        pad = " ".repeat(gutter.len())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_flag_is_sticky_until_reset() {
        let diag = Diagnostics::new();
        assert!(!diag.has_errors());
        diag.warn("just a warning");
        diag.info("just a note");
        assert!(!diag.has_errors());
        diag.error("boom");
        assert!(diag.has_errors());
        diag.info("still broken after info");
        assert!(diag.has_errors());
        diag.reset();
        assert!(!diag.has_errors());
    }

    #[test]
    fn entries_record_severity_and_message() {
        let diag = Diagnostics::new();
        diag.error("first");
        diag.warn("second");
        let entries = diag.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, Severity::Error);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].severity, Severity::Warn);
        assert_eq!(diag.error_count(), 1);
    }

    #[test]
    fn excerpt_points_caret_at_offset() {
        let src = "abc\ndefg\n";
        // offset 5 is the 'e' on line 2
        let excerpt = render_excerpt(src, 2, 5).unwrap();
        assert_eq!(excerpt, "2 | defg\n  |  ^");
    }

    #[test]
    fn excerpt_clamps_offset_past_line_end() {
        let src = "ab\ncd";
        let excerpt = render_excerpt(src, 1, 40).unwrap();
        assert_eq!(excerpt, "1 | ab\n  |   ^");
    }

    #[test]
    fn excerpt_out_of_range_line_is_none() {
        assert!(render_excerpt("one line", 3, 0).is_none());
        assert!(render_excerpt("one line", 0, 0).is_none());
    }

    #[test]
    fn positioned_error_records_excerpt() {
        let diag = Diagnostics::new();
        diag.error_at("bad token", 1, 0, "x y z");
        let entries = diag.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].excerpt.as_deref(), Some("1 | x y z\n  | ^"));
    }
}
