use argon_diag::Diagnostics;
use argon_parse::{lex, TokenKind};

#[test]
fn plain_digits_are_integers() {
    let diag = Diagnostics::new();
    let tokens = lex("42", "<mem>", &diag);
    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].lexeme, "42");
    assert!(!diag.has_errors());
}

#[test]
fn dot_or_exponent_makes_a_float() {
    let diag = Diagnostics::new();
    let tokens = lex("3.14 1e5 2E+3 6.02e-2", "<mem>", &diag);
    for tok in &tokens[..4] {
        assert_eq!(tok.kind, TokenKind::Float, "token {tok}");
    }
    assert!(!diag.has_errors());
}

#[test]
fn hex_prefix_is_an_integer() {
    let diag = Diagnostics::new();
    let tokens = lex("0x1f", "<mem>", &diag);
    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].lexeme, "0x1f");
    assert!(!diag.has_errors());
}

#[test]
fn malformed_run_reports_and_emits_error_token() {
    let diag = Diagnostics::new();
    let tokens = lex("1.2.3", "<mem>", &diag);
    // the consumed run is not dropped: it survives as an error token
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].lexeme, "1.2.3");
    assert!(diag.has_errors());
    assert_eq!(diag.error_count(), 1);
}

#[test]
fn run_greedily_takes_sign_and_exponent_characters() {
    // the permissive run swallows '-' after a digit; only whitespace
    // keeps adjacent arithmetic apart
    let diag = Diagnostics::new();
    let tokens = lex("1-2", "<mem>", &diag);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].lexeme, "1-2");
    assert!(diag.has_errors());
}

#[test]
fn offsets_are_absolute_character_positions() {
    let diag = Diagnostics::new();
    let tokens = lex("  42\n 7", "<mem>", &diag);
    assert_eq!(tokens[0].offset, 2);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].offset, 6);
    assert_eq!(tokens[1].line, 2);
}
