use argon_diag::Diagnostics;
use argon_parse::{lex, TokenKind};

#[test]
fn separators_then_unexpected_colon() {
    let diag = Diagnostics::new();
    let tokens = lex("({[;]}),:", "lexer_separators.ag", &diag);

    assert_eq!(tokens.len(), 10);
    for tok in &tokens[..8] {
        assert_eq!(tok.kind, TokenKind::Separator, "token {tok}");
    }
    // ':' is in neither the separator nor the operator set
    assert_eq!(tokens[8].kind, TokenKind::Error);
    assert_eq!(tokens[8].lexeme, ":");
    assert_eq!(tokens[9].kind, TokenKind::Eof);
    assert!(diag.has_errors());
}

#[test]
fn every_separator_is_a_single_character_token() {
    let diag = Diagnostics::new();
    let tokens = lex("; , { } [ ] ( )", "<mem>", &diag);
    let lexemes: Vec<&str> = tokens
        .iter()
        .take_while(|t| t.kind != TokenKind::Eof)
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(lexemes, [";", ",", "{", "}", "[", "]", "(", ")"]);
    assert!(!diag.has_errors());
}

#[test]
fn eof_token_is_always_last_and_unique() {
    let diag = Diagnostics::new();
    for src in ["", "fn", "?!?", "((((", "\"open"] {
        let tokens = lex(src, "<mem>", &diag);
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "input {src:?}");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof, "input {src:?}");
    }
}
