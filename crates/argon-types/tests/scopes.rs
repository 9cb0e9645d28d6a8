use argon_diag::Diagnostics;
use argon_types::{Symbol, SymbolTable, SymbolType};

#[test]
fn redeclaration_in_same_scope_keeps_the_original() {
    let diag = Diagnostics::new();
    let mut table = SymbolTable::new(&diag);
    table.enter_scope();
    table.insert("x", Symbol::new("x", SymbolType::I32, 0));
    table.insert("x", Symbol::new("x", SymbolType::U8, 0));

    assert_eq!(diag.error_count(), 1);
    assert_eq!(table.lookup("x").unwrap().ty, SymbolType::I32);
}

#[test]
fn shadowing_in_a_nested_scope_is_not_an_error() {
    let diag = Diagnostics::new();
    let mut table = SymbolTable::new(&diag);
    table.enter_scope();
    table.insert("x", Symbol::new("x", SymbolType::I32, 0));
    table.enter_scope();
    table.insert("x", Symbol::new("x", SymbolType::F64, 1));

    assert!(!diag.has_errors());
    // innermost binding wins while the scope is open
    assert_eq!(table.lookup("x").unwrap().ty, SymbolType::F64);

    table.exit_scope();
    assert_eq!(table.lookup("x").unwrap().ty, SymbolType::I32);
}

#[test]
fn exit_with_no_open_scope_reports_once_and_changes_nothing() {
    let diag = Diagnostics::new();
    let mut table = SymbolTable::new(&diag);
    table.exit_scope();
    assert_eq!(diag.error_count(), 1);
    assert_eq!(table.depth(), 0);
}

#[test]
fn insert_with_no_open_scope_reports() {
    let diag = Diagnostics::new();
    let mut table = SymbolTable::new(&diag);
    table.insert("x", Symbol::new("x", SymbolType::I32, 0));
    assert_eq!(diag.error_count(), 1);
    assert!(table.lookup("x").is_none());
}

#[test]
fn lookup_miss_is_silent_but_get_poisons() {
    let diag = Diagnostics::new();
    let mut table = SymbolTable::new(&diag);
    table.enter_scope();

    assert!(table.lookup("ghost").is_none());
    assert!(!table.check("ghost"));
    assert!(!diag.has_errors());

    let sym = table.get("ghost");
    assert_eq!(sym.ty, SymbolType::Err);
    assert_eq!(diag.error_count(), 1);

    assert_eq!(table.get_type("ghost"), SymbolType::Err);
    assert_eq!(diag.error_count(), 2);
}

#[test]
fn storage_space_follows_the_kind() {
    let diag = Diagnostics::new();
    let mut table = SymbolTable::new(&diag);
    table.enter_scope();
    table.insert("w", Symbol::new("w", SymbolType::F80, 0));
    assert_eq!(table.get("w").storage_space, 10);
}

#[test]
fn depth_tracks_enter_and_exit() {
    let diag = Diagnostics::new();
    let mut table = SymbolTable::new(&diag);
    assert_eq!(table.depth(), 0);
    table.enter_scope();
    table.enter_scope();
    assert_eq!(table.depth(), 2);
    table.exit_scope();
    assert_eq!(table.depth(), 1);
    assert!(!diag.has_errors());
}
