use argon_ast::ast::{Decl, Stmt};
use argon_diag::Diagnostics;
use argon_parse::parse_source;

#[test]
fn function_with_params_and_return_type() {
    let diag = Diagnostics::new();
    let program = parse_source("<mem>", "fn f(i32 x) -> i32 { ret x; }", &diag);

    assert_eq!(program.declarations.len(), 1);
    let Decl::Function(f) = &program.declarations[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(f.name, "f");
    assert_eq!(f.params.len(), 1);
    assert_eq!(f.params[0].ty.name, "i32");
    assert_eq!(f.params[0].name, "x");
    assert_eq!(f.return_type.as_ref().unwrap().name, "i32");
    assert_eq!(f.body.statements.len(), 1);
    // 'ret' is a keyword with no statement form: the declaration attempt
    // poisons its type but the statement survives
    let Stmt::VarDecl(v) = &f.body.statements[0] else {
        panic!("expected the body statement to be a declaration attempt");
    };
    assert_eq!(v.name, "x");
    assert!(v.ty.name.is_empty());
    assert!(diag.has_errors());
}

#[test]
fn function_without_return_type_is_clean() {
    let diag = Diagnostics::new();
    let program = parse_source("<mem>", "fn main() { }", &diag);
    let Decl::Function(f) = &program.declarations[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(f.name, "main");
    assert!(f.params.is_empty());
    assert!(f.return_type.is_none());
    assert!(f.body.statements.is_empty());
    assert!(!diag.has_errors());
    assert!(diag.entries().is_empty());
}

#[test]
fn multiple_parameters_are_comma_separated() {
    let diag = Diagnostics::new();
    let program = parse_source("<mem>", "fn add(i32 a, i32 b, f64 c) { }", &diag);
    let Decl::Function(f) = &program.declarations[0] else {
        panic!("expected a function declaration");
    };
    let names: Vec<&str> = f.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(f.params[2].ty.name, "f64");
    assert!(!diag.has_errors());
}

#[test]
fn enum_declaration_collects_field_names() {
    let diag = Diagnostics::new();
    let program = parse_source("<mem>", "enum Color { Red, Green, Blue }", &diag);
    let Decl::Enum(e) = &program.declarations[0] else {
        panic!("expected an enum declaration");
    };
    assert_eq!(e.name, "Color");
    assert_eq!(e.fields, ["Red", "Green", "Blue"]);
    assert!(!diag.has_errors());
}

#[test]
fn struct_declaration_collects_typed_fields() {
    let diag = Diagnostics::new();
    let program = parse_source("<mem>", "struct Point { i32 x, i32 y }", &diag);
    let Decl::Struct(s) = &program.declarations[0] else {
        panic!("expected a struct declaration");
    };
    assert_eq!(s.name, "Point");
    assert_eq!(s.fields.len(), 2);
    assert_eq!(s.fields[0].ty.name, "i32");
    assert_eq!(s.fields[0].name, "x");
    assert_eq!(s.fields[1].name, "y");
    assert!(!diag.has_errors());
}

#[test]
fn garbage_between_declarations_is_skipped() {
    let diag = Diagnostics::new();
    let program = parse_source("<mem>", "fn a() { } 42 fn b() { }", &diag);
    assert_eq!(program.declarations.len(), 2);
    assert!(diag.has_errors());
}

#[test]
fn user_type_as_parameter_type() {
    let diag = Diagnostics::new();
    let program = parse_source("<mem>", "fn draw(Point p) { }", &diag);
    let Decl::Function(f) = &program.declarations[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(f.params[0].ty.name, "Point");
    assert!(!diag.has_errors());
}
