//! Tests for AST → IR lowering.

use indoc::indoc;

use super::{lower, Codegen};
use crate::ir::print_module;
use crate::parser::parse;
use crate::CodegenError;

fn lower_source(source: &str) -> String {
    let program = parse(source).unwrap();
    let module = lower(&program).unwrap();
    print_module(&module)
}

fn lower_err(source: &str) -> CodegenError {
    let program = parse(source).unwrap();
    lower(&program).unwrap_err()
}

#[test]
fn parameters_spill_into_entry_slots() {
    insta::assert_snapshot!(lower_source("def f(x) x + 1;"), @r"
    define f64 @f(f64 %x) {
    entry:
      %x.addr = alloca f64
      store %x, %x.addr
      %0 = load %x.addr
      %1 = fadd %0, 1.0
      ret %1
    }
    ");
}

#[test]
fn top_level_call_lowers_into_an_anonymous_function() {
    let source = indoc! {"
        def f(x) x + 1;
        f(2);
    "};
    insta::assert_snapshot!(lower_source(source), @r"
    define f64 @f(f64 %x) {
    entry:
      %x.addr = alloca f64
      store %x, %x.addr
      %0 = load %x.addr
      %1 = fadd %0, 1.0
      ret %1
    }

    define f64 @__anon_expr() {
    entry:
      %0 = call @f(2.0)
      ret %0
    }
    ");
}

#[test]
fn extern_prototypes_declare_without_bodies() {
    let source = indoc! {"
        extern sin(x);
        def f(x) sin(x);
    "};
    insta::assert_snapshot!(lower_source(source), @r"
    declare f64 @sin(f64 %x)

    define f64 @f(f64 %x) {
    entry:
      %x.addr = alloca f64
      store %x, %x.addr
      %0 = load %x.addr
      %1 = call @sin(%0)
      ret %1
    }
    ");
}

#[test]
fn if_expression_merges_through_a_phi() {
    insta::assert_snapshot!(lower_source("def g(x) if (x < 10) x else 10;"), @r"
    define f64 @g(f64 %x) {
    entry:
      %x.addr = alloca f64
      store %x, %x.addr
      %0 = load %x.addr
      %1 = fcmp ult %0, 10.0
      br %1, then, else
    then:
      %2 = load %x.addr
      br merge
    else:
      br merge
    merge:
      %3 = phi [%2, then], [10.0, else]
      ret %3
    }
    ");
}

#[test]
fn if_statement_phi_carries_nominal_zeros() {
    insta::assert_snapshot!(
        lower_source("def m(x) { var r = 0; if (x < 0) r = 0 - x else r = x; r };"),
        @r"
    define f64 @m(f64 %x) {
    entry:
      %x.addr = alloca f64
      %r.addr = alloca f64
      store %x, %x.addr
      store 0.0, %r.addr
      %0 = load %x.addr
      %1 = fcmp ult %0, 0.0
      br %1, then, else
    then:
      %2 = load %x.addr
      %3 = fsub 0.0, %2
      store %3, %r.addr
      br merge
    else:
      %4 = load %x.addr
      store %4, %r.addr
      br merge
    merge:
      %5 = phi [0.0, then], [0.0, else]
      %6 = load %r.addr
      ret %6
    }
    ");
}

#[test]
fn for_loop_stitches_init_cond_loop_endloop() {
    insta::assert_snapshot!(
        lower_source("def sum(n) { var s = 0; for (var i = 0; i < n; i = i + 1) s = s + i; s };"),
        @r"
    define f64 @sum(f64 %n) {
    entry:
      %n.addr = alloca f64
      %s.addr = alloca f64
      %i.addr = alloca f64
      store %n, %n.addr
      store 0.0, %s.addr
      br init
    init:
      store 0.0, %i.addr
      br cond
    cond:
      %0 = load %i.addr
      %1 = load %n.addr
      %2 = fcmp ult %0, %1
      br %2, loop, endloop
    loop:
      %3 = load %s.addr
      %4 = load %i.addr
      %5 = fadd %3, %4
      store %5, %s.addr
      %6 = load %i.addr
      %7 = fadd %6, 1.0
      store %7, %i.addr
      br cond
    endloop:
      %8 = phi [0.0, cond]
      %9 = load %s.addr
      ret %9
    }
    ");
}

#[test]
fn block_scoping_shadows_and_restores() {
    insta::assert_snapshot!(lower_source("def s(x) { var x = 2; x } + x;"), @r"
    define f64 @s(f64 %x) {
    entry:
      %x.addr = alloca f64
      %x.addr1 = alloca f64
      store %x, %x.addr
      store 2.0, %x.addr1
      %0 = load %x.addr1
      %1 = load %x.addr
      %2 = fadd %0, %1
      ret %2
    }
    ");
}

#[test]
fn globals_resolve_when_locals_miss() {
    let source = indoc! {"
        global g;
        def bump(x) { var t = 0; t = g; g = x; t };
    "};
    insta::assert_snapshot!(lower_source(source), @r"
    @g = common global f64 0

    define f64 @bump(f64 %x) {
    entry:
      %x.addr = alloca f64
      %t.addr = alloca f64
      store %x, %x.addr
      store 0.0, %t.addr
      %0 = load @g
      store %0, %t.addr
      %1 = load %x.addr
      store %1, @g
      %2 = load %t.addr
      ret %2
    }
    ");
}

#[test]
fn logic_operators_lower_to_bool_instructions() {
    insta::assert_snapshot!(lower_source("def l(x, y) x < 1 and not y > 2;"), @r"
    define f64 @l(f64 %x, f64 %y) {
    entry:
      %x.addr = alloca f64
      %y.addr = alloca f64
      store %x, %x.addr
      store %y, %y.addr
      %0 = load %x.addr
      %1 = fcmp ult %0, 1.0
      %2 = load %y.addr
      %3 = fcmp ugt %2, 2.0
      %4 = not %3
      %5 = and %1, %4
      ret %5
    }
    ");
}

#[test]
fn undefined_variable_aborts_and_erases_the_function() {
    let program = parse("def f(x) y + 1;").unwrap();
    let mut cg = Codegen::new();
    let error = cg.lower_item(&program.items[0]).unwrap_err();

    assert_eq!(error, CodegenError::UndefinedVariable("y".to_owned()));
    assert!(cg.module.function("f").is_none());
}

#[test]
fn undefined_function_is_reported() {
    assert_eq!(
        lower_err("missing(1);"),
        CodegenError::UndefinedFunction("missing".to_owned())
    );
}

#[test]
fn arity_mismatch_is_reported() {
    assert_eq!(
        lower_err("def f(x) x;\nf(1, 2);"),
        CodegenError::ArityMismatch {
            name: "f".to_owned(),
            expected: 1,
            found: 2,
        }
    );
}

#[test]
fn duplicate_definition_is_rejected() {
    assert_eq!(
        lower_err("def f(x) x;\ndef f(y) y;"),
        CodegenError::DuplicateDefinition("f".to_owned())
    );
}

#[test]
fn extern_then_definition_is_allowed() {
    let printed = lower_source("extern f(x);\ndef f(x) x;");
    assert!(printed.contains("define f64 @f"));
    assert!(!printed.contains("declare f64 @f"));
}

#[test]
fn non_float_body_fails_verification_and_is_erased() {
    let program = parse("def bad(x) x < 1;").unwrap();
    let mut cg = Codegen::new();
    let error = cg.lower_item(&program.items[0]).unwrap_err();

    assert!(matches!(
        error,
        CodegenError::VerificationFailed { ref name, .. } if name == "bad"
    ));
    assert!(cg.module.function("bad").is_none());
}

#[test]
fn locals_are_empty_between_functions() {
    let program = parse("def a(x) x;\ndef b(y) y;").unwrap();
    let mut cg = Codegen::new();
    for item in &program.items {
        cg.lower_item(item).unwrap();
    }
    assert!(cg.locals.is_empty());
}

#[test]
fn binding_without_initializer_defaults_to_zero() {
    let printed = lower_source("def z() { var u; u };");
    assert!(printed.contains("store 0.0, %u.addr"));
}
