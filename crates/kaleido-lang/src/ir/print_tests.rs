//! Tests for the IR printer.

use super::module::{Addr, FbinOp, Function, InstKind, Module, Term, Ty, Value};
use super::print::{print_function, print_module};

#[test]
fn declarations_render_as_one_line() {
    let mut module = Module::new();
    module.declare_function("sin", vec!["x".to_owned()]);

    insta::assert_snapshot!(print_module(&module), @"declare f64 @sin(f64 %x)");
}

#[test]
fn globals_precede_functions() {
    let mut module = Module::new();
    module.define_global("total");
    module.declare_function("get", Vec::new());

    insta::assert_snapshot!(print_module(&module), @r"
    @total = common global f64 0

    declare f64 @get()
    ");
}

#[test]
fn defined_functions_list_their_blocks() {
    let mut func = Function::new("inc", vec!["x".to_owned()]);
    let entry = func.append_block("entry");
    let slot = func.entry_alloca("x");
    func.push_inst(
        entry,
        InstKind::Store {
            addr: Addr::Slot(slot),
            value: Value::Param(0),
        },
    );
    let load = func.push_inst(
        entry,
        InstKind::Load {
            addr: Addr::Slot(slot),
        },
    );
    let sum = func.push_inst(
        entry,
        InstKind::Fbin {
            op: FbinOp::Add,
            lhs: Value::Inst(load),
            rhs: Value::Num(1.0),
        },
    );
    func.terminate(entry, Term::Ret(Value::Inst(sum)));

    insta::assert_snapshot!(print_function(&func), @r"
    define f64 @inc(f64 %x) {
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
fn phi_arms_show_their_source_blocks() {
    let mut func = Function::new("pick", Vec::new());
    let entry = func.append_block("entry");
    let then_block = func.append_block("then");
    let else_block = func.append_block("else");
    let merge = func.append_block("merge");

    let cond = func.push_inst(
        entry,
        InstKind::Fcmp {
            kind: super::module::FcmpKind::Ult,
            lhs: Value::Num(1.0),
            rhs: Value::Num(2.0),
        },
    );
    func.terminate(
        entry,
        Term::CondBr {
            cond: Value::Inst(cond),
            then_dest: then_block,
            else_dest: else_block,
        },
    );
    func.terminate(then_block, Term::Br(merge));
    func.terminate(else_block, Term::Br(merge));
    let phi = func.push_inst(
        merge,
        InstKind::Phi {
            ty: Ty::F64,
            incoming: vec![
                (Value::Num(1.0), then_block),
                (Value::Num(2.0), else_block),
            ],
        },
    );
    func.terminate(merge, Term::Ret(Value::Inst(phi)));

    insta::assert_snapshot!(print_function(&func), @r"
    define f64 @pick() {
    entry:
      %0 = fcmp ult 1.0, 2.0
      br %0, then, else
    then:
      br merge
    else:
      br merge
    merge:
      %1 = phi [1.0, then], [2.0, else]
      ret %1
    }
    ");
}

#[test]
fn shadowed_slots_get_distinct_names() {
    let mut func = Function::new("shadow", Vec::new());
    let entry = func.append_block("entry");
    let first = func.entry_alloca("x");
    let second = func.entry_alloca("x");
    func.push_inst(
        entry,
        InstKind::Store {
            addr: Addr::Slot(first),
            value: Value::Num(1.0),
        },
    );
    func.push_inst(
        entry,
        InstKind::Store {
            addr: Addr::Slot(second),
            value: Value::Num(2.0),
        },
    );
    func.terminate(entry, Term::Ret(Value::Num(0.0)));

    insta::assert_snapshot!(print_function(&func), @r"
    define f64 @shadow() {
    entry:
      %x.addr = alloca f64
      %x.addr1 = alloca f64
      store 1.0, %x.addr
      store 2.0, %x.addr1
      ret 0.0
    }
    ");
}

#[test]
fn block_labels_deduplicate_with_counters() {
    let mut func = Function::new("labels", Vec::new());
    func.append_block("entry");
    let first = func.append_block("then");
    let second = func.append_block("then");
    assert_eq!(func.block(first).label, "then");
    assert_eq!(func.block(second).label, "then1");
}

#[test]
fn loads_and_stores_reach_globals() {
    let mut module = Module::new();
    module.define_global("g");
    let func = module.declare_function("bump", Vec::new());
    let entry = func.append_block("entry");
    let load = func.push_inst(
        entry,
        InstKind::Load {
            addr: Addr::Global("g".to_owned()),
        },
    );
    let sum = func.push_inst(
        entry,
        InstKind::Fbin {
            op: FbinOp::Add,
            lhs: Value::Inst(load),
            rhs: Value::Num(1.0),
        },
    );
    func.push_inst(
        entry,
        InstKind::Store {
            addr: Addr::Global("g".to_owned()),
            value: Value::Inst(sum),
        },
    );
    func.terminate(entry, Term::Ret(Value::Inst(sum)));

    insta::assert_snapshot!(print_module(&module), @r"
    @g = common global f64 0

    define f64 @bump() {
    entry:
      %0 = load @g
      %1 = fadd %0, 1.0
      store %1, @g
      ret %1
    }
    ");
}
