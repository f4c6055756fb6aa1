//! Textual rendering of IR modules.
//!
//! Globals first, then functions in emission order. Declarations render as
//! one `declare` line; definitions list their blocks. Unnamed values are
//! numbered per function in emission order; stack slots print as
//! `%<var>.addr`.

use std::collections::HashMap;

use super::module::{
    Addr, FbinOp, FcmpKind, Function, InstId, InstKind, LogicalOp, Module, Term, Value,
};

pub fn print_module(module: &Module) -> String {
    let mut sections: Vec<String> = Vec::new();

    let globals: Vec<String> = module
        .globals()
        .map(|g| format!("@{} = common global f64 0\n", g.name))
        .collect();
    if !globals.is_empty() {
        sections.push(globals.join(""));
    }

    for function in module.functions() {
        sections.push(print_function(function));
    }

    sections.join("\n")
}

pub fn print_function(func: &Function) -> String {
    let params: Vec<String> = func.params().iter().map(|p| format!("f64 %{p}")).collect();
    let signature = format!("f64 @{}({})", func.name(), params.join(", "));

    if func.is_declaration() {
        return format!("declare {signature}\n");
    }

    let names = name_values(func);
    let mut out = format!("define {signature} {{\n");

    for block in func.blocks() {
        out.push_str(&format!("{}:\n", block.label));
        for &inst in &block.insts {
            out.push_str(&format!("  {}\n", render_inst(func, &names, inst)));
        }
        if let Some(term) = &block.term {
            out.push_str(&format!("  {}\n", render_term(func, &names, term)));
        }
    }

    out.push_str("}\n");
    out
}

/// Printed name of every value-producing instruction.
///
/// Allocas take `<var>.addr` (counter-suffixed when shadowing repeats a
/// name); everything else is numbered in emission order.
fn name_values(func: &Function) -> HashMap<InstId, String> {
    let mut names = HashMap::new();
    let mut taken: Vec<String> = Vec::new();
    let mut counter = 0usize;

    for block in func.blocks() {
        for &id in &block.insts {
            match &func.inst(id).kind {
                InstKind::Alloca { name } => {
                    let mut label = format!("{name}.addr");
                    let mut suffix = 1usize;
                    while taken.contains(&label) {
                        label = format!("{name}.addr{suffix}");
                        suffix += 1;
                    }
                    taken.push(label.clone());
                    names.insert(id, label);
                }
                InstKind::Store { .. } => {}
                _ => {
                    names.insert(id, counter.to_string());
                    counter += 1;
                }
            }
        }
    }
    names
}

fn render_value(func: &Function, names: &HashMap<InstId, String>, value: &Value) -> String {
    match value {
        Value::Num(n) => format!("{n:?}"),
        Value::Param(index) => format!("%{}", func.params()[*index as usize]),
        Value::Inst(id) => format!("%{}", names[id]),
    }
}

fn render_addr(names: &HashMap<InstId, String>, addr: &Addr) -> String {
    match addr {
        Addr::Slot(id) => format!("%{}", names[id]),
        Addr::Global(name) => format!("@{name}"),
    }
}

fn render_inst(func: &Function, names: &HashMap<InstId, String>, id: InstId) -> String {
    let value = |v: &Value| render_value(func, names, v);

    match &func.inst(id).kind {
        InstKind::Alloca { .. } => format!("%{} = alloca f64", names[&id]),
        InstKind::Load { addr } => format!("%{} = load {}", names[&id], render_addr(names, addr)),
        InstKind::Store { addr, value: v } => {
            format!("store {}, {}", value(v), render_addr(names, addr))
        }
        InstKind::Fbin { op, lhs, rhs } => {
            let mnemonic = match op {
                FbinOp::Add => "fadd",
                FbinOp::Sub => "fsub",
                FbinOp::Mul => "fmul",
                FbinOp::Div => "fdiv",
            };
            format!("%{} = {mnemonic} {}, {}", names[&id], value(lhs), value(rhs))
        }
        InstKind::Fcmp { kind, lhs, rhs } => {
            let mnemonic = match kind {
                FcmpKind::Ult => "ult",
                FcmpKind::Ugt => "ugt",
                FcmpKind::Ueq => "ueq",
            };
            format!("%{} = fcmp {mnemonic} {}, {}", names[&id], value(lhs), value(rhs))
        }
        InstKind::Not { value: v } => format!("%{} = not {}", names[&id], value(v)),
        InstKind::Logical { op, lhs, rhs } => {
            let mnemonic = match op {
                LogicalOp::And => "and",
                LogicalOp::Or => "or",
            };
            format!("%{} = {mnemonic} {}, {}", names[&id], value(lhs), value(rhs))
        }
        InstKind::Call { callee, args } => {
            let args: Vec<String> = args.iter().map(|a| value(a)).collect();
            format!("%{} = call @{callee}({})", names[&id], args.join(", "))
        }
        InstKind::Phi { incoming, .. } => {
            let arms: Vec<String> = incoming
                .iter()
                .map(|(v, block)| format!("[{}, {}]", value(v), func.block(*block).label))
                .collect();
            format!("%{} = phi {}", names[&id], arms.join(", "))
        }
    }
}

fn render_term(func: &Function, names: &HashMap<InstId, String>, term: &Term) -> String {
    match term {
        Term::Ret(value) => format!("ret {}", render_value(func, names, value)),
        Term::Br(dest) => format!("br {}", func.block(*dest).label),
        Term::CondBr {
            cond,
            then_dest,
            else_dest,
        } => format!(
            "br {}, {}, {}",
            render_value(func, names, cond),
            func.block(*then_dest).label,
            func.block(*else_dest).label
        ),
    }
}
