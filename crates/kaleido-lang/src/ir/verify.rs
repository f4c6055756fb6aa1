//! Structural verification of lowered functions.
//!
//! Checks the invariants the lowering must maintain:
//!
//! - every block carries exactly one terminator;
//! - φ-nodes lead their block, and their incoming blocks are exactly the
//!   block's CFG predecessors;
//! - `alloca` appears only in the entry block;
//! - operands type-check, and slot addresses point at allocas.
//!
//! All violations are collected; the caller erases the offending function
//! from the module.

use std::collections::BTreeSet;

use super::module::{Addr, BlockId, Function, InstKind, Term, Ty, Value};

/// Verify one defined function. The error lists every violation found.
pub fn verify_function(func: &Function) -> Result<(), String> {
    let mut check = Checker {
        func,
        issues: Vec::new(),
    };
    check.run();

    if check.issues.is_empty() {
        Ok(())
    } else {
        Err(check.issues.join("; "))
    }
}

struct Checker<'f> {
    func: &'f Function,
    issues: Vec<String>,
}

impl Checker<'_> {
    fn run(&mut self) {
        if self.func.blocks().is_empty() {
            self.issues.push("function has no blocks".to_owned());
            return;
        }

        let preds = self.predecessors();

        for (id, block) in self.func.blocks().iter().enumerate() {
            let id = id as BlockId;
            let mut seen_non_phi = false;

            for &inst in &block.insts {
                match &self.func.inst(inst).kind {
                    InstKind::Alloca { name } => {
                        seen_non_phi = true;
                        if id != 0 {
                            self.issue(format!(
                                "alloca of '{name}' outside the entry block (in {})",
                                block.label
                            ));
                        }
                    }
                    InstKind::Load { addr } => {
                        seen_non_phi = true;
                        self.check_addr(addr);
                    }
                    InstKind::Store { addr, value } => {
                        seen_non_phi = true;
                        self.check_addr(addr);
                        self.check_operand(value, Ty::F64, "store");
                    }
                    InstKind::Fbin { lhs, rhs, .. } => {
                        seen_non_phi = true;
                        self.check_operand(lhs, Ty::F64, "float arithmetic");
                        self.check_operand(rhs, Ty::F64, "float arithmetic");
                    }
                    InstKind::Fcmp { lhs, rhs, .. } => {
                        seen_non_phi = true;
                        self.check_operand(lhs, Ty::F64, "float compare");
                        self.check_operand(rhs, Ty::F64, "float compare");
                    }
                    InstKind::Not { value } => {
                        seen_non_phi = true;
                        self.check_operand(value, Ty::Bool, "not");
                    }
                    InstKind::Logical { lhs, rhs, .. } => {
                        seen_non_phi = true;
                        self.check_operand(lhs, Ty::Bool, "logical operator");
                        self.check_operand(rhs, Ty::Bool, "logical operator");
                    }
                    InstKind::Call { args, .. } => {
                        seen_non_phi = true;
                        for arg in args {
                            self.check_operand(arg, Ty::F64, "call argument");
                        }
                    }
                    InstKind::Phi { ty, incoming } => {
                        if seen_non_phi {
                            self.issue(format!("phi after non-phi in {}", block.label));
                        }
                        if incoming.is_empty() {
                            self.issue(format!("phi with no incoming edges in {}", block.label));
                        }
                        for (value, _) in incoming {
                            self.check_operand(value, *ty, "phi incoming");
                        }

                        let incoming_blocks: BTreeSet<BlockId> =
                            incoming.iter().map(|(_, b)| *b).collect();
                        if incoming_blocks != preds[id as usize]
                            || incoming.len() != incoming_blocks.len()
                        {
                            self.issue(format!(
                                "phi in {} does not mirror its predecessors",
                                block.label
                            ));
                        }
                    }
                }
            }

            match &block.term {
                None => self.issue(format!("block {} is not terminated", block.label)),
                Some(Term::Ret(value)) => self.check_operand(value, Ty::F64, "return"),
                Some(Term::Br(_)) => {}
                Some(Term::CondBr { cond, .. }) => {
                    self.check_operand(cond, Ty::Bool, "conditional branch");
                }
            }
        }
    }

    fn predecessors(&self) -> Vec<BTreeSet<BlockId>> {
        let mut preds = vec![BTreeSet::new(); self.func.blocks().len()];
        for (id, block) in self.func.blocks().iter().enumerate() {
            match &block.term {
                Some(Term::Br(dest)) => {
                    preds[*dest as usize].insert(id as BlockId);
                }
                Some(Term::CondBr {
                    then_dest,
                    else_dest,
                    ..
                }) => {
                    preds[*then_dest as usize].insert(id as BlockId);
                    preds[*else_dest as usize].insert(id as BlockId);
                }
                Some(Term::Ret(_)) | None => {}
            }
        }
        preds
    }

    fn check_operand(&mut self, value: &Value, expected: Ty, context: &str) {
        match self.func.value_ty(value) {
            Some(ty) if ty == expected => {}
            Some(_) => self.issue(format!("{context} operand has the wrong type")),
            None => self.issue(format!("{context} uses a value-less instruction")),
        }
    }

    fn check_addr(&mut self, addr: &Addr) {
        if let Addr::Slot(id) = addr {
            let is_alloca = matches!(self.func.inst(*id).kind, InstKind::Alloca { .. });
            if !is_alloca {
                self.issue("slot address does not point at an alloca".to_owned());
            }
        }
    }

    fn issue(&mut self, message: String) {
        self.issues.push(message);
    }
}
