//! Expression lowering.

use crate::ast::{BinOp, Block, Expr, UnOp};
use crate::ir::{Addr, FbinOp, FcmpKind, InstKind, LogicalOp, Term, Ty, Value};
use crate::CodegenError;

use super::Codegen;

impl Codegen {
    pub(super) fn lower_expr(&mut self, expr: &Expr) -> Result<Value, CodegenError> {
        match expr {
            Expr::Number(value) => Ok(Value::Num(*value)),
            Expr::VarRef(name) => self.lower_var_ref(name),
            Expr::Binary { op, lhs, rhs } => self.lower_binary(*op, lhs, rhs),
            Expr::Unary {
                op: UnOp::Not,
                operand,
            } => {
                let value = self.lower_expr(operand)?;
                Ok(Value::Inst(self.emit(InstKind::Not { value })))
            }
            Expr::Call { callee, args } => self.lower_call(callee, args),
            Expr::If {
                cond,
                then_expr,
                else_expr,
            } => self.lower_if_expr(cond, then_expr, else_expr),
            Expr::Block(block) => self.lower_block(block),
        }
    }

    /// Local slot first, then the module globals.
    fn lower_var_ref(&mut self, name: &str) -> Result<Value, CodegenError> {
        if let Some(&slot) = self.locals.get(name) {
            let load = self.emit(InstKind::Load {
                addr: Addr::Slot(slot),
            });
            return Ok(Value::Inst(load));
        }
        if self.module.global(name).is_some() {
            let load = self.emit(InstKind::Load {
                addr: Addr::Global(name.to_owned()),
            });
            return Ok(Value::Inst(load));
        }
        Err(CodegenError::UndefinedVariable(name.to_owned()))
    }

    fn lower_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) -> Result<Value, CodegenError> {
        let lhs = self.lower_expr(lhs)?;
        let rhs = self.lower_expr(rhs)?;

        let kind = match op {
            BinOp::Add => InstKind::Fbin {
                op: FbinOp::Add,
                lhs,
                rhs,
            },
            BinOp::Sub => InstKind::Fbin {
                op: FbinOp::Sub,
                lhs,
                rhs,
            },
            BinOp::Mul => InstKind::Fbin {
                op: FbinOp::Mul,
                lhs,
                rhs,
            },
            BinOp::Div => InstKind::Fbin {
                op: FbinOp::Div,
                lhs,
                rhs,
            },
            BinOp::Lt => InstKind::Fcmp {
                kind: FcmpKind::Ult,
                lhs,
                rhs,
            },
            BinOp::Gt => InstKind::Fcmp {
                kind: FcmpKind::Ugt,
                lhs,
                rhs,
            },
            BinOp::Eq => InstKind::Fcmp {
                kind: FcmpKind::Ueq,
                lhs,
                rhs,
            },
            BinOp::And => InstKind::Logical {
                op: LogicalOp::And,
                lhs,
                rhs,
            },
            BinOp::Or => InstKind::Logical {
                op: LogicalOp::Or,
                lhs,
                rhs,
            },
        };
        Ok(Value::Inst(self.emit(kind)))
    }

    fn lower_call(&mut self, callee: &str, args: &[Expr]) -> Result<Value, CodegenError> {
        let Some(function) = self.module.function(callee) else {
            return Err(CodegenError::UndefinedFunction(callee.to_owned()));
        };
        let expected = function.params().len();
        if expected != args.len() {
            return Err(CodegenError::ArityMismatch {
                name: callee.to_owned(),
                expected,
                found: args.len(),
            });
        }

        let mut lowered = Vec::with_capacity(args.len());
        for arg in args {
            lowered.push(self.lower_expr(arg)?);
        }
        let call = self.emit(InstKind::Call {
            callee: callee.to_owned(),
            args: lowered,
        });
        Ok(Value::Inst(call))
    }

    /// Value-producing conditional: both branches feed a float φ at the
    /// merge point.
    fn lower_if_expr(
        &mut self,
        cond: &Expr,
        then_expr: &Expr,
        else_expr: &Expr,
    ) -> Result<Value, CodegenError> {
        let cond = self.lower_expr(cond)?;

        let then_block = self.append_block("then");
        let else_block = self.append_block("else");
        let merge_block = self.append_block("merge");
        self.terminate(Term::CondBr {
            cond,
            then_dest: then_block,
            else_dest: else_block,
        });

        self.position_at(then_block);
        let then_value = self.lower_expr(then_expr)?;
        // The branch body may have moved the cursor; the φ edge must come
        // from the block that actually branches to the merge.
        let then_end = self.current_block();
        self.terminate(Term::Br(merge_block));

        self.position_at(else_block);
        let else_value = self.lower_expr(else_expr)?;
        let else_end = self.current_block();
        self.terminate(Term::Br(merge_block));

        self.position_at(merge_block);
        let phi = self.emit(InstKind::Phi {
            ty: Ty::F64,
            incoming: vec![(then_value, then_end), (else_value, else_end)],
        });
        Ok(Value::Inst(phi))
    }

    /// Block: lower declarations in order (each shadows its name for the
    /// rest of the block), then the statements; the block's value is the
    /// last statement's. Shadowed bindings are restored in reverse on every
    /// exit path.
    pub(super) fn lower_block(&mut self, block: &Block) -> Result<Value, CodegenError> {
        let mut saved: Vec<(String, Option<crate::ir::InstId>)> = Vec::new();

        let result = (|| {
            for binding in &block.decls {
                let slot = self.lower_binding(binding)?;
                saved.push((binding.name.clone(), self.install_binding(&binding.name, slot)));
            }

            let mut last = Value::Num(0.0);
            for stmt in &block.stmts {
                last = self.lower_stmt(stmt)?;
            }
            Ok(last)
        })();

        for (name, previous) in saved.into_iter().rev() {
            self.restore_binding(&name, previous);
        }
        result
    }
}
