//! Statement lowering.

use crate::ast::{Assign, Binding, ForStmt, IfStmt, Init, Stmt};
use crate::ir::{Addr, InstId, InstKind, Term, Ty, Value};
use crate::CodegenError;

use super::Codegen;

impl Codegen {
    /// Every statement yields a value so blocks can return their last one.
    pub(super) fn lower_stmt(&mut self, stmt: &Stmt) -> Result<Value, CodegenError> {
        match stmt {
            Stmt::Expr(expr) => self.lower_expr(expr),
            Stmt::Assign(assign) => self.lower_assign(assign),
            Stmt::If(if_stmt) => self.lower_if_stmt(if_stmt),
            Stmt::For(for_stmt) => self.lower_for(for_stmt),
        }
    }

    /// Allocate the slot in the entry block so it dominates all uses, then
    /// store the initializer (zero when absent).
    pub(super) fn lower_binding(&mut self, binding: &Binding) -> Result<InstId, CodegenError> {
        let value = match &binding.init {
            Some(init) => self.lower_expr(init)?,
            None => Value::Num(0.0),
        };
        let slot = self.func_mut().entry_alloca(&binding.name);
        self.emit(InstKind::Store {
            addr: Addr::Slot(slot),
            value,
        });
        Ok(slot)
    }

    /// Store into the local slot, falling back to the module global.
    /// The assignment's value is the stored value.
    pub(super) fn lower_assign(&mut self, assign: &Assign) -> Result<Value, CodegenError> {
        let value = self.lower_expr(&assign.value)?;

        let addr = if let Some(&slot) = self.locals.get(&assign.name) {
            Addr::Slot(slot)
        } else if self.module.global(&assign.name).is_some() {
            Addr::Global(assign.name.clone())
        } else {
            return Err(CodegenError::UndefinedVariable(assign.name.clone()));
        };

        self.emit(InstKind::Store { addr, value });
        Ok(value)
    }

    /// Statement conditional. The branches produce no value; the φ at the
    /// merge returns a nominal zero from each path so statements lower
    /// uniformly to a value.
    fn lower_if_stmt(&mut self, if_stmt: &IfStmt) -> Result<Value, CodegenError> {
        let cond = self.lower_expr(&if_stmt.cond)?;

        let then_block = self.append_block("then");
        let else_block = self.append_block("else");
        let merge_block = self.append_block("merge");
        self.terminate(Term::CondBr {
            cond,
            then_dest: then_block,
            else_dest: else_block,
        });

        self.position_at(then_block);
        self.lower_stmt(&if_stmt.then_branch)?;
        let then_end = self.current_block();
        self.terminate(Term::Br(merge_block));

        self.position_at(else_block);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.lower_stmt(else_branch)?;
        }
        let else_end = self.current_block();
        self.terminate(Term::Br(merge_block));

        self.position_at(merge_block);
        let phi = self.emit(InstKind::Phi {
            ty: Ty::F64,
            incoming: vec![(Value::Num(0.0), then_end), (Value::Num(0.0), else_end)],
        });
        Ok(Value::Inst(phi))
    }

    /// `for (init; cond; step) body` over four fresh blocks:
    ///
    /// ```text
    /// current → init → cond ─┬→ loop → (body; step) ─→ cond
    ///                        └→ endloop
    /// ```
    ///
    /// A binding initializer is scoped to the loop: the shadowed slot is
    /// restored at the end.
    fn lower_for(&mut self, for_stmt: &ForStmt) -> Result<Value, CodegenError> {
        let init_block = self.append_block("init");
        self.terminate(Term::Br(init_block));
        let cond_block = self.append_block("cond");
        let loop_block = self.append_block("loop");
        let end_block = self.append_block("endloop");

        self.position_at(init_block);
        let saved = match &for_stmt.init {
            Init::Binding(binding) => {
                let slot = self.lower_binding(binding)?;
                Some((binding.name.clone(), self.install_binding(&binding.name, slot)))
            }
            Init::Assign(assign) => {
                self.lower_assign(assign)?;
                None
            }
        };

        let result = (|| {
            self.terminate(Term::Br(cond_block));

            self.position_at(cond_block);
            let cond = self.lower_expr(&for_stmt.cond)?;
            let cond_end = self.current_block();
            self.terminate(Term::CondBr {
                cond,
                then_dest: loop_block,
                else_dest: end_block,
            });

            self.position_at(loop_block);
            self.lower_stmt(&for_stmt.body)?;
            self.lower_assign(&for_stmt.step)?;
            self.terminate(Term::Br(cond_block));

            self.position_at(end_block);
            let phi = self.emit(InstKind::Phi {
                ty: Ty::F64,
                incoming: vec![(Value::Num(0.0), cond_end)],
            });
            Ok(Value::Inst(phi))
        })();

        if let Some((name, previous)) = saved {
            self.restore_binding(&name, previous);
        }
        result
    }

    pub(super) fn lower_global(&mut self, name: &str) {
        self.module.define_global(name);
    }
}
