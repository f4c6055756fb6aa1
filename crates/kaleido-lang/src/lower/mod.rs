//! AST → IR lowering.
//!
//! A single [`Codegen`] context owns the module under construction, the
//! insertion point, and the local slot map, and is threaded through every
//! lowering call. Errors abort on first failure; a function that fails
//! mid-body or fails verification is erased from the module, so nothing
//! half-emitted survives.

mod expr;
mod func;
mod stmt;

#[cfg(test)]
mod lower_tests;

use indexmap::IndexMap;

use crate::ast::Program;
use crate::ir::{BlockId, InstId, InstKind, Module, Term};
use crate::CodegenError;

/// Lower a whole program to an IR module.
///
/// Top-level items are visited in order: prototypes declare, definitions
/// define, globals register module variables.
pub fn lower(program: &Program) -> Result<Module, CodegenError> {
    let mut cg = Codegen::new();
    for item in &program.items {
        cg.lower_item(item)?;
    }
    Ok(cg.into_module())
}

/// Insertion point: the function being emitted and its current block.
struct Cursor {
    func: String,
    block: BlockId,
}

/// Lowering context: module, insertion point, local slots.
pub struct Codegen {
    module: Module,
    cursor: Option<Cursor>,
    /// name → entry-block alloca of the function being lowered.
    locals: IndexMap<String, InstId>,
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            module: Module::new(),
            cursor: None,
            locals: IndexMap::new(),
        }
    }

    pub fn into_module(self) -> Module {
        self.module
    }

    // ── insertion point ─────────────────────────────────────────────────

    fn cursor(&self) -> &Cursor {
        self.cursor.as_ref().expect("no insertion point")
    }

    fn func_mut(&mut self) -> &mut crate::ir::Function {
        let name = self.cursor().func.clone();
        self.module
            .function_mut(&name)
            .expect("cursor names a module function")
    }

    /// Move the insertion point to `block`.
    fn position_at(&mut self, block: BlockId) {
        self.cursor.as_mut().expect("no insertion point").block = block;
    }

    /// The block currently receiving instructions. Lowering a sub-expression
    /// may move the cursor, so control-flow lowering re-reads this after
    /// each branch body to learn which block actually terminates it.
    fn current_block(&self) -> BlockId {
        self.cursor().block
    }

    fn append_block(&mut self, name: &str) -> BlockId {
        self.func_mut().append_block(name)
    }

    /// Emit an instruction at the insertion point.
    fn emit(&mut self, kind: InstKind) -> InstId {
        let block = self.current_block();
        self.func_mut().push_inst(block, kind)
    }

    /// Terminate the block at the insertion point.
    fn terminate(&mut self, term: Term) {
        let block = self.current_block();
        self.func_mut().terminate(block, term);
    }

    // ── scoped bindings ─────────────────────────────────────────────────

    /// Install `slot` under `name`, returning whatever it shadowed.
    fn install_binding(&mut self, name: &str, slot: InstId) -> Option<InstId> {
        self.locals.insert(name.to_owned(), slot)
    }

    /// Undo [`Codegen::install_binding`]: restore the shadowed slot, or
    /// remove the name if it was fresh. Callers restore in reverse
    /// installation order, giving the stack discipline block scoping needs.
    fn restore_binding(&mut self, name: &str, previous: Option<InstId>) {
        match previous {
            Some(slot) => {
                self.locals.insert(name.to_owned(), slot);
            }
            None => {
                self.locals.shift_remove(name);
            }
        }
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}
