//! Function and prototype lowering, and the top-level driver.

use crate::ast::{FunctionDef, Item, Prototype};
use crate::ir::{verify_function, Addr, InstKind, Term, Value};
use crate::CodegenError;

use super::{Codegen, Cursor};

impl Codegen {
    pub(super) fn lower_item(&mut self, item: &Item) -> Result<(), CodegenError> {
        match item {
            Item::Extern(proto) => self.lower_prototype(proto),
            Item::Function(def) => self.lower_function(def),
            Item::Global(name) => {
                self.lower_global(name);
                Ok(())
            }
        }
    }

    /// Declare a function over float parameters returning float. Emit only;
    /// an existing declaration or definition is left untouched.
    pub(super) fn lower_prototype(&mut self, proto: &Prototype) -> Result<(), CodegenError> {
        self.module
            .declare_function(&proto.name, proto.params.clone());
        Ok(())
    }

    /// Define a function: prototype, entry block, one slot per parameter,
    /// body, return. The structural verifier runs last; on failure the
    /// function is erased so the module stays consistent.
    pub(super) fn lower_function(&mut self, def: &FunctionDef) -> Result<(), CodegenError> {
        let name = &def.proto.name;
        if let Some(existing) = self.module.function(name) {
            if !existing.is_declaration() {
                return Err(CodegenError::DuplicateDefinition(name.clone()));
            }
        }

        let function = self.module.declare_function(name, def.proto.params.clone());
        function.set_params(def.proto.params.clone());
        let entry = function.append_block("entry");

        self.cursor = Some(Cursor {
            func: name.clone(),
            block: entry,
        });
        self.locals.clear();

        // One slot per parameter: spill the incoming value so the body can
        // treat parameters like any other mutable variable.
        for (index, param) in def.proto.params.iter().enumerate() {
            let slot = self.func_mut().entry_alloca(param);
            self.emit(InstKind::Store {
                addr: Addr::Slot(slot),
                value: Value::Param(index as u32),
            });
            self.install_binding(param, slot);
        }

        let ret = match self.lower_expr(&def.body) {
            Ok(value) => value,
            Err(error) => {
                self.erase_current_function();
                return Err(error);
            }
        };
        self.terminate(Term::Ret(ret));

        let verdict = verify_function(self.func_mut());
        if let Err(reason) = verdict {
            self.erase_current_function();
            return Err(CodegenError::VerificationFailed {
                name: name.clone(),
                reason,
            });
        }

        self.cursor = None;
        self.locals.clear();
        Ok(())
    }

    fn erase_current_function(&mut self) {
        if let Some(cursor) = self.cursor.take() {
            self.module.remove_function(&cursor.func);
        }
        self.locals.clear();
    }
}
