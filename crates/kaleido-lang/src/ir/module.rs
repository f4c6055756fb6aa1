//! Core IR types: module, function, block, instruction.

use indexmap::IndexMap;

/// Index of a block within its function. The entry block is always 0.
pub type BlockId = u32;

/// Index of an instruction within its function's arena.
pub type InstId = u32;

/// Value types. Everything the source language computes is `F64`; compares
/// and logical operators produce `Bool`; `alloca` produces `Ptr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ty {
    F64,
    Bool,
    Ptr,
}

/// An SSA operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Floating-point immediate.
    Num(f64),
    /// Result of an instruction.
    Inst(InstId),
    /// Incoming function parameter, by position.
    Param(u32),
}

/// Address of a mutable float: a stack slot or a module global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addr {
    /// An `alloca` result in the same function.
    Slot(InstId),
    Global(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FbinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Unordered float comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FcmpKind {
    Ult,
    Ugt,
    Ueq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstKind {
    /// Reserve one float stack slot. Entry block only.
    Alloca { name: String },
    Load {
        addr: Addr,
    },
    Store {
        addr: Addr,
        value: Value,
    },
    Fbin {
        op: FbinOp,
        lhs: Value,
        rhs: Value,
    },
    Fcmp {
        kind: FcmpKind,
        lhs: Value,
        rhs: Value,
    },
    Not {
        value: Value,
    },
    Logical {
        op: LogicalOp,
        lhs: Value,
        rhs: Value,
    },
    Call {
        callee: String,
        args: Vec<Value>,
    },
    /// Merge-point value selected by predecessor block.
    Phi {
        ty: Ty,
        incoming: Vec<(Value, BlockId)>,
    },
}

impl InstKind {
    /// Result type; `None` for instructions that produce no value.
    pub fn result_ty(&self) -> Option<Ty> {
        match self {
            InstKind::Alloca { .. } => Some(Ty::Ptr),
            InstKind::Load { .. } => Some(Ty::F64),
            InstKind::Store { .. } => None,
            InstKind::Fbin { .. } => Some(Ty::F64),
            InstKind::Fcmp { .. } | InstKind::Not { .. } | InstKind::Logical { .. } => {
                Some(Ty::Bool)
            }
            InstKind::Call { .. } => Some(Ty::F64),
            InstKind::Phi { ty, .. } => Some(*ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inst {
    pub kind: InstKind,
}

/// Block terminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Ret(Value),
    Br(BlockId),
    CondBr {
        cond: Value,
        then_dest: BlockId,
        else_dest: BlockId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub label: String,
    pub insts: Vec<InstId>,
    pub term: Option<Term>,
}

/// A function. A declaration until it gets blocks, a definition after.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    params: Vec<String>,
    blocks: Vec<Block>,
    insts: Vec<Inst>,
}

impl Function {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
            blocks: Vec::new(),
            insts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn set_params(&mut self, params: Vec<String>) {
        self.params = params;
    }

    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id as usize]
    }

    pub fn inst(&self, id: InstId) -> &Inst {
        &self.insts[id as usize]
    }

    /// Append a block. Labels are made unique by suffixing a counter when the
    /// base name is already taken.
    pub fn append_block(&mut self, name: &str) -> BlockId {
        let taken = self
            .blocks
            .iter()
            .filter(|b| {
                b.label == name
                    || b.label
                        .strip_prefix(name)
                        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
            })
            .count();
        let label = if taken == 0 {
            name.to_owned()
        } else {
            format!("{name}{taken}")
        };

        let id = self.blocks.len() as BlockId;
        self.blocks.push(Block {
            label,
            insts: Vec::new(),
            term: None,
        });
        id
    }

    /// Append an instruction to `block`, returning its id.
    pub fn push_inst(&mut self, block: BlockId, kind: InstKind) -> InstId {
        let id = self.insts.len() as InstId;
        self.insts.push(Inst { kind });
        self.blocks[block as usize].insts.push(id);
        id
    }

    /// Allocate a stack slot in the entry block, after any existing allocas,
    /// so every slot dominates every use in the function.
    pub fn entry_alloca(&mut self, name: &str) -> InstId {
        let id = self.insts.len() as InstId;
        self.insts.push(Inst {
            kind: InstKind::Alloca {
                name: name.to_owned(),
            },
        });

        let at = self.blocks[0]
            .insts
            .iter()
            .take_while(|&&i| matches!(self.insts[i as usize].kind, InstKind::Alloca { .. }))
            .count();
        self.blocks[0].insts.insert(at, id);
        id
    }

    /// Terminate `block`. A block is terminated exactly once.
    pub fn terminate(&mut self, block: BlockId, term: Term) {
        let slot = &mut self.blocks[block as usize].term;
        debug_assert!(slot.is_none(), "block terminated twice");
        *slot = Some(term);
    }

    /// Type of an operand, `None` when it references a void instruction.
    pub fn value_ty(&self, value: &Value) -> Option<Ty> {
        match value {
            Value::Num(_) => Some(Ty::F64),
            Value::Param(_) => Some(Ty::F64),
            Value::Inst(id) => self.insts.get(*id as usize)?.kind.result_ty(),
        }
    }
}

/// Module-level mutable float with common linkage, zero-initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVar {
    pub name: String,
}

/// A compilation unit: functions and globals in emission order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    functions: IndexMap<String, Function>,
    globals: IndexMap<String, GlobalVar>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.functions.get_mut(name)
    }

    /// Register a declaration. An existing function (declared or defined)
    /// is left in place.
    pub fn declare_function(&mut self, name: &str, params: Vec<String>) -> &mut Function {
        self.functions
            .entry(name.to_owned())
            .or_insert_with(|| Function::new(name, params))
    }

    /// Remove a function entirely, e.g. after a failed verification.
    pub fn remove_function(&mut self, name: &str) -> Option<Function> {
        self.functions.shift_remove(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// Register a module global; redeclaration is a no-op.
    pub fn define_global(&mut self, name: &str) {
        self.globals
            .entry(name.to_owned())
            .or_insert_with(|| GlobalVar {
                name: name.to_owned(),
            });
    }

    pub fn global(&self, name: &str) -> Option<&GlobalVar> {
        self.globals.get(name)
    }

    pub fn globals(&self) -> impl Iterator<Item = &GlobalVar> {
        self.globals.values()
    }
}
