//! Target IR definitions
//!
//! This module defines the target-side data model: typed functions,
//! blocks, per-variable storage slots, and the instruction set. Values
//! flow through fresh temporaries; mutable variables live in slots and
//! are accessed with explicit loads and stores. Promotion of slots to
//! registers is left to later passes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced while driving the builder surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("unknown function handle {0}")]
    UnknownFunction(usize),

    #[error("unknown block handle {0}")]
    UnknownBlock(usize),

    #[error("unknown slot handle {0}")]
    UnknownSlot(usize),

    #[error("parameter index {index} out of range for function {function}")]
    BadParameterIndex { function: String, index: usize },

    #[error("no block positioned for instruction insertion")]
    NoCurrentBlock,
}

/// Types representable by the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    Void,
    I1,
    I32,
    I64,
    F32,
    F64,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetType::Void => "void",
            TargetType::I1 => "i1",
            TargetType::I32 => "i32",
            TargetType::I64 => "i64",
            TargetType::F32 => "f32",
            TargetType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// Handle to a function within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionId(pub usize);

/// Handle to a block within a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub usize);

/// Handle to a storage slot within a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub usize);

/// A virtual temporary holding one computed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TempId(pub u32);

/// Operand of a target instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetOperand {
    /// Formal parameter, by position
    Param(u32),
    /// Result of a previous instruction
    Temp(TempId),
    ConstInt(i64),
    ConstFloat(f64),
    ConstBool(bool),
}

impl fmt::Display for TargetOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetOperand::Param(index) => write!(f, "arg{}", index),
            TargetOperand::Temp(temp) => write!(f, "%{}", temp.0),
            TargetOperand::ConstInt(value) => write!(f, "{}", value),
            TargetOperand::ConstFloat(value) => write!(f, "{}", value),
            TargetOperand::ConstBool(value) => write!(f, "{}", value),
        }
    }
}

/// Binary operations, comparisons included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    CmpEq,
    CmpNe,
    CmpLt,
    CmpLe,
    CmpGt,
    CmpGe,
}

impl BinOp {
    /// Comparisons produce an `i1` regardless of operand type
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::CmpEq | BinOp::CmpNe | BinOp::CmpLt | BinOp::CmpLe | BinOp::CmpGt | BinOp::CmpGe
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
            BinOp::Rem => "rem",
            BinOp::CmpEq => "cmp.eq",
            BinOp::CmpNe => "cmp.ne",
            BinOp::CmpLt => "cmp.lt",
            BinOp::CmpLe => "cmp.le",
            BinOp::CmpGt => "cmp.gt",
            BinOp::CmpGe => "cmp.ge",
        };
        write!(f, "{}", name)
    }
}

/// Target instruction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetInst {
    /// result = load slot
    Load { result: TempId, slot: SlotId },

    /// store value into slot
    Store { value: TargetOperand, slot: SlotId },

    /// result = op lhs, rhs
    Binary {
        result: TempId,
        op: BinOp,
        lhs: TargetOperand,
        rhs: TargetOperand,
        ty: TargetType,
    },

    /// Unconditional branch
    Branch { target: BlockId },

    /// Two-way conditional branch
    CondBranch {
        condition: TargetOperand,
        then_block: BlockId,
        else_block: BlockId,
    },

    Return { value: Option<TargetOperand> },

    /// result = call callee(args)
    Call {
        result: Option<TempId>,
        callee: String,
        args: Vec<TargetOperand>,
        ty: TargetType,
    },
}

impl TargetInst {
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            TargetInst::Branch { .. } | TargetInst::CondBranch { .. } | TargetInst::Return { .. }
        )
    }
}

/// A named formal parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetParam {
    pub name: String,
    pub ty: TargetType,
}

/// A per-variable mutable storage slot, allocated at function entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSlot {
    pub name: String,
    pub ty: TargetType,
}

/// A labelled sequence of instructions with a single entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetBlock {
    pub label: String,
    pub instructions: Vec<TargetInst>,
}

impl TargetBlock {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            instructions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn has_terminator(&self) -> bool {
        self.instructions.last().is_some_and(TargetInst::is_terminator)
    }
}

/// Function in target form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetFunction {
    pub name: String,
    pub return_type: TargetType,
    pub params: Vec<TargetParam>,
    pub slots: Vec<TargetSlot>,
    pub blocks: Vec<TargetBlock>,
    next_temp: u32,
}

impl TargetFunction {
    fn new(name: &str, return_type: TargetType, param_types: &[TargetType]) -> Self {
        let params = param_types
            .iter()
            .enumerate()
            .map(|(index, ty)| TargetParam {
                name: format!("arg{}", index),
                ty: *ty,
            })
            .collect();
        Self {
            name: name.to_string(),
            return_type,
            params,
            slots: Vec::new(),
            blocks: Vec::new(),
            next_temp: 0,
        }
    }

    pub fn block(&self, id: BlockId) -> Option<&TargetBlock> {
        self.blocks.get(id.0)
    }

    pub fn slot(&self, id: SlotId) -> Option<&TargetSlot> {
        self.slots.get(id.0)
    }

    pub fn entry_block(&self) -> Option<&TargetBlock> {
        self.blocks.first()
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> Option<&mut TargetBlock> {
        self.blocks.get_mut(id.0)
    }

    pub(crate) fn new_temp(&mut self) -> TempId {
        let temp = TempId(self.next_temp);
        self.next_temp += 1;
        temp
    }
}

/// A complete target module, one function per lowered source function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetModule {
    pub functions: Vec<TargetFunction>,
}

impl TargetModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a function with the given prototype. Parameters are named
    /// positionally until [`TargetModule::set_parameter_name`] runs.
    pub fn create_function(
        &mut self,
        name: &str,
        return_type: TargetType,
        param_types: &[TargetType],
    ) -> FunctionId {
        self.functions
            .push(TargetFunction::new(name, return_type, param_types));
        FunctionId(self.functions.len() - 1)
    }

    /// Assign a source-level name to one formal parameter
    pub fn set_parameter_name(
        &mut self,
        func: FunctionId,
        index: usize,
        name: &str,
    ) -> Result<(), CodegenError> {
        let function = self.function_mut(func)?;
        if index >= function.params.len() {
            return Err(CodegenError::BadParameterIndex {
                function: function.name.clone(),
                index,
            });
        }
        function.params[index].name = name.to_string();
        Ok(())
    }

    /// Append an empty block to a function
    pub fn create_block(&mut self, func: FunctionId, label: &str) -> Result<BlockId, CodegenError> {
        let function = self.function_mut(func)?;
        function.blocks.push(TargetBlock::new(label));
        Ok(BlockId(function.blocks.len() - 1))
    }

    /// Allocate a named storage slot in a function
    pub fn create_slot(
        &mut self,
        func: FunctionId,
        name: &str,
        ty: TargetType,
    ) -> Result<SlotId, CodegenError> {
        let function = self.function_mut(func)?;
        function.slots.push(TargetSlot {
            name: name.to_string(),
            ty,
        });
        Ok(SlotId(function.slots.len() - 1))
    }

    pub fn function(&self, func: FunctionId) -> Option<&TargetFunction> {
        self.functions.get(func.0)
    }

    pub fn get_function(&self, name: &str) -> Option<&TargetFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub(crate) fn function_mut(&mut self, func: FunctionId) -> Result<&mut TargetFunction, CodegenError> {
        self.functions
            .get_mut(func.0)
            .ok_or(CodegenError::UnknownFunction(func.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_function_and_parameters() {
        let mut module = TargetModule::new();
        let func = module.create_function("add_int_int", TargetType::I32, &[TargetType::I32, TargetType::I32]);

        module.set_parameter_name(func, 0, "a").unwrap();
        module.set_parameter_name(func, 1, "b").unwrap();

        let function = module.function(func).unwrap();
        assert_eq!(function.params[0].name, "a");
        assert_eq!(function.params[1].name, "b");
        assert_eq!(function.return_type, TargetType::I32);

        let err = module.set_parameter_name(func, 2, "c").unwrap_err();
        assert!(matches!(err, CodegenError::BadParameterIndex { index: 2, .. }));
    }

    #[test]
    fn test_blocks_and_slots() {
        let mut module = TargetModule::new();
        let func = module.create_function("main", TargetType::Void, &[]);

        let entry = module.create_block(func, "L0").unwrap();
        let slot = module.create_slot(func, "x", TargetType::I32).unwrap();

        let function = module.function(func).unwrap();
        assert_eq!(function.block(entry).unwrap().label, "L0");
        assert_eq!(function.slot(slot).unwrap().name, "x");
        assert!(function.block(entry).unwrap().is_empty());
    }

    #[test]
    fn test_terminator_detection() {
        let mut block = TargetBlock::new("L0");
        assert!(!block.has_terminator());

        block.instructions.push(TargetInst::Return { value: None });
        assert!(block.has_terminator());
    }

    #[test]
    fn test_operand_display() {
        assert_eq!(format!("{}", TargetOperand::Param(0)), "arg0");
        assert_eq!(format!("{}", TargetOperand::Temp(TempId(3))), "%3");
        assert_eq!(format!("{}", TargetOperand::ConstInt(42)), "42");
        assert_eq!(format!("{}", TargetOperand::ConstBool(true)), "true");
    }

    #[test]
    fn test_lookup_by_name() {
        let mut module = TargetModule::new();
        module.create_function("one", TargetType::Void, &[]);
        module.create_function("two", TargetType::I32, &[]);

        assert!(module.get_function("one").is_some());
        assert!(module.get_function("two").is_some());
        assert!(module.get_function("three").is_none());
    }
}
