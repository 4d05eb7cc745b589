//! Translation of basic blocks into the code-generation backend
//!
//! Emission runs in three steps: the function prototype is rebuilt from
//! the marker and argument-bind statements, one backend block is
//! created per basic block before any body is translated (so forward
//! branches resolve by map lookup), and finally every block's
//! statements are translated.
//!
//! Variables and temporaries live in per-name storage slots; reads and
//! writes become loads and stores. Promotion of slots to registers is
//! the backend's concern.

use crate::blocks::BasicBlockList;
use crate::instr::{BinOp, Instruction, Operand, Rvalue};
use crate::stream::CilStream;
use lsc_codegen::{
    BinOp as TargetBinOp, BlockId, CodegenError, FunctionId, InstBuilder, SlotId, TargetModule,
    TargetOperand, TargetType,
};
use lsc_common::IntrinsicType;
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while emitting one function into the backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmitError {
    #[error("unsupported intrinsic type in backend: {0}")]
    UnsupportedType(IntrinsicType),

    #[error("unsupported instruction in block body: {0}")]
    UnsupportedInstruction(String),

    #[error("basic block starting at {0} has no terminator")]
    MissingTerminator(usize),

    #[error("conditional branch at end of function has no fallthrough block")]
    MissingFallthrough,

    #[error("no function marker precedes the entry block")]
    MissingFunctionMarker,

    #[error("branch target {0} does not name a block")]
    UnknownBranchTarget(String),

    #[error("block leader at {0} is not a label")]
    MalformedLeader(usize),

    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
}

/// Map an intrinsic type onto the backend type set. Class references
/// have no backend representation.
pub fn target_type(ty: &IntrinsicType) -> Result<TargetType, EmitError> {
    match ty {
        IntrinsicType::Void => Ok(TargetType::Void),
        IntrinsicType::Bool => Ok(TargetType::I1),
        IntrinsicType::Int => Ok(TargetType::I32),
        IntrinsicType::Long => Ok(TargetType::I64),
        IntrinsicType::Float => Ok(TargetType::F32),
        IntrinsicType::Double => Ok(TargetType::F64),
        IntrinsicType::ClassRef(_) => Err(EmitError::UnsupportedType(ty.clone())),
    }
}

/// Translate one function's basic blocks into a backend function
pub fn translate_function(
    cil: &CilStream,
    blocks: &BasicBlockList,
    module: &mut TargetModule,
) -> Result<FunctionId, EmitError> {
    // The function marker sits immediately before the entry block's
    // leader.
    let first = blocks.first().ok_or(EmitError::MissingFunctionMarker)?;
    if first.begin == 0 {
        return Err(EmitError::MissingFunctionMarker);
    }
    let (name, return_type) = match cil.get(first.begin - 1) {
        Some(Instruction::Function { name, return_type }) => {
            (name.clone(), target_type(return_type)?)
        }
        _ => return Err(EmitError::MissingFunctionMarker),
    };

    // The argument-bind run after the entry label yields the parameter
    // list, in encounter order.
    let mut params: Vec<(String, TargetType)> = Vec::new();
    let mut idx = first.begin + 1;
    while let Some(Instruction::Argument { slot }) = cil.get(idx) {
        params.push((slot.name.clone(), target_type(&slot.ty)?));
        idx += 1;
    }

    let param_types: Vec<TargetType> = params.iter().map(|(_, ty)| *ty).collect();
    let func = module.create_function(&name, return_type, &param_types);
    for (index, (param_name, _)) in params.iter().enumerate() {
        module.set_parameter_name(func, index, param_name)?;
    }
    debug!(
        "emitting {}: {} parameters, {} blocks",
        name,
        params.len(),
        blocks.len()
    );

    // All backend blocks exist before any body is translated.
    let mut block_map: HashMap<String, BlockId> = HashMap::new();
    let mut order: Vec<BlockId> = Vec::new();
    for block in blocks.iter() {
        let label = match cil.get(block.begin) {
            Some(Instruction::Label { label }) => label.clone(),
            _ => return Err(EmitError::MalformedLeader(block.begin)),
        };
        let id = module.create_block(func, &label)?;
        block_map.insert(label, id);
        order.push(id);
    }

    let mut emitter = FunctionEmitter {
        builder: InstBuilder::new(module, func)?,
        slots: HashMap::new(),
        block_map,
        next_param: 0,
    };
    for (index, block) in blocks.iter().enumerate() {
        let end = block.end.ok_or(EmitError::MissingTerminator(block.begin))?;
        emitter.builder.position_at(order[index])?;
        let fallthrough = order.get(index + 1).copied();
        for stmt in &cil.statements()[block.begin..=end] {
            emitter.translate(stmt, fallthrough)?;
        }
    }

    Ok(func)
}

/// Per-function translation state
struct FunctionEmitter<'m> {
    builder: InstBuilder<'m>,
    /// One storage slot per variable or temporary name
    slots: HashMap<String, SlotId>,
    /// Leader label to pre-created backend block
    block_map: HashMap<String, BlockId>,
    /// Encounter-order index of the next argument bind
    next_param: usize,
}

impl FunctionEmitter<'_> {
    fn translate(
        &mut self,
        stmt: &Instruction,
        fallthrough: Option<BlockId>,
    ) -> Result<(), EmitError> {
        match stmt {
            // Structural statements emit nothing.
            Instruction::Label { .. } => Ok(()),

            Instruction::Argument { slot } => {
                let ty = target_type(&slot.ty)?;
                let storage = self.slot_for(&slot.name, ty)?;
                let value = self.builder.param_value(self.next_param)?;
                self.builder.build_store(value, storage)?;
                self.next_param += 1;
                Ok(())
            }

            Instruction::Assign { dst, src } => {
                let value = match src {
                    Rvalue::Use(operand) => self.operand_value(operand)?,
                    Rvalue::Binary { op, lhs, rhs } => {
                        let op_ty = target_type(&lhs.ty())?;
                        let lhs = self.operand_value(lhs)?;
                        let rhs = self.operand_value(rhs)?;
                        let result = self.builder.build_binary(bin_op(*op), lhs, rhs, op_ty)?;
                        TargetOperand::Temp(result)
                    }
                };
                let ty = target_type(&dst.ty)?;
                let storage = self.slot_for(&dst.name, ty)?;
                self.builder.build_store(value, storage)?;
                Ok(())
            }

            Instruction::Goto { target } => {
                let block = self.block(target)?;
                self.builder.build_branch(block)?;
                Ok(())
            }

            Instruction::IfGoto { cond, target } => {
                let condition = self.operand_value(cond)?;
                let then_block = self.block(target)?;
                let else_block = fallthrough.ok_or(EmitError::MissingFallthrough)?;
                self.builder
                    .build_cond_branch(condition, then_block, else_block)?;
                Ok(())
            }

            Instruction::Call {
                result,
                function,
                args,
            } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.operand_value(arg)?);
                }
                let ty = match result {
                    Some(dst) => target_type(&dst.ty)?,
                    None => TargetType::Void,
                };
                let returned = self.builder.build_call(function, values, ty)?;
                if let (Some(dst), Some(temp)) = (result, returned) {
                    let ty = target_type(&dst.ty)?;
                    let storage = self.slot_for(&dst.name, ty)?;
                    self.builder.build_store(TargetOperand::Temp(temp), storage)?;
                }
                Ok(())
            }

            Instruction::Ret { value } => {
                let value = match value {
                    Some(operand) => Some(self.operand_value(operand)?),
                    None => None,
                };
                self.builder.build_return(value)?;
                Ok(())
            }

            // A function marker inside a block body means the stream is
            // malformed.
            Instruction::Function { .. } => {
                Err(EmitError::UnsupportedInstruction(stmt.to_string()))
            }
        }
    }

    fn operand_value(&mut self, operand: &Operand) -> Result<TargetOperand, EmitError> {
        match operand {
            Operand::Var(var) => {
                let ty = target_type(&var.ty)?;
                let slot = self.slot_for(&var.name, ty)?;
                let temp = self.builder.build_load(slot)?;
                Ok(TargetOperand::Temp(temp))
            }
            Operand::IntConst(value) => Ok(TargetOperand::ConstInt(*value)),
            Operand::FloatConst(value) => Ok(TargetOperand::ConstFloat(*value)),
            Operand::BoolConst(value) => Ok(TargetOperand::ConstBool(*value)),
        }
    }

    /// The dedicated slot for a variable name, allocated on first use
    fn slot_for(&mut self, name: &str, ty: TargetType) -> Result<SlotId, EmitError> {
        if let Some(&slot) = self.slots.get(name) {
            return Ok(slot);
        }
        let slot = self.builder.create_slot(name, ty)?;
        self.slots.insert(name.to_string(), slot);
        Ok(slot)
    }

    fn block(&self, label: &str) -> Result<BlockId, EmitError> {
        self.block_map
            .get(label)
            .copied()
            .ok_or_else(|| EmitError::UnknownBranchTarget(label.to_string()))
    }
}

fn bin_op(op: BinOp) -> TargetBinOp {
    match op {
        BinOp::Add => TargetBinOp::Add,
        BinOp::Sub => TargetBinOp::Sub,
        BinOp::Mul => TargetBinOp::Mul,
        BinOp::Div => TargetBinOp::Div,
        BinOp::Mod => TargetBinOp::Rem,
        BinOp::Eq => TargetBinOp::CmpEq,
        BinOp::Ne => TargetBinOp::CmpNe,
        BinOp::Lt => TargetBinOp::CmpLt,
        BinOp::Le => TargetBinOp::CmpLe,
        BinOp::Gt => TargetBinOp::CmpGt,
        BinOp::Ge => TargetBinOp::CmpGe,
    }
}
