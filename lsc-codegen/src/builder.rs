//! Instruction builder
//!
//! Provides the insertion surface for populating target blocks. The
//! builder is positioned at one block at a time; every `build_*` call
//! appends to the positioned block and hands back a fresh temporary
//! where the instruction produces a value.

use crate::target::{
    BinOp, BlockId, CodegenError, FunctionId, SlotId, TargetInst, TargetModule, TargetOperand,
    TargetType, TempId,
};

/// Builder for one function's instruction stream
pub struct InstBuilder<'m> {
    module: &'m mut TargetModule,
    function: FunctionId,
    block: Option<BlockId>,
}

impl<'m> InstBuilder<'m> {
    pub fn new(module: &'m mut TargetModule, function: FunctionId) -> Result<Self, CodegenError> {
        if module.function(function).is_none() {
            return Err(CodegenError::UnknownFunction(function.0));
        }
        Ok(Self {
            module,
            function,
            block: None,
        })
    }

    /// Direct all subsequent insertions into `block`
    pub fn position_at(&mut self, block: BlockId) -> Result<(), CodegenError> {
        let function = self.module.function_mut(self.function)?;
        if function.block_mut(block).is_none() {
            return Err(CodegenError::UnknownBlock(block.0));
        }
        self.block = Some(block);
        Ok(())
    }

    /// Allocate a named storage slot in the current function
    pub fn create_slot(&mut self, name: &str, ty: TargetType) -> Result<SlotId, CodegenError> {
        self.module.create_slot(self.function, name, ty)
    }

    /// Operand referring to the formal parameter at `index`
    pub fn param_value(&self, index: usize) -> Result<TargetOperand, CodegenError> {
        let function = self
            .module
            .function(self.function)
            .ok_or(CodegenError::UnknownFunction(self.function.0))?;
        if index >= function.params.len() {
            return Err(CodegenError::BadParameterIndex {
                function: function.name.clone(),
                index,
            });
        }
        Ok(TargetOperand::Param(index as u32))
    }

    pub fn build_load(&mut self, slot: SlotId) -> Result<TempId, CodegenError> {
        self.check_slot(slot)?;
        let result = self.new_temp()?;
        self.push(TargetInst::Load { result, slot })?;
        Ok(result)
    }

    pub fn build_store(&mut self, value: TargetOperand, slot: SlotId) -> Result<(), CodegenError> {
        self.check_slot(slot)?;
        self.push(TargetInst::Store { value, slot })
    }

    pub fn build_binary(
        &mut self,
        op: BinOp,
        lhs: TargetOperand,
        rhs: TargetOperand,
        ty: TargetType,
    ) -> Result<TempId, CodegenError> {
        let result = self.new_temp()?;
        self.push(TargetInst::Binary {
            result,
            op,
            lhs,
            rhs,
            ty,
        })?;
        Ok(result)
    }

    pub fn build_branch(&mut self, target: BlockId) -> Result<(), CodegenError> {
        self.check_block(target)?;
        self.push(TargetInst::Branch { target })
    }

    pub fn build_cond_branch(
        &mut self,
        condition: TargetOperand,
        then_block: BlockId,
        else_block: BlockId,
    ) -> Result<(), CodegenError> {
        self.check_block(then_block)?;
        self.check_block(else_block)?;
        self.push(TargetInst::CondBranch {
            condition,
            then_block,
            else_block,
        })
    }

    pub fn build_return(&mut self, value: Option<TargetOperand>) -> Result<(), CodegenError> {
        self.push(TargetInst::Return { value })
    }

    /// Call `callee`; void calls produce no temporary
    pub fn build_call(
        &mut self,
        callee: &str,
        args: Vec<TargetOperand>,
        ty: TargetType,
    ) -> Result<Option<TempId>, CodegenError> {
        let result = if matches!(ty, TargetType::Void) {
            None
        } else {
            Some(self.new_temp()?)
        };
        self.push(TargetInst::Call {
            result,
            callee: callee.to_string(),
            args,
            ty,
        })?;
        Ok(result)
    }

    fn new_temp(&mut self) -> Result<TempId, CodegenError> {
        Ok(self.module.function_mut(self.function)?.new_temp())
    }

    fn check_slot(&self, slot: SlotId) -> Result<(), CodegenError> {
        let function = self
            .module
            .function(self.function)
            .ok_or(CodegenError::UnknownFunction(self.function.0))?;
        if function.slot(slot).is_none() {
            return Err(CodegenError::UnknownSlot(slot.0));
        }
        Ok(())
    }

    fn check_block(&self, block: BlockId) -> Result<(), CodegenError> {
        let function = self
            .module
            .function(self.function)
            .ok_or(CodegenError::UnknownFunction(self.function.0))?;
        if function.block(block).is_none() {
            return Err(CodegenError::UnknownBlock(block.0));
        }
        Ok(())
    }

    fn push(&mut self, inst: TargetInst) -> Result<(), CodegenError> {
        let block = self.block.ok_or(CodegenError::NoCurrentBlock)?;
        let function = self.module.function_mut(self.function)?;
        let block = function
            .block_mut(block)
            .ok_or(CodegenError::UnknownBlock(block.0))?;
        block.instructions.push(inst);
        Ok(())
    }
}
