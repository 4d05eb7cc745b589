//! Little Script Compiler - Target Code Generation Backend
//!
//! This crate is the code-generation library driven by the CIL
//! emitter. It owns the target-side representation of functions,
//! blocks, storage slots, and instructions, and exposes:
//!
//! - Function/block/slot creation on [`TargetModule`]
//! - An instruction builder scoped to a block ([`InstBuilder`])
//! - Textual emission of a populated module
//!
//! Register allocation and object-code emission happen in later stages
//! that consume the populated module.

pub mod builder;
pub mod emit;
pub mod target;

pub use builder::InstBuilder;
pub use emit::emit_module;
pub use target::{
    BinOp, BlockId, CodegenError, FunctionId, SlotId, TargetBlock, TargetFunction, TargetInst,
    TargetModule, TargetOperand, TargetParam, TargetSlot, TargetType, TempId,
};
