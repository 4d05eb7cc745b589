//! Little Script Compiler - Three-Address Intermediate Representation
//!
//! This crate defines the linear statement stream ("CIL") that function
//! bodies lower into, the basic-block construction over that stream,
//! and the emission of basic blocks into the code-generation backend.
//!
//! The stream is an ordered, index-addressed sequence: one instruction
//! per statement, each with at most two operands plus an optional jump
//! target. Basic blocks are positional views into the stream; they own
//! no statements.

pub mod blocks;
pub mod emit;
pub mod instr;
pub mod stream;

pub use blocks::{BasicBlock, BasicBlockList};
pub use emit::{target_type, translate_function, EmitError};
pub use instr::{BinOp, Instruction, Operand, Rvalue, Var};
pub use stream::{CilStream, StmtId};
