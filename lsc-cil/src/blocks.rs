//! Basic block construction over the CIL stream
//!
//! Blocks are built per function, anchored at the function marker
//! statement. Three passes run over the function's window of the
//! stream: dead unconditional jumps are removed, every label becomes a
//! block leader, and each block is closed at its first control
//! transfer.

use crate::instr::Instruction;
use crate::stream::{CilStream, StmtId};
use lsc_common::CompilerError;
use log::debug;

/// Maximal straight-line run of statements, described as positions
/// into the stream. `begin` always indexes a label; `end` indexes the
/// block's terminator once one is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicBlock {
    pub begin: StmtId,
    pub end: Option<StmtId>,
}

/// The basic blocks of one function, in leader order
#[derive(Debug, Default)]
pub struct BasicBlockList {
    blocks: Vec<BasicBlock>,
}

impl BasicBlockList {
    /// Build the block list for the function whose marker sits at
    /// `function`. The scan window runs to the next function marker or
    /// the end of the stream. Removes provably dead jumps from the
    /// stream as a side effect.
    pub fn build(cil: &mut CilStream, function: StmtId) -> Result<Self, CompilerError> {
        if !matches!(cil.get(function), Some(Instruction::Function { .. })) {
            return Err(CompilerError::invariant(format!(
                "statement {} is not a function marker",
                function
            )));
        }

        let mut limit = window_end(cil, function);

        // A jump is dead only when its target is the very next statement
        // (a label) and the statement before it is a return.
        let mut i = function + 1;
        while i < limit {
            let dead = match cil.get(i) {
                Some(Instruction::Goto { target }) => {
                    let jumps_to_next = matches!(
                        cil.get(i + 1),
                        Some(Instruction::Label { label }) if label == target
                    );
                    let after_return = matches!(cil.get(i - 1), Some(Instruction::Ret { .. }));
                    jumps_to_next && after_return
                }
                _ => false,
            };
            if dead {
                cil.remove(i);
                limit -= 1;
            } else {
                i += 1;
            }
        }

        // Every label is a block leader.
        let mut blocks: Vec<BasicBlock> = Vec::new();
        for idx in function + 1..limit {
            if cil.get(idx).is_some_and(Instruction::is_label) {
                blocks.push(BasicBlock {
                    begin: idx,
                    end: None,
                });
            }
        }

        // Close each block at its first control transfer. A block with
        // no transfer before the next leader stays open; emission
        // treats that as fatal.
        for index in 0..blocks.len() {
            let bound = blocks
                .get(index + 1)
                .map(|next| next.begin)
                .unwrap_or(limit);
            let begin = blocks[index].begin;
            for idx in begin..bound {
                if cil.get(idx).is_some_and(Instruction::is_terminator) {
                    blocks[index].end = Some(idx);
                    break;
                }
            }
        }

        debug!("built {} basic blocks", blocks.len());
        Ok(Self { blocks })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn first(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    pub fn get(&self, index: usize) -> Option<&BasicBlock> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BasicBlock> {
        self.blocks.iter()
    }
}

/// Position one past the last statement belonging to the function at
/// `function`
fn window_end(cil: &CilStream, function: StmtId) -> StmtId {
    let stmts = cil.statements();
    for (offset, stmt) in stmts[function + 1..].iter().enumerate() {
        if matches!(stmt, Instruction::Function { .. }) {
            return function + 1 + offset;
        }
    }
    stmts.len()
}
