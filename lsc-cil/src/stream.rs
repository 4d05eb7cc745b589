//! The shared CIL statement stream
//!
//! One stream exists per compilation unit. Lowering appends statements
//! for one function at a time; each function's lowering resets the
//! temporary and label allocators so names never leak across functions.

use crate::instr::{Instruction, Var};
use lsc_common::{IntrinsicType, LabelGenerator, TempGenerator};
use log::trace;
use std::fmt;

/// Position of a statement in the stream
pub type StmtId = usize;

/// Ordered, mutable sequence of three-address statements plus the
/// temporary/label allocators
#[derive(Debug, Default)]
pub struct CilStream {
    stmts: Vec<Instruction>,
    temps: TempGenerator,
    labels: LabelGenerator,
}

impl CilStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement, returning its position
    pub fn push(&mut self, stmt: Instruction) -> StmtId {
        trace!("cil: {}", stmt);
        self.stmts.push(stmt);
        self.stmts.len() - 1
    }

    /// Remove the statement at `id`, shifting everything after it
    pub fn remove(&mut self, id: StmtId) -> Instruction {
        self.stmts.remove(id)
    }

    pub fn get(&self, id: StmtId) -> Option<&Instruction> {
        self.stmts.get(id)
    }

    pub fn last(&self) -> Option<&Instruction> {
        self.stmts.last()
    }

    pub fn statements(&self) -> &[Instruction] {
        &self.stmts
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    /// Allocate a fresh typed temporary ("t0", "t1", ...)
    pub fn new_temp(&mut self, ty: IntrinsicType) -> Var {
        Var::new(format!("t{}", self.temps.new_temp()), ty)
    }

    /// Allocate a fresh label ("L0", "L1", ...)
    pub fn new_label(&mut self) -> String {
        self.labels.new_label()
    }

    /// Restart both allocators. Runs at the start of every function's
    /// lowering.
    pub fn reset_temporaries(&mut self) {
        self.temps = TempGenerator::new();
        self.labels = LabelGenerator::new();
    }
}

impl fmt::Display for CilStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.stmts {
            match stmt {
                Instruction::Function { .. } | Instruction::Label { .. } => {
                    writeln!(f, "{}", stmt)?
                }
                _ => writeln!(f, "    {}", stmt)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::Operand;

    #[test]
    fn test_push_and_get() {
        let mut cil = CilStream::new();
        assert!(cil.is_empty());

        let id = cil.push(Instruction::Label {
            label: "L0".to_string(),
        });
        assert_eq!(id, 0);
        assert_eq!(cil.len(), 1);
        assert!(cil.get(0).unwrap().is_label());
        assert!(cil.get(1).is_none());
    }

    #[test]
    fn test_temp_and_label_naming() {
        let mut cil = CilStream::new();
        assert_eq!(cil.new_temp(IntrinsicType::Int).name, "t0");
        assert_eq!(cil.new_temp(IntrinsicType::Int).name, "t1");
        assert_eq!(cil.new_label(), "L0");
        assert_eq!(cil.new_label(), "L1");
    }

    #[test]
    fn test_reset_temporaries() {
        let mut cil = CilStream::new();
        cil.new_temp(IntrinsicType::Int);
        cil.new_label();

        cil.reset_temporaries();
        assert_eq!(cil.new_temp(IntrinsicType::Int).name, "t0");
        assert_eq!(cil.new_label(), "L0");
    }

    #[test]
    fn test_remove_shifts_positions() {
        let mut cil = CilStream::new();
        cil.push(Instruction::Label {
            label: "L0".to_string(),
        });
        cil.push(Instruction::Goto {
            target: "L1".to_string(),
        });
        cil.push(Instruction::Label {
            label: "L1".to_string(),
        });

        let removed = cil.remove(1);
        assert!(matches!(removed, Instruction::Goto { .. }));
        assert_eq!(cil.len(), 2);
        assert_eq!(cil.get(1).unwrap().label_name(), Some("L1"));
    }

    #[test]
    fn test_display_indents_body_statements() {
        let mut cil = CilStream::new();
        cil.push(Instruction::Label {
            label: "L0".to_string(),
        });
        cil.push(Instruction::Ret {
            value: Some(Operand::IntConst(0)),
        });

        let text = format!("{}", cil);
        assert_eq!(text, "L0:\n    ret 0\n");
    }
}
