//! Three-address statement definitions
//!
//! Every statement is one instruction with at most two operands.
//! Control transfers name their target label; label identity is the
//! label string, unique within one function's lowering.

use lsc_common::IntrinsicType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, typed storage slot: a source variable or a compiler
/// temporary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Var {
    pub name: String,
    pub ty: IntrinsicType,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: IntrinsicType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Operand of a three-address statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Var(Var),
    IntConst(i64),
    FloatConst(f64),
    BoolConst(bool),
}

impl Operand {
    pub fn ty(&self) -> IntrinsicType {
        match self {
            Operand::Var(var) => var.ty.clone(),
            Operand::IntConst(_) => IntrinsicType::Int,
            Operand::FloatConst(_) => IntrinsicType::Double,
            Operand::BoolConst(_) => IntrinsicType::Bool,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Var(var) => write!(f, "{}", var),
            Operand::IntConst(value) => write!(f, "{}", value),
            Operand::FloatConst(value) => write!(f, "{}", value),
            Operand::BoolConst(value) => write!(f, "{}", value),
        }
    }
}

/// Binary operators at CIL level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        };
        write!(f, "{}", op)
    }
}

/// Right-hand side of an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rvalue {
    Use(Operand),
    Binary {
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
    },
}

impl Rvalue {
    pub fn ty(&self) -> IntrinsicType {
        match self {
            Rvalue::Use(operand) => operand.ty(),
            Rvalue::Binary { op, lhs, .. } => {
                if op.is_comparison() {
                    IntrinsicType::Bool
                } else {
                    lhs.ty()
                }
            }
        }
    }
}

impl fmt::Display for Rvalue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rvalue::Use(operand) => write!(f, "{}", operand),
            Rvalue::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
        }
    }
}

/// One statement in the CIL stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Function marker carrying the mangled name and return type
    Function {
        name: String,
        return_type: IntrinsicType,
    },

    /// Block leader
    Label { label: String },

    /// Binds one formal argument to its variable slot
    Argument { slot: Var },

    Assign { dst: Var, src: Rvalue },

    Goto { target: String },

    /// Branch to `target` when `cond` is true. Control otherwise falls
    /// through to the next statement, which lowering guarantees is a
    /// label.
    IfGoto { cond: Operand, target: String },

    Call {
        result: Option<Var>,
        function: String,
        args: Vec<Operand>,
    },

    Ret { value: Option<Operand> },
}

impl Instruction {
    /// Statements that end a basic block
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instruction::IfGoto { .. } | Instruction::Goto { .. } | Instruction::Ret { .. }
        )
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Instruction::Label { .. })
    }

    pub fn label_name(&self) -> Option<&str> {
        match self {
            Instruction::Label { label } => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Function { name, return_type } => {
                write!(f, "function {} {}", name, return_type)
            }
            Instruction::Label { label } => write!(f, "{}:", label),
            Instruction::Argument { slot } => write!(f, "arg {}", slot),
            Instruction::Assign { dst, src } => write!(f, "{} = {}", dst, src),
            Instruction::Goto { target } => write!(f, "goto {}", target),
            Instruction::IfGoto { cond, target } => write!(f, "if {} goto {}", cond, target),
            Instruction::Call {
                result,
                function,
                args,
            } => {
                if let Some(result) = result {
                    write!(f, "{} = ", result)?;
                }
                write!(f, "call {}(", function)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Instruction::Ret { value: Some(value) } => write!(f, "ret {}", value),
            Instruction::Ret { value: None } => write!(f, "ret"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminators() {
        assert!(Instruction::Goto {
            target: "L1".to_string()
        }
        .is_terminator());
        assert!(Instruction::Ret { value: None }.is_terminator());
        assert!(Instruction::IfGoto {
            cond: Operand::BoolConst(true),
            target: "L1".to_string()
        }
        .is_terminator());

        assert!(!Instruction::Label {
            label: "L0".to_string()
        }
        .is_terminator());
        assert!(!Instruction::Argument {
            slot: Var::new("a", IntrinsicType::Int)
        }
        .is_terminator());
    }

    #[test]
    fn test_operand_types() {
        assert_eq!(Operand::IntConst(1).ty(), IntrinsicType::Int);
        assert_eq!(Operand::FloatConst(1.5).ty(), IntrinsicType::Double);
        assert_eq!(Operand::BoolConst(true).ty(), IntrinsicType::Bool);
        assert_eq!(
            Operand::Var(Var::new("x", IntrinsicType::Long)).ty(),
            IntrinsicType::Long
        );
    }

    #[test]
    fn test_rvalue_types() {
        let lhs = Operand::Var(Var::new("a", IntrinsicType::Int));
        let rhs = Operand::IntConst(2);

        let sum = Rvalue::Binary {
            op: BinOp::Add,
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        };
        assert_eq!(sum.ty(), IntrinsicType::Int);

        let cmp = Rvalue::Binary {
            op: BinOp::Lt,
            lhs,
            rhs,
        };
        assert_eq!(cmp.ty(), IntrinsicType::Bool);
    }

    #[test]
    fn test_display() {
        let stmt = Instruction::Assign {
            dst: Var::new("t0", IntrinsicType::Int),
            src: Rvalue::Binary {
                op: BinOp::Add,
                lhs: Operand::Var(Var::new("a", IntrinsicType::Int)),
                rhs: Operand::Var(Var::new("b", IntrinsicType::Int)),
            },
        };
        assert_eq!(format!("{}", stmt), "t0 = a + b");

        let stmt = Instruction::IfGoto {
            cond: Operand::Var(Var::new("t1", IntrinsicType::Bool)),
            target: "L2".to_string(),
        };
        assert_eq!(format!("{}", stmt), "if t1 goto L2");

        let stmt = Instruction::Call {
            result: Some(Var::new("t2", IntrinsicType::Int)),
            function: "max_int_int".to_string(),
            args: vec![Operand::IntConst(1), Operand::IntConst(2)],
        };
        assert_eq!(format!("{}", stmt), "t2 = call max_int_int(1, 2)");
    }
}
