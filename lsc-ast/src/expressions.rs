//! Expression AST nodes

use crate::ops::BinaryOp;
use lsc_common::{IntrinsicType, SourceSpan};
use serde::{Deserialize, Serialize};

/// An expression with its source span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),

    /// Reference to a parameter or local variable
    Variable(String),

    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },

    /// Call to a sibling function. The return type is filled in by the
    /// resolving collaborator when the node is built.
    Call {
        name: String,
        args: Vec<Expression>,
        return_type: IntrinsicType,
    },
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExpressionKind::IntLiteral(value), SourceSpan::dummy())
    }

    pub fn float(value: f64) -> Self {
        Self::new(ExpressionKind::FloatLiteral(value), SourceSpan::dummy())
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ExpressionKind::BoolLiteral(value), SourceSpan::dummy())
    }

    pub fn var(name: &str) -> Self {
        Self::new(
            ExpressionKind::Variable(name.to_string()),
            SourceSpan::dummy(),
        )
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Self::new(
            ExpressionKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            SourceSpan::dummy(),
        )
    }

    pub fn call(name: &str, args: Vec<Expression>, return_type: IntrinsicType) -> Self {
        Self::new(
            ExpressionKind::Call {
                name: name.to_string(),
                args,
                return_type,
            },
            SourceSpan::dummy(),
        )
    }
}
