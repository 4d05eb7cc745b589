//! Statement AST nodes

use crate::expressions::Expression;
use crate::types::TypeNode;
use lsc_common::SourceSpan;
use serde::{Deserialize, Serialize};

/// A statement with its source span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Local variable declaration. Slots are function-scoped; the
    /// connect phase hoists every declaration into the body's variable
    /// table.
    Declare {
        name: String,
        ty: TypeNode,
        init: Option<Expression>,
    },

    Assign {
        name: String,
        value: Expression,
    },

    If {
        condition: Expression,
        then_body: Vec<Statement>,
        else_body: Vec<Statement>,
    },

    While {
        condition: Expression,
        body: Vec<Statement>,
    },

    Return(Option<Expression>),

    /// Expression evaluated for effect (calls)
    Expr(Expression),
}

impl Statement {
    pub fn new(kind: StatementKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    pub fn declare(name: &str, ty: TypeNode, init: Option<Expression>) -> Self {
        Self::new(
            StatementKind::Declare {
                name: name.to_string(),
                ty,
                init,
            },
            SourceSpan::dummy(),
        )
    }

    pub fn assign(name: &str, value: Expression) -> Self {
        Self::new(
            StatementKind::Assign {
                name: name.to_string(),
                value,
            },
            SourceSpan::dummy(),
        )
    }

    pub fn if_else(condition: Expression, then_body: Vec<Statement>, else_body: Vec<Statement>) -> Self {
        Self::new(
            StatementKind::If {
                condition,
                then_body,
                else_body,
            },
            SourceSpan::dummy(),
        )
    }

    pub fn while_loop(condition: Expression, body: Vec<Statement>) -> Self {
        Self::new(StatementKind::While { condition, body }, SourceSpan::dummy())
    }

    pub fn ret(value: Option<Expression>) -> Self {
        Self::new(StatementKind::Return(value), SourceSpan::dummy())
    }

    pub fn expr(expression: Expression) -> Self {
        Self::new(StatementKind::Expr(expression), SourceSpan::dummy())
    }
}
