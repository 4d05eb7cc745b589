//! CIL lowering
//!
//! Turns one function node into its three-address form: the prologue
//! (function marker, entry label, argument binds) followed by the
//! lowered body statements. Control flow lowers to labels and branches
//! with a fixed discipline: a conditional branch transfers on true and
//! falls through into a label on false.

use crate::class::ClassNode;
use crate::expressions::{Expression, ExpressionKind};
use crate::function::FunctionNode;
use crate::ops::BinaryOp;
use crate::scope::ScopeBlock;
use crate::statements::{Statement, StatementKind};
use lsc_cil::{BinOp, CilStream, Instruction, Operand, Rvalue, StmtId};
use lsc_common::{CompilerError, IntrinsicType};
use log::debug;

impl FunctionNode {
    /// Lower this function into the shared stream. Returns the
    /// position of the emitted function marker, the anchor for
    /// basic-block construction.
    pub fn compile_cil(&mut self, cil: &mut CilStream) -> Result<StmtId, CompilerError> {
        let Some(body) = self.body.as_ref() else {
            return Err(CompilerError::invariant("function body has not been set"));
        };
        if !self.is_static {
            // The receiver parameter exists but its binding into the
            // lowered stream is still open work.
            return Err(CompilerError::unsupported("non-static method lowering"));
        }

        cil.reset_temporaries();
        let mangled = ClassNode::function_name(&self.name, &self.parameters);
        debug!("lowering function {} as {}", self.name, mangled);

        let marker = cil.push(Instruction::Function {
            name: mangled,
            return_type: self.return_type.intrinsic.clone(),
        });
        let entry = cil.new_label();
        cil.push(Instruction::Label { label: entry });

        for parameter in &mut self.parameters {
            let slot = body
                .find_variable(&parameter.name)
                .cloned()
                .ok_or_else(|| {
                    CompilerError::invariant(format!(
                        "parameter {} is not registered in the body",
                        parameter.name
                    ))
                })?;
            cil.push(Instruction::Argument { slot: slot.clone() });
            parameter.result = Some(slot);
        }

        body.compile_cil(cil)?;

        // A body that does not end in an explicit return falls off the
        // end of the function.
        if !matches!(cil.last(), Some(Instruction::Ret { .. })) {
            cil.push(Instruction::Ret { value: None });
        }
        Ok(marker)
    }
}

impl ScopeBlock {
    /// Lower every executable statement into the stream
    pub fn compile_cil(&self, cil: &mut CilStream) -> Result<(), CompilerError> {
        self.lower_statements(&self.statements, cil)
    }

    fn lower_statements(
        &self,
        statements: &[Statement],
        cil: &mut CilStream,
    ) -> Result<(), CompilerError> {
        for statement in statements {
            self.lower_statement(statement, cil)?;
        }
        Ok(())
    }

    fn lower_statement(
        &self,
        statement: &Statement,
        cil: &mut CilStream,
    ) -> Result<(), CompilerError> {
        match &statement.kind {
            StatementKind::Declare { name, init, .. } => {
                if let Some(init) = init {
                    let value = self.lower_expression(init, cil)?;
                    let dst = self.slot(name)?;
                    cil.push(Instruction::Assign {
                        dst,
                        src: Rvalue::Use(value),
                    });
                }
                Ok(())
            }

            StatementKind::Assign { name, value } => {
                let value = self.lower_expression(value, cil)?;
                let dst = self.slot(name)?;
                cil.push(Instruction::Assign {
                    dst,
                    src: Rvalue::Use(value),
                });
                Ok(())
            }

            StatementKind::If {
                condition,
                then_body,
                else_body,
            } => {
                // if cond goto L_then; L_else: ...; goto L_end;
                // L_then: ...; goto L_end; L_end:
                let cond = self.lower_expression(condition, cil)?;
                let then_label = cil.new_label();
                let else_label = cil.new_label();
                let end_label = cil.new_label();

                cil.push(Instruction::IfGoto {
                    cond,
                    target: then_label.clone(),
                });
                cil.push(Instruction::Label { label: else_label });
                self.lower_statements(else_body, cil)?;
                cil.push(Instruction::Goto {
                    target: end_label.clone(),
                });
                cil.push(Instruction::Label { label: then_label });
                self.lower_statements(then_body, cil)?;
                cil.push(Instruction::Goto {
                    target: end_label.clone(),
                });
                cil.push(Instruction::Label { label: end_label });
                Ok(())
            }

            StatementKind::While { condition, body } => {
                // goto L_test; L_body: ...; goto L_test;
                // L_test: t = cond; if t goto L_body; L_exit:
                let body_label = cil.new_label();
                let test_label = cil.new_label();
                let exit_label = cil.new_label();

                cil.push(Instruction::Goto {
                    target: test_label.clone(),
                });
                cil.push(Instruction::Label {
                    label: body_label.clone(),
                });
                self.lower_statements(body, cil)?;
                cil.push(Instruction::Goto {
                    target: test_label.clone(),
                });
                cil.push(Instruction::Label { label: test_label });
                let cond = self.lower_expression(condition, cil)?;
                cil.push(Instruction::IfGoto {
                    cond,
                    target: body_label,
                });
                cil.push(Instruction::Label { label: exit_label });
                Ok(())
            }

            StatementKind::Return(value) => {
                let value = match value {
                    Some(expression) => Some(self.lower_expression(expression, cil)?),
                    None => None,
                };
                cil.push(Instruction::Ret { value });
                Ok(())
            }

            StatementKind::Expr(expression) => {
                if let ExpressionKind::Call { .. } = &expression.kind {
                    self.lower_call(expression, cil)?;
                } else {
                    self.lower_expression(expression, cil)?;
                }
                Ok(())
            }
        }
    }

    fn lower_expression(
        &self,
        expression: &Expression,
        cil: &mut CilStream,
    ) -> Result<Operand, CompilerError> {
        match &expression.kind {
            ExpressionKind::IntLiteral(value) => Ok(Operand::IntConst(*value)),
            ExpressionKind::FloatLiteral(value) => Ok(Operand::FloatConst(*value)),
            ExpressionKind::BoolLiteral(value) => Ok(Operand::BoolConst(*value)),

            ExpressionKind::Variable(name) => Ok(Operand::Var(self.slot(name)?)),

            ExpressionKind::Binary { op, lhs, rhs } => {
                let lhs = self.lower_expression(lhs, cil)?;
                let rhs = self.lower_expression(rhs, cil)?;
                let ty = if op.is_comparison() {
                    IntrinsicType::Bool
                } else {
                    lhs.ty()
                };
                let dst = cil.new_temp(ty);
                cil.push(Instruction::Assign {
                    dst: dst.clone(),
                    src: Rvalue::Binary {
                        op: lower_bin_op(*op),
                        lhs,
                        rhs,
                    },
                });
                Ok(Operand::Var(dst))
            }

            ExpressionKind::Call { .. } => match self.lower_call(expression, cil)? {
                Some(value) => Ok(value),
                None => Err(CompilerError::invariant("void call used as a value")),
            },
        }
    }

    fn lower_call(
        &self,
        expression: &Expression,
        cil: &mut CilStream,
    ) -> Result<Option<Operand>, CompilerError> {
        let ExpressionKind::Call {
            name,
            args,
            return_type,
        } = &expression.kind
        else {
            return Err(CompilerError::internal("lower_call on a non-call expression"));
        };

        let mut operands = Vec::with_capacity(args.len());
        for arg in args {
            operands.push(self.lower_expression(arg, cil)?);
        }
        let argument_types: Vec<IntrinsicType> = operands.iter().map(|o| o.ty()).collect();
        let mangled = ClassNode::call_name(name, &argument_types);

        let result = if *return_type == IntrinsicType::Void {
            None
        } else {
            Some(cil.new_temp(return_type.clone()))
        };
        cil.push(Instruction::Call {
            result: result.clone(),
            function: mangled,
            args: operands,
        });
        Ok(result.map(Operand::Var))
    }

    fn slot(&self, name: &str) -> Result<lsc_cil::Var, CompilerError> {
        self.find_variable(name)
            .cloned()
            .ok_or_else(|| CompilerError::invariant(format!("variable {} is not declared", name)))
    }
}

fn lower_bin_op(op: BinaryOp) -> BinOp {
    match op {
        BinaryOp::Add => BinOp::Add,
        BinaryOp::Sub => BinOp::Sub,
        BinaryOp::Mul => BinOp::Mul,
        BinaryOp::Div => BinOp::Div,
        BinaryOp::Mod => BinOp::Mod,
        BinaryOp::Eq => BinOp::Eq,
        BinaryOp::Ne => BinOp::Ne,
        BinaryOp::Lt => BinOp::Lt,
        BinaryOp::Le => BinOp::Le,
        BinaryOp::Gt => BinOp::Gt,
        BinaryOp::Ge => BinOp::Ge,
    }
}
