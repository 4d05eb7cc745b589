//! Scope block and variable table
//!
//! A scope block is the executable body of one function. Every
//! parameter and local declaration owns one named slot in the block's
//! variable table; the table is populated during the connect phase and
//! read during lowering.

use crate::statements::{Statement, StatementKind};
use lsc_cil::Var;
use lsc_common::IntrinsicType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Function-scoped variable table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableTable {
    vars: HashMap<String, Var>,
}

impl VariableTable {
    pub fn add_variable(&mut self, name: &str, ty: IntrinsicType) {
        self.vars.insert(name.to_string(), Var::new(name, ty));
    }

    pub fn find_variable(&self, name: &str) -> Option<&Var> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Executable body of a function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeBlock {
    pub statements: Vec<Statement>,
    pub variables: VariableTable,
}

impl ScopeBlock {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            variables: VariableTable::default(),
        }
    }

    pub fn add_variable(&mut self, name: &str, ty: IntrinsicType) {
        self.variables.add_variable(name, ty);
    }

    pub fn find_variable(&self, name: &str) -> Option<&Var> {
        self.variables.find_variable(name)
    }

    /// Register every declaration in the variable table, walking nested
    /// bodies. Runs during the connect phase, after parameters have
    /// been registered.
    pub fn connect(&mut self) {
        collect_declarations(&self.statements, &mut self.variables);
    }
}

fn collect_declarations(statements: &[Statement], table: &mut VariableTable) {
    for statement in statements {
        match &statement.kind {
            StatementKind::Declare { name, ty, .. } => {
                table.add_variable(name, ty.intrinsic.clone());
            }
            StatementKind::If {
                then_body,
                else_body,
                ..
            } => {
                collect_declarations(then_body, table);
                collect_declarations(else_body, table);
            }
            StatementKind::While { body, .. } => {
                collect_declarations(body, table);
            }
            _ => {}
        }
    }
}
