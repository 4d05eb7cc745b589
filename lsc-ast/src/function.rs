//! Function and parameter AST nodes

use crate::scope::ScopeBlock;
use crate::types::{TypeNode, RECEIVER_NAME};
use lsc_cil::Var;
use lsc_common::{CompilerError, SourceSpan};
use serde::{Deserialize, Serialize};

/// One formal argument, including the synthetic receiver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterNode {
    pub name: String,
    pub ty: TypeNode,
    /// Operand bound during lowering; later references to the
    /// parameter resolve through it
    pub result: Option<Var>,
    pub span: SourceSpan,
}

impl ParameterNode {
    pub fn new(name: &str, ty: TypeNode) -> Self {
        Self {
            name: name.to_string(),
            ty,
            result: None,
            span: SourceSpan::dummy(),
        }
    }
}

/// A function modifier (native, inline, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionModifier {
    pub name: String,
}

/// One function or method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionNode {
    pub name: String,
    pub is_static: bool,
    pub is_public: bool,
    pub is_constructor: bool,
    pub return_type: TypeNode,
    pub parameters: Vec<ParameterNode>,
    pub body: Option<ScopeBlock>,
    /// Enclosing class, set during connect. A relational link, not a
    /// pointer.
    pub parent_class: Option<String>,
    pub span: SourceSpan,
}

impl FunctionNode {
    /// Build a function node. The visibility string is scanned for the
    /// "static" and "public" markers; absence of either yields false.
    /// Non-static functions receive a synthetic first parameter bound
    /// to the receiver, typed as the enclosing class once connected.
    pub fn new(return_type: TypeNode, name: &str, visibility: &str) -> Self {
        let is_static = visibility.contains("static");
        let is_public = visibility.contains("public");

        let mut node = Self {
            name: name.to_string(),
            is_static,
            is_public,
            is_constructor: false,
            return_type,
            parameters: Vec::new(),
            body: None,
            parent_class: None,
            span: SourceSpan::dummy(),
        };
        if !is_static {
            node.add_parameter(ParameterNode::new(RECEIVER_NAME, TypeNode::new(RECEIVER_NAME)));
        }
        node
    }

    /// Append a parameter. Order is call-signature order and feeds name
    /// mangling.
    pub fn add_parameter(&mut self, parameter: ParameterNode) {
        self.parameters.push(parameter);
    }

    pub fn set_body(&mut self, body: ScopeBlock) {
        self.body = Some(body);
    }

    /// Function modifiers are not wired into lowering yet
    pub fn set_modifier(&mut self, _modifier: FunctionModifier) -> Result<(), CompilerError> {
        Err(CompilerError::unsupported("function modifiers"))
    }

    /// Linear scan over the parameters by exact name
    pub fn find_argument_variable(&self, name: &str) -> Option<&ParameterNode> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Wire back references: resolve the receiver type, register every
    /// parameter slot in the body's variable table, and connect the
    /// body.
    pub fn connect_parent(&mut self, class_name: &str) -> Result<(), CompilerError> {
        self.parent_class = Some(class_name.to_string());

        let body = self
            .body
            .as_mut()
            .ok_or_else(|| CompilerError::invariant("function body has not been set"))?;
        for parameter in &mut self.parameters {
            parameter.ty.resolve_receiver(class_name);
            body.add_variable(&parameter.name, parameter.ty.intrinsic.clone());
        }
        body.connect();
        Ok(())
    }
}
