//! Class nodes and name mangling

use crate::function::{FunctionNode, ParameterNode};
use lsc_common::{CompilerError, IntrinsicType};
use serde::{Deserialize, Serialize};

/// A class declaration grouping member functions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    pub name: String,
    pub functions: Vec<FunctionNode>,
}

impl ClassNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            functions: Vec::new(),
        }
    }

    /// Add a member function. A function named after the class is its
    /// constructor.
    pub fn add_function(&mut self, mut function: FunctionNode) {
        function.is_constructor = function.name == self.name;
        self.functions.push(function);
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionNode> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Establish back references for every member function
    pub fn connect(&mut self) -> Result<(), CompilerError> {
        let name = self.name.clone();
        for function in &mut self.functions {
            function.connect_parent(&name)?;
        }
        Ok(())
    }

    /// Deterministic, overload-distinguishing external name for a
    /// function: the unqualified name followed by each parameter's
    /// intrinsic short name.
    pub fn function_name(name: &str, parameters: &[ParameterNode]) -> String {
        let types: Vec<IntrinsicType> = parameters
            .iter()
            .map(|p| p.ty.intrinsic.clone())
            .collect();
        Self::call_name(name, &types)
    }

    /// Mangling over raw intrinsic types, shared with call lowering
    pub fn call_name(name: &str, argument_types: &[IntrinsicType]) -> String {
        let mut mangled = name.to_string();
        for ty in argument_types {
            mangled.push('_');
            mangled.push_str(ty.short_name());
        }
        mangled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeBlock;
    use crate::types::TypeNode;

    #[test]
    fn test_mangling_distinguishes_overloads() {
        let mut add = FunctionNode::new(TypeNode::new("int"), "add", "static");
        add.add_parameter(ParameterNode::new("a", TypeNode::new("int")));
        add.add_parameter(ParameterNode::new("b", TypeNode::new("int")));
        assert_eq!(
            ClassNode::function_name("add", &add.parameters),
            "add_int_int"
        );

        let mut addl = FunctionNode::new(TypeNode::new("long"), "add", "static");
        addl.add_parameter(ParameterNode::new("a", TypeNode::new("long")));
        addl.add_parameter(ParameterNode::new("b", TypeNode::new("long")));
        assert_eq!(
            ClassNode::function_name("add", &addl.parameters),
            "add_long_long"
        );
    }

    #[test]
    fn test_zero_parameter_name_is_bare() {
        assert_eq!(ClassNode::function_name("main", &[]), "main");
        assert_eq!(ClassNode::call_name("greet", &[]), "greet");
    }

    #[test]
    fn test_call_name_matches_function_name() {
        let mut max = FunctionNode::new(TypeNode::new("int"), "max", "static");
        max.add_parameter(ParameterNode::new("a", TypeNode::new("int")));
        max.add_parameter(ParameterNode::new("b", TypeNode::new("int")));

        assert_eq!(
            ClassNode::function_name("max", &max.parameters),
            ClassNode::call_name("max", &[IntrinsicType::Int, IntrinsicType::Int])
        );
    }

    #[test]
    fn test_constructor_detection() {
        let mut class = ClassNode::new("Vector");
        let mut ctor = FunctionNode::new(TypeNode::new("void"), "Vector", "public static");
        ctor.set_body(ScopeBlock::new(Vec::new()));
        class.add_function(ctor);

        let mut other = FunctionNode::new(TypeNode::new("void"), "reset", "public static");
        other.set_body(ScopeBlock::new(Vec::new()));
        class.add_function(other);

        assert!(class.find_function("Vector").unwrap().is_constructor);
        assert!(!class.find_function("reset").unwrap().is_constructor);
    }

    #[test]
    fn test_connect_wires_every_function() {
        let mut class = ClassNode::new("Math");
        let mut f = FunctionNode::new(TypeNode::new("int"), "f", "static");
        f.add_parameter(ParameterNode::new("a", TypeNode::new("int")));
        f.set_body(ScopeBlock::new(Vec::new()));
        class.add_function(f);

        class.connect().unwrap();
        let function = class.find_function("f").unwrap();
        assert_eq!(function.parent_class.as_deref(), Some("Math"));
        assert!(function.body.as_ref().unwrap().find_variable("a").is_some());
    }

    #[test]
    fn test_find_function_does_not_match_siblings() {
        let mut class = ClassNode::new("Math");
        let mut f = FunctionNode::new(TypeNode::new("int"), "f", "static");
        f.add_parameter(ParameterNode::new("a", TypeNode::new("int")));
        f.set_body(ScopeBlock::new(Vec::new()));
        class.add_function(f);

        let mut g = FunctionNode::new(TypeNode::new("int"), "g", "static");
        g.add_parameter(ParameterNode::new("b", TypeNode::new("int")));
        g.set_body(ScopeBlock::new(Vec::new()));
        class.add_function(g);

        // A parameter lookup on f never sees g's parameters.
        let f = class.find_function("f").unwrap();
        assert!(f.find_argument_variable("a").is_some());
        assert!(f.find_argument_variable("b").is_none());
    }
}
