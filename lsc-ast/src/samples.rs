//! Built-in demo programs
//!
//! Hand-assembled classes used by the driver and the integration
//! tests while the parser front end is developed separately.

use crate::class::ClassNode;
use crate::expressions::Expression;
use crate::function::{FunctionNode, ParameterNode};
use crate::ops::BinaryOp;
use crate::scope::ScopeBlock;
use crate::statements::Statement;
use crate::types::TypeNode;
use lsc_common::IntrinsicType;

/// `static int add(int a, int b) { return a + b; }`
pub fn create_add_function() -> FunctionNode {
    let mut function = FunctionNode::new(TypeNode::new("int"), "add", "public static");
    function.add_parameter(ParameterNode::new("a", TypeNode::new("int")));
    function.add_parameter(ParameterNode::new("b", TypeNode::new("int")));
    function.set_body(ScopeBlock::new(vec![Statement::ret(Some(
        Expression::binary(BinaryOp::Add, Expression::var("a"), Expression::var("b")),
    ))]));
    function
}

/// `static int max(int a, int b) { if (a > b) return a; else return b; }`
pub fn create_max_function() -> FunctionNode {
    let mut function = FunctionNode::new(TypeNode::new("int"), "max", "public static");
    function.add_parameter(ParameterNode::new("a", TypeNode::new("int")));
    function.add_parameter(ParameterNode::new("b", TypeNode::new("int")));
    function.set_body(ScopeBlock::new(vec![Statement::if_else(
        Expression::binary(BinaryOp::Gt, Expression::var("a"), Expression::var("b")),
        vec![Statement::ret(Some(Expression::var("a")))],
        vec![Statement::ret(Some(Expression::var("b")))],
    )]));
    function
}

/// `static int sum_to(int n)` -- sums 1..=n with a while loop
pub fn create_sum_to_function() -> FunctionNode {
    let mut function = FunctionNode::new(TypeNode::new("int"), "sum_to", "public static");
    function.add_parameter(ParameterNode::new("n", TypeNode::new("int")));
    function.set_body(ScopeBlock::new(vec![
        Statement::declare("total", TypeNode::new("int"), Some(Expression::int(0))),
        Statement::declare("i", TypeNode::new("int"), Some(Expression::int(1))),
        Statement::while_loop(
            Expression::binary(BinaryOp::Le, Expression::var("i"), Expression::var("n")),
            vec![
                Statement::assign(
                    "total",
                    Expression::binary(
                        BinaryOp::Add,
                        Expression::var("total"),
                        Expression::var("i"),
                    ),
                ),
                Statement::assign(
                    "i",
                    Expression::binary(BinaryOp::Add, Expression::var("i"), Expression::int(1)),
                ),
            ],
        ),
        Statement::ret(Some(Expression::var("total"))),
    ]));
    function
}

/// `static int clamp_low(int v, int lo) { return max(v, lo); }`
pub fn create_clamp_function() -> FunctionNode {
    let mut function = FunctionNode::new(TypeNode::new("int"), "clamp_low", "public static");
    function.add_parameter(ParameterNode::new("v", TypeNode::new("int")));
    function.add_parameter(ParameterNode::new("lo", TypeNode::new("int")));
    function.set_body(ScopeBlock::new(vec![Statement::ret(Some(
        Expression::call(
            "max",
            vec![Expression::var("v"), Expression::var("lo")],
            IntrinsicType::Int,
        ),
    ))]));
    function
}

/// `static void greet() {}` -- zero parameters, empty body
pub fn create_greet_function() -> FunctionNode {
    let mut function = FunctionNode::new(TypeNode::new("void"), "greet", "public static");
    function.set_body(ScopeBlock::new(Vec::new()));
    function
}

/// A class holding every demo function
pub fn create_math_class() -> ClassNode {
    let mut class = ClassNode::new("Math");
    class.add_function(create_add_function());
    class.add_function(create_max_function());
    class.add_function(create_sum_to_function());
    class.add_function(create_clamp_function());
    class.add_function(create_greet_function());
    class
}
