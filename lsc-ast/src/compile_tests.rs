// End-to-end tests over the full lowering/blocks/emission pipeline

#[cfg(test)]
mod tests {
    use crate::compile::compile_class;
    use crate::class::ClassNode;
    use crate::expressions::Expression;
    use crate::function::{FunctionNode, ParameterNode};
    use crate::ops::BinaryOp;
    use crate::samples;
    use crate::scope::ScopeBlock;
    use crate::statements::Statement;
    use crate::types::TypeNode;
    use lsc_cil::{BasicBlockList, CilStream, Instruction};
    use lsc_codegen::TargetType;
    use pretty_assertions::assert_eq;

    fn single_function_class(function: FunctionNode) -> ClassNode {
        let mut class = ClassNode::new("Math");
        class.add_function(function);
        class
    }

    #[test]
    fn test_add_end_to_end() {
        let mut class = single_function_class(samples::create_add_function());
        let (cil, module) = compile_class(&mut class).unwrap();

        // marker, entry label, two binds, one add, one ret
        assert_eq!(cil.len(), 6);

        let function = module.get_function("add_int_int").unwrap();
        assert_eq!(function.return_type, TargetType::I32);
        assert_eq!(function.params.len(), 2);
        assert_eq!(function.params[0].name, "a");
        assert_eq!(function.params[1].name, "b");
        assert_eq!(function.blocks.len(), 1);
        assert!(function.entry_block().unwrap().has_terminator());
    }

    #[test]
    fn test_add_single_block_bounds() {
        let mut function = samples::create_add_function();
        function.connect_parent("Math").unwrap();

        let mut cil = CilStream::new();
        let marker = function.compile_cil(&mut cil).unwrap();
        let blocks = BasicBlockList::build(&mut cil, marker).unwrap();

        assert_eq!(blocks.len(), 1);
        let block = blocks.first().unwrap();
        assert_eq!(block.begin, marker + 1);
        assert!(cil.get(block.begin).unwrap().is_label());
        let end = block.end.unwrap();
        assert!(matches!(cil.get(end), Some(Instruction::Ret { .. })));
    }

    #[test]
    fn test_max_branches_resolve() {
        let mut class = single_function_class(samples::create_max_function());
        let (_, module) = compile_class(&mut class).unwrap();

        let function = module.get_function("max_int_int").unwrap();
        // entry, else, then, join
        assert_eq!(function.blocks.len(), 4);
        for block in &function.blocks {
            assert!(block.has_terminator(), "block {} is open", block.label);
        }
    }

    #[test]
    fn test_dead_jump_removed_in_max() {
        // Both branches of max end in a return, so the jump emitted
        // after the then-branch is dead and must disappear; the one
        // after the else-branch targets a non-adjacent label and stays.
        let mut function = samples::create_max_function();
        function.connect_parent("Math").unwrap();

        let mut cil = CilStream::new();
        let marker = function.compile_cil(&mut cil).unwrap();
        let before = cil.len();
        BasicBlockList::build(&mut cil, marker).unwrap();
        assert_eq!(cil.len(), before - 1);
    }

    #[test]
    fn test_sum_to_loop_blocks() {
        let mut class = single_function_class(samples::create_sum_to_function());
        let (_, module) = compile_class(&mut class).unwrap();

        let function = module.get_function("sum_to_int").unwrap();
        // entry, loop body, loop test, exit
        assert_eq!(function.blocks.len(), 4);
        assert_eq!(function.params.len(), 1);
        assert_eq!(function.params[0].name, "n");
    }

    #[test]
    fn test_clamp_calls_sibling() {
        let mut class = ClassNode::new("Math");
        class.add_function(samples::create_max_function());
        class.add_function(samples::create_clamp_function());
        let (_, module) = compile_class(&mut class).unwrap();

        assert!(module.get_function("max_int_int").is_some());
        assert!(module.get_function("clamp_low_int_int").is_some());
    }

    #[test]
    fn test_greet_has_empty_prototype() {
        let mut class = single_function_class(samples::create_greet_function());
        let (_, module) = compile_class(&mut class).unwrap();

        let function = module.get_function("greet").unwrap();
        assert_eq!(function.params.len(), 0);
        assert_eq!(function.return_type, TargetType::Void);
        assert_eq!(function.blocks.len(), 1);
    }

    #[test]
    fn test_whole_class_compiles() {
        let mut class = samples::create_math_class();
        let (_, module) = compile_class(&mut class).unwrap();
        assert_eq!(module.functions.len(), 5);
    }

    #[test]
    fn test_leader_count_equals_label_count() {
        let mut function = samples::create_sum_to_function();
        function.connect_parent("Math").unwrap();

        let mut cil = CilStream::new();
        let marker = function.compile_cil(&mut cil).unwrap();
        let blocks = BasicBlockList::build(&mut cil, marker).unwrap();

        let labels = cil
            .statements()
            .iter()
            .filter(|s| s.is_label())
            .count();
        assert_eq!(blocks.len(), labels);

        // Block order equals label order in the stream.
        let mut previous = 0;
        for block in blocks.iter() {
            assert!(block.begin > previous || previous == 0);
            previous = block.begin;
        }
    }

    #[test]
    fn test_undeclared_variable_is_invariant_violation() {
        let mut function = FunctionNode::new(TypeNode::new("int"), "broken", "static");
        function.set_body(ScopeBlock::new(vec![Statement::ret(Some(
            Expression::var("missing"),
        ))]));
        let mut class = single_function_class(function);

        let err = compile_class(&mut class).unwrap_err();
        assert!(matches!(err, lsc_common::CompilerError::Invariant { .. }));
    }

    #[test]
    fn test_reference_typed_parameter_is_rejected_by_backend() {
        let mut function = FunctionNode::new(TypeNode::new("void"), "takes_ref", "static");
        function.add_parameter(ParameterNode::new("v", TypeNode::new("Vector")));
        function.set_body(ScopeBlock::new(Vec::new()));
        let mut class = single_function_class(function);

        let err = compile_class(&mut class).unwrap_err();
        assert!(matches!(err, lsc_common::CompilerError::Codegen { .. }));
    }

    #[test]
    fn test_nested_control_flow() {
        // while with an if inside: every block still closes.
        let mut function = FunctionNode::new(TypeNode::new("int"), "count_even", "static");
        function.add_parameter(ParameterNode::new("n", TypeNode::new("int")));
        function.set_body(ScopeBlock::new(vec![
            Statement::declare("count", TypeNode::new("int"), Some(Expression::int(0))),
            Statement::declare("i", TypeNode::new("int"), Some(Expression::int(0))),
            Statement::while_loop(
                Expression::binary(BinaryOp::Lt, Expression::var("i"), Expression::var("n")),
                vec![
                    Statement::if_else(
                        Expression::binary(
                            BinaryOp::Eq,
                            Expression::binary(
                                BinaryOp::Mod,
                                Expression::var("i"),
                                Expression::int(2),
                            ),
                            Expression::int(0),
                        ),
                        vec![Statement::assign(
                            "count",
                            Expression::binary(
                                BinaryOp::Add,
                                Expression::var("count"),
                                Expression::int(1),
                            ),
                        )],
                        Vec::new(),
                    ),
                    Statement::assign(
                        "i",
                        Expression::binary(BinaryOp::Add, Expression::var("i"), Expression::int(1)),
                    ),
                ],
            ),
            Statement::ret(Some(Expression::var("count"))),
        ]));
        let mut class = single_function_class(function);

        let (_, module) = compile_class(&mut class).unwrap();
        let function = module.get_function("count_even_int").unwrap();
        for block in &function.blocks {
            assert!(block.has_terminator(), "block {} is open", block.label);
        }
    }
}
