//! Textual emission of target modules
//!
//! Renders a populated module into the human-readable listing consumed
//! by the driver and the test suite. Slot and block references resolve
//! to their declared names; out-of-range handles fall back to their raw
//! indices so a partially-built module still prints.

use crate::target::{TargetFunction, TargetInst, TargetModule};
use std::fmt::Write;

/// Render a whole module
pub fn emit_module(module: &TargetModule) -> String {
    let mut out = String::new();
    for function in &module.functions {
        out.push_str(&emit_function(function));
        out.push('\n');
    }
    out
}

fn emit_function(function: &TargetFunction) -> String {
    let mut out = String::new();
    let params = function
        .params
        .iter()
        .map(|p| format!("{} %{}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(
        out,
        "define {} @{}({}) {{",
        function.return_type, function.name, params
    );
    for slot in &function.slots {
        let _ = writeln!(out, "  slot %{}: {}", slot.name, slot.ty);
    }
    for block in &function.blocks {
        let _ = writeln!(out, "{}:", block.label);
        for inst in &block.instructions {
            let _ = writeln!(out, "  {}", emit_inst(function, inst));
        }
    }
    out.push_str("}\n");
    out
}

fn emit_inst(function: &TargetFunction, inst: &TargetInst) -> String {
    match inst {
        TargetInst::Load { result, slot } => {
            format!("%{} = load %{}", result.0, slot_name(function, slot.0))
        }
        TargetInst::Store { value, slot } => {
            format!("store {}, %{}", value, slot_name(function, slot.0))
        }
        TargetInst::Binary {
            result,
            op,
            lhs,
            rhs,
            ty,
        } => format!("%{} = {} {} {}, {}", result.0, op, ty, lhs, rhs),
        TargetInst::Branch { target } => format!("br {}", block_label(function, target.0)),
        TargetInst::CondBranch {
            condition,
            then_block,
            else_block,
        } => format!(
            "br {}, {}, {}",
            condition,
            block_label(function, then_block.0),
            block_label(function, else_block.0)
        ),
        TargetInst::Return { value: Some(value) } => format!("ret {}", value),
        TargetInst::Return { value: None } => "ret void".to_string(),
        TargetInst::Call {
            result: Some(result),
            callee,
            args,
            ty,
        } => format!("%{} = call {} @{}({})", result.0, ty, callee, emit_args(args)),
        TargetInst::Call {
            result: None,
            callee,
            args,
            ..
        } => format!("call void @{}({})", callee, emit_args(args)),
    }
}

fn emit_args(args: &[crate::target::TargetOperand]) -> String {
    args.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn slot_name(function: &TargetFunction, index: usize) -> String {
    match function.slots.get(index) {
        Some(slot) => slot.name.clone(),
        None => format!("s{}", index),
    }
}

fn block_label(function: &TargetFunction, index: usize) -> String {
    match function.blocks.get(index) {
        Some(block) => block.label.clone(),
        None => format!("b{}", index),
    }
}
