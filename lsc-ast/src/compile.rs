//! Whole-class compilation pipeline
//!
//! Functions are processed strictly sequentially: each one is lowered,
//! its basic blocks built, and its backend form emitted before the
//! next function begins.

use crate::class::ClassNode;
use lsc_cil::{translate_function, BasicBlockList, CilStream};
use lsc_codegen::TargetModule;
use lsc_common::CompilerError;
use log::debug;

/// Compile every function of a class into a fresh target module. The
/// statement stream is returned alongside the module for inspection.
pub fn compile_class(class: &mut ClassNode) -> Result<(CilStream, TargetModule), CompilerError> {
    class.connect()?;

    let mut cil = CilStream::new();
    let mut module = TargetModule::new();
    for function in &mut class.functions {
        let marker = function.compile_cil(&mut cil)?;
        let blocks = BasicBlockList::build(&mut cil, marker)?;
        translate_function(&cil, &blocks, &mut module)
            .map_err(|e| CompilerError::codegen_error(e.to_string()))?;
    }
    debug!(
        "compiled class {} ({} functions)",
        class.name,
        class.functions.len()
    );
    Ok((cil, module))
}
