//! Common types used throughout the compiler
//!
//! This module defines data that is shared across multiple compiler
//! phases: the intrinsic type tags produced by type resolution and the
//! generators for compiler-introduced temporaries and labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label identifier for code generation
pub type LabelId = u32;

/// Temporary variable identifier for CIL
pub type TempId = u32;

/// Intrinsic type tags supplied by type resolution
///
/// Every declared type resolves to one of these before lowering. The
/// set is closed and matched exhaustively at each consumption site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntrinsicType {
    Void,
    Bool,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Reference to a user-defined class
    ClassRef(String),
}

impl IntrinsicType {
    /// Resolve a type name to its intrinsic tag. Unknown names are
    /// class references.
    pub fn from_name(name: &str) -> Self {
        match name {
            "void" => IntrinsicType::Void,
            "bool" => IntrinsicType::Bool,
            "int" => IntrinsicType::Int,
            "long" => IntrinsicType::Long,
            "float" => IntrinsicType::Float,
            "double" => IntrinsicType::Double,
            _ => IntrinsicType::ClassRef(name.to_string()),
        }
    }

    /// Short name used as the overload-mangling token for this type
    pub fn short_name(&self) -> &str {
        match self {
            IntrinsicType::Void => "void",
            IntrinsicType::Bool => "bool",
            IntrinsicType::Int => "int",
            IntrinsicType::Long => "long",
            IntrinsicType::Float => "float",
            IntrinsicType::Double => "double",
            IntrinsicType::ClassRef(name) => name,
        }
    }

    /// Check if this type is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            IntrinsicType::Int | IntrinsicType::Long | IntrinsicType::Float | IntrinsicType::Double
        )
    }

    /// Check if this type is a class reference
    pub fn is_reference(&self) -> bool {
        matches!(self, IntrinsicType::ClassRef(_))
    }
}

impl fmt::Display for IntrinsicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Label generator for code generation
#[derive(Debug, Clone, Default)]
pub struct LabelGenerator {
    next_id: LabelId,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Generate a new unique label
    pub fn new_label(&mut self) -> String {
        let label = format!("L{}", self.next_id);
        self.next_id += 1;
        label
    }
}

/// Temporary variable generator for CIL
#[derive(Debug, Clone, Default)]
pub struct TempGenerator {
    next_id: TempId,
}

impl TempGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Generate a new temporary variable ID
    pub fn new_temp(&mut self) -> TempId {
        let temp = self.next_id;
        self.next_id += 1;
        temp
    }
}
