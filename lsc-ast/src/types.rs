//! Type annotation nodes
//!
//! A type node pairs the written type name with its resolved intrinsic
//! tag. Resolution happens when the node is built; the only late
//! resolution is the receiver placeholder, which is fixed up during the
//! connect phase once the enclosing class is known.

use lsc_common::IntrinsicType;
use serde::{Deserialize, Serialize};

/// Name of the synthetic receiver parameter and its placeholder type
pub const RECEIVER_NAME: &str = "this";

/// A resolved type annotation on a declaration, parameter, or return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    pub name: String,
    pub intrinsic: IntrinsicType,
}

impl TypeNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            intrinsic: IntrinsicType::from_name(name),
        }
    }

    /// Whether this is the unresolved receiver placeholder
    pub fn is_receiver_placeholder(&self) -> bool {
        self.name == RECEIVER_NAME
    }

    /// Resolve the receiver placeholder to the enclosing class
    pub(crate) fn resolve_receiver(&mut self, class_name: &str) {
        if self.is_receiver_placeholder() {
            self.name = class_name.to_string();
            self.intrinsic = IntrinsicType::ClassRef(class_name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsic_resolution_at_construction() {
        assert_eq!(TypeNode::new("int").intrinsic, IntrinsicType::Int);
        assert_eq!(TypeNode::new("void").intrinsic, IntrinsicType::Void);
        assert_eq!(
            TypeNode::new("Vector").intrinsic,
            IntrinsicType::ClassRef("Vector".to_string())
        );
    }

    #[test]
    fn test_receiver_resolution() {
        let mut ty = TypeNode::new(RECEIVER_NAME);
        assert!(ty.is_receiver_placeholder());

        ty.resolve_receiver("Math");
        assert_eq!(ty.name, "Math");
        assert_eq!(ty.intrinsic, IntrinsicType::ClassRef("Math".to_string()));
        assert!(!ty.is_receiver_placeholder());
    }

    #[test]
    fn test_non_placeholder_is_untouched() {
        let mut ty = TypeNode::new("int");
        ty.resolve_receiver("Math");
        assert_eq!(ty.intrinsic, IntrinsicType::Int);
    }
}
