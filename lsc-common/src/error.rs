//! Error handling for the Little Script compiler
//!
//! Two error classes exist. Invariant violations mean a malformed tree
//! or statement stream reached this stage and indicate a bug in an
//! earlier phase; compilation of the unit aborts. Unsupported features
//! are known gaps surfaced as a distinct variant so callers can tell
//! graceful rejection apart from a genuine invariant bug.

use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("invariant violation: {message}")]
    Invariant { message: String },

    #[error("not yet supported: {feature}")]
    Unsupported { feature: String },

    #[error("code generation error: {message}")]
    Codegen { message: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("internal compiler error: {message}")]
    Internal { message: String },
}

impl CompilerError {
    /// Create an invariant-violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        CompilerError::Invariant {
            message: message.into(),
        }
    }

    /// Create a structured not-yet-supported diagnostic
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CompilerError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create a codegen error
    pub fn codegen_error(message: impl Into<String>) -> Self {
        CompilerError::Codegen {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CompilerError::Internal {
            message: message.into(),
        }
    }

    /// Check whether this is a known gap rather than malformed input
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CompilerError::Unsupported { .. })
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::Io {
            message: err.to_string(),
        }
    }
}
