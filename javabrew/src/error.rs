//! Error types for the rendering engine
//!
//! Failures fall into five kinds: invalid-argument, structural-misuse,
//! name-allocation-conflict, unsupported-operation, and I/O. All but the
//! last are programming defects: the caller built something nonsensical and
//! the engine refuses to guess at a recovery.

use thiserror::Error;

/// Failure surfaced by any fallible operation in this crate
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Null/empty/malformed input where the operation requires otherwise
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Misuse of the format mini-language or statement-scope markers
    #[error("structural misuse: {0}")]
    StructuralMisuse(String),

    /// `NameAllocator::new_name` called twice for the same tag
    #[error("name allocation conflict for tag {tag:?}")]
    NameConflict { tag: String },

    /// Operation not defined for this variant (e.g. unboxing a non-boxed type)
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// The underlying sink rejected a write
    #[error("I/O failure writing generated source")]
    Io(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, CodegenError>;
