//! Declaration specs: the value objects the render façade orchestrates
//!
//! Straightforward builders over ordered containers, frozen into an
//! immutable value struct on `build()`.

pub mod annotation_spec;
pub mod field_spec;
pub mod java_file;
pub mod method_spec;
pub mod parameter_spec;
pub mod type_spec;

use std::fmt;

/// Java modifier keywords, kept in the canonical emission order
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
    Sealed,
    NonSealed,
}

impl Modifier {
    /// Canonical Java Language Specification modifier order
    pub(crate) fn order(self) -> u8 {
        match self {
            Modifier::Public => 0,
            Modifier::Protected => 1,
            Modifier::Private => 2,
            Modifier::Abstract => 3,
            Modifier::Default => 4,
            Modifier::Static => 5,
            Modifier::Final => 6,
            Modifier::Sealed => 7,
            Modifier::NonSealed => 8,
            Modifier::Transient => 9,
            Modifier::Volatile => 10,
            Modifier::Synchronized => 11,
            Modifier::Native => 12,
            Modifier::Strictfp => 13,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
            Modifier::Sealed => "sealed",
            Modifier::NonSealed => "non-sealed",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Render `modifiers`, in canonical order, skipping any that are implicit
/// for the surrounding declaration kind (e.g. `public abstract` on an
/// interface method).
pub(crate) fn modifiers_to_emit(
    modifiers: &std::collections::BTreeSet<Modifier>,
    implicit: &std::collections::BTreeSet<Modifier>,
) -> Vec<Modifier> {
    let mut sorted: Vec<Modifier> = modifiers.iter().copied().filter(|m| !implicit.contains(m)).collect();
    sorted.sort_by_key(|m| m.order());
    sorted
}
