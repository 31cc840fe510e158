//! Layout dialects
//!
//! Both dialects share the `CodeWriter` emit engine; they differ only in
//! per-type-kind member ordering and decoration, applied by
//! [`crate::spec::type_spec::TypeSpec::emit`].

/// Selects member ordering/decoration between two layout conventions:
/// insertion-order with no banner comments, or category-grouped with a
/// banner comment per group.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Dialect {
    /// Insertion-order members, brace-on-same-line, no banner comments.
    #[default]
    JavaPoet,
    /// Members grouped by category with a banner comment per non-empty
    /// group, case-insensitive sort within a group.
    Foundation,
}

impl Dialect {
    pub(crate) fn indent_unit(self) -> &'static str {
        match self {
            Dialect::JavaPoet => "  ",
            Dialect::Foundation => "    ",
        }
    }
}

/// A short, literal banner used by the Foundation dialect ahead of each
/// non-empty member category — deliberately plain text, not decorative art.
pub(crate) fn banner(label: &str) -> String {
    format!("// ---- {} ----\n", label)
}
