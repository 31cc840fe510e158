//! NameAllocator: scope-local identifier disambiguation
//!
//! Used by [`crate::code_writer::CodeWriter`] wherever a fresh identifier
//! must be synthesised (lambda parameters, parameters of methods overriding
//! a supertype method whose parameter names are unavailable).

use crate::error::{CodegenError, Result};
use crate::util::{is_java_keyword, sanitize_identifier};
use std::collections::HashMap;

/// A hashable, equatable tag identifying the logical "thing" a name was
/// allocated for (a parameter's declaring symbol, a variable's AST node id,
/// …). The caller picks whatever representation is convenient and stable.
pub type Tag = String;

#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    allocated: std::collections::HashSet<String>,
    tag_to_name: HashMap<Tag, String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh name for `suggestion`, bound to no tag
    pub fn new_name(&mut self, suggestion: &str) -> String {
        let name = self.synthesize(suggestion);
        self.allocated.insert(name.clone());
        name
    }

    /// Allocate a fresh name for `suggestion`, bound to `tag`
    ///
    /// Fails if `tag` is already bound. Nothing is mutated before the check,
    /// so the prior binding for `tag` is left untouched.
    pub fn new_name_tagged(&mut self, suggestion: &str, tag: impl Into<Tag>) -> Result<String> {
        let tag = tag.into();
        if self.tag_to_name.contains_key(&tag) {
            return Err(CodegenError::NameConflict { tag });
        }
        let name = self.synthesize(suggestion);
        self.allocated.insert(name.clone());
        self.tag_to_name.insert(tag, name.clone());
        Ok(name)
    }

    /// Look up the name previously allocated for `tag`
    pub fn get(&self, tag: &str) -> Result<&str> {
        self.tag_to_name
            .get(tag)
            .map(|s| s.as_str())
            .ok_or_else(|| CodegenError::InvalidArgument(format!("no name allocated for tag {:?}", tag)))
    }

    fn synthesize(&self, suggestion: &str) -> String {
        let mut candidate = sanitize_identifier(suggestion);
        if is_java_keyword(&candidate) {
            candidate.push('_');
        }
        while self.allocated.contains(&candidate) {
            candidate.push('_');
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_tagged_name() {
        let mut alloc = NameAllocator::new();
        let name = alloc.new_name_tagged("value", "tag1").unwrap();
        assert_eq!(alloc.get("tag1").unwrap(), name);
    }

    #[test]
    fn distinct_tags_get_distinct_names() {
        let mut alloc = NameAllocator::new();
        let a = alloc.new_name_tagged("value", "a").unwrap();
        let b = alloc.new_name_tagged("value", "b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn reused_tag_is_rejected() {
        let mut alloc = NameAllocator::new();
        alloc.new_name_tagged("value", "a").unwrap();
        assert!(alloc.new_name_tagged("other", "a").is_err());
        // prior binding is untouched
        assert_eq!(alloc.get("a").unwrap(), "value");
    }

    #[test]
    fn keyword_suggestion_gets_disambiguated() {
        let mut alloc = NameAllocator::new();
        let name = alloc.new_name("class");
        assert_ne!(name, "class");
        assert!(!is_java_keyword(&name));
    }

    #[test]
    fn all_allocated_names_are_valid_identifiers() {
        let mut alloc = NameAllocator::new();
        for s in ["1abc", "foo-bar", "", "do"] {
            let n = alloc.new_name(s);
            assert!(crate::util::is_valid_java_identifier(&n), "{:?} -> {:?}", s, n);
        }
    }
}
