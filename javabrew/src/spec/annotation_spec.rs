//! AnnotationSpec: an `@Annotation(member = value, ...)` use site
//!
//! Declaration specs are plain value objects whose behaviour is captured by
//! their public builder contract alone; this module and its siblings under
//! `src/spec/` provide that contract, generalising instant-coffee's
//! `JField`/`JMethod` value objects (`codegen.rs`) which hard-coded one
//! access modifier and one primitive shape each.

use crate::code_block::{Arg, CodeBlock};
use crate::code_writer::CodeWriter;
use crate::error::Result;
use crate::type_name::TypeRef;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSpec {
    pub(crate) type_name: TypeRef,
    /// Ordered so that repeated member names (inside `@Repeatable` groups)
    /// stay in insertion order; values are already-rendered `CodeBlock`s so
    /// callers can embed `$S`, `$T`, nested annotations, arrays, etc.
    pub(crate) members: Vec<(String, CodeBlock)>,
}

impl AnnotationSpec {
    pub fn builder(type_name: TypeRef) -> AnnotationSpecBuilder {
        AnnotationSpecBuilder { type_name, members: Vec::new() }
    }

    pub fn of(type_name: TypeRef) -> AnnotationSpec {
        AnnotationSpec { type_name, members: Vec::new() }
    }

    pub fn type_name(&self) -> &TypeRef {
        &self.type_name
    }

    /// Render `@Type` or `@Type(member = value, ...)` onto one line — used
    /// for type-use annotations and parameter/inline annotation sites
    pub(crate) fn emit_inline(&self, writer: &mut CodeWriter) -> Result<()> {
        writer.emit_and_indent("@")?;
        self.type_name.emit(writer)?;
        if !self.members.is_empty() {
            writer.emit_and_indent("(")?;
            for (idx, (name, value)) in self.members.iter().enumerate() {
                if idx > 0 {
                    writer.emit_and_indent(", ")?;
                }
                if !(self.members.len() == 1 && name == "value") {
                    writer.emit_and_indent(name)?;
                    writer.emit_and_indent(" = ")?;
                }
                writer.emit_code_block(value)?;
            }
            writer.emit_and_indent(")")?;
        }
        Ok(())
    }

    /// Render as a standalone line, e.g. preceding a field/method/type
    pub(crate) fn emit_standalone(&self, writer: &mut CodeWriter) -> Result<()> {
        self.emit_inline(writer)?;
        writer.emit_and_indent("\n")
    }
}

pub struct AnnotationSpecBuilder {
    type_name: TypeRef,
    members: Vec<(String, CodeBlock)>,
}

impl AnnotationSpecBuilder {
    pub fn add_member(mut self, name: impl Into<String>, format: &str, args: Vec<Arg>) -> Result<Self> {
        let block = CodeBlock::of(format, args)?;
        self.members.push((name.into(), block));
        Ok(self)
    }

    pub fn add_member_block(mut self, name: impl Into<String>, block: CodeBlock) -> Self {
        self.members.push((name.into(), block));
        self
    }

    pub fn build(self) -> AnnotationSpec {
        AnnotationSpec { type_name: self.type_name, members: self.members }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_member_omits_name() {
        let ann = AnnotationSpec::builder(TypeRef::class("java.lang", "SuppressWarnings"))
            .add_member("value", "$S", vec![Arg::string("unchecked")])
            .unwrap()
            .build();
        assert_eq!(ann.members.len(), 1);
        assert_eq!(ann.members[0].0, "value");
    }
}
