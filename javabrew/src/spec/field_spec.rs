//! FieldSpec: a single field declaration
//!
//! Generalises instant-coffee's `JField` (`codegen.rs`), which hard-coded a
//! single access modifier and a `&'static str` type/name pair, into a full
//! modifier set, annotations, Javadoc, and an optional initializer.

use crate::code_block::{Arg, CodeBlock};
use crate::code_writer::CodeWriter;
use crate::error::{CodegenError, Result};
use crate::spec::annotation_spec::AnnotationSpec;
use crate::spec::Modifier;
use crate::type_name::TypeRef;
use crate::util::is_valid_java_identifier;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub(crate) name: String,
    pub(crate) type_name: TypeRef,
    pub(crate) modifiers: BTreeSet<Modifier>,
    pub(crate) annotations: Vec<AnnotationSpec>,
    pub(crate) javadoc: Option<CodeBlock>,
    pub(crate) initializer: Option<CodeBlock>,
}

impl FieldSpec {
    pub fn builder(type_name: TypeRef, name: impl Into<String>) -> Result<FieldSpecBuilder> {
        let name = name.into();
        if !is_valid_java_identifier(&name) {
            return Err(CodegenError::InvalidArgument(format!("`{}` is not a valid Java identifier", name)));
        }
        Ok(FieldSpecBuilder {
            name,
            type_name,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            javadoc: None,
            initializer: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifiers(&self) -> &BTreeSet<Modifier> {
        &self.modifiers
    }

    pub(crate) fn emit(&self, writer: &mut CodeWriter, implicit_modifiers: &BTreeSet<Modifier>) -> Result<()> {
        if let Some(doc) = &self.javadoc {
            writer.emit_javadoc(doc)?;
        }
        for ann in &self.annotations {
            ann.emit_standalone(writer)?;
        }
        for m in crate::spec::modifiers_to_emit(&self.modifiers, implicit_modifiers) {
            writer.emit_and_indent(&m.to_string())?;
            writer.emit_and_indent(" ")?;
        }
        self.type_name.emit(writer)?;
        writer.emit_and_indent(" ")?;
        writer.emit_and_indent(&self.name)?;
        if let Some(init) = &self.initializer {
            writer.emit_and_indent(" = ")?;
            writer.emit_code_block(init)?;
        }
        writer.emit_and_indent(";\n")
    }
}

pub struct FieldSpecBuilder {
    name: String,
    type_name: TypeRef,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    javadoc: Option<CodeBlock>,
    initializer: Option<CodeBlock>,
}

impl FieldSpecBuilder {
    pub fn add_modifier(mut self, m: Modifier) -> Self {
        self.modifiers.insert(m);
        self
    }

    pub fn add_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn add_annotation(mut self, ann: AnnotationSpec) -> Self {
        self.annotations.push(ann);
        self
    }

    pub fn javadoc(mut self, doc: CodeBlock) -> Self {
        self.javadoc = Some(doc);
        self
    }

    pub fn initializer(mut self, format: &str, args: Vec<Arg>) -> Result<Self> {
        self.initializer = Some(CodeBlock::of(format, args)?);
        Ok(self)
    }

    pub fn initializer_block(mut self, block: CodeBlock) -> Self {
        self.initializer = Some(block);
        self
    }

    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            type_name: self.type_name,
            modifiers: self.modifiers,
            annotations: self.annotations,
            javadoc: self.javadoc,
            initializer: self.initializer,
        }
    }
}
