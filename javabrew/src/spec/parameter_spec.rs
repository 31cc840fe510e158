//! ParameterSpec: a single method/constructor/lambda parameter

use crate::code_writer::CodeWriter;
use crate::error::{CodegenError, Result};
use crate::spec::annotation_spec::AnnotationSpec;
use crate::spec::Modifier;
use crate::type_name::TypeRef;
use crate::util::is_valid_java_identifier;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub(crate) name: String,
    pub(crate) type_name: TypeRef,
    pub(crate) modifiers: BTreeSet<Modifier>,
    pub(crate) annotations: Vec<AnnotationSpec>,
    pub(crate) varargs: bool,
}

impl ParameterSpec {
    pub fn builder(type_name: TypeRef, name: impl Into<String>) -> Result<ParameterSpecBuilder> {
        let name = name.into();
        if !is_valid_java_identifier(&name) {
            return Err(CodegenError::InvalidArgument(format!("`{}` is not a valid Java identifier", name)));
        }
        Ok(ParameterSpecBuilder {
            name,
            type_name,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            varargs: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &TypeRef {
        &self.type_name
    }

    pub(crate) fn emit(&self, writer: &mut CodeWriter) -> Result<()> {
        for ann in &self.annotations {
            ann.emit_inline(writer)?;
            writer.emit_and_indent(" ")?;
        }
        for m in crate::spec::modifiers_to_emit(&self.modifiers, &BTreeSet::new()) {
            writer.emit_and_indent(&m.to_string())?;
            writer.emit_and_indent(" ")?;
        }
        if self.varargs {
            if let TypeRef::Array { component, .. } = &self.type_name {
                component.emit(writer)?;
                writer.emit_and_indent("...")?;
            } else {
                self.type_name.emit(writer)?;
            }
        } else {
            self.type_name.emit(writer)?;
        }
        writer.emit_and_indent(" ")?;
        writer.emit_and_indent(&self.name)
    }
}

pub struct ParameterSpecBuilder {
    name: String,
    type_name: TypeRef,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    varargs: bool,
}

impl ParameterSpecBuilder {
    pub fn add_modifier(mut self, m: Modifier) -> Self {
        self.modifiers.insert(m);
        self
    }

    pub fn add_annotation(mut self, ann: AnnotationSpec) -> Self {
        self.annotations.push(ann);
        self
    }

    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn build(self) -> ParameterSpec {
        ParameterSpec {
            name: self.name,
            type_name: self.type_name,
            modifiers: self.modifiers,
            annotations: self.annotations,
            varargs: self.varargs,
        }
    }
}
