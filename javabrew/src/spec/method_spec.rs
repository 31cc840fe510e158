//! MethodSpec: a method, constructor, static initializer, or instance
//! initializer block
//!
//! Generalises instant-coffee's `JMethod` (`codegen.rs`), which only modelled
//! `native` method declarations with no body, into full method bodies,
//! constructors, and initializer blocks, the way JavaPoet's `MethodSpec`
//! unifies them under one name-dispatch.

use crate::code_block::{Arg, CodeBlock};
use crate::code_writer::CodeWriter;
use crate::error::{CodegenError, Result};
use crate::spec::annotation_spec::AnnotationSpec;
use crate::spec::parameter_spec::ParameterSpec;
use crate::spec::Modifier;
use crate::type_name::{TypeRef, TypeVariable};
use crate::util::is_valid_java_identifier;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodName {
    Normal(String),
    Constructor,
    StaticInitializer,
    InstanceInitializer,
}

#[derive(Debug, Clone)]
pub struct MethodSpec {
    pub(crate) name: MethodName,
    pub(crate) type_variables: Vec<TypeVariable>,
    pub(crate) return_type: Option<TypeRef>,
    pub(crate) parameters: Vec<ParameterSpec>,
    pub(crate) varargs: bool,
    pub(crate) exceptions: Vec<TypeRef>,
    pub(crate) code: CodeBlock,
    pub(crate) modifiers: BTreeSet<Modifier>,
    pub(crate) annotations: Vec<AnnotationSpec>,
    pub(crate) javadoc: Option<CodeBlock>,
    pub(crate) default_value: Option<CodeBlock>,
}

impl MethodSpec {
    pub fn builder(name: impl Into<String>) -> Result<MethodSpecBuilder> {
        let name = name.into();
        if !is_valid_java_identifier(&name) {
            return Err(CodegenError::InvalidArgument(format!("`{}` is not a valid Java identifier", name)));
        }
        Ok(MethodSpecBuilder::new(MethodName::Normal(name)))
    }

    pub fn constructor_builder() -> MethodSpecBuilder {
        MethodSpecBuilder::new(MethodName::Constructor)
    }

    pub fn static_initializer_builder() -> MethodSpecBuilder {
        MethodSpecBuilder::new(MethodName::StaticInitializer)
    }

    pub fn instance_initializer_builder() -> MethodSpecBuilder {
        MethodSpecBuilder::new(MethodName::InstanceInitializer)
    }

    pub fn name(&self) -> &MethodName {
        &self.name
    }

    pub fn modifiers(&self) -> &BTreeSet<Modifier> {
        &self.modifiers
    }

    pub(crate) fn sort_key(&self) -> String {
        match &self.name {
            MethodName::Normal(n) => n.to_lowercase(),
            MethodName::Constructor => String::new(),
            MethodName::StaticInitializer => String::new(),
            MethodName::InstanceInitializer => String::new(),
        }
    }

    pub(crate) fn emit(
        &self,
        writer: &mut CodeWriter,
        enclosing_simple_name: &str,
        implicit_modifiers: &BTreeSet<Modifier>,
        is_annotation_type: bool,
    ) -> Result<()> {
        if let Some(doc) = &self.javadoc {
            writer.emit_javadoc(doc)?;
        }
        for ann in &self.annotations {
            ann.emit_standalone(writer)?;
        }

        match &self.name {
            MethodName::StaticInitializer => {
                writer.emit_and_indent("static {\n")?;
                writer.indent();
                writer.emit_code_block(&self.code)?;
                writer.unindent();
                return writer.emit_and_indent("}\n");
            }
            MethodName::InstanceInitializer => {
                writer.emit_and_indent("{\n")?;
                writer.indent();
                writer.emit_code_block(&self.code)?;
                writer.unindent();
                return writer.emit_and_indent("}\n");
            }
            _ => {}
        }

        for m in crate::spec::modifiers_to_emit(&self.modifiers, implicit_modifiers) {
            writer.emit_and_indent(&m.to_string())?;
            writer.emit_and_indent(" ")?;
        }
        if !self.type_variables.is_empty() {
            writer.emit_and_indent("<")?;
            for (idx, tv) in self.type_variables.iter().enumerate() {
                if idx > 0 {
                    writer.emit_and_indent(", ")?;
                }
                TypeRef::emit_type_variable_declaration(tv, writer)?;
            }
            writer.emit_and_indent("> ")?;
        }

        match &self.name {
            MethodName::Normal(n) => {
                if let Some(rt) = &self.return_type {
                    rt.emit(writer)?;
                    writer.emit_and_indent(" ")?;
                }
                writer.emit_and_indent(n)?;
            }
            MethodName::Constructor => {
                writer.emit_and_indent(enclosing_simple_name)?;
            }
            _ => unreachable!("initializer blocks handled above"),
        }

        writer.emit_and_indent("(")?;
        for (idx, p) in self.parameters.iter().enumerate() {
            if idx > 0 {
                writer.emit_and_indent(", ")?;
            }
            p.emit(writer)?;
        }
        writer.emit_and_indent(")")?;

        if !self.exceptions.is_empty() {
            writer.emit_and_indent(" throws ")?;
            for (idx, ex) in self.exceptions.iter().enumerate() {
                if idx > 0 {
                    writer.emit_and_indent(", ")?;
                }
                ex.emit(writer)?;
            }
        }

        if let Some(default_value) = &self.default_value {
            writer.emit_and_indent(" default ")?;
            writer.emit_code_block(default_value)?;
            return writer.emit_and_indent(";\n");
        }

        let has_body = !self.modifiers.contains(&Modifier::Abstract) && !is_annotation_type;
        if has_body {
            writer.emit_and_indent(" {\n")?;
            writer.indent();
            writer.emit_code_block(&self.code)?;
            writer.unindent();
            writer.emit_and_indent("}\n")
        } else {
            writer.emit_and_indent(";\n")
        }
    }
}

pub struct MethodSpecBuilder {
    name: MethodName,
    type_variables: Vec<TypeVariable>,
    return_type: Option<TypeRef>,
    parameters: Vec<ParameterSpec>,
    varargs: bool,
    exceptions: Vec<TypeRef>,
    code: CodeBlock,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    javadoc: Option<CodeBlock>,
    default_value: Option<CodeBlock>,
}

impl MethodSpecBuilder {
    fn new(name: MethodName) -> Self {
        MethodSpecBuilder {
            name,
            type_variables: Vec::new(),
            return_type: None,
            parameters: Vec::new(),
            varargs: false,
            exceptions: Vec::new(),
            code: CodeBlock::empty(),
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            javadoc: None,
            default_value: None,
        }
    }

    pub fn returns(mut self, type_name: TypeRef) -> Self {
        self.return_type = Some(type_name);
        self
    }

    pub fn add_type_variable(mut self, tv: TypeVariable) -> Self {
        self.type_variables.push(tv);
        self
    }

    pub fn add_parameter(mut self, p: ParameterSpec) -> Result<Self> {
        if self.varargs {
            return Err(CodegenError::InvalidArgument("varargs parameter must be last".into()));
        }
        self.varargs = p.varargs;
        self.parameters.push(p);
        Ok(self)
    }

    pub fn add_exception(mut self, t: TypeRef) -> Self {
        self.exceptions.push(t);
        self
    }

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

    pub fn add_code(mut self, format: &str, args: Vec<Arg>) -> Result<Self> {
        self.code.tokens.extend(CodeBlock::of(format, args)?.tokens);
        Ok(self)
    }

    pub fn add_statement(mut self, format: &str, args: Vec<Arg>) -> Result<Self> {
        let mut b = CodeBlock::builder();
        b.add_block(std::mem::take(&mut self.code));
        b.add_statement(format, args)?;
        self.code = b.build();
        Ok(self)
    }

    pub fn add_code_block(mut self, block: CodeBlock) -> Self {
        self.code.tokens.extend(block.tokens);
        self
    }

    pub fn default_value(mut self, format: &str, args: Vec<Arg>) -> Result<Self> {
        self.default_value = Some(CodeBlock::of(format, args)?);
        Ok(self)
    }

    pub fn build(self) -> Result<MethodSpec> {
        if matches!(self.name, MethodName::Constructor) && self.return_type.is_some() {
            return Err(CodegenError::InvalidArgument("constructors cannot declare a return type".into()));
        }
        Ok(MethodSpec {
            name: self.name,
            type_variables: self.type_variables,
            return_type: self.return_type,
            parameters: self.parameters,
            varargs: self.varargs,
            exceptions: self.exceptions,
            code: self.code,
            modifiers: self.modifiers,
            annotations: self.annotations,
            javadoc: self.javadoc,
            default_value: self.default_value,
        })
    }
}
