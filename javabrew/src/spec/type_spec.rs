//! TypeSpec: class / interface / enum / record / annotation-type declaration
//!
//! Generalises instant-coffee's `JClassDecl` (`codegen.rs`), whose three
//! hand-written variants (`Class`, `Enum`, `EnumTaggedUnion`) each carried
//! their own copy of the "write fields, write constructor, write methods"
//! sequence. Here that sequence is one `emit` dispatched on `Kind`, with
//! member ordering/decoration delegated to the active [`crate::layout::Dialect`].

use crate::code_block::CodeBlock;
use crate::code_writer::CodeWriter;
use crate::error::{CodegenError, Result};
use crate::layout::{banner, Dialect};
use crate::spec::annotation_spec::AnnotationSpec;
use crate::spec::field_spec::FieldSpec;
use crate::spec::method_spec::{MethodName, MethodSpec};
use crate::spec::parameter_spec::ParameterSpec;
use crate::spec::Modifier;
use crate::type_name::{TypeRef, TypeVariable};
use crate::util::is_valid_java_identifier;
use std::collections::BTreeSet;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Kind {
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
}

impl Kind {
    fn keyword(self) -> &'static str {
        match self {
            Kind::Class => "class",
            Kind::Interface => "interface",
            Kind::Enum => "enum",
            Kind::Record => "record",
            Kind::AnnotationType => "@interface",
        }
    }

    fn implicit_field_modifiers(self) -> BTreeSet<Modifier> {
        match self {
            Kind::Interface | Kind::AnnotationType => {
                [Modifier::Public, Modifier::Static, Modifier::Final].into_iter().collect()
            }
            _ => BTreeSet::new(),
        }
    }

    fn implicit_method_modifiers(self) -> BTreeSet<Modifier> {
        match self {
            Kind::Interface => [Modifier::Public, Modifier::Abstract].into_iter().collect(),
            Kind::AnnotationType => [Modifier::Public, Modifier::Abstract].into_iter().collect(),
            _ => BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumConstant {
    pub(crate) name: String,
    pub(crate) args: CodeBlock,
    pub(crate) body: Option<Box<TypeSpec>>,
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub(crate) kind: Kind,
    pub(crate) name: String,
    pub(crate) modifiers: BTreeSet<Modifier>,
    pub(crate) type_variables: Vec<TypeVariable>,
    pub(crate) superclass: Option<TypeRef>,
    pub(crate) superinterfaces: Vec<TypeRef>,
    pub(crate) fields: Vec<FieldSpec>,
    pub(crate) methods: Vec<MethodSpec>,
    pub(crate) nested_types: Vec<TypeSpec>,
    pub(crate) enum_constants: Vec<EnumConstant>,
    pub(crate) record_components: Vec<ParameterSpec>,
    pub(crate) javadoc: Option<CodeBlock>,
    pub(crate) annotations: Vec<AnnotationSpec>,
}

impl TypeSpec {
    pub fn class_builder(name: impl Into<String>) -> Result<TypeSpecBuilder> {
        TypeSpecBuilder::new(Kind::Class, name)
    }

    pub fn interface_builder(name: impl Into<String>) -> Result<TypeSpecBuilder> {
        TypeSpecBuilder::new(Kind::Interface, name)
    }

    pub fn enum_builder(name: impl Into<String>) -> Result<TypeSpecBuilder> {
        TypeSpecBuilder::new(Kind::Enum, name)
    }

    pub fn record_builder(name: impl Into<String>) -> Result<TypeSpecBuilder> {
        TypeSpecBuilder::new(Kind::Record, name)
    }

    pub fn annotation_type_builder(name: impl Into<String>) -> Result<TypeSpecBuilder> {
        TypeSpecBuilder::new(Kind::AnnotationType, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn emit(&self, writer: &mut CodeWriter, dialect: Dialect) -> Result<()> {
        writer.push_type(self.name.clone(), self.nested_type_names());

        if let Some(doc) = &self.javadoc {
            writer.emit_javadoc(doc)?;
        }
        for ann in &self.annotations {
            ann.emit_standalone(writer)?;
        }
        for m in crate::spec::modifiers_to_emit(&self.modifiers, &BTreeSet::new()) {
            writer.emit_and_indent(&m.to_string())?;
            writer.emit_and_indent(" ")?;
        }
        writer.emit_and_indent(self.kind.keyword())?;
        writer.emit_and_indent(" ")?;
        writer.emit_and_indent(&self.name)?;

        if !self.type_variables.is_empty() {
            writer.emit_and_indent("<")?;
            for (idx, tv) in self.type_variables.iter().enumerate() {
                if idx > 0 {
                    writer.emit_and_indent(", ")?;
                }
                TypeRef::emit_type_variable_declaration(tv, writer)?;
            }
            writer.emit_and_indent(">")?;
        }

        if self.kind == Kind::Record {
            writer.emit_and_indent("(")?;
            for (idx, p) in self.record_components.iter().enumerate() {
                if idx > 0 {
                    writer.emit_and_indent(", ")?;
                }
                p.emit(writer)?;
            }
            writer.emit_and_indent(")")?;
        }

        if let Some(superclass) = &self.superclass {
            writer.emit_and_indent(" extends ")?;
            superclass.emit(writer)?;
        }
        if !self.superinterfaces.is_empty() {
            let keyword = if self.kind == Kind::Interface { " extends " } else { " implements " };
            writer.emit_and_indent(keyword)?;
            for (idx, iface) in self.superinterfaces.iter().enumerate() {
                if idx > 0 {
                    writer.emit_and_indent(", ")?;
                }
                iface.emit(writer)?;
            }
        }

        writer.emit_and_indent(" {\n")?;
        writer.indent();

        if self.kind == Kind::Enum {
            self.emit_enum_constants(writer)?;
        }

        match dialect {
            Dialect::JavaPoet => self.emit_members_insertion_order(writer)?,
            Dialect::Foundation => self.emit_members_foundation(writer)?,
        }

        writer.unindent();
        writer.emit_and_indent("}\n")?;

        writer.pop_type();
        Ok(())
    }

    fn nested_type_names(&self) -> Vec<String> {
        self.nested_types.iter().map(|t| t.name.clone()).collect()
    }

    fn emit_enum_constants(&self, writer: &mut CodeWriter) -> Result<()> {
        for (idx, constant) in self.enum_constants.iter().enumerate() {
            writer.emit_and_indent(&constant.name)?;
            if !constant.args.is_empty() {
                writer.emit_and_indent("(")?;
                writer.emit_code_block(&constant.args)?;
                writer.emit_and_indent(")")?;
            }
            if let Some(body) = &constant.body {
                writer.emit_and_indent(" {\n")?;
                writer.indent();
                body.emit_body_only(writer, Dialect::JavaPoet)?;
                writer.unindent();
                writer.emit_and_indent("}")?;
            }
            if idx + 1 == self.enum_constants.len() {
                writer.emit_and_indent(";\n")?;
            } else {
                writer.emit_and_indent(",\n")?;
            }
        }
        if self.enum_constants.is_empty() && (!self.fields.is_empty() || !self.methods.is_empty()) {
            writer.emit_and_indent(";\n")?;
        }
        Ok(())
    }

    /// Used for anonymous enum-constant bodies, which have no header of
    /// their own — only the member list.
    fn emit_body_only(&self, writer: &mut CodeWriter, dialect: Dialect) -> Result<()> {
        match dialect {
            Dialect::JavaPoet => self.emit_members_insertion_order(writer),
            Dialect::Foundation => self.emit_members_foundation(writer),
        }
    }

    fn emit_members_insertion_order(&self, writer: &mut CodeWriter) -> Result<()> {
        let field_implicit = self.kind.implicit_field_modifiers();
        let method_implicit = self.kind.implicit_method_modifiers();
        let is_annotation_type = self.kind == Kind::AnnotationType;

        for f in &self.fields {
            f.emit(writer, &field_implicit)?;
        }
        if !self.fields.is_empty() && (!self.methods.is_empty() || !self.nested_types.is_empty()) {
            writer.emit_and_indent("\n")?;
        }
        for (idx, m) in self.methods.iter().enumerate() {
            if idx > 0 {
                writer.emit_and_indent("\n")?;
            }
            m.emit(writer, &self.name, &method_implicit, is_annotation_type)?;
        }
        if !self.methods.is_empty() && !self.nested_types.is_empty() {
            writer.emit_and_indent("\n")?;
        }
        for (idx, nested) in self.nested_types.iter().enumerate() {
            if idx > 0 {
                writer.emit_and_indent("\n")?;
            }
            nested.emit(writer, Dialect::JavaPoet)?;
        }
        Ok(())
    }

    fn emit_members_foundation(&self, writer: &mut CodeWriter) -> Result<()> {
        let field_implicit = self.kind.implicit_field_modifiers();
        let method_implicit = self.kind.implicit_method_modifiers();
        let is_annotation_type = self.kind == Kind::AnnotationType;

        let mut static_fields: Vec<&FieldSpec> = self.fields.iter().filter(|f| f.modifiers().contains(&Modifier::Static)).collect();
        let mut instance_fields: Vec<&FieldSpec> = self.fields.iter().filter(|f| !f.modifiers().contains(&Modifier::Static)).collect();
        static_fields.sort_by_key(|f| f.name().to_lowercase());
        instance_fields.sort_by_key(|f| f.name().to_lowercase());

        let mut constructors: Vec<&MethodSpec> = Vec::new();
        let mut static_methods: Vec<&MethodSpec> = Vec::new();
        let mut instance_methods: Vec<&MethodSpec> = Vec::new();
        for m in &self.methods {
            match m.name() {
                MethodName::Constructor => constructors.push(m),
                MethodName::StaticInitializer => static_methods.push(m),
                MethodName::InstanceInitializer => instance_methods.push(m),
                MethodName::Normal(_) if m.modifiers().contains(&Modifier::Static) => static_methods.push(m),
                MethodName::Normal(_) => instance_methods.push(m),
            }
        }
        static_methods.sort_by_key(|m| m.sort_key());
        instance_methods.sort_by_key(|m| m.sort_key());

        let mut nested: Vec<&TypeSpec> = self.nested_types.iter().collect();
        nested.sort_by_key(|t| t.name.to_lowercase());

        let groups: Vec<(&str, usize)> = vec![
            ("STATIC FIELDS", static_fields.len()),
            ("FIELDS", instance_fields.len()),
            ("CONSTRUCTORS", constructors.len()),
            ("STATIC METHODS", static_methods.len()),
            ("METHODS", instance_methods.len()),
            ("NESTED TYPES", nested.len()),
        ];
        let mut first_group = true;
        for (label, _) in &groups {
            if !first_group {
                writer.emit_and_indent("\n")?;
            }
            match *label {
                "STATIC FIELDS" if !static_fields.is_empty() => {
                    writer.emit_and_indent(&banner(label))?;
                    for f in &static_fields {
                        f.emit(writer, &field_implicit)?;
                    }
                    first_group = false;
                }
                "FIELDS" if !instance_fields.is_empty() => {
                    writer.emit_and_indent(&banner(label))?;
                    for f in &instance_fields {
                        f.emit(writer, &field_implicit)?;
                    }
                    first_group = false;
                }
                "CONSTRUCTORS" if !constructors.is_empty() => {
                    writer.emit_and_indent(&banner(label))?;
                    for m in &constructors {
                        m.emit(writer, &self.name, &method_implicit, is_annotation_type)?;
                    }
                    first_group = false;
                }
                "STATIC METHODS" if !static_methods.is_empty() => {
                    writer.emit_and_indent(&banner(label))?;
                    for m in &static_methods {
                        m.emit(writer, &self.name, &method_implicit, is_annotation_type)?;
                    }
                    first_group = false;
                }
                "METHODS" if !instance_methods.is_empty() => {
                    writer.emit_and_indent(&banner(label))?;
                    for m in &instance_methods {
                        m.emit(writer, &self.name, &method_implicit, is_annotation_type)?;
                    }
                    first_group = false;
                }
                "NESTED TYPES" if !nested.is_empty() => {
                    writer.emit_and_indent(&banner(label))?;
                    for t in &nested {
                        t.emit(writer, Dialect::Foundation)?;
                    }
                    first_group = false;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

pub struct TypeSpecBuilder {
    kind: Kind,
    name: String,
    modifiers: BTreeSet<Modifier>,
    type_variables: Vec<TypeVariable>,
    superclass: Option<TypeRef>,
    superinterfaces: Vec<TypeRef>,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
    nested_types: Vec<TypeSpec>,
    enum_constants: Vec<EnumConstant>,
    record_components: Vec<ParameterSpec>,
    javadoc: Option<CodeBlock>,
    annotations: Vec<AnnotationSpec>,
}

impl TypeSpecBuilder {
    fn new(kind: Kind, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_valid_java_identifier(&name) {
            return Err(CodegenError::InvalidArgument(format!("`{}` is not a valid Java type name", name)));
        }
        Ok(TypeSpecBuilder {
            kind,
            name,
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            superclass: None,
            superinterfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            nested_types: Vec::new(),
            enum_constants: Vec::new(),
            record_components: Vec::new(),
            javadoc: None,
            annotations: Vec::new(),
        })
    }

    pub fn add_modifier(mut self, m: Modifier) -> Self {
        self.modifiers.insert(m);
        self
    }

    pub fn add_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn add_type_variable(mut self, tv: TypeVariable) -> Self {
        self.type_variables.push(tv);
        self
    }

    pub fn superclass(mut self, t: TypeRef) -> Result<Self> {
        if self.kind != Kind::Class {
            return Err(CodegenError::Unsupported(format!("{:?} cannot declare a superclass", self.kind)));
        }
        self.superclass = Some(t);
        Ok(self)
    }

    pub fn add_superinterface(mut self, t: TypeRef) -> Self {
        self.superinterfaces.push(t);
        self
    }

    pub fn add_field(mut self, f: FieldSpec) -> Self {
        self.fields.push(f);
        self
    }

    pub fn add_method(mut self, m: MethodSpec) -> Result<Self> {
        if matches!(m.name(), MethodName::Constructor) && self.kind == Kind::Interface {
            return Err(CodegenError::Unsupported("interfaces cannot declare constructors".into()));
        }
        self.methods.push(m);
        Ok(self)
    }

    pub fn add_nested_type(mut self, t: TypeSpec) -> Self {
        self.nested_types.push(t);
        self
    }

    pub fn add_enum_constant(mut self, name: impl Into<String>, args: CodeBlock, body: Option<TypeSpec>) -> Result<Self> {
        if self.kind != Kind::Enum {
            return Err(CodegenError::Unsupported(format!("{:?} cannot declare enum constants", self.kind)));
        }
        let name = name.into();
        if !is_valid_java_identifier(&name) {
            return Err(CodegenError::InvalidArgument(format!("`{}` is not a valid Java identifier", name)));
        }
        self.enum_constants.push(EnumConstant { name, args, body: body.map(Box::new) });
        Ok(self)
    }

    pub fn add_record_component(mut self, p: ParameterSpec) -> Result<Self> {
        if self.kind != Kind::Record {
            return Err(CodegenError::Unsupported(format!("{:?} cannot declare record components", self.kind)));
        }
        self.record_components.push(p);
        Ok(self)
    }

    pub fn javadoc(mut self, doc: CodeBlock) -> Self {
        self.javadoc = Some(doc);
        self
    }

    pub fn add_annotation(mut self, ann: AnnotationSpec) -> Self {
        self.annotations.push(ann);
        self
    }

    pub fn build(self) -> Result<TypeSpec> {
        Ok(TypeSpec {
            kind: self.kind,
            name: self.name,
            modifiers: self.modifiers,
            type_variables: self.type_variables,
            superclass: self.superclass,
            superinterfaces: self.superinterfaces,
            fields: self.fields,
            methods: self.methods,
            nested_types: self.nested_types,
            enum_constants: self.enum_constants,
            record_components: self.record_components,
            javadoc: self.javadoc,
            annotations: self.annotations,
        })
    }
}
