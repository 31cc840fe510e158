//! TypeRef: the algebraic representation of every Java type reference
//!
//! Mirrors JavaPoet's `TypeName` family (`ClassName`, `ArrayTypeName`,
//! `ParameterizedTypeName`, `TypeVariableName`, `WildcardTypeName`) collapsed
//! into one closed sum type, the way `JClassDecl` in instant-coffee's
//! `codegen.rs` collapses class/enum/tagged-union into one enum dispatched
//! on `emit`.

use crate::code_writer::CodeWriter;
use crate::error::{CodegenError, Result};
use crate::spec::annotation_spec::AnnotationSpec;
use std::fmt::Write;

/// The nine Java primitive/void kinds
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    Void,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// `(package, simple name)` of the boxed form in `java.lang`
    fn boxed_name(self) -> (&'static str, &'static str) {
        match self {
            PrimitiveKind::Void => ("java.lang", "Void"),
            PrimitiveKind::Boolean => ("java.lang", "Boolean"),
            PrimitiveKind::Byte => ("java.lang", "Byte"),
            PrimitiveKind::Short => ("java.lang", "Short"),
            PrimitiveKind::Int => ("java.lang", "Integer"),
            PrimitiveKind::Long => ("java.lang", "Long"),
            PrimitiveKind::Char => ("java.lang", "Character"),
            PrimitiveKind::Float => ("java.lang", "Float"),
            PrimitiveKind::Double => ("java.lang", "Double"),
        }
    }

    fn unbox_from(simple_name: &str) -> Option<PrimitiveKind> {
        Some(match simple_name {
            "Void" => PrimitiveKind::Void,
            "Boolean" => PrimitiveKind::Boolean,
            "Byte" => PrimitiveKind::Byte,
            "Short" => PrimitiveKind::Short,
            "Integer" => PrimitiveKind::Int,
            "Long" => PrimitiveKind::Long,
            "Character" => PrimitiveKind::Char,
            "Float" => PrimitiveKind::Float,
            "Double" => PrimitiveKind::Double,
            _ => return None,
        })
    }
}

/// A class reference: `package` plus outer-to-inner nested simple names
#[derive(Debug, Clone)]
pub struct ClassRef {
    pub package: String,
    pub simple_names: Vec<String>,
    pub annotations: Vec<AnnotationSpec>,
}

impl ClassRef {
    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_names.join(".")
        } else {
            format!("{}.{}", self.package, self.simple_names.join("."))
        }
    }

    pub fn reflection_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_names.join("$")
        } else {
            format!("{}.{}", self.package, self.simple_names.join("$"))
        }
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names.last().expect("non-empty by construction")
    }

    pub fn nested(&self, name: impl Into<String>) -> ClassRef {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name.into());
        ClassRef { package: self.package.clone(), simple_names, annotations: Vec::new() }
    }
}

/// A wildcard's bound set: invariant — exactly one side is non-empty
#[derive(Debug, Clone)]
pub struct Wildcard {
    pub upper_bounds: Vec<TypeRef>,
    pub lower_bounds: Vec<TypeRef>,
}

#[derive(Debug, Clone)]
pub struct Parameterized {
    pub raw: ClassRef,
    pub args: Vec<TypeRef>,
    pub enclosing: Option<Box<TypeRef>>,
    pub annotations: Vec<AnnotationSpec>,
}

#[derive(Debug, Clone)]
pub struct TypeVariable {
    pub name: String,
    pub bounds: Vec<TypeRef>,
    pub annotations: Vec<AnnotationSpec>,
}

/// The closed sum type of every Java type reference
#[derive(Debug, Clone)]
pub enum TypeRef {
    Primitive { kind: PrimitiveKind },
    ClassRef(ClassRef),
    Array { component: Box<TypeRef>, annotations: Vec<AnnotationSpec> },
    Parameterized(Parameterized),
    TypeVariable(TypeVariable),
    Wildcard { bounds: Wildcard, annotations: Vec<AnnotationSpec> },
}

impl TypeRef {
    pub const VOID: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Void };
    pub const BOOLEAN: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Boolean };
    pub const BYTE: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Byte };
    pub const SHORT: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Short };
    pub const INT: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Int };
    pub const LONG: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Long };
    pub const CHAR: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Char };
    pub const FLOAT: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Float };
    pub const DOUBLE: TypeRef = TypeRef::Primitive { kind: PrimitiveKind::Double };

    /// A top-level class reference, e.g. `TypeRef::class("java.util", "List")`
    pub fn class(package: impl Into<String>, simple_name: impl Into<String>) -> TypeRef {
        TypeRef::ClassRef(ClassRef {
            package: package.into(),
            simple_names: vec![simple_name.into()],
            annotations: Vec::new(),
        })
    }

    /// A class reference with explicit outer-to-inner nesting, e.g.
    /// `TypeRef::class_nested("java.util", ["Map", "Entry"])`
    pub fn class_nested(package: impl Into<String>, simple_names: Vec<String>) -> Result<TypeRef> {
        if simple_names.is_empty() {
            return Err(CodegenError::InvalidArgument("class reference needs at least one simple name".into()));
        }
        Ok(TypeRef::ClassRef(ClassRef { package: package.into(), simple_names, annotations: Vec::new() }))
    }

    pub fn array_of(component: TypeRef) -> TypeRef {
        TypeRef::Array { component: Box::new(component), annotations: Vec::new() }
    }

    pub fn type_variable(name: impl Into<String>, bounds: Vec<TypeRef>) -> TypeRef {
        TypeRef::TypeVariable(TypeVariable { name: name.into(), bounds, annotations: Vec::new() })
    }

    /// `? extends bound`; canonicalises `? extends java.lang.Object` to bare `?`
    pub fn subtype_of(bound: TypeRef) -> TypeRef {
        if bound.canonical_name_if_class() == Some("java.lang.Object".to_string()) {
            return TypeRef::Wildcard { bounds: Wildcard { upper_bounds: vec![], lower_bounds: vec![] }, annotations: Vec::new() };
        }
        TypeRef::Wildcard { bounds: Wildcard { upper_bounds: vec![bound], lower_bounds: vec![] }, annotations: Vec::new() }
    }

    /// `? super bound`
    pub fn supertype_of(bound: TypeRef) -> TypeRef {
        TypeRef::Wildcard { bounds: Wildcard { upper_bounds: vec![], lower_bounds: vec![bound] }, annotations: Vec::new() }
    }

    /// Bare `?`
    pub fn wildcard_any() -> TypeRef {
        TypeRef::Wildcard { bounds: Wildcard { upper_bounds: vec![], lower_bounds: vec![] }, annotations: Vec::new() }
    }

    fn canonical_name_if_class(&self) -> Option<String> {
        match self {
            TypeRef::ClassRef(c) => Some(c.canonical_name()),
            _ => None,
        }
    }

    /// Turn a `ClassRef` into a `Parameterized` over `args`
    pub fn parameterized_by(self, args: Vec<TypeRef>) -> Result<TypeRef> {
        match self {
            TypeRef::ClassRef(raw) => Ok(TypeRef::Parameterized(Parameterized { raw, args, enclosing: None, annotations: Vec::new() })),
            other => Err(CodegenError::InvalidArgument(format!("cannot parameterize non-class type {:?}", other))),
        }
    }

    pub fn annotated(&self, anns: Vec<AnnotationSpec>) -> TypeRef {
        let mut copy = self.clone();
        match &mut copy {
            TypeRef::Primitive { .. } => {
                // Bare primitives never carry annotations; box first if annotation is needed.
            }
            TypeRef::ClassRef(c) => c.annotations = anns,
            TypeRef::Array { annotations, .. } => *annotations = anns,
            TypeRef::Parameterized(p) => p.annotations = anns,
            TypeRef::TypeVariable(t) => t.annotations = anns,
            TypeRef::Wildcard { annotations, .. } => *annotations = anns,
        }
        copy
    }

    pub fn without_annotations(&self) -> TypeRef {
        self.annotated(Vec::new())
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        match self {
            TypeRef::Primitive { .. } => &[],
            TypeRef::ClassRef(c) => &c.annotations,
            TypeRef::Array { annotations, .. } => annotations,
            TypeRef::Parameterized(p) => &p.annotations,
            TypeRef::TypeVariable(t) => &t.annotations,
            TypeRef::Wildcard { annotations, .. } => annotations,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive { .. })
    }

    /// True if this is the `java.lang` boxed form of some primitive
    pub fn is_boxed_primitive(&self) -> bool {
        match self {
            TypeRef::ClassRef(c) if c.package == "java.lang" && c.simple_names.len() == 1 => {
                PrimitiveKind::unbox_from(&c.simple_names[0]).is_some()
            }
            _ => false,
        }
    }

    /// Primitive → boxed `java.lang` class; identity on everything else
    pub fn box_type(&self) -> TypeRef {
        match self {
            TypeRef::Primitive { kind } => {
                let (pkg, name) = kind.boxed_name();
                TypeRef::class(pkg, name)
            }
            other => other.clone(),
        }
    }

    /// Boxed `java.lang` class → primitive; fails when not applicable
    pub fn unbox(&self) -> Result<TypeRef> {
        match self {
            TypeRef::Primitive { .. } => Ok(self.clone()),
            TypeRef::ClassRef(c) if c.package == "java.lang" && c.simple_names.len() == 1 => {
                PrimitiveKind::unbox_from(&c.simple_names[0])
                    .map(|kind| TypeRef::Primitive { kind })
                    .ok_or_else(|| CodegenError::Unsupported(format!("{} is not a boxed primitive", c.canonical_name())))
            }
            other => Err(CodegenError::Unsupported(format!("{:?} is not a boxed primitive", other))),
        }
    }

    /// Append a nested simple name; only valid on `ClassRef`/`Parameterized`.
    /// On a `Parameterized` receiver the outer parameterization is kept as
    /// the result's `enclosing` type (`Outer<T>.Inner`), not dropped.
    pub fn nested(&self, name: impl Into<String>) -> Result<TypeRef> {
        match self {
            TypeRef::ClassRef(c) => Ok(TypeRef::ClassRef(c.nested(name))),
            TypeRef::Parameterized(p) => Ok(TypeRef::Parameterized(Parameterized {
                raw: p.raw.nested(name),
                args: Vec::new(),
                enclosing: Some(Box::new(TypeRef::Parameterized(p.clone()))),
                annotations: Vec::new(),
            })),
            other => Err(CodegenError::InvalidArgument(format!("cannot nest a simple name on {:?}", other))),
        }
    }

    /// Append a nested simple name parameterized by `args`, e.g.
    /// `outer.nested_with_args("Inner", vec![u])` for `Outer<T>.Inner<U>`.
    /// On a `Parameterized` receiver the outer parameterization becomes the
    /// result's `enclosing` type, same as [`TypeRef::nested`].
    pub fn nested_with_args(&self, name: impl Into<String>, args: Vec<TypeRef>) -> Result<TypeRef> {
        match self {
            TypeRef::ClassRef(c) => Ok(TypeRef::Parameterized(Parameterized {
                raw: c.nested(name),
                args,
                enclosing: None,
                annotations: Vec::new(),
            })),
            TypeRef::Parameterized(p) => Ok(TypeRef::Parameterized(Parameterized {
                raw: p.raw.nested(name),
                args,
                enclosing: Some(Box::new(TypeRef::Parameterized(p.clone()))),
                annotations: Vec::new(),
            })),
            other => Err(CodegenError::InvalidArgument(format!("cannot nest a simple name on {:?}", other))),
        }
    }

    pub fn canonical_name(&self) -> String {
        match self {
            TypeRef::Primitive { kind } => kind.keyword().to_string(),
            TypeRef::ClassRef(c) => c.canonical_name(),
            TypeRef::Array { component, .. } => format!("{}[]", component.canonical_name()),
            TypeRef::Parameterized(p) => {
                let args: Vec<_> = p.args.iter().map(|a| a.canonical_name()).collect();
                format!("{}<{}>", p.raw.canonical_name(), args.join(", "))
            }
            TypeRef::TypeVariable(t) => t.name.clone(),
            TypeRef::Wildcard { .. } => "?".to_string(),
        }
    }

    pub fn reflection_name(&self) -> String {
        match self {
            TypeRef::ClassRef(c) => c.reflection_name(),
            TypeRef::Array { component, .. } => format!("{}[]", component.reflection_name()),
            TypeRef::Parameterized(p) => p.raw.reflection_name(),
            other => other.canonical_name(),
        }
    }

    /// Emit this type reference through `writer`, shortening class names via
    /// [`CodeWriter::lookup_name`] as needed
    pub(crate) fn emit(&self, writer: &mut CodeWriter) -> Result<()> {
        self.emit_annotations(writer)?;
        match self {
            TypeRef::Primitive { kind } => writer.emit_and_indent(kind.keyword()),
            TypeRef::ClassRef(c) => {
                let name = writer.lookup_name(c)?;
                writer.emit_and_indent(&name)
            }
            TypeRef::Array { component, .. } => {
                component.emit(writer)?;
                writer.emit_and_indent("[]")
            }
            TypeRef::Parameterized(p) => {
                if let Some(enclosing) = &p.enclosing {
                    enclosing.emit(writer)?;
                    writer.emit_and_indent(".")?;
                    writer.emit_and_indent(p.raw.simple_name())?;
                } else {
                    let name = writer.lookup_name(&p.raw)?;
                    writer.emit_and_indent(&name)?;
                }
                writer.emit_and_indent("<")?;
                for (idx, arg) in p.args.iter().enumerate() {
                    if idx > 0 {
                        writer.emit_and_indent(", ")?;
                    }
                    arg.emit(writer)?;
                }
                writer.emit_and_indent(">")
            }
            TypeRef::TypeVariable(t) => writer.emit_and_indent(&t.name),
            TypeRef::Wildcard { bounds, .. } => {
                if !bounds.lower_bounds.is_empty() {
                    writer.emit_and_indent("? super ")?;
                    bounds.lower_bounds[0].emit(writer)
                } else if !bounds.upper_bounds.is_empty() {
                    writer.emit_and_indent("? extends ")?;
                    bounds.upper_bounds[0].emit(writer)
                } else {
                    writer.emit_and_indent("?")
                }
            }
        }
    }

    fn emit_annotations(&self, writer: &mut CodeWriter) -> Result<()> {
        for ann in self.annotations() {
            ann.emit_inline(writer)?;
            writer.emit_and_indent(" ")?;
        }
        Ok(())
    }

    /// Emit the declaration form of a type variable: `Name [extends B1 & B2]`
    pub(crate) fn emit_type_variable_declaration(t: &TypeVariable, writer: &mut CodeWriter) -> Result<()> {
        writer.emit_and_indent(&t.name)?;
        let real_bounds: Vec<&TypeRef> = t
            .bounds
            .iter()
            .filter(|b| b.canonical_name_if_class().as_deref() != Some("java.lang.Object"))
            .collect();
        if !real_bounds.is_empty() {
            writer.emit_and_indent(" extends ")?;
            for (idx, bound) in real_bounds.iter().enumerate() {
                if idx > 0 {
                    writer.emit_and_indent(" & ")?;
                }
                bound.emit(writer)?;
            }
        }
        Ok(())
    }
}

/// Structural equality ignoring annotation ordering within one level
impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeRef::Primitive { kind: a }, TypeRef::Primitive { kind: b }) => a == b,
            (TypeRef::ClassRef(a), TypeRef::ClassRef(b)) => {
                a.package == b.package && a.simple_names == b.simple_names && anns_eq(&a.annotations, &b.annotations)
            }
            (TypeRef::Array { component: a, annotations: aa }, TypeRef::Array { component: b, annotations: ba }) => {
                a == b && anns_eq(aa, ba)
            }
            (TypeRef::Parameterized(a), TypeRef::Parameterized(b)) => {
                a.raw.package == b.raw.package
                    && a.raw.simple_names == b.raw.simple_names
                    && a.args == b.args
                    && a.enclosing == b.enclosing
                    && anns_eq(&a.annotations, &b.annotations)
            }
            (TypeRef::TypeVariable(a), TypeRef::TypeVariable(b)) => {
                a.name == b.name && a.bounds == b.bounds && anns_eq(&a.annotations, &b.annotations)
            }
            (TypeRef::Wildcard { bounds: a, annotations: aa }, TypeRef::Wildcard { bounds: b, annotations: ba }) => {
                a.upper_bounds == b.upper_bounds && a.lower_bounds == b.lower_bounds && anns_eq(aa, ba)
            }
            _ => false,
        }
    }
}
impl Eq for TypeRef {}

fn anns_eq(a: &[AnnotationSpec], b: &[AnnotationSpec]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut remaining: Vec<&AnnotationSpec> = b.iter().collect();
    for item in a {
        if let Some(pos) = remaining.iter().position(|r| *r == item) {
            remaining.remove(pos);
        } else {
            return false;
        }
    }
    true
}

/// Escape a string literal the way Java's `$S` directive requires
pub(crate) fn escape_java_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 || (c as u32) == 0x7F => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxing_round_trip_primitive() {
        for kind in [
            PrimitiveKind::Boolean,
            PrimitiveKind::Byte,
            PrimitiveKind::Short,
            PrimitiveKind::Int,
            PrimitiveKind::Long,
            PrimitiveKind::Char,
            PrimitiveKind::Float,
            PrimitiveKind::Double,
        ] {
            let p = TypeRef::Primitive { kind };
            assert_eq!(p.box_type().unbox().unwrap(), p);
        }
    }

    #[test]
    fn boxing_round_trip_boxed() {
        let b = TypeRef::class("java.lang", "Integer");
        assert_eq!(b.unbox().unwrap().box_type(), b);
    }

    #[test]
    fn unbox_fails_on_non_boxed() {
        let t = TypeRef::class("java.util", "List");
        assert!(t.unbox().is_err());
    }

    #[test]
    fn wildcard_extends_object_canonicalises() {
        let w = TypeRef::subtype_of(TypeRef::class("java.lang", "Object"));
        assert_eq!(w.canonical_name(), "?");
    }

    #[test]
    fn annotation_purity() {
        let t = TypeRef::class("java.lang", "String");
        let annotated = t.annotated(vec![]);
        assert_eq!(annotated.without_annotations(), t.without_annotations());
    }

    #[test]
    fn canonical_vs_reflection_name() {
        let t = TypeRef::class_nested("java.util", vec!["Map".into(), "Entry".into()]).unwrap();
        assert_eq!(t.canonical_name(), "java.util.Map.Entry");
        assert_eq!(t.reflection_name(), "java.util.Map$Entry");
    }

    #[test]
    fn nested_on_parameterized_keeps_enclosing() {
        let outer = TypeRef::class("com.example", "Outer")
            .parameterized_by(vec![TypeRef::class("java.lang", "String")])
            .unwrap();
        let inner = outer.nested("Inner").unwrap();
        match &inner {
            TypeRef::Parameterized(p) => {
                assert_eq!(p.raw.simple_name(), "Inner");
                assert!(p.args.is_empty());
                assert_eq!(p.enclosing.as_deref(), Some(&outer));
            }
            other => panic!("expected Parameterized, got {:?}", other),
        }
    }

    #[test]
    fn nested_with_args_parameterizes_both_levels() {
        let outer = TypeRef::class("com.example", "Outer")
            .parameterized_by(vec![TypeRef::class("java.lang", "String")])
            .unwrap();
        let inner = outer.nested_with_args("Inner", vec![TypeRef::class("java.lang", "Integer")]).unwrap();
        match &inner {
            TypeRef::Parameterized(p) => {
                assert_eq!(p.raw.simple_name(), "Inner");
                assert_eq!(p.args, vec![TypeRef::class("java.lang", "Integer")]);
                assert_eq!(p.enclosing.as_deref(), Some(&outer));
            }
            other => panic!("expected Parameterized, got {:?}", other),
        }
    }
}
