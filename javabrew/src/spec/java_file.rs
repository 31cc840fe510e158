//! JavaFile: the render façade
//!
//! Owns the two-phase pipeline — a pre-pass against a discarding sink to
//! discover imports, then a real pass with the resolved import map — and the
//! surrounding file furniture (file comment, package line, import groups)
//! that sits outside any single `TypeSpec`.

use crate::code_block::CodeBlock;
use crate::code_writer::CodeWriter;
use crate::error::{CodegenError, Result};
use crate::layout::Dialect;
use crate::spec::type_spec::TypeSpec;
use crate::type_name::TypeRef;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

struct Discard;
impl Write for Discard {
    fn write_str(&mut self, _s: &str) -> std::fmt::Result {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JavaFile {
    package_name: Option<String>,
    type_spec: TypeSpec,
    static_imports: Vec<(String, String)>,
    skip_java_lang_imports: bool,
    file_comment: Option<CodeBlock>,
    dialect: Dialect,
}

impl JavaFile {
    pub fn builder(type_spec: TypeSpec) -> JavaFileBuilder {
        JavaFileBuilder {
            package_name: None,
            type_spec,
            static_imports: Vec::new(),
            skip_java_lang_imports: true,
            file_comment: None,
            dialect: Dialect::default(),
        }
    }

    pub fn to_string(&self) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        let indent_unit = self.dialect.indent_unit();
        let (static_members, static_wildcards) = self.static_import_sets();

        let mut discard = Discard;
        let mut pre = CodeWriter::new(
            &mut discard,
            indent_unit,
            self.package_name.clone(),
            HashMap::new(),
            static_members.clone(),
            static_wildcards.clone(),
            true,
        );
        self.type_spec.emit(&mut pre, self.dialect)?;
        let suggested = pre.suggested_imports();

        let mut resolved = HashMap::new();
        for (name, cls) in suggested {
            if self.skip_java_lang_imports && cls.package == "java.lang" {
                continue;
            }
            resolved.insert(name, cls);
        }

        let mut writer = CodeWriter::new(
            sink,
            indent_unit,
            self.package_name.clone(),
            resolved.clone(),
            static_members,
            static_wildcards,
            false,
        );

        if let Some(doc) = &self.file_comment {
            writer.emit_line_comment(doc)?;
        }
        if let Some(pkg) = &self.package_name {
            if !pkg.is_empty() {
                writer.emit_and_indent(&format!("package {};\n\n", pkg))?;
            }
        }

        let mut static_lines: Vec<String> = self
            .static_imports
            .iter()
            .map(|(class, member)| format!("import static {}.{};\n", class, member))
            .collect();
        static_lines.sort();
        for line in &static_lines {
            writer.emit_and_indent(line)?;
        }
        if !static_lines.is_empty() {
            writer.emit_and_indent("\n")?;
        }

        let mut import_lines: Vec<String> =
            resolved.values().map(|cls| format!("import {};\n", cls.canonical_name())).collect();
        import_lines.sort();
        import_lines.dedup();
        for line in &import_lines {
            writer.emit_and_indent(line)?;
        }
        if !import_lines.is_empty() {
            writer.emit_and_indent("\n")?;
        }

        self.type_spec.emit(&mut writer, self.dialect)
    }

    fn static_import_sets(&self) -> (HashSet<(String, String)>, HashSet<String>) {
        let mut members = HashSet::new();
        let mut wildcards = HashSet::new();
        for (class, member) in &self.static_imports {
            if member == "*" {
                wildcards.insert(class.clone());
            } else {
                members.insert((class.clone(), member.clone()));
            }
        }
        (members, wildcards)
    }
}

pub struct JavaFileBuilder {
    package_name: Option<String>,
    type_spec: TypeSpec,
    static_imports: Vec<(String, String)>,
    skip_java_lang_imports: bool,
    file_comment: Option<CodeBlock>,
    dialect: Dialect,
}

impl JavaFileBuilder {
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn add_static_import(mut self, class: TypeRef, member: impl Into<String>) -> Result<Self> {
        let TypeRef::ClassRef(c) = class else {
            return Err(CodegenError::InvalidArgument("static import target must be a class reference".into()));
        };
        self.static_imports.push((c.canonical_name(), member.into()));
        Ok(self)
    }

    pub fn skip_java_lang_imports(mut self, skip: bool) -> Self {
        self.skip_java_lang_imports = skip;
        self
    }

    pub fn file_comment(mut self, doc: CodeBlock) -> Self {
        self.file_comment = Some(doc);
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn build(self) -> JavaFile {
        JavaFile {
            package_name: self.package_name,
            type_spec: self.type_spec,
            static_imports: self.static_imports,
            skip_java_lang_imports: self.skip_java_lang_imports,
            file_comment: self.file_comment,
            dialect: self.dialect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_block::Arg;
    use crate::spec::method_spec::MethodSpec;
    use crate::spec::Modifier;

    #[test]
    fn hello_world_layout() {
        let main = MethodSpec::builder("main")
            .unwrap()
            .add_modifier(Modifier::Public)
            .add_modifier(Modifier::Static)
            .returns(TypeRef::VOID)
            .add_parameter(
                crate::spec::parameter_spec::ParameterSpec::builder(TypeRef::array_of(TypeRef::class("java.lang", "String")), "args")
                    .unwrap()
                    .build(),
            )
            .unwrap()
            .add_statement("System.out.println($S)", vec![Arg::string("Hello, world!")])
            .unwrap()
            .build()
            .unwrap();

        let hello = TypeSpec::class_builder("HelloWorld")
            .unwrap()
            .add_modifier(Modifier::Public)
            .add_modifier(Modifier::Final)
            .add_method(main)
            .unwrap()
            .build()
            .unwrap();

        let file = JavaFile::builder(hello).package_name("com.example").build();
        let rendered = file.to_string().unwrap();
        assert!(rendered.starts_with("package com.example;\n\npublic final class HelloWorld {\n"));
        assert!(rendered.contains("System.out.println(\"Hello, world!\");"));
        assert!(!rendered.contains("import java.lang"));
    }
}
