//! CodeWriter: the two-pass emitter, the centrepiece of the render pipeline
//!
//! A single emission constructs two of these: one over a discarding sink to
//! discover importable types (the pre-pass), one over the real sink with
//! the resolved import map (the emit pass). See
//! [`crate::spec::java_file::JavaFile::write_to`].

use crate::code_block::{Arg, CodeBlock, Literal, StringArg, Token};
use crate::error::{CodegenError, Result};
use crate::layout::Dialect;
use crate::line_wrapper::LineWrapper;
use crate::spec::annotation_spec::AnnotationSpec;
use crate::spec::Modifier;
use crate::type_name::{escape_java_string, ClassRef, TypeRef, TypeVariable};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Write;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum CommentMode {
    None,
    Javadoc,
    Block,
    Line,
}

struct TypeFrame {
    /// Outer-to-inner simple names, including this type itself
    chain: Vec<String>,
    children: HashSet<String>,
}

/// Two-pass Java source emitter
pub struct CodeWriter<'a, W: Write> {
    line_wrapper: LineWrapper<'a, W>,
    indent_level: usize,
    package_name: Option<String>,
    /// Final resolved simple-name -> class map, supplied by the emit pass;
    /// empty during the pre-pass.
    imports: HashMap<String, ClassRef>,
    /// Discovered during emission: candidates for import, first-seen wins.
    importable_types: HashMap<String, ClassRef>,
    /// Simple names used bare because they're declared in the current
    /// package — these can never be imported without ambiguity.
    referenced_names: HashSet<String>,
    static_import_members: HashSet<(String, String)>,
    static_import_wildcards: HashSet<String>,
    type_stack: Vec<TypeFrame>,
    comment_mode: CommentMode,
    statement_line: i32,
    at_line_start: bool,
    collecting_imports: bool,
}

impl<'a, W: Write> CodeWriter<'a, W> {
    pub(crate) fn new(
        sink: &'a mut W,
        indent_unit: &'a str,
        package_name: Option<String>,
        imports: HashMap<String, ClassRef>,
        static_import_members: HashSet<(String, String)>,
        static_import_wildcards: HashSet<String>,
        collecting_imports: bool,
    ) -> Self {
        CodeWriter {
            line_wrapper: LineWrapper::new(sink, indent_unit),
            indent_level: 0,
            package_name,
            imports,
            importable_types: HashMap::new(),
            referenced_names: HashSet::new(),
            static_import_members,
            static_import_wildcards,
            type_stack: Vec::new(),
            comment_mode: CommentMode::None,
            statement_line: -1,
            at_line_start: true,
            collecting_imports,
        }
    }

    /// `importable_types \ referenced_names`, sorted — the imports the
    /// pre-pass recommends for the emit pass
    pub(crate) fn suggested_imports(&self) -> HashMap<String, ClassRef> {
        self.importable_types
            .iter()
            .filter(|(name, _)| !self.referenced_names.contains(*name))
            .map(|(name, cls)| (name.clone(), cls.clone()))
            .collect()
    }

    pub fn indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn unindent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    pub fn push_package(&mut self, name: impl Into<String>) -> Result<()> {
        if self.package_name.is_some() {
            return Err(CodegenError::StructuralMisuse("push_package called more than once per scope".into()));
        }
        self.package_name = Some(name.into());
        Ok(())
    }

    pub fn pop_package(&mut self) {
        self.package_name = None;
    }

    pub(crate) fn push_type(&mut self, name: String, children: Vec<String>) {
        let mut chain = self.type_stack.last().map(|f| f.chain.clone()).unwrap_or_default();
        chain.push(name);
        self.type_stack.push(TypeFrame { chain, children: children.into_iter().collect() });
    }

    pub(crate) fn pop_type(&mut self) {
        self.type_stack.pop();
    }

    /// Resolve a bare simple name against, in order: children of any
    /// enclosing type on the stack, the stack types themselves, then the
    /// import map.
    fn resolve(&self, simple_name: &str) -> Option<ClassRef> {
        for frame in self.type_stack.iter().rev() {
            if frame.children.contains(simple_name) {
                let mut names = frame.chain.clone();
                names.push(simple_name.to_string());
                return Some(ClassRef {
                    package: self.package_name.clone().unwrap_or_default(),
                    simple_names: names,
                    annotations: Vec::new(),
                });
            }
        }
        for frame in self.type_stack.iter().rev() {
            if frame.chain.last().map(|s| s.as_str()) == Some(simple_name) {
                return Some(ClassRef {
                    package: self.package_name.clone().unwrap_or_default(),
                    simple_names: frame.chain.clone(),
                    annotations: Vec::new(),
                });
            }
        }
        self.imports.get(simple_name).cloned()
    }

    /// Shorten `class_ref` to the shortest unambiguous suffix, falling back
    /// to the fully-qualified name on collision or when no import applies
    pub(crate) fn lookup_name(&mut self, class_ref: &ClassRef) -> Result<String> {
        for i in (0..class_ref.simple_names.len()).rev() {
            let candidate = &class_ref.simple_names[i];
            if let Some(resolved) = self.resolve(candidate) {
                let ancestor_canonical = if class_ref.package.is_empty() {
                    class_ref.simple_names[..=i].join(".")
                } else {
                    format!("{}.{}", class_ref.package, class_ref.simple_names[..=i].join("."))
                };
                if resolved.canonical_name() == ancestor_canonical {
                    log::trace!("resolved {} to suffix starting at {}", class_ref.canonical_name(), candidate);
                    return Ok(class_ref.simple_names[i..].join("."));
                } else {
                    log::debug!(
                        "simple name `{}` already claimed by `{}`; qualifying `{}` fully",
                        candidate,
                        resolved.canonical_name(),
                        class_ref.canonical_name()
                    );
                    return Ok(class_ref.canonical_name());
                }
            }
        }

        if class_ref.package == self.package_name.clone().unwrap_or_default() {
            self.referenced_names.insert(class_ref.simple_names[0].clone());
            return Ok(class_ref.simple_names.join("."));
        }

        if self.comment_mode != CommentMode::Javadoc && !class_ref.package.is_empty() {
            let key = class_ref.simple_name().to_string();
            self.importable_types.entry(key).or_insert_with(|| class_ref.clone());
        }
        Ok(class_ref.canonical_name())
    }

    fn hard_newline(&mut self) -> Result<()> {
        self.line_wrapper.newline()?;
        self.at_line_start = true;
        if self.statement_line >= 0 {
            self.statement_line += 1;
        }
        Ok(())
    }

    fn ensure_indentation(&mut self) -> Result<()> {
        if !self.at_line_start {
            return Ok(());
        }
        self.at_line_start = false;
        let extra = if self.statement_line >= 1 { 2 } else { 0 };
        let unit = self.line_wrapper.indent_unit().to_string();
        for _ in 0..(self.indent_level + extra) {
            self.line_wrapper.append(&unit)?;
        }
        match self.comment_mode {
            CommentMode::Javadoc | CommentMode::Block => self.line_wrapper.append("* ")?,
            CommentMode::Line => self.line_wrapper.append("// ")?,
            CommentMode::None => {}
        }
        Ok(())
    }

    /// Emit literal text, splitting on embedded newlines and lazily
    /// indenting the first non-empty character after each one
    pub(crate) fn emit_and_indent(&mut self, text: &str) -> Result<()> {
        let mut first = true;
        for line in text.split('\n') {
            if !first {
                self.hard_newline()?;
            }
            first = false;
            if !line.is_empty() {
                self.ensure_indentation()?;
                self.line_wrapper.append(line)?;
            }
        }
        Ok(())
    }

    fn emit_raw_line(&mut self, text: &str) -> Result<()> {
        self.ensure_indentation()?;
        self.line_wrapper.append(text)?;
        self.hard_newline()
    }

    fn begin_statement(&mut self) -> Result<()> {
        if self.statement_line != -1 {
            return Err(CodegenError::StructuralMisuse("`$[` used while a statement is already active".into()));
        }
        self.statement_line = 0;
        Ok(())
    }

    fn end_statement(&mut self) -> Result<()> {
        if self.statement_line < 0 {
            return Err(CodegenError::StructuralMisuse("`$]` used without a matching `$[`".into()));
        }
        self.statement_line = -1;
        Ok(())
    }

    pub fn emit(&mut self, block: &CodeBlock) -> Result<()> {
        self.emit_code_block(block)
    }

    pub fn emit_format(&mut self, format: &str, args: Vec<Arg>) -> Result<()> {
        let block = CodeBlock::of(format, args)?;
        self.emit_code_block(&block)
    }

    pub(crate) fn emit_code_block(&mut self, block: &CodeBlock) -> Result<()> {
        let tokens = &block.tokens;
        let mut i = 0;
        while i < tokens.len() {
            match &tokens[i] {
                Token::Literal(s) => {
                    self.emit_and_indent(s)?;
                    i += 1;
                }
                Token::EmitLiteral(l) => {
                    self.emit_literal(l)?;
                    i += 1;
                }
                Token::EmitName(n) => {
                    self.emit_and_indent(n)?;
                    i += 1;
                }
                Token::EmitStr(s) => {
                    self.emit_string_literal(s)?;
                    i += 1;
                }
                Token::EmitType(t) => {
                    if let Some(consumed) = self.try_static_import_deferral(t, tokens.get(i + 1))? {
                        self.emit_and_indent(&consumed)?;
                        i += 2;
                        continue;
                    }
                    t.emit(self)?;
                    i += 1;
                }
                Token::Indent => {
                    self.indent_level += 1;
                    i += 1;
                }
                Token::Unindent => {
                    self.indent_level = self.indent_level.saturating_sub(1);
                    i += 1;
                }
                Token::StatementBegin => {
                    self.begin_statement()?;
                    i += 1;
                }
                Token::StatementEnd => {
                    self.end_statement()?;
                    i += 1;
                }
                Token::WrappingSpace => {
                    self.line_wrapper.wrapping_space(self.indent_level + 2)?;
                    i += 1;
                }
                Token::ZeroWidthSpace => {
                    self.line_wrapper.zero_width_space(self.indent_level + 2)?;
                    i += 1;
                }
            }
        }
        Ok(())
    }

    /// `$T` followed by a literal starting with `.member` collapses to just
    /// `member` when a matching static import is in effect
    fn try_static_import_deferral(&self, type_ref: &TypeRef, next: Option<&Token>) -> Result<Option<String>> {
        let Some(Token::Literal(lit)) = next else { return Ok(None) };
        let Some(rest) = lit.strip_prefix('.') else { return Ok(None) };
        let ident: String = rest.chars().take_while(|c| c.is_alphanumeric() || *c == '_').collect();
        if ident.is_empty() {
            return Ok(None);
        }
        let TypeRef::ClassRef(c) = type_ref else { return Ok(None) };
        let canonical = c.canonical_name();
        let is_static_imported = self.static_import_members.contains(&(canonical.clone(), ident.clone()))
            || self.static_import_wildcards.contains(&canonical);
        if is_static_imported {
            Ok(Some(rest.to_string()))
        } else {
            Ok(None)
        }
    }

    fn emit_literal(&mut self, literal: &Literal) -> Result<()> {
        match literal {
            Literal::Null => self.emit_and_indent("null"),
            Literal::Bool(b) => self.emit_and_indent(&b.to_string()),
            Literal::Int(n) => self.emit_and_indent(&n.to_string()),
            Literal::Float(f) => self.emit_and_indent(&f.to_string()),
            Literal::Text(s) => self.emit_and_indent(s),
            Literal::Type(t) => t.emit(self),
            Literal::Code(c) => self.emit_code_block(c),
            Literal::Annotation(a) => a.emit_inline(self),
        }
    }

    fn emit_string_literal(&mut self, arg: &StringArg) -> Result<()> {
        match arg {
            StringArg::Null => self.emit_and_indent("null"),
            StringArg::Value(v) if !v.contains('\n') => {
                self.emit_and_indent(&format!("\"{}\"", escape_java_string(v)))
            }
            StringArg::Value(v) => {
                let lines: Vec<&str> = v.split('\n').collect();
                let mut out = String::new();
                for (idx, line) in lines.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(" +\n");
                    }
                    out.push('"');
                    out.push_str(&escape_java_string(line));
                    if idx + 1 < lines.len() {
                        out.push_str("\\n");
                    }
                    out.push('"');
                }
                self.emit_and_indent(&out)
            }
        }
    }

    pub fn emit_annotations(&mut self, anns: &[AnnotationSpec], inline: bool) -> Result<()> {
        for ann in anns {
            ann.emit_inline(self)?;
            if inline {
                self.emit_and_indent(" ")?;
            } else {
                self.emit_and_indent("\n")?;
            }
        }
        Ok(())
    }

    pub fn emit_modifiers(&mut self, modifiers: &BTreeSet<Modifier>, implicit: &BTreeSet<Modifier>) -> Result<()> {
        for m in crate::spec::modifiers_to_emit(modifiers, implicit) {
            self.emit_and_indent(&m.to_string())?;
            self.emit_and_indent(" ")?;
        }
        Ok(())
    }

    pub fn emit_type_variables(&mut self, type_variables: &[TypeVariable]) -> Result<()> {
        if type_variables.is_empty() {
            return Ok(());
        }
        self.emit_and_indent("<")?;
        for (idx, tv) in type_variables.iter().enumerate() {
            if idx > 0 {
                self.emit_and_indent(", ")?;
            }
            TypeRef::emit_type_variable_declaration(tv, self)?;
        }
        self.emit_and_indent(">")
    }

    pub fn emit_javadoc(&mut self, doc: &CodeBlock) -> Result<()> {
        if doc.is_empty() {
            return Ok(());
        }
        self.emit_raw_line("/**")?;
        self.comment_mode = CommentMode::Javadoc;
        self.emit_code_block(doc)?;
        if !self.at_line_start {
            self.hard_newline()?;
        }
        self.comment_mode = CommentMode::None;
        self.emit_raw_line(" */")
    }

    pub fn emit_block_comment(&mut self, doc: &CodeBlock) -> Result<()> {
        if doc.is_empty() {
            return Ok(());
        }
        self.emit_raw_line("/*")?;
        self.comment_mode = CommentMode::Block;
        self.emit_code_block(doc)?;
        if !self.at_line_start {
            self.hard_newline()?;
        }
        self.comment_mode = CommentMode::None;
        self.emit_raw_line(" */")
    }

    pub fn emit_line_comment(&mut self, doc: &CodeBlock) -> Result<()> {
        if doc.is_empty() {
            return Ok(());
        }
        self.comment_mode = CommentMode::Line;
        self.ensure_indentation()?;
        self.emit_code_block(doc)?;
        if !self.at_line_start {
            self.hard_newline()?;
        }
        self.comment_mode = CommentMode::None;
        Ok(())
    }

    pub(crate) fn dialect_indent(dialect: Dialect) -> &'static str {
        dialect.indent_unit()
    }

    pub(crate) fn is_collecting_imports(&self) -> bool {
        self.collecting_imports
    }
}
