//! javabrew: a programmatic generator of well-formed Java source files
//!
//! A caller builds an in-memory description of a compilation unit —
//! [`spec::type_spec::TypeSpec`], [`spec::method_spec::MethodSpec`],
//! [`spec::field_spec::FieldSpec`], [`type_name::TypeRef`] — and renders it
//! through [`spec::java_file::JavaFile`] into `.java` source text.
//!
//! ```
//! use javabrew::spec::java_file::JavaFile;
//! use javabrew::spec::method_spec::MethodSpec;
//! use javabrew::spec::type_spec::TypeSpec;
//! use javabrew::spec::Modifier;
//! use javabrew::type_name::TypeRef;
//!
//! let main = MethodSpec::builder("main").unwrap()
//!     .add_modifier(Modifier::Public)
//!     .add_modifier(Modifier::Static)
//!     .returns(TypeRef::VOID)
//!     .build()
//!     .unwrap();
//!
//! let hello = TypeSpec::class_builder("HelloWorld").unwrap()
//!     .add_modifier(Modifier::Public)
//!     .add_method(main).unwrap()
//!     .build()
//!     .unwrap();
//!
//! let source = JavaFile::builder(hello).package_name("com.example").build().to_string().unwrap();
//! assert!(source.starts_with("package com.example;"));
//! ```

pub mod code_block;
pub mod code_writer;
pub mod error;
pub mod layout;
pub mod line_wrapper;
pub mod name_allocator;
pub mod spec;
pub mod type_name;
mod util;

pub use error::{CodegenError, Result};
pub use layout::Dialect;
pub use name_allocator::NameAllocator;
pub use type_name::TypeRef;
