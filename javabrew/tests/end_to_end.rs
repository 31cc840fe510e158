//! End-to-end rendering scenarios exercised against the public builder API

use pretty_assertions::assert_eq;

use javabrew::code_block::{Arg, CodeBlock};
use javabrew::spec::annotation_spec::AnnotationSpec;
use javabrew::spec::field_spec::FieldSpec;
use javabrew::spec::java_file::JavaFile;
use javabrew::spec::method_spec::MethodSpec;
use javabrew::spec::parameter_spec::ParameterSpec;
use javabrew::spec::type_spec::TypeSpec;
use javabrew::spec::Modifier;
use javabrew::type_name::TypeRef;

#[test]
fn hello_world() {
    let println = MethodSpec::builder("main")
        .unwrap()
        .add_modifier(Modifier::Public)
        .add_modifier(Modifier::Static)
        .returns(TypeRef::VOID)
        .add_parameter(
            ParameterSpec::builder(TypeRef::array_of(TypeRef::class("java.lang", "String")), "args").unwrap().build(),
        )
        .unwrap()
        .add_statement("System.out.println($S)", vec![Arg::string("Hello, world!")])
        .unwrap()
        .build()
        .unwrap();

    let hello_world = TypeSpec::class_builder("HelloWorld")
        .unwrap()
        .add_modifier(Modifier::Public)
        .add_modifier(Modifier::Final)
        .add_method(println)
        .unwrap()
        .build()
        .unwrap();

    let rendered = JavaFile::builder(hello_world).package_name("com.example").build().to_string().unwrap();

    assert_eq!(
        rendered,
        "package com.example;\n\npublic final class HelloWorld {\n  public static void main(String[] args) {\n    System.out.println(\"Hello, world!\");\n  }\n}\n"
    );
}

fn put_all_method() -> MethodSpec {
    let map_of_string = TypeRef::class("java.util", "Map")
        .parameterized_by(vec![TypeRef::subtype_of(TypeRef::class("java.lang", "String")), TypeRef::wildcard_any()])
        .unwrap();
    MethodSpec::builder("putAll")
        .unwrap()
        .add_modifier(Modifier::Public)
        .returns(TypeRef::VOID)
        .add_annotation(AnnotationSpec::of(TypeRef::class("java.lang", "Override")))
        .add_parameter(ParameterSpec::builder(map_of_string, "m").unwrap().add_modifier(Modifier::Final).build())
        .unwrap()
        .add_statement("throw new $T()", vec![Arg::type_ref(TypeRef::class("java.lang", "UnsupportedOperationException"))])
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn parameterized_wildcard_fully_qualified_on_collision() {
    // A nested type also named `Map` shadows `java.util.Map`'s simple name,
    // so the reference can never be imported and falls back fully qualified.
    let shadow = TypeSpec::class_builder("Map").unwrap().build().unwrap();
    let container = TypeSpec::class_builder("Container")
        .unwrap()
        .add_nested_type(shadow)
        .add_method(put_all_method())
        .unwrap()
        .build()
        .unwrap();

    let rendered = JavaFile::builder(container).build().to_string().unwrap();
    assert!(rendered.contains("java.util.Map<? extends java.lang.String, ?> m"));
    assert!(rendered.contains("throw new java.lang.UnsupportedOperationException();"));
}

#[test]
fn parameterized_wildcard_shortened_when_importable() {
    let container = TypeSpec::class_builder("Container").unwrap().add_method(put_all_method()).unwrap().build().unwrap();

    let rendered = JavaFile::builder(container).build().to_string().unwrap();
    assert!(rendered.contains("import java.util.Map;"));
    assert!(rendered.contains("Map<? extends java.lang.String, ?> m"));
}

#[test]
fn static_import_collapses_member_reference() {
    let collections = TypeRef::class("java.util", "Collections");
    let body = CodeBlock::of(
        "$T.sort(list); return $T.emptyList();",
        vec![Arg::type_ref(collections.clone()), Arg::type_ref(collections.clone())],
    )
    .unwrap();

    let list_of_string =
        TypeRef::class("java.util", "List").parameterized_by(vec![TypeRef::class("java.lang", "String")]).unwrap();
    let method = MethodSpec::builder("sortedOrEmpty")
        .unwrap()
        .returns(list_of_string.clone())
        .add_parameter(ParameterSpec::builder(list_of_string, "list").unwrap().build())
        .unwrap()
        .add_code_block(body)
        .build()
        .unwrap();

    let holder = TypeSpec::class_builder("Holder").unwrap().add_method(method).unwrap().build().unwrap();

    let file = JavaFile::builder(holder)
        .add_static_import(collections.clone(), "emptyList")
        .unwrap()
        .add_static_import(collections, "sort")
        .unwrap()
        .build();

    let rendered = file.to_string().unwrap();
    assert!(rendered.contains("sort(list); return emptyList();"));
    assert!(!rendered.contains("Collections.sort"));
    assert!(!rendered.contains("Collections.emptyList"));
}

#[test]
fn name_collision_first_seen_wins() {
    let map_entry = TypeRef::class_nested("java.util", vec!["Map".into(), "Entry".into()]).unwrap();
    let acme_entry = TypeRef::class("com.acme", "Entry");

    let a = FieldSpec::builder(map_entry, "a").unwrap().build();
    let b = FieldSpec::builder(acme_entry, "b").unwrap().build();

    let holder = TypeSpec::class_builder("Holder").unwrap().add_field(a).add_field(b).build().unwrap();

    let rendered = JavaFile::builder(holder).build().to_string().unwrap();
    assert!(rendered.contains("Entry a;"));
    assert!(!rendered.contains("Map.Entry a;"));
    assert!(rendered.contains("com.acme.Entry b;"));
}

#[test]
fn enum_with_anonymous_constant_body() {
    let string_ty = TypeRef::class("java.lang", "String");

    let constructor = MethodSpec::constructor_builder()
        .add_parameter(ParameterSpec::builder(string_ty.clone(), "handsign").unwrap().build())
        .unwrap()
        .add_statement("this.handsign = handsign", vec![])
        .unwrap()
        .build()
        .unwrap();

    let field = FieldSpec::builder(string_ty.clone(), "handsign").unwrap().add_modifier(Modifier::Private).add_modifier(Modifier::Final).build();

    let to_string = MethodSpec::builder("toString")
        .unwrap()
        .add_modifier(Modifier::Public)
        .add_annotation(AnnotationSpec::of(TypeRef::class("java.lang", "Override")))
        .returns(string_ty)
        .add_statement("return $S", vec![Arg::string("avalanche!")])
        .unwrap()
        .build()
        .unwrap();

    let rock_body = TypeSpec::class_builder("RockBody").unwrap().add_method(to_string).unwrap().build().unwrap();

    let roshambo = TypeSpec::enum_builder("Roshambo")
        .unwrap()
        .add_enum_constant("ROCK", CodeBlock::of("$S", vec![Arg::string("fist")]).unwrap(), Some(rock_body))
        .unwrap()
        .add_enum_constant("SCISSORS", CodeBlock::of("$S", vec![Arg::string("peace")]).unwrap(), None)
        .unwrap()
        .add_enum_constant("PAPER", CodeBlock::of("$S", vec![Arg::string("flat")]).unwrap(), None)
        .unwrap()
        .add_field(field)
        .add_method(constructor)
        .unwrap()
        .build()
        .unwrap();

    let rendered = JavaFile::builder(roshambo).build().to_string().unwrap();

    let rock_idx = rendered.find("ROCK(\"fist\") {").expect("ROCK constant with body");
    let avalanche_idx = rendered.find("\"avalanche!\"").expect("overridden toString body");
    let scissors_idx = rendered.find("SCISSORS(\"peace\"),").expect("SCISSORS constant");
    let paper_idx = rendered.find("PAPER(\"flat\");").expect("PAPER constant, terminated with `;`");

    assert!(rock_idx < avalanche_idx);
    assert!(avalanche_idx < scissors_idx);
    assert!(scissors_idx < paper_idx);
}

#[test]
fn javadoc_type_reference_is_always_fully_qualified() {
    let doc = CodeBlock::of(
        "Use {@link #delete($T)} to remove.",
        vec![Arg::type_ref(TypeRef::class("com.example", "Conversation"))],
    )
    .unwrap();

    let delete = MethodSpec::builder("delete")
        .unwrap()
        .add_modifier(Modifier::Public)
        .returns(TypeRef::VOID)
        .add_parameter(ParameterSpec::builder(TypeRef::class("com.example", "Conversation"), "c").unwrap().build())
        .unwrap()
        .build()
        .unwrap();

    let archive = MethodSpec::builder("archive")
        .unwrap()
        .add_modifier(Modifier::Public)
        .returns(TypeRef::VOID)
        .javadoc(doc)
        .build()
        .unwrap();

    let holder = TypeSpec::class_builder("Holder")
        .unwrap()
        .add_method(delete)
        .unwrap()
        .add_method(archive)
        .unwrap()
        .build()
        .unwrap();

    let rendered = JavaFile::builder(holder).build().to_string().unwrap();
    assert!(rendered.contains("Use {@link #delete(com.example.Conversation)} to remove."));
    assert!(!rendered.contains("import com.example.Conversation;"));
}
