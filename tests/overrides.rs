use std::fs;

use natreg::{
    Compiler, Environment, NatRegError,
    overrides::{apply_overrides, load_override_file, parse_overrides},
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn parses_name_value_lines() {
    let pairs = parse_overrides(
        "# project sets\nidentifier=[a-z_]\n\nseparator=::\nequation=a=b\n",
    )
    .expect("parse");
    assert_eq!(
        pairs,
        vec![
            ("identifier".to_string(), "[a-z_]".to_string()),
            ("separator".to_string(), "::".to_string()),
            ("equation".to_string(), "a=b".to_string()),
        ]
    );
}

#[test]
fn rejects_lines_without_separator() {
    match parse_overrides("good=[a]\nbad line\n") {
        Err(NatRegError::Override { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected override error, found {other:?}"),
    }
    assert!(matches!(
        parse_overrides("=[a]"),
        Err(NatRegError::Override { line: 1, .. })
    ));
}

#[test]
fn overrides_are_visible_to_programs() {
    let mut compiler = Compiler::new();
    let count = apply_overrides(compiler.environment_mut(), "sigil=[$@]\nprefix=v.").expect("apply");
    assert_eq!(count, 2);
    let regex = compiler
        .compile_source("match (prefix, one or more(sigil))")
        .expect("compile");
    assert_eq!(regex, r"v\.(?:[$@])+");
}

#[test]
fn overrides_shadow_standard_sets() {
    let mut compiler = Compiler::new();
    apply_overrides(compiler.environment_mut(), "any digit=[0-9]").expect("apply");
    assert_eq!(compiler.compile_source("match any digit").expect("compile"), "[0-9]");
}

#[test]
fn loads_override_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("project.env");
    fs::write(&path, "letter=[a-z]\n").expect("write env file");

    let mut env = Environment::new();
    assert_eq!(load_override_file(&mut env, &path).expect("load"), 1);
    assert!(env.contains("letter"));
}

#[test]
fn missing_override_file_is_skipped() {
    let dir = tempdir().expect("create temp dir");
    let mut env = Environment::new();
    let loaded = load_override_file(&mut env, &dir.path().join("absent.env")).expect("skip");
    assert_eq!(loaded, 0);
    assert!(env.is_empty());
}
