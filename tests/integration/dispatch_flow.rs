//! Classification of real files against rule sets

use serial_test::serial;
use std::env;
use std::path::Path;
use tempfile::TempDir;

use rifleman::rules::parse_condition;

use super::helpers::{evaluator_with_bin, install_executable, rifleman_from_text, write_file};

#[test]
fn test_formatter_routing_scenario() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_file(dir.path(), "a.py", "print()\n"),
        write_file(dir.path(), "b.js", "let x;\n"),
        write_file(dir.path(), "c.txt", "notes\n"),
    ];
    let rifleman = rifleman_from_text(
        "ext py = black \"$@\"\next js|jsx = prettier -w \"$@\"\n",
        dir.path(),
    );

    let actions = rifleman.collect_actions(&files);

    let keys: Vec<&str> = actions.iter().map(|(a, _)| a.as_str()).collect();
    assert_eq!(keys, vec!["black \"$@\"", "prettier -w \"$@\"", "ignore"]);
    assert_eq!(actions.get_key("black \"$@\""), Some(&files[0..1]));
    assert_eq!(actions.get_key("prettier -w \"$@\""), Some(&files[1..2]));
    assert_eq!(actions.ignored(), &files[2..3]);
}

#[test]
fn test_directories_and_missing_paths_are_not_classified() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "a.py", "");
    let inputs = vec![
        file.clone(),
        dir.path().to_path_buf(),
        dir.path().join("gone.py"),
    ];
    let rifleman = rifleman_from_text("ext py = black \"$@\"\nelse = cat\n", dir.path());

    let actions = rifleman.collect_actions(&inputs);

    assert_eq!(actions.len(), 1);
    assert_eq!(actions.get_key("black \"$@\""), Some(&[file][..]));
}

#[test]
fn test_negated_extension_catches_everything_else() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_file(dir.path(), "keep.PY", ""),
        write_file(dir.path(), "other.rs", ""),
        write_file(dir.path(), "Makefile", ""),
    ];
    let rifleman = rifleman_from_text("!ext py = wc -l \"$@\"\n", dir.path());

    let actions = rifleman.collect_actions(&files);

    assert_eq!(actions.get_key("wc -l \"$@\""), Some(&files[1..3]));
    assert_eq!(actions.ignored(), &files[0..1]);
}

#[test]
fn test_has_gates_rules_on_installed_tools() {
    let dir = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    install_executable(bin.path(), "ruff");
    let files = vec![write_file(dir.path(), "a.py", "")];
    let rifleman = rifleman_from_text(
        "ext py, has black = black \"$@\"\next py, has ruff = ruff format \"$@\"\n",
        bin.path(),
    );

    let actions = rifleman.collect_actions(&files);

    assert_eq!(actions.get_key("ruff format \"$@\""), Some(&files[..]));
    assert_eq!(actions.get_key("black \"$@\""), None);
}

#[test]
fn test_shebang_identifies_extensionless_script() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_file(dir.path(), "tool", "#!/usr/bin/env python3\nprint('hi')\n"),
        write_file(dir.path(), "other", "#!/bin/sh\necho hi\n"),
    ];
    let rifleman = rifleman_from_text(
        "shebang ^#!/usr/bin/env\\s+python = black \"$1\"\n",
        dir.path(),
    );

    let actions = rifleman.collect_actions(&files);

    assert_eq!(actions.get_key("black \"$1\""), Some(&files[0..1]));
    assert_eq!(actions.ignored(), &files[1..2]);
}

#[test]
#[serial]
fn test_has_editor_variable() {
    let bin = TempDir::new().unwrap();
    install_executable(bin.path(), "vim");
    let evaluator = evaluator_with_bin(bin.path());
    let condition = parse_condition("has $EDITOR").unwrap().unwrap();
    let saved = env::var_os("EDITOR");

    env::set_var("EDITOR", "vim");
    assert!(evaluator.evaluate(&condition, Path::new("any")));

    env::remove_var("EDITOR");
    assert!(!evaluator.evaluate(&condition, Path::new("any")));

    if let Some(value) = saved {
        env::set_var("EDITOR", value);
    }
}
