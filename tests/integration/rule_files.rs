//! Loading rule files from disk

use std::fs;
use tempfile::TempDir;

use rifleman::error::RuleError;
use rifleman::rules::{parse_rules, RuleStore};

#[test]
fn test_rule_file_round_trips_through_display() {
    let text = "\
# formatters
ext py|pyi, has black = black \"$@\"
!ext md, name ^[^.]+$, shebang python = black \"$1\"
has $EDITOR, terminal = $EDITOR \"$@\"
env CI = ignore
else = cat
";
    let rules = parse_rules(text).unwrap();
    let rewritten: String = rules.iter().map(|r| format!("{r}\n")).collect();
    let reparsed = parse_rules(&rewritten).unwrap();

    assert_eq!(rules, reparsed);
    for (rule, again) in rules.iter().zip(&reparsed) {
        for (a, b) in rule.conditions.iter().zip(&again.conditions) {
            assert_eq!(a.predicate.name(), b.predicate.name());
            assert_eq!(a.argument, b.argument);
            assert_eq!(a.negated, b.negated);
        }
    }
}

#[test]
fn test_reload_picks_up_edits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("format.conf");
    fs::write(&path, "ext py = black \"$@\"\n").unwrap();
    let mut store = RuleStore::load(&path).unwrap();

    fs::write(&path, "ext py = ruff format \"$@\"\n").unwrap();
    store.reload().unwrap();

    assert_eq!(store.rules()[0].command, "ruff format \"$@\"");
}

#[test]
fn test_bad_line_is_fatal_and_keeps_rules() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("format.conf");
    fs::write(&path, "ext py = black \"$@\"\n").unwrap();
    let mut store = RuleStore::load(&path).unwrap();

    fs::write(&path, "ext py = black \"$@\"\next js prettier\n").unwrap();
    let err = store.reload().unwrap_err();

    assert!(matches!(err, RuleError::MissingDelimiter { line: 2, .. }));
    assert_eq!(store.rules().len(), 1);
}
