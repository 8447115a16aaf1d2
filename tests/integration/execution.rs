//! Running dispatched commands through a real shell

use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use tempfile::TempDir;

use rifleman::exec::build_command;
use rifleman::process::{ProcessRunner, SystemRunner};

use super::helpers::{rifleman_from_text, write_file};

#[test]
fn test_quoted_path_survives_the_shell() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let tricky = "it's a \"file\" $HOME `x` \\n.py";
    let template = format!("printf '%s' \"$1\" > '{}'", out.display());

    let line = build_command(&[tricky], &template);
    assert_eq!(SystemRunner.run_shell(&line).unwrap(), Some(0));

    assert_eq!(fs::read_to_string(&out).unwrap(), tricky);
}

#[test]
fn test_batched_arguments_keep_their_boundaries() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let files = ["a b.py", "c'd.py", "-e.py"];
    let template = format!("printf '%s\\n' \"$#\" \"$@\" > '{}'", out.display());

    let line = build_command(&files, &template);
    SystemRunner.run_shell(&line).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "3\na b.py\nc'd.py\n-e.py\n"
    );
}

#[test]
fn test_non_utf8_name_is_dispatched_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let file = write_file(dir.path(), OsStr::from_bytes(b"it's\xff.py"), "");
    let command = format!("printf '%s' \"$@\" > '{}'", out.display());
    let rifleman = rifleman_from_text(&format!("ext py = {command}\n"), dir.path());

    let actions = rifleman.collect_actions([&file]);
    assert_eq!(actions.get_key(&command), Some(&[file.clone()][..]));
    rifleman.execute_all(&actions, None).unwrap();

    assert_eq!(fs::read(&out).unwrap(), file.as_os_str().as_bytes());
}

#[test]
fn test_single_file_template_runs_once_per_match() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("log");
    let files = vec![
        write_file(dir.path(), "one", "#!/usr/bin/env python3\n"),
        write_file(dir.path(), "two", "#!/usr/bin/env  python\n"),
    ];
    let rules = format!(
        "shebang ^#!/usr/bin/env\\s+python = echo \"$# $1\" >> '{}'\n",
        log.display()
    );
    let rifleman = rifleman_from_text(&rules, dir.path());

    let actions = rifleman.collect_actions(&files);
    rifleman.execute_all(&actions, None).unwrap();

    let lines: Vec<String> = fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            format!("1 {}", files[0].display()),
            format!("1 {}", files[1].display())
        ]
    );
}

#[test]
fn test_batched_template_runs_once() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("log");
    let files = vec![
        write_file(dir.path(), "a.py", ""),
        write_file(dir.path(), "b.py", ""),
    ];
    let rules = format!("ext py = echo \"$#\" >> '{}' \"$@\"\n", log.display());
    let rifleman = rifleman_from_text(&rules, dir.path());

    let actions = rifleman.collect_actions(&files);
    rifleman.execute_all(&actions, None).unwrap();

    assert_eq!(fs::read_to_string(&log).unwrap().lines().count(), 1);
}

#[test]
fn test_declined_confirmation_runs_nothing() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("ran");
    let files = vec![write_file(dir.path(), "a.py", "")];
    let rules = format!("ext py = touch '{}'\n", marker.display());
    let rifleman = rifleman_from_text(&rules, dir.path());

    let actions = rifleman.collect_actions(&files);
    let decline = |_: &str| false;
    rifleman.execute_all(&actions, Some(&decline)).unwrap();

    assert!(!marker.exists());
}
