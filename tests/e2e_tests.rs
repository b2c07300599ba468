//! End-to-end tests for the CLI commands.
//!
//! Each test:
//! 1. Creates a temp directory
//! 2. Copies the Python fixture tree into it
//! 3. Runs `atlas index .`
//! 4. Runs the specific command
//! 5. Asserts exit code + expected output

// Allow deprecated cargo_bin usage until assert_cmd updates API
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Manifest directory (project root).
fn manifest_dir() -> &'static str {
    env!("CARGO_MANIFEST_DIR")
}

fn copy_tree(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("create dir");
    for entry in fs::read_dir(from).expect("read fixture dir") {
        let entry = entry.expect("dir entry");
        let target = to.join(entry.file_name());
        if entry.file_type().expect("file type").is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("copy fixture");
        }
    }
}

/// Copy the Python fixture tree into a temp directory without indexing it.
fn python_project() -> TempDir {
    let dir = tempfile::tempdir().expect("create tempdir");
    let fixture = format!("{}/fixtures/python", manifest_dir());
    copy_tree(Path::new(&fixture), dir.path());
    dir
}

/// Copy the Python fixture tree into a temp directory and index it.
fn setup_python_project() -> TempDir {
    let dir = python_project();
    atlas(&dir).arg("index").arg(".").assert().success();
    dir
}

/// Build a command pointing at the tempdir.
fn atlas(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("atlas").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

// ─── index ──────────────────────────────────────────────────────────────────

#[test]
fn e2e_index_creates_db() {
    let dir = python_project();
    let out = stdout_json(atlas(&dir).arg("index").arg("."));

    assert!(dir.path().join(".atlas/index.db").exists());
    assert_eq!(out["files_processed"], 5);
    assert_eq!(out["binary_files"], 1);
    assert_eq!(out["source_files"], 3);
    assert_eq!(out["parse_failures"], 1);
    assert_eq!(out["failed_files"][0], "pkg/broken.py");
}

#[test]
fn e2e_index_rerun_is_stable() {
    let dir = python_project();
    let first = stdout_json(atlas(&dir).arg("index").arg("."));
    let second = stdout_json(atlas(&dir).arg("index").arg("."));
    assert_eq!(first, second);
}

#[test]
fn e2e_index_with_explicit_db() {
    let dir = python_project();
    atlas(&dir)
        .args(["--db", "store/custom.db", "index", "."])
        .assert()
        .success();
    assert!(dir.path().join("store/custom.db").exists());
    assert!(!dir.path().join(".atlas/index.db").exists());

    let second = stdout_json(atlas(&dir).args(["--db", "store/custom.db", "index", "."]));
    assert_eq!(second["files_processed"], 5);
    let folders = stdout_json(atlas(&dir).args(["--db", "store/custom.db", "folders"]));
    assert_eq!(folders, serde_json::json!(["", "pkg"]));
}

#[test]
fn e2e_query_builds_missing_index() {
    let dir = python_project();
    atlas(&dir)
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("pkg"));
    assert!(dir.path().join(".atlas/index.db").exists());
}

// ─── listing ────────────────────────────────────────────────────────────────

#[test]
fn e2e_folders() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).arg("folders"));
    assert_eq!(out, serde_json::json!(["", "pkg"]));
}

#[test]
fn e2e_files_in_folder() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).arg("files").arg("pkg"));
    assert_eq!(out["total"], 3);
    assert_eq!(out["files"][0]["file_name"], "__init__.py");
    assert_eq!(out["files"][2]["file_name"], "mod.py");
}

#[test]
fn e2e_files_by_extension() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["files", "--ext", ".md"]));
    assert_eq!(out["total"], 1);
    assert_eq!(out["files"][0]["path"], "README.md");
}

// ─── files ──────────────────────────────────────────────────────────────────

#[test]
fn e2e_file_metadata() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["file", "pkg/mod.py"]));
    assert_eq!(out["extension"], "py");
    assert_eq!(out["line_count"], 13);
    assert!(out.get("content").is_none());
}

#[test]
fn e2e_file_missing_is_null() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["file", "pkg/nope.py"]));
    assert!(out.is_null());
}

#[test]
fn e2e_cat_binary_returns_sentinel() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["cat", "logo.bin"]));
    assert_eq!(out["content"], "[BINARY FILE]");
}

// ─── structure ──────────────────────────────────────────────────────────────

#[test]
fn e2e_at_line_inside_method() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["at", "pkg/mod.py", "5"]));
    assert_eq!(out["name"], "bar");
    assert_eq!(out["kind"], "function");
    assert_eq!(out["parent_name"], "Foo");
}

#[test]
fn e2e_at_line_in_class_body() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["at", "pkg/mod.py", "7"]));
    assert_eq!(out["name"], "Foo");
    assert_eq!(out["kind"], "class");
}

#[test]
fn e2e_at_line_on_module_variable() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["at", "pkg/mod.py", "12"]));
    assert_eq!(out["name"], "VALUE");
    assert_eq!(out["kind"], "variable");
}

#[test]
fn e2e_at_line_outside_everything() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["at", "pkg/mod.py", "11"]));
    assert!(out.is_null());
}

#[test]
fn e2e_function_by_name_and_class() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["function", "bar", "--class", "Foo"]));
    assert_eq!(out["results"][0]["file_path"], "pkg/mod.py");
    assert_eq!(out["results"][0]["start_line"], 3);
    assert_eq!(out["results"][0]["end_line"], 6);
    assert_eq!(out["results"][0]["args"], serde_json::json!(["self", "x"]));
}

#[test]
fn e2e_class_and_methods() {
    let dir = setup_python_project();
    let class = stdout_json(atlas(&dir).args(["class", "Foo"]));
    assert_eq!(class["results"][0]["start_line"], 1);

    let methods = stdout_json(atlas(&dir).args(["methods", "Foo"]));
    let names: Vec<_> = methods["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["bar", "baz"]);
}

#[test]
fn e2e_structure_of_failed_file_is_empty() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["structure", "pkg/broken.py"]));
    assert_eq!(out["functions"], serde_json::json!([]));
    assert_eq!(out["classes"], serde_json::json!([]));
}

#[test]
fn e2e_segment() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["segment", "pkg/mod.py", "3", "4"]));
    assert_eq!(
        out["content"],
        "    def bar(self, x):\n        if x > self.limit:"
    );
}

#[test]
fn e2e_segment_out_of_range_is_empty() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["segment", "pkg/mod.py", "40", "50"]));
    assert_eq!(out["content"], "");
}

#[test]
fn e2e_stats() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).arg("stats"));
    assert_eq!(out["files"], 5);
    assert_eq!(out["binary_files"], 1);
    assert_eq!(out["classes"], 1);
    assert_eq!(out["methods"], 2);
}

#[test]
fn e2e_failures() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).arg("failures"));
    assert_eq!(out["count"], 1);
    assert_eq!(out["failures"][0]["path"], "pkg/broken.py");

    let none = stdout_json(atlas(&dir).args(["failures", "--prefix", "docs/"]));
    assert_eq!(none["count"], 0);
}

#[test]
fn e2e_context() {
    let dir = setup_python_project();
    let out = stdout_json(atlas(&dir).args(["context", "pkg/mod.py", "baz"]));
    assert_eq!(out["start_line"], 8);
    assert_eq!(out["end_line"], 9);
    assert!(out["context_before"]
        .as_str()
        .unwrap()
        .contains("def bar(self, x):"));
}

#[test]
fn e2e_issues_maps_traceback() {
    let dir = setup_python_project();
    let issue = "Traceback (most recent call last):\n  \
                 File \"pkg/mod.py\", line 5, in bar\n    \
                 raise ValueError(\"x too large\")\nValueError: x too large";
    let out = stdout_json(atlas(&dir).args(["issues", "pkg/mod.py", "--issue", issue]));
    assert_eq!(out["tracebacks"][0]["line"], 5);
    assert_eq!(out["errors"][0]["error_type"], "ValueError");
}

// ─── text utilities ─────────────────────────────────────────────────────────

#[test]
fn e2e_diff_and_patch() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::write(dir.path().join("old.py"), "a = 1\nb = 2\n").unwrap();
    fs::write(dir.path().join("new.py"), "a = 1\nb = 3\n").unwrap();

    let out = stdout_json(atlas(&dir).args(["diff", "old.py", "new.py", "--label", "m.py"]));
    assert_eq!(out["changed"], true);
    let diff = out["diff"].as_str().unwrap().to_string();
    assert!(diff.contains("--- a/m.py"));
    assert!(diff.contains("+b = 3"));

    fs::write(dir.path().join("change.diff"), &diff).unwrap();
    let patched = stdout_json(atlas(&dir).args(["patch", "old.py", "--diff", "change.diff"]));
    assert_eq!(patched["content"], "a = 1\nb = 3\n");
}

#[test]
fn e2e_patch_ops_write() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::write(dir.path().join("m.py"), "one\ntwo\nthree").unwrap();

    let ops = r#"[{"operation":"replace","start_line":2,"end_line":2,"content":"TWO"},
                  {"operation":"insert","start_line":1,"content":"zero"}]"#;
    atlas(&dir)
        .args(["patch", "m.py", "--ops", ops, "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"written\":true"));

    let written = fs::read_to_string(dir.path().join("m.py")).unwrap();
    assert_eq!(written, "zero\none\nTWO\nthree");
}

// ─── errors ─────────────────────────────────────────────────────────────────

#[test]
fn e2e_patch_requires_ops_or_diff() {
    let dir = tempfile::tempdir().expect("create tempdir");
    atlas(&dir).args(["patch", "m.py"]).assert().failure();
}

#[test]
fn e2e_invalid_diff_reports_json_error() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::write(dir.path().join("m.py"), "x\n").unwrap();
    fs::write(
        dir.path().join("bad.diff"),
        "--- a/m.py\n+++ b/m.py\n@@ -1,1 +1,1 @@\n-y\n+z\n",
    )
    .unwrap();
    atlas(&dir)
        .args(["patch", "m.py", "--diff", "bad.diff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""));
}
