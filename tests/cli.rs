/*!
 * Integration tests for the overview binary
 */

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::{Duration, Local};
use overview::writer::format_timestamp;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn overview() -> Command {
    let mut cmd = Command::cargo_bin("overview").unwrap();
    for var in ["OPENAI_API_KEY", "API_KEY", "api_key", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

fn project() -> (TempDir, PathBuf, PathBuf) {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("out");
    fs::create_dir_all(root.join("pkg")).unwrap();
    fs::create_dir_all(root.join(".hidden")).unwrap();
    fs::create_dir_all(&out).unwrap();
    fs::write(root.join("a.py"), "x=1").unwrap();
    fs::write(root.join("pkg").join("b.py"), "y=2").unwrap();
    fs::write(root.join(".hidden").join("c.py"), "z=3").unwrap();
    (temp, root, out)
}

fn artifacts(dir: &Path, stem: &str) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(stem)
        })
        .collect();
    found.sort();
    found
}

#[test]
fn test_cli_help() {
    overview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Create an overview of Python files"));
}

#[test]
fn test_python_mode_writes_pair() {
    let (_temp, root, out) = project();

    overview()
        .arg(&root)
        .arg("-p")
        .arg("-q")
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let files = artifacts(&out, "all_python_files_");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].extension().unwrap(), "json");
    assert_eq!(files[1].extension().unwrap(), "txt");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);

    let text = fs::read_to_string(&files[1]).unwrap();
    assert!(text.contains("'a.py'"));
    assert!(text.contains("'b.py'"));
    assert!(!text.contains("c.py"));
}

#[test]
fn test_both_modes_share_timestamp() {
    let (_temp, root, out) = project();

    overview()
        .arg(&root)
        .args(["-p", "-t", "-q", "-o"])
        .arg(&out)
        .assert()
        .success();

    let stamp = |p: &PathBuf, stem: &str| {
        p.file_stem()
            .unwrap()
            .to_string_lossy()
            .trim_start_matches(stem)
            .to_string()
    };

    let content = artifacts(&out, "all_python_files_");
    let tree = artifacts(&out, "directory_tree_");
    assert_eq!(tree.len(), 2);
    assert_eq!(
        stamp(&content[0], "all_python_files_"),
        stamp(&tree[0], "directory_tree_")
    );
    assert_eq!(stamp(&tree[0], "directory_tree_").len(), "YYYYMMDD_HHMMSS".len());
}

#[test]
fn test_description_without_key_fails() {
    let (_temp, root, out) = project();

    overview()
        .arg(&root)
        .args(["-p", "--description", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is required"));

    assert!(artifacts(&out, "all_python_files_").is_empty());
}

#[test]
fn test_missing_ignore_file_fails() {
    let (_temp, root, out) = project();

    overview()
        .arg(&root)
        .args(["-t", "--ignore-file"])
        .arg(out.join("does-not-exist"))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read ignore file"));
}

#[test]
fn test_missing_output_dir_fails() {
    let (_temp, root, out) = project();

    overview()
        .arg(&root)
        .args(["-p", "-o"])
        .arg(out.join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output directory not found"));
}

#[test]
fn test_unopenable_output_file_fails() {
    let (_temp, root, out) = project();

    // Occupy the transcript name for every timestamp the run could pick
    let now = Local::now();
    for offset in 0..30 {
        let ts = format_timestamp(&(now + Duration::seconds(offset)));
        fs::create_dir(out.join(format!("all_python_files_{}.txt", ts))).unwrap();
    }

    overview()
        .arg(&root)
        .args(["-p", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write to output file"));
}

#[test]
fn test_no_mode_is_a_noop() {
    let (_temp, root, out) = project();

    overview()
        .arg(&root)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing to do"));

    assert!(fs::read_dir(&out).unwrap().next().is_none());
}

#[test]
fn test_generate_completions() {
    overview()
        .args(["--generate", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("overview"));
}
