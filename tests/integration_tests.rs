use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vitals() -> Command {
    Command::cargo_bin("vitals").expect("binary exists")
}

fn fixture(name: &str) -> String {
    format!(
        "{}/tests/fixtures/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

/// Build a git repo with two commits touching src/a.py and one commit
/// touching an excluded test file.
fn git_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let git = |args: &[&str]| {
        let status = StdCommand::new("git")
            .args(args)
            .current_dir(root)
            .env("GIT_AUTHOR_NAME", "Test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .status()
            .expect("git runs");
        assert!(status.success(), "git {args:?} failed");
    };

    git(&["init", "-q"]);

    std::fs::create_dir_all(root.join("src/tests")).unwrap();
    std::fs::write(root.join("src/a.py"), "a = 1\nb = 2\n").unwrap();
    git(&["add", "."]);
    git(&["commit", "-qm", "add a"]);

    std::fs::write(root.join("src/a.py"), "a = 1\nb = 2\nc = 3\n").unwrap();
    std::fs::write(root.join("src/tests/t.py"), "x = 0\n").unwrap();
    git(&["add", "."]);
    git(&["commit", "-qm", "extend a, add test"]);

    temp
}

// ---------------------------------------------------------------------------
// CLI smoke tests
// ---------------------------------------------------------------------------

#[test]
fn test_help_output() {
    vitals()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_unknown_subcommand_fails() {
    vitals().arg("frobnicate").assert().failure();
}

// ---------------------------------------------------------------------------
// Clones normalization (from a pre-captured raw CSV; no PMD needed)
// ---------------------------------------------------------------------------

#[test]
fn test_clones_from_raw_csv() {
    let out = TempDir::new().unwrap();

    vitals()
        .args([
            "-p",
            "/workspace/proj",
            "-o",
            out.path().to_str().unwrap(),
            "clones",
            "--from",
            &fixture("cpd_raw.csv"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Most duplicated"));

    let csv = std::fs::read_to_string(out.path().join("cpd_results.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "token_count,occurrence_id,start_line,line_count,path"
    );
    assert_eq!(lines.next().unwrap(), "80,1,10,5,src/alpha.py");
    assert_eq!(lines.next().unwrap(), "80,1,20,5,src/beta.py");
    // The malformed trailing row is dropped: 2 + 3 = 5 records in total.
    assert_eq!(csv.lines().count(), 6);
}

#[test]
fn test_clones_missing_raw_csv_fails() {
    let out = TempDir::new().unwrap();

    vitals()
        .args([
            "-o",
            out.path().to_str().unwrap(),
            "clones",
            "--from",
            "/no/such/raw.csv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ---------------------------------------------------------------------------
// Churn (end to end against a real git repo)
// ---------------------------------------------------------------------------

#[test]
fn test_churn_aggregates_git_history() {
    let repo = git_repo();
    let out = TempDir::new().unwrap();

    vitals()
        .args([
            "-p",
            repo.path().to_str().unwrap(),
            "-o",
            out.path().to_str().unwrap(),
            "churn",
        ])
        .assert()
        .success();

    let csv = std::fs::read_to_string(out.path().join("code_churn.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next().unwrap(), "file,commits,lines_added,lines_removed");
    // Two commits touched src/a.py: +2 then +1.
    assert_eq!(lines.next().unwrap(), "src/a.py,2,3,0");
    // The test file under src/tests/ is excluded.
    assert!(!csv.contains("src/tests/t.py"));
}

#[test]
fn test_churn_outside_git_repo_fails() {
    let temp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    vitals()
        .args([
            "-p",
            temp.path().to_str().unwrap(),
            "-o",
            out.path().to_str().unwrap(),
            "churn",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ---------------------------------------------------------------------------
// Full sequence degrades gracefully when external tools are absent
// ---------------------------------------------------------------------------

#[test]
fn test_all_continues_past_missing_tools() {
    let repo = git_repo();
    let out = TempDir::new().unwrap();

    // Point the external binaries at names that cannot exist; the sequence
    // must log each failure and still produce the churn artifact, exiting 0.
    vitals()
        .args([
            "-p",
            repo.path().to_str().unwrap(),
            "-o",
            out.path().to_str().unwrap(),
        ])
        .env("VITALS_CPD__BINARY", "vitals-missing-pmd")
        .env("VITALS_RADON__BINARY", "vitals-missing-radon")
        .assert()
        .success();

    assert!(out.path().join("code_churn.csv").is_file());
    assert!(!out.path().join("mccabe.json").is_file());
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_writes_default_config_once() {
    let temp = TempDir::new().unwrap();

    vitals()
        .args(["-p", temp.path().to_str().unwrap(), "init"])
        .assert()
        .success();
    assert!(temp.path().join("vitals.toml").is_file());

    // Refuses to overwrite.
    vitals()
        .args(["-p", temp.path().to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_file_missing_is_an_error() {
    vitals()
        .args(["-c", "/no/such/vitals.toml", "churn"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn fixture_paths_exist() {
    assert!(Path::new(&fixture("cpd_raw.csv")).is_file());
}
