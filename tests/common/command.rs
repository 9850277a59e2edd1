use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";
pub const COMMIT_TIMESTAMP: &str = "Sun Jan 1 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with `foo.txt` ("A\n") committed as "c1" on master
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("foo.txt"), "A\n".to_string()));
    sprig_add(dir.path(), "foo.txt").assert().success();
    sprig_commit(dir.path(), "c1").assert().success();

    dir
}

pub fn run_sprig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sprig").expect("Failed to find sprig binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("SPRIG_COMMIT_DATE", COMMIT_DATE)]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn sprig_add(dir: &Path, file: &str) -> Command {
    run_sprig_command(dir, &["add", file])
}

pub fn sprig_commit(dir: &Path, message: &str) -> Command {
    run_sprig_command(dir, &["commit", message])
}

pub fn sprig_checkout_branch(dir: &Path, branch: &str) -> Command {
    run_sprig_command(dir, &["checkout", branch])
}

pub fn sprig_merge(dir: &Path, branch: &str) -> Command {
    run_sprig_command(dir, &["merge", branch])
}

/// Write `content` to `file`, stage it and commit it as `message`
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    sprig_add(dir, file).assert().success();
    sprig_commit(dir, message).assert().success();
}

/// Get the head commit id of `branch`
pub fn get_branch_commit_sha(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".sprig").join("refs").join("heads").join(branch);
    std::fs::read_to_string(ref_path)
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Get the commit ids printed by `log`, newest first
pub fn get_log_commit_shas(dir: &Path, args: &[&str]) -> Vec<String> {
    let output = run_sprig_command(dir, args)
        .output()
        .expect("Failed to run log");
    let stdout = String::from_utf8(output.stdout).expect("Log output is not UTF-8");

    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}

pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("Failed to run sprig");
    String::from_utf8(output.stdout).expect("Output is not UTF-8")
}
