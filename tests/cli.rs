use crate::common::command::{init_repository_dir, repository_dir, run_sprig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn missing_command_asks_for_one(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &[])
        .assert()
        .success()
        .stdout("Please enter a command.\n");
}

#[rstest]
fn unknown_command_is_reported(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["glorp"])
        .assert()
        .success()
        .stdout("No command with that name exists.\n");
}

#[rstest]
#[case::add_without_file(&["add"])]
#[case::add_with_two_files(&["add", "a.txt", "b.txt"])]
#[case::checkout_without_target(&["checkout"])]
#[case::checkout_file_without_separator(&["checkout", "abcd1234", "foo.txt"])]
#[case::status_with_operand(&["status", "now"])]
#[case::merge_without_branch(&["merge"])]
#[case::diff_with_three_branches(&["diff", "a", "b", "c"])]
fn wrong_operands_are_reported(init_repository_dir: TempDir, #[case] args: &[&str]) {
    run_sprig_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout("Incorrect operands.\n");
}

#[rstest]
fn help_is_printed(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"));
}

#[rstest]
fn corrupt_head_is_fatal(init_repository_dir: TempDir) {
    std::fs::write(init_repository_dir.path().join(".sprig").join("HEAD"), "garbage").unwrap();

    run_sprig_command(init_repository_dir.path(), &["status"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("fatal: "));
}
