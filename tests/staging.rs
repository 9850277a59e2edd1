use crate::common::command::{
    committed_repository_dir, init_repository_dir, repository_dir, run_sprig_command,
    sprig_add, sprig_commit, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn staged_section(dir: &TempDir) -> String {
    let status = stdout_of(run_sprig_command(dir.path(), &["status"]));
    status
        .split("\n\n")
        .find(|section| section.starts_with("=== Staged Files ==="))
        .expect("status has a staged section")
        .to_string()
}

#[rstest]
fn adding_twice_stages_once(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "A".to_string()));

    sprig_add(dir.path(), "a.txt").assert().success().stdout("");
    sprig_add(dir.path(), "a.txt").assert().success().stdout("");

    assert_eq!(staged_section(&dir), "=== Staged Files ===\na.txt");
}

#[rstest]
fn adding_the_committed_version_unstages_the_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("foo.txt"), "B\n".to_string()));
    sprig_add(dir.path(), "foo.txt").assert().success();

    write_file(FileSpec::new(dir.path().join("foo.txt"), "A\n".to_string()));
    sprig_add(dir.path(), "foo.txt").assert().success();

    assert_eq!(staged_section(&dir), "=== Staged Files ===");
    sprig_commit(dir.path(), "nothing")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn adding_a_missing_file_is_refused(init_repository_dir: TempDir) {
    sprig_add(init_repository_dir.path(), "ghost.txt")
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn removing_an_unknown_file_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "A".to_string()));

    run_sprig_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success()
        .stdout("No reason to remove the file.\n");
    dir.child("a.txt").assert("A");
}

#[rstest]
fn removing_a_tracked_file_deletes_it_and_untracks_it_on_commit(
    committed_repository_dir: TempDir,
) {
    let dir = committed_repository_dir;

    run_sprig_command(dir.path(), &["rm", "foo.txt"])
        .assert()
        .success();
    dir.child("foo.txt").assert(predicate::path::missing());

    sprig_commit(dir.path(), "drop foo").assert().success();

    run_sprig_command(dir.path(), &["checkout", "--", "foo.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");
}

#[rstest]
fn commit_requires_a_message(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("foo.txt"), "B\n".to_string()));
    sprig_add(dir.path(), "foo.txt").assert().success();

    sprig_commit(dir.path(), "")
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");
    run_sprig_command(dir.path(), &["commit"])
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");
}

#[rstest]
fn whitespace_only_message_is_accepted(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("foo.txt"), "B\n".to_string()));
    sprig_add(dir.path(), "foo.txt").assert().success();

    sprig_commit(dir.path(), " ").assert().success().stdout("");

    run_sprig_command(dir.path(), &["log"])
        .assert()
        .stdout(predicate::str::starts_with("===\ncommit "))
        .stdout(predicate::str::contains("\n \n\n===\n"));
}

#[rstest]
fn failed_command_persists_nothing(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("bar.txt"), "bar".to_string()));
    sprig_add(dir.path(), "bar.txt").assert().success();

    sprig_commit(dir.path(), "")
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");

    assert_eq!(staged_section(&dir), "=== Staged Files ===\nbar.txt");
}

#[rstest]
fn staged_files_in_subdirectories_are_missing(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("nested").join("a.txt"),
        "A".to_string(),
    ));

    sprig_add(repository_dir.path(), "nested/a.txt")
        .assert()
        .success()
        .stdout("File does not exist.\n");
}
