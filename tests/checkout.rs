use crate::common::command::{
    commit_file, committed_repository_dir, get_branch_commit_sha, run_sprig_command,
    sprig_checkout_branch,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn checkout_file_restores_the_committed_version(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("foo.txt"), "B\n".to_string()));

    run_sprig_command(dir.path(), &["checkout", "--", "foo.txt"])
        .assert()
        .success()
        .stdout("");

    dir.child("foo.txt").assert("A\n");
}

#[rstest]
#[case::full_id(40)]
#[case::abbreviated_id(8)]
fn checkout_file_from_an_older_commit(committed_repository_dir: TempDir, #[case] length: usize) {
    let dir = committed_repository_dir;
    let c1 = get_branch_commit_sha(dir.path(), "master");
    commit_file(dir.path(), "foo.txt", "B\n", "c2");

    run_sprig_command(dir.path(), &["checkout", &c1[..length], "--", "foo.txt"])
        .assert()
        .success();

    dir.child("foo.txt").assert("A\n");
}

#[rstest]
fn checkout_file_from_an_unknown_commit_is_refused(committed_repository_dir: TempDir) {
    run_sprig_command(
        committed_repository_dir.path(),
        &["checkout", "0000000000", "--", "foo.txt"],
    )
    .assert()
    .success()
    .stdout("No commit with that id exists.\n");
}

#[rstest]
fn checkout_untracked_file_is_refused(committed_repository_dir: TempDir) {
    run_sprig_command(
        committed_repository_dir.path(),
        &["checkout", "--", "ghost.txt"],
    )
    .assert()
    .success()
    .stdout("File does not exist in that commit.\n");
}

#[rstest]
fn checkout_branch_replaces_the_working_tree(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    run_sprig_command(dir.path(), &["branch", "b1"])
        .assert()
        .success();
    commit_file(dir.path(), "bar.txt", "bar\n", "c2");
    commit_file(dir.path(), "foo.txt", "C\n", "c3");

    sprig_checkout_branch(dir.path(), "b1")
        .assert()
        .success()
        .stdout("");

    dir.child("foo.txt").assert("A\n");
    dir.child("bar.txt").assert(predicate::path::missing());
    dir.child(".sprig")
        .child("HEAD")
        .assert("ref: refs/heads/b1");

    sprig_checkout_branch(dir.path(), "master")
        .assert()
        .success();

    assert_eq!(read_file(dir.path().join("foo.txt")), "C\n");
    assert_eq!(read_file(dir.path().join("bar.txt")), "bar\n");
}

#[rstest]
fn checkout_branch_refuses_to_overwrite_untracked_files(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    run_sprig_command(dir.path(), &["branch", "b1"])
        .assert()
        .success();
    sprig_checkout_branch(dir.path(), "b1").assert().success();
    commit_file(dir.path(), "bar.txt", "bar\n", "c2");
    sprig_checkout_branch(dir.path(), "master").assert().success();
    write_file(FileSpec::new(dir.path().join("bar.txt"), "local\n".to_string()));

    sprig_checkout_branch(dir.path(), "b1")
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    dir.child("bar.txt").assert("local\n");
    dir.child(".sprig")
        .child("HEAD")
        .assert("ref: refs/heads/master");
}

#[rstest]
#[case::current_branch("master", "No need to checkout the current branch.\n")]
#[case::unknown_branch("nope", "No such branch exists.\n")]
fn checkout_branch_is_refused(
    committed_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) {
    sprig_checkout_branch(committed_repository_dir.path(), branch)
        .assert()
        .success()
        .stdout(message.to_string());
}

#[rstest]
fn reset_moves_the_branch_and_clears_staging(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let c1 = get_branch_commit_sha(dir.path(), "master");
    commit_file(dir.path(), "bar.txt", "bar\n", "c2");
    write_file(FileSpec::new(dir.path().join("baz.txt"), "baz\n".to_string()));
    run_sprig_command(dir.path(), &["add", "baz.txt"])
        .assert()
        .success();

    run_sprig_command(dir.path(), &["reset", &c1])
        .assert()
        .success()
        .stdout("");

    assert_eq!(get_branch_commit_sha(dir.path(), "master"), c1);
    dir.child("bar.txt").assert(predicate::path::missing());
    dir.child("baz.txt").assert(predicate::path::missing());
    run_sprig_command(dir.path(), &["status"])
        .assert()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn reset_to_an_unknown_commit_is_refused(committed_repository_dir: TempDir) {
    run_sprig_command(committed_repository_dir.path(), &["reset", "abc"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}
