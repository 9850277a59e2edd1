use crate::common::command::{init_repository_dir, repository_dir, run_sprig_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn init_creates_the_repository_layout(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("");

    let sprig_dir = repository_dir.child(".sprig");
    sprig_dir.child("objects").assert(predicate::path::is_dir());
    sprig_dir.child("commits").child("master").assert(predicate::path::is_dir());
    sprig_dir.child("HEAD").assert("ref: refs/heads/master");
    sprig_dir
        .child("refs")
        .child("heads")
        .child("master")
        .assert(predicate::str::is_match(r"^[0-9a-f]{40}$").unwrap());
    sprig_dir.child("commit-index").assert(predicate::path::is_file());
}

#[rstest]
fn init_at_path_creates_the_directory(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    repository_dir
        .child("nested")
        .child("project")
        .child(".sprig")
        .child("HEAD")
        .assert(predicate::path::is_file());
}

#[rstest]
fn second_init_is_refused(init_repository_dir: TempDir) {
    let master_ref = init_repository_dir
        .child(".sprig")
        .child("refs")
        .child("heads")
        .child("master");
    let root_commit = std::fs::read_to_string(master_ref.path()).unwrap();

    run_sprig_command(init_repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("A sprig version-control system already exists in the current directory.\n");

    master_ref.assert(root_commit);
}

#[rstest]
fn root_commit_is_stamped_at_the_epoch(init_repository_dir: TempDir) {
    run_sprig_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(
                r"^===\ncommit [0-9a-f]{40}\nDate: Thu Jan 1 00:00:00 1970 \+0000\ninitial commit\n\n$",
            )
            .unwrap(),
        );
}

#[rstest]
fn commands_outside_a_repository_are_refused(repository_dir: TempDir) {
    run_sprig_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("Not in an initialized sprig directory.\n");

    repository_dir
        .child(".sprig")
        .assert(predicate::path::missing());
}
