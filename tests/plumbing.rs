use crate::common::command::{init_repository_dir, run_sprig_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::{assert_eq, assert_ne};
use rstest::rstest;

mod common;

fn object_path(dir: &TempDir, oid: &str) -> std::path::PathBuf {
    dir.path()
        .join(".sprig")
        .join("objects")
        .join(&oid[..2])
        .join(&oid[2..])
}

#[rstest]
fn hash_object_prints_a_fingerprint_without_storing(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello\n".to_string()));

    let oid = stdout_of(run_sprig_command(dir.path(), &["hash-object", "foo.txt"]));
    let oid = oid.trim();

    assert_eq!(oid.len(), 40);
    assert!(oid.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(!object_path(&dir, oid).exists());
}

#[rstest]
fn hash_object_with_write_stores_a_readable_blob(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello\n".to_string()));

    let oid = stdout_of(run_sprig_command(dir.path(), &["hash-object", "-w", "foo.txt"]));
    let oid = oid.trim();

    assert!(object_path(&dir, oid).is_file());
    run_sprig_command(dir.path(), &["cat-file", oid, "foo.txt"])
        .assert()
        .success()
        .stdout("hello\n");
}

#[rstest]
fn fingerprint_depends_on_the_file_name(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "same\n".to_string()));
    write_file(FileSpec::new(dir.path().join("b.txt"), "same\n".to_string()));

    let a = stdout_of(run_sprig_command(dir.path(), &["hash-object", "a.txt"]));
    let b = stdout_of(run_sprig_command(dir.path(), &["hash-object", "b.txt"]));

    assert_ne!(a, b);
}

#[rstest]
fn fingerprint_matches_the_staged_object(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello\n".to_string()));

    let oid = stdout_of(run_sprig_command(dir.path(), &["hash-object", "foo.txt"]));
    run_sprig_command(dir.path(), &["add", "foo.txt"])
        .assert()
        .success();

    dir.child(".sprig")
        .child("staging")
        .child("add")
        .child(oid.trim())
        .assert(predicate::path::is_file());
}

#[rstest]
fn hash_object_of_a_missing_file_is_a_user_error(init_repository_dir: TempDir) {
    run_sprig_command(init_repository_dir.path(), &["hash-object", "nope.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn cat_file_with_the_wrong_name_fails_verification(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello\n".to_string()));
    let oid = stdout_of(run_sprig_command(dir.path(), &["hash-object", "-w", "foo.txt"]));

    run_sprig_command(dir.path(), &["cat-file", oid.trim(), "bar.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("fatal: hash mismatch"));
}

#[rstest]
fn cat_file_of_an_unknown_blob_fails(init_repository_dir: TempDir) {
    run_sprig_command(
        init_repository_dir.path(),
        &["cat-file", &"0".repeat(40), "foo.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing from the object store"));
}

#[rstest]
fn names_and_contents_sharing_a_concatenation_stay_distinct(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "Xb".to_string()));
    write_file(FileSpec::new(dir.path().join("ba.txt"), "X".to_string()));

    let a = stdout_of(run_sprig_command(dir.path(), &["hash-object", "a.txt"]));
    let ba = stdout_of(run_sprig_command(dir.path(), &["hash-object", "ba.txt"]));
    assert_ne!(a, ba);

    run_sprig_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_sprig_command(dir.path(), &["add", "ba.txt"])
        .assert()
        .success();
    run_sprig_command(dir.path(), &["commit", "c1"])
        .assert()
        .success()
        .stdout("");

    std::fs::remove_file(dir.path().join("ba.txt")).unwrap();
    run_sprig_command(dir.path(), &["checkout", "--", "ba.txt"])
        .assert()
        .success();
    dir.child("ba.txt").assert("X");
}
