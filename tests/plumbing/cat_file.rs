use crate::common::command::{head_commit, init_repository_dir, run_senpai_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn cat_file_describes_a_blob(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let blob = stdout_of(dir, &["hash-object", "1.txt"]);

    assert_eq!(stdout_of(dir, &["cat-file", "-t", &blob]), "blob");
    assert_eq!(stdout_of(dir, &["cat-file", "-s", &blob]), "3");
    run_senpai_command(dir, &["cat-file", "-p", &blob])
        .assert()
        .success()
        .stdout("one");
    run_senpai_command(dir, &["cat-file", "-e", &blob])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn cat_file_pretty_prints_trees(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let commit = stdout_of(dir, &["cat-file", "-p", &head_commit(dir)]);
    let tree = commit
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("tree "))
        .unwrap()
        .to_string();

    let listing = stdout_of(dir, &["cat-file", "-p", &tree]);
    let lines = listing.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("100644 blob "));
    assert!(lines[0].ends_with("\t1.txt"));
    assert!(lines[1].starts_with("040000 tree "));
    assert!(lines[1].ends_with("\ta"));
}

#[rstest]
fn cat_file_of_a_missing_object_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let missing = "0".repeat(40);

    run_senpai_command(dir, &["cat-file", "-e", &missing])
        .assert()
        .failure();
    run_senpai_command(dir, &["cat-file", "-p", &missing])
        .assert()
        .failure()
        .stderr(predicate::str::contains("object not found"));
}

#[rstest]
fn cat_file_rejects_malformed_ids(init_repository_dir: TempDir) {
    run_senpai_command(init_repository_dir.path(), &["cat-file", "-t", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));
}

#[rstest]
fn cat_file_requires_a_mode(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let oid = head_commit(dir);

    run_senpai_command(dir, &["cat-file", &oid]).assert().failure();
}
