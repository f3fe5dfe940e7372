use crate::common::command::{
    head_commit, init_repository_dir, read_branch, read_head, read_index, run_senpai_command,
    senpai_commit, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// `master` keeps the initial snapshot, `feature` edits `1.txt`, adds
/// `c/4.txt` and drops nothing.
fn diverge_feature_branch(dir: &std::path::Path) {
    run_senpai_command(dir, &["checkout", "-b", "feature"])
        .assert()
        .success()
        .stdout("Switched to branch 'feature'\n");

    write_file(FileSpec::new(dir.join("1.txt"), "one on feature".to_string()));
    write_file(FileSpec::new(dir.join("c/4.txt"), "four".to_string()));
    run_senpai_command(dir, &["add", "1.txt", "c"]).assert().success();
    senpai_commit(dir, "Feature work").assert().success();
}

#[rstest]
fn checkout_branch_restores_its_snapshot(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let master_index = read_index(dir);
    diverge_feature_branch(dir);

    run_senpai_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout("Switched to branch 'master'\n");

    assert_eq!(read_head(dir), "ref: refs/heads/master");
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert_eq!(read_file(&dir.join("a/2.txt")), "two");
    assert_eq!(read_file(&dir.join("a/b/3.txt")), "three");
    assert!(!dir.join("c").exists());
    assert_eq!(read_index(dir), master_index);
    assert_eq!(stdout_of(dir, &["status"]), "");

    run_senpai_command(dir, &["checkout", "feature"]).assert().success();
    assert_eq!(read_file(&dir.join("1.txt")), "one on feature");
    assert_eq!(read_file(&dir.join("c/4.txt")), "four");
    assert_eq!(head_commit(dir), read_branch(dir, "feature"));

    Ok(())
}

#[rstest]
fn checkout_removes_untracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("scratch.txt"), "temporary".to_string()));

    run_senpai_command(dir, &["checkout", "master"]).assert().success();

    assert!(!dir.join("scratch.txt").exists());
    assert!(dir.join(".senpai/HEAD").is_file());

    Ok(())
}

#[rstest]
fn checkout_of_an_unknown_target_leaves_the_working_directory_alone(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("scratch.txt"), "keep me".to_string()));
    let head_before = read_head(dir);

    run_senpai_command(dir, &["checkout", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference 'nowhere' not found"));

    assert_eq!(read_file(&dir.join("scratch.txt")), "keep me");
    assert_eq!(read_head(dir), head_before);

    Ok(())
}

#[rstest]
fn checkout_new_branch_that_exists_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_senpai_command(dir, &["checkout", "-b", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
