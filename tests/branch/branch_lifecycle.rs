use crate::common::META_DIR;
use crate::common::command::{
    head_commit, init_repository_dir, read_branch, repository_dir, run_senpai_command, stdout_of,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_branch_without_commits_fails(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();

    run_senpai_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no commits yet"));
}

#[rstest]
fn branch_lifecycle(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_senpai_command(dir, &["branch", "feature"]).assert().success();
    assert_eq!(read_branch(dir, "feature"), head_commit(dir));

    run_senpai_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch 'feature' already exists"));

    assert_eq!(stdout_of(dir, &["branch"]), "  feature\n* master");

    run_senpai_command(dir, &["branch", "-d", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("currently checked out"));

    let short_oid = head_commit(dir)[..7].to_string();
    run_senpai_command(dir, &["branch", "-d", "feature"])
        .assert()
        .success()
        .stdout(format!("Deleted branch feature (was {short_oid}).\n"));

    assert_eq!(stdout_of(dir, &["branch"]), "* master");

    run_senpai_command(dir, &["branch", "-d", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch 'feature' not found"));

    Ok(())
}

#[rstest]
fn deleting_a_nested_branch_prunes_empty_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let heads = dir.join(META_DIR).join("refs/heads");

    run_senpai_command(dir, &["branch", "feature/api/v1"]).assert().success();
    run_senpai_command(dir, &["branch", "feature/ui"]).assert().success();
    assert!(heads.join("feature/api/v1").is_file());

    run_senpai_command(dir, &["branch", "-d", "feature/api/v1"]).assert().success();
    assert!(!heads.join("feature/api").exists());
    assert!(heads.join("feature").is_dir());

    run_senpai_command(dir, &["branch", "-d", "feature/ui"]).assert().success();
    assert!(!heads.join("feature").exists());
    assert!(heads.is_dir());

    Ok(())
}
