use crate::common::command::{init_repository_dir, head_commit, read_head, run_senpai_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reinitializing_keeps_history_and_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head_before = read_head(dir);
    let commit_before = head_commit(dir);

    run_senpai_command(dir, &["init", "--initial-branch", "other"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Reinitialized existing repository in"));

    assert_eq!(read_head(dir), head_before);
    assert_eq!(head_commit(dir), commit_before);

    Ok(())
}
