use crate::common::command::{
    AUTHOR_EMAIL, AUTHOR_NAME, head_commit, init_repository_dir, repository_dir,
    run_senpai_command, stdout_of,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_single_commit_in_medium_format(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let oid = head_commit(dir);

    assert_eq!(
        stdout_of(dir, &["log"]),
        format!(
            "commit {oid}\nAuthor: {AUTHOR_NAME} <{AUTHOR_EMAIL}>\nDate:   Sun Jan 1 12:00:00 2023 +0000\n\n    Initial commit"
        )
    );
}

#[rstest]
fn show_log_with_no_commits(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();

    run_senpai_command(dir, &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no commits yet"));
}

#[rstest]
fn multi_line_messages_are_indented(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::write(dir.join("1.txt"), "one, again").unwrap();
    run_senpai_command(dir, &["add", "1.txt"]).assert().success();
    run_senpai_command(dir, &["commit", "-m", "Subject\n\nBody line"])
        .assert()
        .success();

    let log = stdout_of(dir, &["log"]);
    assert!(log.contains("\n    Subject\n    \n    Body line\n"));
}
