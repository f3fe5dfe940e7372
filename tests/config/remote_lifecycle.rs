use crate::common::command::{repository_dir, run_senpai_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn remote_lifecycle(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();

    run_senpai_command(dir, &["remote", "add", "origin", "git@example.com:me/repo.git"])
        .assert()
        .success()
        .stdout("Added remote 'origin' with URL 'git@example.com:me/repo.git'\n");
    run_senpai_command(dir, &["remote", "add", "origin", "elsewhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remote 'origin' already exists"));

    run_senpai_command(dir, &["remote", "add", "backup", "git@example.com:me/backup.git"])
        .assert()
        .success();
    assert_eq!(stdout_of(dir, &["remote"]), "backup\norigin");
    assert_eq!(
        stdout_of(dir, &["remote", "-v", "list"]),
        "backup\tgit@example.com:me/backup.git\norigin\tgit@example.com:me/repo.git"
    );

    run_senpai_command(dir, &["remote", "set-url", "origin", "git@example.com:me/moved.git"])
        .assert()
        .success();
    assert_eq!(
        stdout_of(dir, &["remote", "get-url", "origin"]),
        "git@example.com:me/moved.git"
    );
    assert_eq!(
        stdout_of(dir, &["config", "get", "remote.origin.fetch"]),
        "+refs/heads/*:refs/remotes/origin/*"
    );

    run_senpai_command(dir, &["remote", "remove", "origin"])
        .assert()
        .success()
        .stdout("Removed remote 'origin'\n");
    assert_eq!(stdout_of(dir, &["remote"]), "backup");

    for args in [
        vec!["remote", "remove", "origin"],
        vec!["remote", "get-url", "origin"],
        vec!["remote", "set-url", "origin", "x"],
    ] {
        run_senpai_command(dir, &args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("remote 'origin' does not exist"));
    }
}
