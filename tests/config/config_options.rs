use crate::common::command::{repository_dir, run_senpai_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_default_options(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();

    let expected = "core.bare=false\ncore.filemode=true\ncore.logallrefupdates=true\ncore.repositoryformatversion=0";
    assert_eq!(stdout_of(dir, &["config", "--list"]), expected);
    assert_eq!(stdout_of(dir, &["config", "list"]), expected);
}

#[rstest]
fn set_then_get_an_option(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();

    run_senpai_command(dir, &["config", "set", "user.name", "Ada"])
        .assert()
        .success()
        .stdout("Set user.name to 'Ada'\n");

    assert_eq!(stdout_of(dir, &["config", "get", "user.name"]), "Ada");
    assert_eq!(stdout_of(dir, &["config", "get", "core.bare"]), "false");
}

#[rstest]
fn get_a_missing_option_fails(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();

    run_senpai_command(dir, &["config", "get", "user.email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key 'email' not found in section 'user'"));

    run_senpai_command(dir, &["config", "get", "nodot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config key"));
}

#[rstest]
fn corrupt_config_is_reported(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();
    std::fs::write(dir.join(".senpai/config"), "[core]\nnot a pair\n").unwrap();

    run_senpai_command(dir, &["config", "--list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config is corrupt at line 2"));
}
