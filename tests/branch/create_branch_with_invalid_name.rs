use crate::common::command::{init_repository_dir, run_senpai_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(".hidden")]
#[case("double..dot")]
#[case("trailing/")]
#[case("/leading")]
#[case("name.lock")]
#[case("at@{brace")]
#[case("with space")]
#[case("star*")]
#[case("colon:")]
#[case("question?")]
#[case("bracket[")]
#[case("tilde~")]
#[case("caret^")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] name: &str) {
    run_senpai_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));
}

#[rstest]
#[case("feature")]
#[case("feature/login")]
#[case("release-1.0")]
#[case("user_branch")]
#[case("v2")]
fn create_branch_with_valid_name(init_repository_dir: TempDir, #[case] name: &str) {
    run_senpai_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .success();
}
