use crate::common::command::{head_commit, init_repository_dir, run_senpai_command, stdout_of};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_branches_in_name_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    for name in ["zeta", "alpha", "feature/nested"] {
        run_senpai_command(dir, &["branch", name]).assert().success();
    }

    assert_eq!(
        stdout_of(dir, &["branch"]),
        "  alpha\n  feature/nested\n* master\n  zeta"
    );
}

#[rstest]
fn verbose_listing_shows_tip_and_subject(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let short_oid = head_commit(dir)[..7].to_string();

    assert_eq!(
        stdout_of(dir, &["branch", "-v"]),
        format!("* master {short_oid} Initial commit")
    );
}

#[rstest]
fn detached_head_is_listed_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let oid = head_commit(dir);
    run_senpai_command(dir, &["checkout", &oid]).assert().success();

    assert_eq!(
        stdout_of(dir, &["branch"]),
        format!("* (HEAD detached at {})\n  master", &oid[..7])
    );
}
