use crate::common::META_DIR;
use crate::common::command::{init_repository_dir, run_senpai_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn print_nothing_when_no_files_are_changed(init_repository_dir: TempDir) {
    run_senpai_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn restaging_a_file_after_editing_it_reports_staged(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a/2.txt"), "two, revised".to_string()));
    run_senpai_command(dir, &["add", "a/2.txt"]).assert().success();

    assert_eq!(stdout_of(dir, &["status"]), "A\ta/2.txt");

    Ok(())
}

#[rstest]
fn reverting_an_edit_reports_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    assert_eq!(stdout_of(dir, &["status"]), "M\t1.txt");

    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    assert_eq!(stdout_of(dir, &["status"]), "");

    Ok(())
}

#[rstest]
fn deleted_files_are_not_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    std::fs::remove_file(dir.join("a/b/3.txt"))?;

    assert_eq!(stdout_of(dir, &["status"]), "");

    Ok(())
}

#[rstest]
fn corrupt_head_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::write(dir.join(META_DIR).join("HEAD"), "garbage\n").unwrap();

    run_senpai_command(dir, &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));
}

#[rstest]
fn unreadable_head_commit_compares_against_an_empty_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::write(
        dir.join(META_DIR).join("refs/heads/master"),
        format!("{}\n", "0".repeat(40)),
    )
    .unwrap();

    assert_eq!(
        stdout_of(dir, &["status"]),
        "A\t1.txt\nA\ta/2.txt\nA\ta/b/3.txt"
    );
}
