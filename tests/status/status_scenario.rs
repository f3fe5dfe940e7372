use crate::common::command::{repository_dir, run_senpai_command, senpai_commit, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn untracked_staged_committed_then_modified(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join(".senpaiignore"), "*.log\n".to_string()));
    write_file(FileSpec::new(dir.join("a.txt"), "alpha".to_string()));
    write_file(FileSpec::new(dir.join("b.log"), "noise".to_string()));

    assert_eq!(
        stdout_of(dir, &["status"]),
        "??\t.senpaiignore\n??\ta.txt"
    );

    run_senpai_command(dir, &["add", "a.txt"]).assert().success();
    assert_eq!(
        stdout_of(dir, &["status"]),
        "??\t.senpaiignore\nA\ta.txt"
    );

    senpai_commit(dir, "Add a").assert().success();
    assert_eq!(stdout_of(dir, &["status"]), "??\t.senpaiignore");

    write_file(FileSpec::new(dir.join("a.txt"), "alpha, edited".to_string()));
    assert_eq!(
        stdout_of(dir, &["status"]),
        "??\t.senpaiignore\nM\ta.txt"
    );

    Ok(())
}

#[rstest]
fn staged_then_edited_file_is_modified(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "alpha".to_string()));
    run_senpai_command(dir, &["add", "a.txt"]).assert().success();

    write_file(FileSpec::new(dir.join("a.txt"), "alpha, edited".to_string()));

    assert_eq!(stdout_of(dir, &["status"]), "M\ta.txt");

    Ok(())
}

#[rstest]
fn ignored_directories_are_not_reported(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_senpai_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join(".senpaiignore"), "target/\n!keep.log\n".to_string()));
    write_file(FileSpec::new(dir.join("target/debug/app"), "bin".to_string()));
    write_file(FileSpec::new(dir.join("src/main.rs"), "fn main() {}".to_string()));

    assert_eq!(
        stdout_of(dir, &["status"]),
        "??\t.senpaiignore\n??\tsrc/main.rs"
    );

    Ok(())
}
