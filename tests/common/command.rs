use crate::common::META_DIR;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use derive_new::new;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
/// %Y-%m-%d %H:%M:%S %z
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit on `master` holding `1.txt`, `a/2.txt` and
/// `a/b/3.txt`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_senpai_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_senpai_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    senpai_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// The binary run inside `dir`, with colours off and a fixed author identity.
pub fn run_senpai_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("senpai").expect("Failed to find senpai binary");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("SENPAI_LOG")
        .envs(vec![
            ("GIT_AUTHOR_NAME", AUTHOR_NAME),
            ("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
            ("GIT_AUTHOR_DATE", AUTHOR_DATE),
        ]);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn senpai_commit(dir: &Path, message: &str) -> Command {
    run_senpai_command(dir, &["commit", "-m", message])
}

/// Stdout of a command that must succeed, without trailing whitespace.
pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_senpai_command(dir, args).assert().success();

    String::from_utf8_lossy(&output.get_output().stdout)
        .trim_end()
        .to_string()
}

/// Content of `HEAD`, trimmed.
pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(META_DIR).join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// Commit id of a branch tip, trimmed.
pub fn read_branch(dir: &Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(META_DIR).join("refs/heads").join(branch))
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Commit id HEAD resolves to.
pub fn head_commit(dir: &Path) -> String {
    let head = read_head(dir);
    match head.strip_prefix("ref: refs/heads/") {
        Some(branch) => read_branch(dir, branch),
        None => head,
    }
}

pub fn read_index(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(META_DIR).join("index")).unwrap_or_default()
}

#[derive(Debug, Clone, new)]
pub struct RandomAuthor {
    pub name: String,
    pub email: String,
}

pub fn generate_random_author() -> RandomAuthor {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    let name = Name().fake::<String>().replace(" ", "_");
    let email = FreeEmail().fake::<String>();
    RandomAuthor::new(name, email)
}
