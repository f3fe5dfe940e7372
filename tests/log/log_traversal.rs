use crate::common::command::{
    head_commit, init_repository_dir, run_senpai_command, senpai_commit, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

fn logged_commits(dir: &Path) -> Vec<String> {
    stdout_of(dir, &["log"])
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}

#[rstest]
fn linear_history_is_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let mut expected = vec![head_commit(dir)];

    for round in 1..=3 {
        write_file(FileSpec::new(dir.join("1.txt"), format!("round {round}")));
        run_senpai_command(dir, &["add", "1.txt"]).assert().success();
        senpai_commit(dir, &format!("Round {round}")).assert().success();
        expected.insert(0, head_commit(dir));
    }

    assert_eq!(logged_commits(dir), expected);
}

#[rstest]
fn diamond_history_visits_every_commit_once(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let tree = stdout_of(dir, &["write-tree"]);

    let a = stdout_of(dir, &["commit-tree", &tree, "-m", "A"]);
    let b = stdout_of(dir, &["commit-tree", &tree, "-p", &a, "-m", "B"]);
    let c = stdout_of(dir, &["commit-tree", &tree, "-p", &a, "-m", "C"]);
    let d = stdout_of(dir, &["commit-tree", &tree, "-p", &b, "-p", &c, "-m", "D"]);

    run_senpai_command(dir, &["checkout", &d]).assert().success();

    assert_eq!(logged_commits(dir), vec![d.clone(), b.clone(), a.clone(), c.clone()]);

    let log = stdout_of(dir, &["log"]);
    assert!(log.contains(&format!("Merge: {} {}", &b[..7], &c[..7])));
}
