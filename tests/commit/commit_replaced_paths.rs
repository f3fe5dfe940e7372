use crate::common::command::{
    head_commit, init_repository_dir, read_index, run_senpai_command, senpai_commit, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn indexed_paths(dir: &std::path::Path) -> Vec<String> {
    read_index(dir)
        .lines()
        .filter_map(|line| line.split_once(' ').and_then(|(_, rest)| rest.rsplit_once(' ')))
        .map(|(path, _)| path.to_string())
        .collect()
}

fn root_tree_listing(dir: &std::path::Path) -> Vec<String> {
    let commit = stdout_of(dir, &["cat-file", "-p", &head_commit(dir)]);
    let tree = commit
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("tree "))
        .unwrap()
        .to_string();

    stdout_of(dir, &["cat-file", "-p", &tree])
        .lines()
        .map(|line| {
            let (kind, name) = line.split_once('\t').unwrap();
            format!("{} {name}", kind.split(' ').nth(1).unwrap())
        })
        .collect()
}

#[rstest]
fn file_replaced_by_directory_can_be_committed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::remove_file(dir.join("1.txt")).unwrap();
    write_file(FileSpec::new(dir.join("1.txt").join("inner.txt"), "inner".to_string()));

    run_senpai_command(dir, &["add", "1.txt/inner.txt"])
        .assert()
        .success();
    assert_eq!(
        indexed_paths(dir),
        vec!["1.txt/inner.txt", "a/2.txt", "a/b/3.txt"]
    );

    senpai_commit(dir, "Nest 1.txt").assert().success();

    assert_eq!(root_tree_listing(dir), vec!["tree 1.txt", "tree a"]);
    assert_eq!(stdout_of(dir, &["status"]), "");

    write_file(FileSpec::new(dir.join("1.txt").join("inner.txt"), "again".to_string()));
    run_senpai_command(dir, &["add", "1.txt"]).assert().success();
    senpai_commit(dir, "Edit nested file").assert().success();
}

#[rstest]
fn directory_replaced_by_file_can_be_committed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::remove_dir_all(dir.join("a")).unwrap();
    write_file(FileSpec::new(dir.join("a"), "now a file".to_string()));

    run_senpai_command(dir, &["add", "a"]).assert().success();
    assert_eq!(indexed_paths(dir), vec!["1.txt", "a"]);

    senpai_commit(dir, "Flatten a").assert().success();

    assert_eq!(root_tree_listing(dir), vec!["blob 1.txt", "blob a"]);
    assert_eq!(stdout_of(dir, &["status"]), "");
}
