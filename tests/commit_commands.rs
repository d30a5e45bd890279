use crate::common::command::{
    branch_head, goit_commit, init_repository_dir, read_object, repository_dir, run_goit_command,
};
use crate::common::file::{FileSpec, write_file};
use crate::common::sha1_hex_of;
use assert_fs::TempDir;
use predicates::prelude::{predicate, Predicate};
use rstest::rstest;

mod common;

#[rstest]
fn commit_with_empty_index_is_refused(repository_dir: TempDir) {
    let dir = repository_dir;
    run_goit_command(dir.path(), &["init"]).assert().success();

    goit_commit(dir.path(), "empty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to commit"));
}

#[rstest]
fn first_commit_writes_tree_commit_and_branch_head(repository_dir: TempDir) {
    let dir = repository_dir;
    run_goit_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "A\n".to_string()));
    run_goit_command(dir.path(), &["add", "a.txt"]).assert().success();

    goit_commit(dir.path(), "first")
        .assert()
        .success()
        .stdout(predicate::str::contains("(root-commit)"));

    // the branch head now exists and points at a commit object
    let head_oid = branch_head(dir.path(), "main");
    assert_eq!(head_oid.len(), 40);

    let commit = read_object(dir.path(), &head_oid);
    assert!(commit.starts_with("commit\ntree "));
    assert!(!commit.contains("parent "));
    assert!(commit.contains("\ndate "));
    assert!(commit.ends_with("\n\nfirst\n"));

    // the tree maps exactly a.txt to the hash of its contents
    let tree_oid = commit
        .lines()
        .find_map(|line| line.strip_prefix("tree "))
        .unwrap();
    let tree = read_object(dir.path(), tree_oid);
    assert_eq!(tree, format!("tree\n{} a.txt\n", sha1_hex_of("A\n")));

    // the index was cleared
    let index = std::fs::read_to_string(dir.path().join(".goit").join("index")).unwrap();
    assert!(index.is_empty());
}

#[rstest]
fn second_commit_links_to_the_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let first_oid = branch_head(dir.path(), "main");

    write_file(FileSpec::new(dir.path().join("a.txt"), "A2\n".to_string()));
    run_goit_command(dir.path(), &["add", "a.txt"]).assert().success();
    goit_commit(dir.path(), "second").assert().success();

    let second_oid = branch_head(dir.path(), "main");
    assert_ne!(first_oid, second_oid);

    let commit = read_object(dir.path(), &second_oid);
    assert!(commit.contains(&format!("parent {}", first_oid)));
}

#[rstest]
fn commit_date_is_rfc3339_utc(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let head_oid = branch_head(dir.path(), "main");

    let commit = read_object(dir.path(), &head_oid);
    let date = commit
        .lines()
        .find_map(|line| line.strip_prefix("date "))
        .unwrap();

    let is_match = predicate::str::is_match(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap();
    assert!(is_match.eval(date));
}

#[rstest]
fn commit_message_is_trimmed(repository_dir: TempDir) {
    let dir = repository_dir;
    run_goit_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "A\n".to_string()));
    run_goit_command(dir.path(), &["add", "a.txt"]).assert().success();
    goit_commit(dir.path(), "  padded  ").assert().success();

    let head_oid = branch_head(dir.path(), "main");
    let commit = read_object(dir.path(), &head_oid);
    assert!(commit.ends_with("\n\npadded\n"));
}

#[rstest]
fn identical_snapshots_share_the_tree_object(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let first_oid = branch_head(dir.path(), "main");
    let first_tree = read_object(dir.path(), &first_oid)
        .lines()
        .find_map(|line| line.strip_prefix("tree ").map(str::to_string))
        .unwrap();

    // stage the same content again and commit
    run_goit_command(dir.path(), &["add", "a.txt"]).assert().success();
    goit_commit(dir.path(), "same snapshot").assert().success();

    let second_oid = branch_head(dir.path(), "main");
    let second_tree = read_object(dir.path(), &second_oid)
        .lines()
        .find_map(|line| line.strip_prefix("tree ").map(str::to_string))
        .unwrap();

    // content addressing: the unchanged snapshot reuses the tree
    assert_eq!(first_tree, second_tree);
}
