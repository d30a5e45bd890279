use crate::common::command::{goit_commit, init_repository_dir, repository_dir, run_goit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn clean_tree_reports_nothing_to_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_goit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch main"))
        .stdout(predicate::str::contains(
            "nothing to commit, working tree clean",
        ));
}

#[rstest]
fn untracked_files_are_listed_with_the_add_hint(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("new.txt"), "new\n".to_string()));

    run_goit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Untracked files:"))
        .stdout(predicate::str::contains("  new.txt"))
        .stdout(predicate::str::contains(
            "Use 'goit add <file>' to include in what will be committed",
        ));
}

#[rstest]
fn staged_new_file_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "B\n".to_string()));
    run_goit_command(dir.path(), &["add", "b.txt"]).assert().success();

    run_goit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed:"))
        .stdout(predicate::str::contains("  new file:   b.txt"));
}

#[rstest]
fn staged_modification_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "A2\n".to_string()));
    run_goit_command(dir.path(), &["add", "a.txt"]).assert().success();

    run_goit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed:"))
        .stdout(predicate::str::contains("  modified:   a.txt"));
}

#[rstest]
fn unstaged_modification_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "edited\n".to_string()));

    run_goit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes not staged for commit:"))
        .stdout(predicate::str::contains("  modified:   a.txt"));
}

#[rstest]
fn staged_then_edited_counts_as_staged(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "A2\n".to_string()));
    run_goit_command(dir.path(), &["add", "a.txt"]).assert().success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "A3\n".to_string()));

    // each path gets exactly one classification, staged wins
    run_goit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed:"))
        .stdout(predicate::str::contains("  modified:   a.txt").count(1));
}

#[rstest]
fn empty_repository_is_clean(repository_dir: TempDir) {
    let dir = repository_dir;
    run_goit_command(dir.path(), &["init"]).assert().success();

    run_goit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch main"))
        .stdout(predicate::str::contains(
            "nothing to commit, working tree clean",
        ));
}

#[rstest]
fn after_commit_the_report_is_clean_again(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "B\n".to_string()));
    run_goit_command(dir.path(), &["add", "b.txt"]).assert().success();
    goit_commit(dir.path(), "add b").assert().success();

    run_goit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "nothing to commit, working tree clean",
        ));
}
