use crate::common::command::{init_repository_dir, run_goit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::{predicate, PredicateBooleanExt};
use rstest::rstest;

mod common;

#[rstest]
fn no_staged_files_to_diff(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    // the commit cleared the index
    run_goit_command(dir.path(), &["diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No staged files to diff"));
}

#[rstest]
fn staged_file_equal_to_working_copy_has_no_differences(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "B\n".to_string()));
    run_goit_command(dir.path(), &["add", "b.txt"]).assert().success();

    run_goit_command(dir.path(), &["diff", "b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File: b.txt"))
        .stdout(predicate::str::contains("No differences"));
}

#[rstest]
fn edited_staged_file_reports_byte_sizes(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "B\n".to_string()));
    run_goit_command(dir.path(), &["add", "b.txt"]).assert().success();
    write_file(FileSpec::new(dir.path().join("b.txt"), "B longer\n".to_string()));

    run_goit_command(dir.path(), &["diff", "b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- staged version"))
        .stdout(predicate::str::contains("+++ working version"))
        .stdout(predicate::str::contains("Staged version: 2 bytes"))
        .stdout(predicate::str::contains("Working version: 9 bytes"));
}

#[rstest]
fn diff_without_a_path_scans_every_staged_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "B\n".to_string()));
    write_file(FileSpec::new(dir.path().join("c.txt"), "C\n".to_string()));
    run_goit_command(dir.path(), &["add", "."]).assert().success();
    write_file(FileSpec::new(dir.path().join("c.txt"), "C2\n".to_string()));

    run_goit_command(dir.path(), &["diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Differences found:"))
        .stdout(predicate::str::contains("diff --goit a/c.txt b/c.txt"))
        // b.txt is unchanged, so it must not get a diff block
        .stdout(predicate::str::contains("diff --goit a/b.txt b/b.txt").not());
}

#[rstest]
fn unstaged_path_is_reported_as_not_staged(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("loose.txt"), "x\n".to_string()));

    run_goit_command(dir.path(), &["diff", "loose.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File not staged"));
}

#[rstest]
fn unchanged_staged_set_reports_no_differences(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "B\n".to_string()));
    run_goit_command(dir.path(), &["add", "b.txt"]).assert().success();

    run_goit_command(dir.path(), &["diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No differences found"));
}
