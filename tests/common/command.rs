use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one root commit tracking `a.txt` containing "A\n"
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_goit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "A\n".to_string(),
    ));

    run_goit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    goit_commit(repository_dir.path(), "first").assert().success();

    repository_dir
}

pub fn run_goit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("goit").expect("Failed to find goit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn goit_commit(dir: &Path, message: &str) -> Command {
    run_goit_command(dir, &["commit", "-m", message])
}

/// Head hash of a branch, read straight off the ref file
pub fn branch_head(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".goit").join("refs").join("heads").join(branch);
    std::fs::read_to_string(ref_path)
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Raw bytes of a stored object
pub fn read_object(dir: &Path, oid: &str) -> String {
    let object_path = dir.join(".goit").join("objects").join(oid);
    std::fs::read_to_string(object_path).expect("Failed to read object")
}

/// Number of objects currently in the store
pub fn object_count(dir: &Path) -> usize {
    let objects_path = dir.join(".goit").join("objects");
    std::fs::read_dir(objects_path)
        .map(|entries| entries.filter_map(|entry| entry.ok()).count())
        .unwrap_or(0)
}
