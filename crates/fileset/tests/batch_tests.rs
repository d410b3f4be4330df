//! Delete, move, copy and folder creation over resolved sets

use assert_fs::prelude::*;
use fileset::FileSet;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn pattern_in(temp: &assert_fs::TempDir, pattern: &str) -> String {
    format!("{}/{}", temp.path().display(), pattern)
}

#[test]
fn delete_tmp_files_in_build_folder() {
    let temp = assert_fs::TempDir::new().unwrap();
    for name in ["a.tmp", "b.tmp", "c.tmp"] {
        temp.child("build").child(name).write_str("x").unwrap();
    }
    temp.child("build/keep.txt").write_str("keep").unwrap();

    let mut set = FileSet::resolve(pattern_in(&temp, "build/*.tmp")).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.delete(), 3);
    assert!(!set.exists());

    let again = FileSet::resolve(pattern_in(&temp, "build/*.tmp")).unwrap();
    assert!(!again.exists());
    temp.child("build/keep.txt").assert("keep");
}

#[test]
fn delete_removes_folders_recursively() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("cache/one/deep.txt").write_str("x").unwrap();
    temp.child("cache/two").create_dir_all().unwrap();

    let mut set = FileSet::resolve_folders(pattern_in(&temp, "cache/*")).unwrap();
    assert_eq!(set.remove(), 2);
    temp.child("cache/one").assert(predicate::path::missing());
    temp.child("cache").assert(predicate::path::is_dir());
}

#[test]
fn delete_skips_entries_that_already_vanished() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.log").touch().unwrap();
    temp.child("b.log").touch().unwrap();

    let mut set = FileSet::resolve_files(pattern_in(&temp, "*.log")).unwrap();
    std::fs::remove_file(temp.child("a.log").path()).unwrap();

    assert_eq!(set.delete(), 1);
    assert!(!set.exists());
}

#[test]
fn move_rewrites_paths_in_order() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/a.txt").write_str("A").unwrap();
    temp.child("src/b.txt").write_str("B").unwrap();
    let dest = temp.child("moved");

    let mut set = FileSet::resolve_files(pattern_in(&temp, "src/*.txt")).unwrap();
    let before: Vec<_> = set.iter().map(|p| p.file_name().unwrap().to_string()).collect();

    assert_eq!(set.move_to(dest.path()).unwrap(), 2);

    let after: Vec<_> = set.iter().map(|p| p.file_name().unwrap().to_string()).collect();
    assert_eq!(before, after);
    assert!(set.iter().all(|p| p.as_str().contains("/moved/")));
    dest.child("a.txt").assert("A");
    temp.child("src/a.txt").assert(predicate::path::missing());

    // Later operations act on the moved locations
    assert_eq!(set.delete(), 2);
    dest.child("a.txt").assert(predicate::path::missing());
    dest.child("b.txt").assert(predicate::path::missing());
}

#[test]
fn move_creates_destination_and_ignores_trailing_separator() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("report.csv").write_str("1,2").unwrap();

    let mut set = FileSet::resolve_files(pattern_in(&temp, "report.csv")).unwrap();
    let destination = format!("{}/archive/2024/", temp.path().display());
    assert_eq!(set.move_to(&destination).unwrap(), 1);

    temp.child("archive/2024/report.csv").assert("1,2");
    assert!(set.paths()[0].as_str().ends_with("archive/2024/report.csv"));
    assert!(!set.paths()[0].as_str().contains("//"));
}

#[test]
fn move_skips_name_collisions_and_keeps_their_paths() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("in/a.txt").write_str("new a").unwrap();
    temp.child("in/b.txt").write_str("new b").unwrap();
    temp.child("out/a.txt").write_str("old a").unwrap();

    let mut set = FileSet::resolve_files(pattern_in(&temp, "in/*.txt")).unwrap();
    assert_eq!(set.move_to(temp.child("out").path()).unwrap(), 1);

    temp.child("out/a.txt").assert("old a");
    temp.child("in/a.txt").assert("new a");
    temp.child("out/b.txt").assert("new b");
    assert!(set.paths()[0].as_str().ends_with("in/a.txt"));
    assert!(set.paths()[1].as_str().ends_with("out/b.txt"));
}

#[test]
fn move_folder_moves_its_content() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("assets/img/logo.svg").write_str("<svg/>").unwrap();

    let mut set = FileSet::resolve_folders(pattern_in(&temp, "assets/img")).unwrap();
    assert_eq!(set.move_to(temp.child("public").path()).unwrap(), 1);
    temp.child("public/img/logo.svg").assert("<svg/>");
}

#[test]
fn copy_leaves_paths_untouched() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/a.txt").write_str("A").unwrap();
    temp.child("src/lib/b.txt").write_str("B").unwrap();

    let set = FileSet::resolve(pattern_in(&temp, "src/*")).unwrap();
    let before = set.paths().to_vec();

    assert_eq!(set.copy_to(temp.child("dist").path()).unwrap(), 2);

    assert_eq!(set.paths(), before.as_slice());
    temp.child("src/a.txt").assert("A");
    temp.child("dist/a.txt").assert("A");
    temp.child("dist/lib/b.txt").assert("B");
}

#[test]
fn copy_does_not_overwrite_existing_entries() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.txt").write_str("source").unwrap();
    temp.child("dist/a.txt").write_str("existing").unwrap();

    let set = FileSet::resolve_files(pattern_in(&temp, "a.txt")).unwrap();
    assert_eq!(set.copy_to(temp.child("dist").path()).unwrap(), 0);
    temp.child("dist/a.txt").assert("existing");
}

#[test]
fn copy_into_a_file_destination_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.txt").touch().unwrap();
    temp.child("blocker").write_str("file").unwrap();

    let set = FileSet::resolve_files(pattern_in(&temp, "a.txt")).unwrap();
    assert!(set.copy_to(temp.child("blocker").path()).is_err());
}

#[test]
fn ensure_folders_uses_pattern_for_new_targets() {
    let temp = assert_fs::TempDir::new().unwrap();
    let set = FileSet::create_new(pattern_in(&temp, "out/nested/report.json"));

    assert_eq!(set.ensure_folders(), 1);
    temp.child("out/nested").assert(predicate::path::is_dir());
    temp.child("out/nested/report.json")
        .assert(predicate::path::missing());

    // Idempotent
    assert_eq!(set.create_folders(), 1);
}

#[test]
fn ensure_folders_is_a_no_op_for_existing_entries() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a/one.txt").touch().unwrap();
    temp.child("b/two.txt").touch().unwrap();

    let set = FileSet::resolve_files(pattern_in(&temp, "*/*.txt")).unwrap();
    assert_eq!(set.ensure_folders(), 2);
    temp.child("a/one.txt").assert(predicate::path::is_file());
}

#[cfg(unix)]
#[test]
fn move_and_copy_keep_backslash_names() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/a\\b.txt").write_str("x").unwrap();

    let mut set = FileSet::resolve_files(pattern_in(&temp, "src/*.txt")).unwrap();
    assert_eq!(set.copy_to(temp.path().join("copies")).unwrap(), 1);
    assert_eq!(set.move_to(temp.path().join("moved")).unwrap(), 1);

    temp.child("copies/a\\b.txt").assert("x");
    temp.child("moved/a\\b.txt").assert("x");
    temp.child("src/a\\b.txt").assert(predicate::path::missing());
    assert_eq!(set.read().unwrap().as_deref(), Some("x"));
}
