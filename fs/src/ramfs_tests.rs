use cellos_abi::{FsEntryKind, FsError};

use crate::ramfs::{RamFs, RootFs, root_fs};
use crate::vfs::{FileHandle, FileSystem};

fn names(fs: &RamFs) -> Vec<String> {
    fs.list().iter().map(|e| e.name().to_string()).collect()
}

#[test]
fn test_seeded_tree_lists_dirs_first() {
    let fs = RamFs::seeded();
    assert_eq!(names(&fs), vec!["docs", "etc", "file1.txt", "log.txt"]);
    assert_eq!(fs.list()[0].kind, FsEntryKind::Directory);
    assert_eq!(fs.cwd(), "/");
}

#[test]
fn test_read_in_chunks_until_eof() {
    let mut fs = RamFs::seeded();
    let h = fs.open("log.txt").unwrap();
    let mut buf = [0u8; 6];
    assert_eq!(fs.read(h, &mut buf).unwrap(), 6);
    assert_eq!(&buf, b"System");
    let mut rest = [0u8; 64];
    assert_eq!(fs.read(h, &mut rest).unwrap(), 9);
    assert_eq!(fs.read(h, &mut rest).unwrap(), 0);
    fs.close(h).unwrap();
    assert_eq!(fs.close(h), Err(FsError::BadHandle));
    assert_eq!(fs.read(FileHandle(7), &mut rest), Err(FsError::BadHandle));
}

#[test]
fn test_open_errors() {
    let mut fs = RamFs::seeded();
    assert_eq!(fs.open("missing"), Err(FsError::NotFound));
    assert_eq!(fs.open("docs"), Err(FsError::IsDirectory));
    let mut handles = Vec::new();
    for _ in 0..8 {
        handles.push(fs.open("file1.txt").unwrap());
    }
    assert_eq!(fs.open("file1.txt"), Err(FsError::NoSpace));
}

#[test]
fn test_navigation_and_cwd() {
    let mut fs = RamFs::seeded();
    fs.change_dir("docs").unwrap();
    assert_eq!(fs.cwd(), "/docs");
    fs.create_dir("notes").unwrap();
    fs.change_dir("notes").unwrap();
    assert_eq!(fs.cwd(), "/docs/notes");
    fs.change_dir("..").unwrap();
    assert_eq!(fs.cwd(), "/docs");
    fs.change_dir("/").unwrap();
    assert_eq!(fs.cwd(), "/");
    assert_eq!(fs.cd_up(), Err(FsError::NotFound));
    assert_eq!(fs.change_dir("file1.txt"), Err(FsError::NotDirectory));
    assert_eq!(fs.change_dir("nowhere"), Err(FsError::NotFound));
    assert_eq!(fs.change_dir(""), Err(FsError::InvalidName));
}

#[test]
fn test_write_creates_then_replaces() {
    let mut fs = RamFs::seeded();
    fs.write("note.txt", b"first").unwrap();
    fs.write("note.txt", b"2nd").unwrap();
    assert_eq!(fs.read_to_end("note.txt").unwrap(), b"2nd");
    assert_eq!(fs.write("docs", b"x"), Err(FsError::IsDirectory));
}

#[test]
fn test_create_delete_files() {
    let mut fs = RamFs::seeded();
    fs.create("a.txt").unwrap();
    assert_eq!(fs.create("a.txt"), Err(FsError::AlreadyExists));
    assert_eq!(fs.create(""), Err(FsError::InvalidName));
    assert_eq!(fs.create("a/b"), Err(FsError::InvalidName));
    fs.delete("a.txt").unwrap();
    assert_eq!(fs.delete("a.txt"), Err(FsError::NotFound));
    assert_eq!(fs.delete("etc"), Err(FsError::IsDirectory));
}

#[test]
fn test_delete_dir_removes_subtree_and_handles() {
    let mut fs = RamFs::seeded();
    fs.change_dir("etc").unwrap();
    let h = fs.open("config.ini").unwrap();
    fs.cd_up().unwrap();
    fs.delete_dir("etc").unwrap();
    assert_eq!(names(&fs), vec!["docs", "file1.txt", "log.txt"]);
    assert_eq!(fs.read(h, &mut [0u8; 4]), Err(FsError::BadHandle));
    assert_eq!(fs.delete_dir("file1.txt"), Err(FsError::NotDirectory));
    fs.create_dir("etc").unwrap();
    fs.change_dir("etc").unwrap();
    assert!(fs.list().is_empty());
}

#[test]
fn test_root_fs_handle_shares_the_global_tree() {
    let mut shared = RootFs;
    shared.write("shared.txt", b"via handle").unwrap();
    assert_eq!(root_fs().lock().read_to_end("shared.txt").unwrap(), b"via handle");
    assert!(shared.list().iter().any(|e| e.name() == "docs"));
    assert!(!root_fs().is_locked());
}
