#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod ramfs;
pub mod vfs;

pub use cellos_abi::{FsEntry, FsEntryKind, FsError, FsResult};
pub use ramfs::{RamFs, RootFs, root_fs};
pub use vfs::{FileHandle, FileSystem};

#[cfg(test)]
mod ramfs_tests;
