//! Filesystem collaborator interface.
//!
//! Everything is relative to a current directory, the way the desktop apps
//! and terminal address files: bare names refer to entries of the current
//! directory; `change_dir` also understands `..` and `/`.

use alloc::string::String;
use alloc::vec::Vec;

use cellos_abi::{FsEntry, FsResult};

/// An open file. Only meaningful to the filesystem that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHandle(pub u8);

pub trait FileSystem {
    fn open(&mut self, name: &str) -> FsResult<FileHandle>;

    /// Read from the handle's offset, advancing it. Returns 0 at EOF.
    fn read(&mut self, handle: FileHandle, buf: &mut [u8]) -> FsResult<usize>;

    fn close(&mut self, handle: FileHandle) -> FsResult<()>;

    /// Create an empty file.
    fn create(&mut self, name: &str) -> FsResult<()>;

    fn delete(&mut self, name: &str) -> FsResult<()>;

    /// Replace a file's contents, creating the file if needed.
    fn write(&mut self, name: &str, data: &[u8]) -> FsResult<()>;

    fn create_dir(&mut self, name: &str) -> FsResult<()>;

    /// Remove a child directory together with everything under it.
    fn delete_dir(&mut self, name: &str) -> FsResult<()>;

    /// Enter a child directory, `..`, or `/`.
    fn change_dir(&mut self, path: &str) -> FsResult<()>;

    /// Enter the parent directory. Fails at the root.
    fn cd_up(&mut self) -> FsResult<()>;

    /// Entries of the current directory, directories first.
    fn list(&self) -> Vec<FsEntry>;

    /// Absolute path of the current directory, e.g. `/` or `/docs`.
    fn cwd(&self) -> String;

    /// Open, read to the end, and close.
    fn read_to_end(&mut self, name: &str) -> FsResult<Vec<u8>> {
        let handle = self.open(name)?;
        let mut out = Vec::new();
        let mut chunk = [0u8; 256];
        let result = loop {
            match self.read(handle, &mut chunk) {
                Ok(0) => break Ok(()),
                Ok(n) => out.extend_from_slice(&chunk[..n]),
                Err(e) => break Err(e),
            }
        };
        self.close(handle)?;
        result.map(|()| out)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &mut T {
    fn open(&mut self, name: &str) -> FsResult<FileHandle> {
        (**self).open(name)
    }

    fn read(&mut self, handle: FileHandle, buf: &mut [u8]) -> FsResult<usize> {
        (**self).read(handle, buf)
    }

    fn close(&mut self, handle: FileHandle) -> FsResult<()> {
        (**self).close(handle)
    }

    fn create(&mut self, name: &str) -> FsResult<()> {
        (**self).create(name)
    }

    fn delete(&mut self, name: &str) -> FsResult<()> {
        (**self).delete(name)
    }

    fn write(&mut self, name: &str, data: &[u8]) -> FsResult<()> {
        (**self).write(name, data)
    }

    fn create_dir(&mut self, name: &str) -> FsResult<()> {
        (**self).create_dir(name)
    }

    fn delete_dir(&mut self, name: &str) -> FsResult<()> {
        (**self).delete_dir(name)
    }

    fn change_dir(&mut self, path: &str) -> FsResult<()> {
        (**self).change_dir(path)
    }

    fn cd_up(&mut self) -> FsResult<()> {
        (**self).cd_up()
    }

    fn list(&self) -> Vec<FsEntry> {
        (**self).list()
    }

    fn cwd(&self) -> String {
        (**self).cwd()
    }
}
