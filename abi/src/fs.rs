//! Filesystem types shared between the filesystem collaborator and apps.

/// Longest entry name in bytes.
pub const FS_NAME_MAX: usize = 31;

/// Errors reported by filesystem operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// Path or entry does not exist
    NotFound,
    /// Entry already exists
    AlreadyExists,
    /// Expected a directory
    NotDirectory,
    /// Expected a file
    IsDirectory,
    /// Name is empty, too long, or contains '/'
    InvalidName,
    /// Handle is not open
    BadHandle,
    /// Node or handle table is full
    NoSpace,
}

impl FsError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::AlreadyExists => "already exists",
            Self::NotDirectory => "not a directory",
            Self::IsDirectory => "is a directory",
            Self::InvalidName => "invalid name",
            Self::BadHandle => "bad handle",
            Self::NoSpace => "no space",
        }
    }
}

pub type FsResult<T> = Result<T, FsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEntryKind {
    File,
    Directory,
}

/// One directory listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsEntry {
    name: [u8; FS_NAME_MAX + 1],
    name_len: u8,
    pub kind: FsEntryKind,
    pub size: u32,
}

impl FsEntry {
    /// Build an entry, truncating the name to `FS_NAME_MAX` bytes.
    pub fn new(name: &str, kind: FsEntryKind, size: u32) -> Self {
        let mut buf = [0u8; FS_NAME_MAX + 1];
        let mut len = name.len().min(FS_NAME_MAX);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        buf[..len].copy_from_slice(&name.as_bytes()[..len]);
        Self {
            name: buf,
            name_len: len as u8,
            kind,
            size,
        }
    }

    pub fn name(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len as usize]).unwrap_or("")
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == FsEntryKind::Directory
    }
}
