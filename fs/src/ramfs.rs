//! In-memory filesystem seeded with a small directory tree.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use cellos_abi::{FS_NAME_MAX, FsEntry, FsEntryKind, FsError, FsResult};
use cellos_lib::{IrqMutex, klog_debug};
use spin::Once;

use crate::vfs::{FileHandle, FileSystem};

const MAX_OPEN_FILES: usize = 8;
const ROOT: usize = 0;

enum NodeKind {
    File(Vec<u8>),
    Dir(Vec<usize>),
}

struct Node {
    name: String,
    parent: Option<usize>,
    kind: NodeKind,
}

#[derive(Clone, Copy)]
struct OpenFile {
    node: usize,
    offset: usize,
}

pub struct RamFs {
    nodes: Vec<Option<Node>>,
    current: usize,
    handles: [Option<OpenFile>; MAX_OPEN_FILES],
}

fn validate_name(name: &str) -> FsResult<()> {
    if name.is_empty() || name.len() > FS_NAME_MAX || name.contains('/') || name == "." || name == ".." {
        return Err(FsError::InvalidName);
    }
    Ok(())
}

impl RamFs {
    /// An empty filesystem containing only `/`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node {
                name: "/".to_string(),
                parent: None,
                kind: NodeKind::Dir(Vec::new()),
            })],
            current: ROOT,
            handles: [None; MAX_OPEN_FILES],
        }
    }

    /// The stock tree: a couple of root files plus `docs/` and `etc/`.
    pub fn seeded() -> Self {
        let mut fs = Self::new();
        let seed: [(Option<&str>, &str, &[u8]); 4] = [
            (None, "file1.txt", b"Hello from cellos root!\n"),
            (None, "log.txt", b"System logs...\n"),
            (Some("docs"), "readme.txt", b"This is a readme file in /docs\n"),
            (Some("etc"), "config.ini", b"Configuration settings.\n"),
        ];
        for (dir, name, data) in seed {
            let parent = match dir {
                Some(dir) => fs
                    .find_child(ROOT, dir)
                    .or_else(|| fs.insert(ROOT, dir, NodeKind::Dir(Vec::new())).ok()),
                None => Some(ROOT),
            };
            if let Some(parent) = parent {
                let _ = fs.insert(parent, name, NodeKind::File(data.to_vec()));
            }
        }
        fs
    }

    fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)?.as_ref()
    }

    fn children(&self, dir: usize) -> &[usize] {
        match self.node(dir).map(|n| &n.kind) {
            Some(NodeKind::Dir(children)) => children,
            _ => &[],
        }
    }

    fn find_child(&self, dir: usize, name: &str) -> Option<usize> {
        self.children(dir)
            .iter()
            .copied()
            .find(|&c| self.node(c).is_some_and(|n| n.name == name))
    }

    fn find_in_cwd(&self, name: &str, want_dir: bool) -> FsResult<usize> {
        let id = self.find_child(self.current, name).ok_or(FsError::NotFound)?;
        match (&self.node(id).ok_or(FsError::NotFound)?.kind, want_dir) {
            (NodeKind::Dir(_), true) | (NodeKind::File(_), false) => Ok(id),
            (NodeKind::Dir(_), false) => Err(FsError::IsDirectory),
            (NodeKind::File(_), true) => Err(FsError::NotDirectory),
        }
    }

    fn insert(&mut self, parent: usize, name: &str, kind: NodeKind) -> FsResult<usize> {
        validate_name(name)?;
        if self.find_child(parent, name).is_some() {
            return Err(FsError::AlreadyExists);
        }
        let node = Node {
            name: name.to_string(),
            parent: Some(parent),
            kind,
        };
        let id = match self.nodes.iter().position(Option::is_none) {
            Some(free) => {
                self.nodes[free] = Some(node);
                free
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        if let Some(Some(Node {
            kind: NodeKind::Dir(children),
            ..
        })) = self.nodes.get_mut(parent)
        {
            children.push(id);
        }
        Ok(id)
    }

    fn unlink(&mut self, id: usize) {
        let parent = self.node(id).and_then(|n| n.parent);
        if let Some(Some(Node {
            kind: NodeKind::Dir(children),
            ..
        })) = parent.and_then(|p| self.nodes.get_mut(p))
        {
            children.retain(|&c| c != id);
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: usize) {
        let Some(node) = self.nodes.get_mut(id).and_then(Option::take) else {
            return;
        };
        for handle in self.handles.iter_mut() {
            if handle.is_some_and(|h| h.node == id) {
                *handle = None;
            }
        }
        if let NodeKind::Dir(children) = node.kind {
            for child in children {
                self.free_subtree(child);
            }
        }
    }

    fn open_file(&self, handle: FileHandle) -> FsResult<OpenFile> {
        self.handles
            .get(handle.0 as usize)
            .copied()
            .flatten()
            .ok_or(FsError::BadHandle)
    }
}

impl Default for RamFs {
    fn default() -> Self {
        Self::seeded()
    }
}

impl FileSystem for RamFs {
    fn open(&mut self, name: &str) -> FsResult<FileHandle> {
        let node = self.find_in_cwd(name, false)?;
        let slot = self
            .handles
            .iter()
            .position(Option::is_none)
            .ok_or(FsError::NoSpace)?;
        self.handles[slot] = Some(OpenFile { node, offset: 0 });
        Ok(FileHandle(slot as u8))
    }

    fn read(&mut self, handle: FileHandle, buf: &mut [u8]) -> FsResult<usize> {
        let open = self.open_file(handle)?;
        let data = match self.node(open.node).map(|n| &n.kind) {
            Some(NodeKind::File(data)) => data,
            _ => return Err(FsError::BadHandle),
        };
        let remaining = data.get(open.offset..).unwrap_or(&[]);
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        if let Some(h) = self.handles[handle.0 as usize].as_mut() {
            h.offset += n;
        }
        Ok(n)
    }

    fn close(&mut self, handle: FileHandle) -> FsResult<()> {
        self.open_file(handle)?;
        self.handles[handle.0 as usize] = None;
        Ok(())
    }

    fn create(&mut self, name: &str) -> FsResult<()> {
        self.insert(self.current, name, NodeKind::File(Vec::new()))
            .map(|_| ())
    }

    fn delete(&mut self, name: &str) -> FsResult<()> {
        let id = self.find_in_cwd(name, false)?;
        self.unlink(id);
        Ok(())
    }

    fn write(&mut self, name: &str, data: &[u8]) -> FsResult<()> {
        let id = match self.find_in_cwd(name, false) {
            Ok(id) => id,
            Err(FsError::NotFound) => self.insert(self.current, name, NodeKind::File(Vec::new()))?,
            Err(e) => return Err(e),
        };
        if let Some(Some(Node {
            kind: NodeKind::File(contents),
            ..
        })) = self.nodes.get_mut(id)
        {
            contents.clear();
            contents.extend_from_slice(data);
        }
        klog_debug!("ramfs: wrote {} bytes to {}", data.len(), name);
        Ok(())
    }

    fn create_dir(&mut self, name: &str) -> FsResult<()> {
        self.insert(self.current, name, NodeKind::Dir(Vec::new()))
            .map(|_| ())
    }

    fn delete_dir(&mut self, name: &str) -> FsResult<()> {
        let id = self.find_in_cwd(name, true)?;
        self.unlink(id);
        Ok(())
    }

    fn change_dir(&mut self, path: &str) -> FsResult<()> {
        match path {
            "" => Err(FsError::InvalidName),
            "/" => {
                self.current = ROOT;
                Ok(())
            }
            ".." => self.cd_up(),
            name => {
                self.current = self.find_in_cwd(name, true)?;
                Ok(())
            }
        }
    }

    fn cd_up(&mut self) -> FsResult<()> {
        let parent = self
            .node(self.current)
            .and_then(|n| n.parent)
            .ok_or(FsError::NotFound)?;
        self.current = parent;
        Ok(())
    }

    fn list(&self) -> Vec<FsEntry> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for &id in self.children(self.current) {
            let Some(node) = self.node(id) else { continue };
            match &node.kind {
                NodeKind::Dir(_) => dirs.push(FsEntry::new(&node.name, FsEntryKind::Directory, 0)),
                NodeKind::File(data) => {
                    files.push(FsEntry::new(&node.name, FsEntryKind::File, data.len() as u32))
                }
            }
        }
        dirs.extend(files);
        dirs
    }

    fn cwd(&self) -> String {
        let mut parts = Vec::new();
        let mut at = self.current;
        while let Some(node) = self.node(at) {
            match node.parent {
                Some(parent) => {
                    parts.push(node.name.as_str());
                    at = parent;
                }
                None => break,
            }
        }
        let mut path = String::from("/");
        for (i, part) in parts.iter().rev().enumerate() {
            if i > 0 {
                path.push('/');
            }
            path.push_str(part);
        }
        path
    }
}

static ROOT_FS: Once<IrqMutex<RamFs>> = Once::new();

/// The shared filesystem instance, seeded on first use.
pub fn root_fs() -> &'static IrqMutex<RamFs> {
    ROOT_FS.call_once(|| IrqMutex::new(RamFs::seeded()))
}

/// [`FileSystem`] over [`root_fs`] that holds the lock for one call at a
/// time, so long-running users never keep interrupts masked between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootFs;

impl FileSystem for RootFs {
    fn open(&mut self, name: &str) -> FsResult<FileHandle> {
        root_fs().lock().open(name)
    }

    fn read(&mut self, handle: FileHandle, buf: &mut [u8]) -> FsResult<usize> {
        root_fs().lock().read(handle, buf)
    }

    fn close(&mut self, handle: FileHandle) -> FsResult<()> {
        root_fs().lock().close(handle)
    }

    fn create(&mut self, name: &str) -> FsResult<()> {
        root_fs().lock().create(name)
    }

    fn delete(&mut self, name: &str) -> FsResult<()> {
        root_fs().lock().delete(name)
    }

    fn write(&mut self, name: &str, data: &[u8]) -> FsResult<()> {
        root_fs().lock().write(name, data)
    }

    fn create_dir(&mut self, name: &str) -> FsResult<()> {
        root_fs().lock().create_dir(name)
    }

    fn delete_dir(&mut self, name: &str) -> FsResult<()> {
        root_fs().lock().delete_dir(name)
    }

    fn change_dir(&mut self, path: &str) -> FsResult<()> {
        root_fs().lock().change_dir(path)
    }

    fn cd_up(&mut self) -> FsResult<()> {
        root_fs().lock().cd_up()
    }

    fn list(&self) -> Vec<FsEntry> {
        root_fs().lock().list()
    }

    fn cwd(&self) -> String {
        root_fs().lock().cwd()
    }
}
