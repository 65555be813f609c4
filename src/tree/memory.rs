//! In-memory host tree
//!
//! Builds a drop payload from paths and byte buffers. Used by hosts that
//! already hold dropped data in memory, and by tests that need paginated
//! directories, slow entries, or entries that fail to open or to enumerate.

use crate::tree::entry::{Blob, DirectoryEntry, DirectoryReader, Entry, FileEntry};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_PAGE_SIZE: usize = 100;

/// File bytes held in memory
#[derive(Debug, Clone)]
pub struct MemoryBlob {
    name: String,
    mime_type: String,
    data: Arc<Vec<u8>>,
}

impl MemoryBlob {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: Arc::new(data),
        }
    }
}

#[async_trait]
impl Blob for MemoryBlob {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    async fn bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.data.as_ref().clone())
    }
}

#[derive(Debug, Clone)]
enum Node {
    File {
        mime_type: String,
        data: Arc<Vec<u8>>,
        readable: bool,
        delay: Option<Duration>,
    },
    Directory {
        children: BTreeMap<String, Node>,
        readable: bool,
        delay: Option<Duration>,
        /// Pages served before the reader starts failing
        fail_after: Option<usize>,
    },
}

impl Node {
    fn empty_dir() -> Self {
        Node::Directory {
            children: BTreeMap::new(),
            readable: true,
            delay: None,
            fail_after: None,
        }
    }
}

/// State shared by every entry handed out from one tree
#[derive(Debug, Clone)]
struct Shared {
    page_size: usize,
    /// Full paths in the order their accessors completed
    completed: Arc<Mutex<Vec<String>>>,
}

impl Shared {
    async fn access(&self, full_path: &str, delay: Option<Duration>) {
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.lock().push(full_path.to_string());
    }
}

/// Builder for an in-memory drop payload
#[derive(Debug, Clone)]
pub struct MemoryTree {
    root: BTreeMap<String, Node>,
    page_size: usize,
    completed: Arc<Mutex<Vec<String>>>,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    pub fn new() -> Self {
        Self {
            root: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            completed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Entries returned per directory read (minimum 1)
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Add a file at a `/`-separated path, creating parent directories.
    pub fn file(self, path: &str, mime_type: &str, data: &[u8]) -> Self {
        self.insert(
            path,
            Node::File {
                mime_type: mime_type.to_string(),
                data: Arc::new(data.to_vec()),
                readable: true,
                delay: None,
            },
        )
    }

    /// Add a file whose content accessor fails.
    pub fn unreadable_file(self, path: &str) -> Self {
        self.insert(
            path,
            Node::File {
                mime_type: String::new(),
                data: Arc::new(Vec::new()),
                readable: false,
                delay: None,
            },
        )
    }

    /// Add an empty directory.
    pub fn dir(self, path: &str) -> Self {
        self.insert(path, Node::empty_dir())
    }

    /// Add a directory whose enumeration fails.
    pub fn unreadable_dir(self, path: &str) -> Self {
        self.insert(
            path,
            Node::Directory {
                children: BTreeMap::new(),
                readable: false,
                delay: None,
                fail_after: None,
            },
        )
    }

    /// Make the file accessor or directory reader at `path` wait before answering.
    ///
    /// No effect when nothing exists at `path`.
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        if let Some(node) = self.find_mut(path) {
            match node {
                Node::File { delay: d, .. } | Node::Directory { delay: d, .. } => *d = Some(delay),
            }
        }
        self
    }

    /// Make the reader of the directory at `path` fail after serving `pages` pages.
    ///
    /// No effect when `path` is not a directory.
    pub fn fail_after(mut self, path: &str, pages: usize) -> Self {
        if let Some(Node::Directory { fail_after, .. }) = self.find_mut(path) {
            *fail_after = Some(pages);
        }
        self
    }

    fn insert(mut self, path: &str, node: Node) -> Self {
        let parts = split_path(path);
        insert_node(&mut self.root, &parts, node);
        self
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut Node> {
        let parts = split_path(path);
        let (first, rest) = parts.split_first()?;
        let mut node = self.root.get_mut(*first)?;
        for part in rest {
            node = match node {
                Node::Directory { children, .. } => children.get_mut(*part)?,
                Node::File { .. } => return None,
            };
        }
        Some(node)
    }

    /// Root entries of the drop, one per top-level name.
    pub fn roots(&self) -> Vec<Entry> {
        let shared = Shared {
            page_size: self.page_size,
            completed: Arc::clone(&self.completed),
        };
        self.root
            .iter()
            .map(|(name, node)| to_entry(name, name, node, &shared))
            .collect()
    }

    /// Full paths whose file accessor or directory reader has answered, in
    /// completion order, across every scan of this tree.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().clone()
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|p| !p.is_empty()).collect()
}

fn insert_node(level: &mut BTreeMap<String, Node>, parts: &[&str], node: Node) {
    match parts {
        [] => {}
        [leaf] => {
            level.insert(leaf.to_string(), node);
        }
        [head, rest @ ..] => {
            let entry = level.entry(head.to_string()).or_insert_with(Node::empty_dir);
            // A file in the way of a deeper path is replaced by a directory.
            if !matches!(entry, Node::Directory { .. }) {
                *entry = Node::empty_dir();
            }
            if let Node::Directory { children, .. } = entry {
                insert_node(children, rest, node);
            }
        }
    }
}

fn to_entry(name: &str, full_path: &str, node: &Node, shared: &Shared) -> Entry {
    match node {
        Node::File {
            mime_type,
            data,
            readable,
            delay,
        } => Entry::File(Arc::new(MemoryFileEntry {
            name: name.to_string(),
            full_path: full_path.to_string(),
            mime_type: mime_type.clone(),
            data: Arc::clone(data),
            readable: *readable,
            delay: *delay,
            shared: shared.clone(),
        })),
        Node::Directory {
            children,
            readable,
            delay,
            fail_after,
        } => Entry::Directory(Arc::new(MemoryDirEntry {
            name: name.to_string(),
            full_path: full_path.to_string(),
            children: children.clone(),
            readable: *readable,
            delay: *delay,
            fail_after: *fail_after,
            shared: shared.clone(),
        })),
    }
}

struct MemoryFileEntry {
    name: String,
    full_path: String,
    mime_type: String,
    data: Arc<Vec<u8>>,
    readable: bool,
    delay: Option<Duration>,
    shared: Shared,
}

#[async_trait]
impl FileEntry for MemoryFileEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    async fn file(&self) -> io::Result<Arc<dyn Blob>> {
        self.shared.access(&self.full_path, self.delay).await;
        if !self.readable {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot open {}", self.full_path),
            ));
        }
        Ok(Arc::new(MemoryBlob {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            data: Arc::clone(&self.data),
        }))
    }
}

struct MemoryDirEntry {
    name: String,
    full_path: String,
    children: BTreeMap<String, Node>,
    readable: bool,
    delay: Option<Duration>,
    fail_after: Option<usize>,
    shared: Shared,
}

#[async_trait]
impl DirectoryEntry for MemoryDirEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    async fn reader(&self) -> io::Result<Box<dyn DirectoryReader>> {
        self.shared.access(&self.full_path, self.delay).await;
        if !self.readable {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot enumerate {}", self.full_path),
            ));
        }
        let pending: Vec<Entry> = self
            .children
            .iter()
            .map(|(name, node)| {
                let full_path = format!("{}/{}", self.full_path, name);
                to_entry(name, &full_path, node, &self.shared)
            })
            .collect();
        Ok(Box::new(MemoryDirReader {
            full_path: self.full_path.clone(),
            pending: pending.into_iter(),
            page_size: self.shared.page_size,
            pages_left: self.fail_after,
        }))
    }
}

struct MemoryDirReader {
    full_path: String,
    pending: std::vec::IntoIter<Entry>,
    page_size: usize,
    pages_left: Option<usize>,
}

#[async_trait]
impl DirectoryReader for MemoryDirReader {
    async fn read_entries(&mut self) -> io::Result<Vec<Entry>> {
        if let Some(pages_left) = self.pages_left.as_mut() {
            if *pages_left == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("enumeration of {} interrupted", self.full_path),
                ));
            }
            *pages_left -= 1;
        }
        Ok(self.pending.by_ref().take(self.page_size).collect())
    }
}
