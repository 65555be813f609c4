//! Host tree entry model
//!
//! A drop payload is a list of opaque handles into a tree the host owns. The
//! scanner only sees it through these traits, so the same traversal runs over
//! the local filesystem, an in-memory tree, or any other host.

use async_trait::async_trait;
use std::fmt;
use std::io;
use std::sync::Arc;

/// A file-like object: declared type, length, and byte access.
#[async_trait]
pub trait Blob: Send + Sync {
    fn name(&self) -> &str;

    /// Declared MIME type; empty when the host could not determine one.
    fn mime_type(&self) -> &str;

    fn size(&self) -> u64;

    async fn bytes(&self) -> io::Result<Vec<u8>>;
}

/// A leaf entry in the host tree.
#[async_trait]
pub trait FileEntry: Send + Sync {
    fn name(&self) -> &str;

    /// Path of this entry relative to the drop root, `/`-separated.
    fn full_path(&self) -> &str;

    /// Open the file-like object behind this entry.
    async fn file(&self) -> io::Result<Arc<dyn Blob>>;
}

/// A directory entry in the host tree.
#[async_trait]
pub trait DirectoryEntry: Send + Sync {
    fn name(&self) -> &str;

    fn full_path(&self) -> &str;

    async fn reader(&self) -> io::Result<Box<dyn DirectoryReader>>;
}

/// Paginated directory enumeration.
///
/// Each call returns the next page of children. An empty page means the
/// directory is exhausted; a single call is never assumed to return everything.
#[async_trait]
pub trait DirectoryReader: Send {
    async fn read_entries(&mut self) -> io::Result<Vec<Entry>>;
}

/// A node of the host tree
#[derive(Clone)]
pub enum Entry {
    File(Arc<dyn FileEntry>),
    Directory(Arc<dyn DirectoryEntry>),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(f) => f.name(),
            Entry::Directory(d) => d.name(),
        }
    }

    pub fn full_path(&self) -> &str {
        match self {
            Entry::File(f) => f.full_path(),
            Entry::Directory(d) => d.full_path(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }

    /// Hidden-file convention: any name starting with `.`
    pub fn is_hidden(&self) -> bool {
        self.name().starts_with('.')
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::File(_) => write!(f, "Entry::File({})", self.full_path()),
            Entry::Directory(_) => write!(f, "Entry::Directory({})", self.full_path()),
        }
    }
}

/// A root handle from a drop or pick event.
///
/// Resolves to `None` when the handle is not backed by a real tree entry
/// (a dragged text snippet, a URL); such roots are skipped by the scanner.
pub trait DropItem {
    fn entry(&self) -> Option<Entry>;
}

impl DropItem for Entry {
    fn entry(&self) -> Option<Entry> {
        Some(self.clone())
    }
}

impl DropItem for Option<Entry> {
    fn entry(&self) -> Option<Entry> {
        self.clone()
    }
}

/// A file accepted by a scan, in the order the scan returned it.
#[derive(Clone)]
pub struct ScannedFile {
    path: String,
    blob: Arc<dyn Blob>,
}

impl ScannedFile {
    pub fn new(path: impl Into<String>, blob: Arc<dyn Blob>) -> Self {
        Self {
            path: path.into(),
            blob,
        }
    }

    pub fn name(&self) -> &str {
        self.blob.name()
    }

    /// Path relative to the drop root, e.g. `img/cat.png`
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mime_type(&self) -> &str {
        self.blob.mime_type()
    }

    pub fn size(&self) -> u64 {
        self.blob.size()
    }

    pub fn blob(&self) -> &Arc<dyn Blob> {
        &self.blob
    }

    pub async fn bytes(&self) -> io::Result<Vec<u8>> {
        self.blob.bytes().await
    }
}

impl fmt::Debug for ScannedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScannedFile")
            .field("path", &self.path)
            .field("mime_type", &self.mime_type())
            .field("size", &self.size())
            .finish()
    }
}
