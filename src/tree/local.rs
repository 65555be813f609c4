//! Local filesystem host tree
//!
//! Exposes paths on disk as drop entries. Directory reads go through
//! `tokio::fs::read_dir` and are handed out in pages, files are opened lazily
//! and read in full only when their bytes are requested.
//!
//! Symbolic links inside a dropped directory are not followed, so a link back
//! to an ancestor cannot make the walk endless. A dropped root that is itself a
//! link is resolved once.

use crate::tree::entry::{Blob, DirectoryEntry, DirectoryReader, Entry, FileEntry};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of entries returned per directory read
pub const DEFAULT_PAGE_SIZE: usize = 100;

const MIME_TYPES: &[(&str, &str)] = &[
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("ico", "image/vnd.microsoft.icon"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    // Video
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    // Text
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    // Application
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
    ("wasm", "application/wasm"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    // Fonts
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
];

/// Guess a MIME type from a file name's extension.
///
/// Unknown extensions give an empty string, which is what a browser reports
/// for files it cannot classify.
pub fn guess_mime_type(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return "";
    };
    let ext = ext.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or("")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Resolve a local path into a drop root entry.
///
/// Returns `None` for paths that do not exist or are neither a file nor a
/// directory (sockets, broken links), matching a drop item with no entry.
pub async fn local_entry(path: impl AsRef<Path>, page_size: usize) -> Option<Entry> {
    let path = path.as_ref().to_path_buf();
    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Drop path has no entry");
            return None;
        }
    };
    let name = file_name(&path);
    let node = LocalNode {
        full_path: name.clone(),
        name,
        path,
        page_size: page_size.max(1),
    };
    if metadata.is_file() {
        Some(Entry::File(Arc::new(node)))
    } else if metadata.is_dir() {
        Some(Entry::Directory(Arc::new(node)))
    } else {
        None
    }
}

/// A file or directory on disk
#[derive(Debug, Clone)]
struct LocalNode {
    name: String,
    full_path: String,
    path: PathBuf,
    page_size: usize,
}

#[async_trait]
impl FileEntry for LocalNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    async fn file(&self) -> io::Result<Arc<dyn Blob>> {
        let metadata = tokio::fs::metadata(&self.path).await?;
        // Opening up front surfaces permission errors during the scan.
        tokio::fs::File::open(&self.path).await?;
        Ok(Arc::new(LocalBlob {
            name: self.name.clone(),
            mime_type: guess_mime_type(&self.name).to_string(),
            size: metadata.len(),
            path: self.path.clone(),
        }))
    }
}

#[async_trait]
impl DirectoryEntry for LocalNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    async fn reader(&self) -> io::Result<Box<dyn DirectoryReader>> {
        let read_dir = tokio::fs::read_dir(&self.path).await?;
        Ok(Box::new(LocalDirReader {
            read_dir,
            parent: self.full_path.clone(),
            page_size: self.page_size,
            pending_error: None,
        }))
    }
}

struct LocalDirReader {
    read_dir: tokio::fs::ReadDir,
    parent: String,
    page_size: usize,
    /// Enumeration error held back until the partial page before it is returned
    pending_error: Option<io::Error>,
}

#[async_trait]
impl DirectoryReader for LocalDirReader {
    async fn read_entries(&mut self) -> io::Result<Vec<Entry>> {
        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }

        let mut page = Vec::new();
        while page.len() < self.page_size {
            let dir_entry = match self.read_dir.next_entry().await {
                Ok(Some(dir_entry)) => dir_entry,
                Ok(None) => break,
                Err(e) if page.is_empty() => return Err(e),
                Err(e) => {
                    self.pending_error = Some(e);
                    break;
                }
            };
            let path = dir_entry.path();
            let file_type = match dir_entry.file_type().await {
                Ok(file_type) => file_type,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping entry with unknown type");
                    continue;
                }
            };
            let name = dir_entry.file_name().to_string_lossy().to_string();
            let node = LocalNode {
                full_path: format!("{}/{}", self.parent, name),
                name,
                path,
                page_size: self.page_size,
            };
            if file_type.is_file() {
                page.push(Entry::File(Arc::new(node)));
            } else if file_type.is_dir() {
                page.push(Entry::Directory(Arc::new(node)));
            } else {
                debug!(path = %node.path.display(), "Skipping symlink or special file");
            }
        }
        Ok(page)
    }
}

/// File content on disk, read on demand
#[derive(Debug, Clone)]
pub struct LocalBlob {
    name: String,
    mime_type: String,
    size: u64,
    path: PathBuf,
}

impl LocalBlob {
    /// Open a single file on disk as a blob.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = file_name(&path);
        Ok(Self {
            mime_type: guess_mime_type(&name).to_string(),
            name,
            size: metadata.len(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Blob for LocalBlob {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn bytes(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}
