//! Drop payload scanner
//!
//! Walks the root entries of a drop, recursing into directories, and returns
//! the accepted files as one flat list sorted by name.
//!
//! Every entry becomes its own future; siblings are joined concurrently and the
//! children's results are concatenated on the way back up, so the output is
//! flattened structurally whatever the depth. Nothing in a scan is fatal: an
//! unreadable file or directory contributes nothing and the rest of the scan
//! carries on.

use crate::collate::locale_cmp;
use crate::tree::entry::{DirectoryEntry, DropItem, Entry, FileEntry, ScannedFile};
use crate::tree::filter::TypeFilter;
use futures::future::{join_all, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Scanner behaviour knobs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Keep entries whose name starts with `.` (default: false)
    #[serde(default)]
    pub include_hidden: bool,

    /// Directory levels to descend below the roots (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// Type-filtered, flattening scanner over host tree entries
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    filter: TypeFilter,
    options: ScanOptions,
}

impl Scanner {
    pub fn new(filter: TypeFilter) -> Self {
        Self {
            filter,
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(filter: TypeFilter, options: ScanOptions) -> Self {
        Self { filter, options }
    }

    pub fn filter(&self) -> &TypeFilter {
        &self.filter
    }

    /// Scan the roots of a drop and return the accepted files.
    ///
    /// The result is sorted by name with locale-aware ordering (ties broken by
    /// path), holds no directories and no duplicate paths. Running it twice over
    /// an unchanged tree returns the same order regardless of which reads
    /// complete first.
    pub async fn scan<I, D>(&self, roots: I) -> Vec<ScannedFile>
    where
        I: IntoIterator<Item = D>,
        D: DropItem,
    {
        let entries: Vec<Entry> = roots
            .into_iter()
            .filter_map(|item| {
                let entry = item.entry();
                if entry.is_none() {
                    debug!("Skipping drop item without a tree entry");
                }
                entry
            })
            .collect();

        let branches = join_all(entries.into_iter().map(|entry| self.visit(entry, 0))).await;
        let mut files: Vec<ScannedFile> = branches.into_iter().flatten().collect();

        files.sort_by(|a, b| locale_cmp(a.name(), b.name()).then_with(|| a.path().cmp(b.path())));
        files.dedup_by(|a, b| a.path() == b.path());

        info!(
            files = files.len(),
            filter = %self.filter,
            "Scan complete"
        );
        files
    }

    fn visit(&self, entry: Entry, depth: usize) -> BoxFuture<'_, Vec<ScannedFile>> {
        async move {
            if entry.is_hidden() && !self.options.include_hidden {
                debug!(path = %entry.full_path(), "Skipping hidden entry");
                return Vec::new();
            }
            match entry {
                Entry::File(file) => self.visit_file(file).await.into_iter().collect(),
                Entry::Directory(dir) => self.visit_directory(dir, depth).await,
            }
        }
        .boxed()
    }

    async fn visit_file(&self, file: Arc<dyn FileEntry>) -> Option<ScannedFile> {
        let blob = match file.file().await {
            Ok(blob) => blob,
            Err(e) => {
                warn!(path = %file.full_path(), error = %e, "Skipping unreadable file");
                return None;
            }
        };

        if !self.filter.matches(blob.name(), blob.mime_type()) {
            debug!(
                path = %file.full_path(),
                mime_type = %blob.mime_type(),
                "Skipping file rejected by type filter"
            );
            return None;
        }

        Some(ScannedFile::new(file.full_path(), blob))
    }

    async fn visit_directory(&self, dir: Arc<dyn DirectoryEntry>, depth: usize) -> Vec<ScannedFile> {
        if let Some(max_depth) = self.options.max_depth {
            if depth >= max_depth {
                debug!(path = %dir.full_path(), depth, "Skipping directory below max depth");
                return Vec::new();
            }
        }

        let children = read_all_children(dir.as_ref()).await;
        let branches = join_all(
            children
                .into_iter()
                .map(|child| self.visit(child, depth + 1)),
        )
        .await;
        branches.into_iter().flatten().collect()
    }
}

/// Drain a directory reader page by page until it reports no more entries.
///
/// A failed read keeps the pages already read.
async fn read_all_children(dir: &dyn DirectoryEntry) -> Vec<Entry> {
    let mut reader = match dir.reader().await {
        Ok(reader) => reader,
        Err(e) => {
            warn!(path = %dir.full_path(), error = %e, "Skipping unreadable directory");
            return Vec::new();
        }
    };

    let mut children = Vec::new();
    loop {
        match reader.read_entries().await {
            Ok(page) if page.is_empty() => break,
            Ok(page) => children.extend(page),
            Err(e) => {
                warn!(
                    path = %dir.full_path(),
                    error = %e,
                    read = children.len(),
                    "Directory enumeration failed"
                );
                break;
            }
        }
    }
    children
}

/// Scan a drop with the default options.
pub async fn scan<I, D>(roots: I, filter: &TypeFilter) -> Vec<ScannedFile>
where
    I: IntoIterator<Item = D>,
    D: DropItem,
{
    Scanner::new(filter.clone()).scan(roots).await
}
