//! Drop payload trees
//!
//! Host-provided file/directory entries, the accepted-type filter, the
//! flattening scanner that turns a drop into a sorted file list, and relative
//! path resolution for the names that come out of it.

pub mod entry;
pub mod filter;
pub mod local;
pub mod memory;
pub mod path;
pub mod scanner;

pub use entry::{Blob, DirectoryEntry, DirectoryReader, DropItem, Entry, FileEntry, ScannedFile};
pub use filter::{TypeFilter, TypePattern};
pub use scanner::{scan, ScanOptions, Scanner};
