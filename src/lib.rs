//! intake: file drop ingestion and naming resolution
//!
//! Turns a drop of files and nested folders into a flat, type-filtered list
//! sorted by name, picks collision-free names against what already exists at
//! the destination, and resolves `.`/`..` segments in relative paths.
//!
//! ```no_run
//! use intake::naming::resolve_name;
//! use intake::tree::memory::MemoryTree;
//! use intake::tree::{scan, TypeFilter};
//!
//! # async fn demo() {
//! let drop = MemoryTree::new()
//!     .file("img/cat.png", "image/png", b"...")
//!     .file("README.md", "text/markdown", b"...");
//! let files = scan(drop.roots(), &TypeFilter::parse("image/*")).await;
//! let target = resolve_name(files[0].name(), &["cat.png"]);
//! assert_eq!(target, "cat-1.png");
//! # }
//! ```

pub mod cli;
pub mod codec;
pub mod collate;
pub mod config;
pub mod error;
pub mod logging;
pub mod naming;
pub mod tree;
