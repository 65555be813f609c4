//! Configuration sources, lowest precedence first: global file, workspace file.
//! Environment overrides are layered on top by the loader.

pub mod global_file;
pub mod workspace_file;
