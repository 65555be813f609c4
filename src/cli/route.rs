//! CLI route: single route table and run context. Dispatches to library operations and presentation.

use crate::cli::parse::{Commands, Encoding, OutputFormat};
use crate::cli::presentation::{format_scan_json, format_scan_text};
use crate::codec::{self, format_size, PlainSizeFormatter};
use crate::config::{ConfigLoader, IntakeConfig};
use crate::error::IntakeError;
use crate::naming::resolve_name;
use crate::tree::filter::TypeFilter;
use crate::tree::local::{local_entry, LocalBlob};
use crate::tree::path::{resolve_relative_path, storage_key};
use crate::tree::scanner::Scanner;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded config and the async runtime.
pub struct RunContext {
    config: IntakeConfig,
    runtime: tokio::runtime::Runtime,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, IntakeError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self { config, runtime })
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, IntakeError> {
        match command {
            Commands::Scan {
                paths,
                accept,
                include_hidden,
                max_depth,
                format,
            } => {
                let filter = match accept {
                    Some(raw) => TypeFilter::parse(raw),
                    None => self.config.scan.accept.clone(),
                };
                let mut options = self.config.scan.scan_options();
                options.include_hidden |= *include_hidden;
                if max_depth.is_some() {
                    options.max_depth = *max_depth;
                }
                let page_size = self.config.scan.page_size;

                let files = self.runtime.block_on(async {
                    let mut roots = Vec::with_capacity(paths.len());
                    for path in paths {
                        roots.push(local_entry(canonical(path), page_size).await);
                    }
                    Scanner::with_options(filter, options).scan(roots).await
                });
                info!(files = files.len(), "Scan command finished");

                match format {
                    OutputFormat::Json => format_scan_json(&files),
                    OutputFormat::Text => Ok(format_scan_text(&files)),
                }
            }
            Commands::Name {
                name,
                existing,
                dir,
            } => {
                let mut taken = existing.clone();
                if let Some(dir) = dir {
                    taken.extend(list_names(dir)?);
                }
                debug!(candidates = taken.len(), "Resolving name");
                Ok(resolve_name(name, &taken))
            }
            Commands::Path { path, prefix } => Ok(match prefix {
                Some(prefix) => storage_key(prefix, path),
                None => resolve_relative_path(path),
            }),
            Commands::Encode { file, encoding } => self.runtime.block_on(encode(file, *encoding)),
            Commands::Size { bytes } => Ok(format_size(*bytes, &PlainSizeFormatter)),
        }
    }
}

async fn encode(file: &Path, encoding: Encoding) -> Result<String, IntakeError> {
    let blob = LocalBlob::open(file).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidInput => IntakeError::NotAFile(file.to_path_buf()),
        _ => IntakeError::Io(e),
    })?;
    match encoding {
        Encoding::Text => codec::read_as_text(&blob).await,
        Encoding::DataUrl => codec::read_as_data_url(&blob).await,
        Encoding::Base64 => codec::read_as_base64(&blob).await,
    }
}

/// Canonical form of a user-supplied path; falls back to the path as given.
fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Names of the entries directly inside `dir`.
fn list_names(dir: &Path) -> Result<Vec<String>, IntakeError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    Ok(names)
}
