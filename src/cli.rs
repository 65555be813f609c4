//! CLI domain: parse, route, output, and presentation only.
//! No domain logic; the route table dispatches to library operations.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, Encoding, OutputFormat};
pub use presentation::{format_scan_json, format_scan_text};
pub use route::RunContext;
