//! CLI presentation: text and json formatters for scan results.

use crate::codec::{format_size, PlainSizeFormatter};
use crate::error::IntakeError;
use crate::tree::entry::ScannedFile;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub fn format_scan_text(files: &[ScannedFile]) -> String {
    if files.is_empty() {
        return "No matching files.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Path", "Type", "Size"]);
    for file in files {
        let mime_type = if file.mime_type().is_empty() {
            "-"
        } else {
            file.mime_type()
        };
        table.add_row(vec![
            file.name().to_string(),
            file.path().to_string(),
            mime_type.to_string(),
            format_size(file.size(), &PlainSizeFormatter),
        ]);
    }
    format!("{}\n{} file(s)", table, files.len())
}

pub fn format_scan_json(files: &[ScannedFile]) -> Result<String, IntakeError> {
    let arr: Vec<serde_json::Value> = files
        .iter()
        .map(|f| {
            serde_json::json!({
                "name": f.name(),
                "path": f.path(),
                "type": f.mime_type(),
                "size": f.size(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&arr).map_err(|e| IntakeError::Io(e.into()))
}
