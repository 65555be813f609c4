//! Blob content conversions
//!
//! Text, data-URL and base64 renditions of a file's bytes, and human-readable
//! sizes. Locale-specific number rendering is left to a [`SizeFormatter`]
//! supplied by the caller.

use crate::error::IntakeError;
use crate::tree::entry::Blob;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Read a blob as text, normalizing CRLF line endings to LF.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub async fn read_as_text(blob: &dyn Blob) -> Result<String, IntakeError> {
    let bytes = blob.bytes().await?;
    Ok(normalize_newlines(&String::from_utf8_lossy(&bytes)))
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Read a blob as a `data:<mime>;base64,<payload>` URL.
pub async fn read_as_data_url(blob: &dyn Blob) -> Result<String, IntakeError> {
    let bytes = blob.bytes().await?;
    Ok(encode_data_url(blob.mime_type(), &bytes))
}

/// Build a base64 data URL; an empty MIME type falls back to `application/octet-stream`.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        FALLBACK_MIME_TYPE
    } else {
        mime_type
    };
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Payload of a data URL: everything after the first comma.
///
/// A string without a comma has no header and is returned whole.
pub fn data_url_payload(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or(data_url)
}

/// Read a blob as bare base64 (the data-URL payload).
pub async fn read_as_base64(blob: &dyn Blob) -> Result<String, IntakeError> {
    let data_url = read_as_data_url(blob).await?;
    Ok(data_url_payload(&data_url).to_string())
}

/// Locale collaborator for size rendering.
///
/// Receives the scaled value and a unit key (`b`, `kb`, `mb`, `gb`, `tb`).
pub trait SizeFormatter {
    fn format(&self, value: f64, unit: &str) -> String;
}

/// Locale-neutral formatter: `512 B`, `1.5 KB`, `3.0 MB`
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSizeFormatter;

impl SizeFormatter for PlainSizeFormatter {
    fn format(&self, value: f64, unit: &str) -> String {
        let unit = unit.to_ascii_uppercase();
        if unit == "B" {
            format!("{} {}", value as u64, unit)
        } else {
            format!("{:.1} {}", value, unit)
        }
    }
}

const SIZE_UNITS: &[&str] = &["b", "kb", "mb", "gb", "tb"];

/// Scale a byte count to the largest 1024-based unit and let `formatter` render it.
pub fn format_size(bytes: u64, formatter: &dyn SizeFormatter) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    formatter.format(value, SIZE_UNITS[unit])
}
