//! Output of view rows.
//!
//! Page sections are logged either as plain text or as JSON, and table
//! rows can be appended to a CSV file for export.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `key: value` line per field
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Renders a section as plain text: objects as `key: value` lines, arrays
/// of objects as one ` | `-separated line per row.
pub fn render_text(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", scalar(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => map
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", scalar(v)))
                    .collect::<Vec<_>>()
                    .join(" | "),
                other => scalar(other),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => scalar(other),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Logs a section as plain text.
pub fn print_text(section: &str, value: &Value) {
    info!(section, "\n{}", render_text(value));
}

/// Logs a section as pretty-printed JSON.
pub fn print_json<T: Serialize + ?Sized>(section: &str, value: &T) -> Result<()> {
    info!(section, "{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_section(section: &str, value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print_text(section, value);
            Ok(())
        }
        OutputFormat::Json => print_json(section, value),
    }
}

/// Appends `rows` to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "Appending CSV records");

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
