//! JSON rendering for outline results and run dumps.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with 2-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value (usually a `DocumentResult` or a `Document`) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize a value to a file, replacing any existing content.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
    format: JsonFormat,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
        JsonFormat::Compact => serde_json::to_writer(&mut writer, value)?,
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
