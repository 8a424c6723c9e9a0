//! Table sinks: delimited text (CSV) and JSON lines.

use crate::table::Table;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for a saved table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Jsonl,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
            other => Err(format!("unknown format `{other}` (expected csv|jsonl)")),
        }
    }
}

/// Write the header row then one record per table row. `Null` cells become
/// empty fields; extractors never emit an empty string for a nullable column.
pub fn write_csv<W: Write>(table: &Table, w: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(table.header())?;
    for row in table.rows() {
        wtr.write_record(row.cells().iter().map(|c| c.to_field()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// One JSON object per row, keyed by column name; nested cells stay nested.
pub fn write_jsonl<W: Write>(table: &Table, mut w: W) -> Result<()> {
    let header = table.header();
    for row in table.rows() {
        let mut obj = Map::with_capacity(header.len());
        for (name, cell) in header.iter().zip(row.cells()) {
            obj.insert((*name).to_string(), serde_json::to_value(cell)?);
        }
        serde_json::to_writer(&mut w, &Value::Object(obj))?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

/// Persist `table` to `path` in the requested format.
pub fn save_table(table: &Table, path: &Path, format: ExportFormat, write_buf: usize) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let out = BufWriter::with_capacity(write_buf.max(8 * 1024), f);
    match format {
        ExportFormat::Csv => write_csv(table, out),
        ExportFormat::Jsonl => write_jsonl(table, out),
    }
    .with_context(|| format!("write {}", path.display()))?;
    tracing::info!("saved {} rows to {}", table.len(), path.display());
    Ok(())
}
