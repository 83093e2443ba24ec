// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::write_table;
use crate::error::{Error, Result};
use crate::table::SeriesTable;

/// Write `table` to the path `export` resolves to. Returns that path.
pub fn export_table(export: &ExportOptions, table: &SeriesTable) -> Result<PathBuf> {
    let path = export.out_path();
    write_table_to_path(&path, table, export.include_headers, export.delim())?;
    Ok(path)
}

/// Create parent dirs, truncate, write.
pub fn write_table_to_path(
    path: &Path,
    table: &SeriesTable,
    include_headers: bool,
    sep: char,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    write_table(&mut out, table, include_headers, sep)?;
    out.flush()?;
    logf!("Export: wrote {} rows → {}", table.len(), path.display());
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Config(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// File-name-safe version of an item name ("0002 食料" → "0002_食料").
pub fn sanitize_item_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() || ch == '-' { out.push(ch); last_us = false; }
        else if !last_us { out.push('_'); last_us = true; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { "item".to_string() } else { out }
}
