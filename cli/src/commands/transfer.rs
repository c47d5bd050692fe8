use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::process;

use nosh_core::Session;
use nosh_core::log_csv;

pub(crate) fn cmd_export(session: &Session, output: Option<PathBuf>, json: bool) -> Result<()> {
    if session.log().is_empty() {
        eprintln!("Nothing to export: the log is empty");
        process::exit(2);
    }

    let path = output
        .unwrap_or_else(|| PathBuf::from(log_csv::export_filename(Local::now().date_naive())));
    let csv = session.export_csv();
    std::fs::write(&path, &csv)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let count = session.log().len();
    if json {
        println!(
            "{}",
            serde_json::json!({ "path": path.display().to_string(), "entries": count })
        );
    } else {
        println!("Exported {count} entries to {}", path.display());
    }
    Ok(())
}

pub(crate) fn cmd_import(session: &mut Session, file: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let count = session.import_csv(&text)?;

    if json {
        println!("{}", serde_json::json!({ "imported": count }));
    } else {
        println!("Imported {count} entries from {}", file.display());
    }
    Ok(())
}
