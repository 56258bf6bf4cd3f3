//! Shared output formatting for scan reports.

use anyhow::Result;
use docscan_core::{EntryKind, ScanReport};
use std::io::{self, Write};

use crate::OutputFormat;

/// Inputs cells longer than this many characters are cut.
const MAX_INPUTS_CHARS: usize = 50;

/// Characters kept before the ellipsis when an Inputs cell is cut.
const TRUNCATED_INPUTS_CHARS: usize = 47;

/// Print a scan report in the specified format.
pub fn print(report: &ScanReport, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let written = match format {
        OutputFormat::Markdown => write_markdown(&mut stdout, report),
        OutputFormat::Json => write_json(&mut stdout, report),
        OutputFormat::Compact => write_compact(&mut stdout, report),
    };

    match written.and_then(|()| stdout.flush()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => std::process::exit(1),
        Err(e) => Err(e.into()),
    }
}

/// Project structure followed by one signature table per file.
pub fn write_markdown(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    writeln!(out, "Scanning directory: {}\n", report.root.display())?;

    writeln!(out, "# Project Structure\n```text")?;
    for entry in &report.tree {
        let indent = "  ".repeat(entry.depth);
        match entry.kind {
            EntryKind::Directory => writeln!(out, "{indent}📂 {}/", entry.name)?,
            EntryKind::File => writeln!(out, "{indent}📄 {}", entry.name)?,
        }
    }
    writeln!(out, "```")?;

    writeln!(out, "\n# Code Analysis")?;
    writeln!(out, "Total files with functions: {}", report.files.len())?;

    for file in &report.files {
        writeln!(out, "## File: `{}`", file.relative_path.display())?;
        writeln!(out, "| Function | Inputs | Outputs |")?;
        writeln!(out, "| :--- | :--- | :--- |")?;
        for sig in &file.signatures {
            let args = truncate_cell(&escape_cell(&sig.arguments));
            let ret = escape_cell(&sig.return_type);
            writeln!(out, "| `{}` | `{args}` | `{ret}` |", sig.name)?;
        }
        write!(out, "\n\n")?;
    }

    Ok(())
}

/// The whole report, skipped files included, as pretty JSON.
pub fn write_json(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// `path: name(args) -> ret`, one line per signature.
pub fn write_compact(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    for file in &report.files {
        for sig in &file.signatures {
            write!(
                out,
                "{}: {}({})",
                file.relative_path.display(),
                sig.name,
                sig.arguments
            )?;
            if !sig.return_type.is_empty() {
                write!(out, " -> {}", sig.return_type)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Escapes `|` so it does not split a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Cuts cells over 50 characters to 47 plus `...`.
fn truncate_cell(text: &str) -> String {
    if text.chars().count() > MAX_INPUTS_CHARS {
        let mut cut: String = text.chars().take(TRUNCATED_INPUTS_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}
