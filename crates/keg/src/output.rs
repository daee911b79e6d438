//! Output formatting helpers for the `keg` CLI.
//!
//! Provides JSON output, table formatting, and human-readable formula
//! display in both row and detailed multi-line formats.

use std::io::{self, Write};

use serde::Serialize;

use keg_core::Formula;
use keg_install::InstalledKeg;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Each row is a `Vec<String>` with columns matching the headers.
/// Column widths are computed from the data for alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Compute column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    // Print header
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{:<width$}", header, width = widths[i]);
    }
    let _ = writeln!(handle);

    // Print separator
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{}", "-".repeat(*width));
    }
    let _ = writeln!(handle);

    // Print rows
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                let _ = write!(handle, "  ");
            }
            if i < widths.len() {
                let _ = write!(handle, "{:<width$}", cell, width = widths[i]);
            } else {
                let _ = write!(handle, "{}", cell);
            }
        }
        let _ = writeln!(handle);
    }
}

/// Format a formula in detailed multi-line view.
///
/// Shows the declared fields plus the install status from the cellar.
pub fn format_formula_detail(formula: &Formula, installed: &[InstalledKeg]) -> String {
    let mut lines = Vec::new();

    // Header line
    match formula.resolved_version() {
        Some(version) => lines.push(format!("{} {}", formula.name, version)),
        None => lines.push(format!("{} (version unknown)", formula.name)),
    }
    if !formula.desc.is_empty() {
        lines.push(formula.desc.clone());
    }
    if !formula.homepage.is_empty() {
        lines.push(formula.homepage.clone());
    }

    lines.push(String::new());
    lines.push(format!("URL: {}", formula.url));
    match formula.sha256 {
        Some(ref digest) => lines.push(format!("SHA256: {}", digest)),
        None => lines.push("SHA256: none (installs unverified)".to_string()),
    }
    lines.push(format!("Install steps: {}", formula.install.len()));
    lines.push(format!("Test steps: {}", formula.test.len()));

    if !formula.depends_on.is_empty() {
        lines.push(String::new());
        lines.push("DEPENDENCIES".to_string());
        for dep in &formula.depends_on {
            lines.push(format!("  {}", dep.normalized()));
        }
    }

    lines.push(String::new());
    if installed.is_empty() {
        lines.push("Not installed".to_string());
    } else {
        lines.push("INSTALLED".to_string());
        for keg in installed {
            lines.push(format!("  {}  {}", keg.version, keg.path.display()));
        }
    }

    lines.join("\n")
}

/// Format an installed keg as a row for list output.
///
/// Returns a vector of column values suitable for [`output_table`]:
/// name, version, install date, and whether the archive was verified.
pub fn format_keg_row(keg: &InstalledKeg) -> Vec<String> {
    let (installed_at, verified) = match keg.receipt {
        Some(ref receipt) => (
            receipt.installed_at.format("%Y-%m-%d %H:%M").to_string(),
            if receipt.integrity_verified {
                "yes".to_string()
            } else {
                "no".to_string()
            },
        ),
        None => ("-".to_string(), "-".to_string()),
    };
    vec![keg.name.clone(), keg.version.clone(), installed_at, verified]
}
