//! `keg list` -- list installed kegs.

use anyhow::Result;

use keg_install::{Cellar, InstalledKeg};

use crate::cli::ListArgs;
use crate::context::RuntimeContext;
use crate::output::{format_keg_row, output_json, output_table};

/// Execute the `keg list` command.
pub fn run(ctx: &RuntimeContext, args: &ListArgs) -> Result<()> {
    let cellar = Cellar::new(&ctx.paths.cellar);
    let kegs = match &args.name {
        Some(name) => cellar.versions_of(name)?,
        None => cellar.list()?,
    };

    if ctx.json {
        let views: Vec<serde_json::Value> = kegs.iter().map(keg_view).collect();
        output_json(&views);
        return Ok(());
    }

    if kegs.is_empty() {
        if !ctx.quiet {
            println!("no kegs installed");
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = kegs.iter().map(format_keg_row).collect();
    output_table(&["NAME", "VERSION", "INSTALLED", "VERIFIED"], &rows);
    Ok(())
}

/// JSON view of one installed keg.
fn keg_view(keg: &InstalledKeg) -> serde_json::Value {
    let mut view = serde_json::json!({
        "name": keg.name,
        "version": keg.version,
        "path": keg.path.display().to_string(),
    });
    if let Some(ref receipt) = keg.receipt {
        view["installed_at"] = serde_json::json!(receipt.installed_at.to_rfc3339());
        view["integrity_verified"] = serde_json::json!(receipt.integrity_verified);
    }
    view
}
