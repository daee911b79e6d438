//! `keg uninstall` -- remove installed kegs from the cellar.

use anyhow::{Result, bail};

use keg_install::Cellar;
use keg_ui::styles::{ICON_PASS, render_pass};

use crate::cli::UninstallArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg uninstall` command.
pub fn run(ctx: &RuntimeContext, args: &UninstallArgs) -> Result<()> {
    let cellar = Cellar::new(&ctx.paths.cellar);

    let installed = cellar.versions_of(&args.name)?;
    if installed.is_empty() {
        bail!("{} is not installed", args.name);
    }

    let versions: Vec<String> = if args.all {
        installed.iter().map(|k| k.version.clone()).collect()
    } else if let Some(ref version) = args.version {
        vec![version.clone()]
    } else if installed.len() == 1 {
        vec![installed[0].version.clone()]
    } else {
        bail!(
            "{} has multiple versions installed ({}); pass --version or --all",
            args.name,
            installed
                .iter()
                .map(|k| k.version.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    for version in &versions {
        cellar.remove(&args.name, version)?;
        if !ctx.json && !ctx.quiet {
            println!("{} removed {} {}", render_pass(ICON_PASS), args.name, version);
        }
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "name": args.name,
            "removed": versions,
        }));
    }
    Ok(())
}
