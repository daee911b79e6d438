//! `keg upgrade` -- install a formula's current version next to older ones.
//!
//! The cellar keeps one directory per version, so an upgrade is an
//! install of the formula's current version. Older versions stay until
//! they are uninstalled.

use anyhow::{Result, bail};

use keg_install::InstallOptions;
use keg_ui::styles::{ICON_PASS, render_pass, render_phase};

use crate::cli::UpgradeArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

use super::install::outcome_view;

/// Execute the `keg upgrade` command.
pub fn run(ctx: &RuntimeContext, args: &UpgradeArgs) -> Result<()> {
    let formula = ctx.resolve_formula(&args.formula)?;
    let installer = ctx.installer()?;

    let installed = installer.cellar().versions_of(&formula.name)?;
    if installed.is_empty() {
        bail!("{} is not installed; run 'keg install' first", formula.name);
    }

    let Some(version) = formula.resolved_version() else {
        bail!("cannot determine the current version of {}", formula.name);
    };

    if installed.iter().any(|k| k.version == version) {
        if ctx.json {
            output_json(&serde_json::json!({
                "name": formula.name,
                "version": version,
                "upgraded": false,
            }));
        } else if !ctx.quiet {
            println!(
                "{} {} {} is already installed",
                render_pass(ICON_PASS),
                formula.name,
                version
            );
        }
        return Ok(());
    }

    if !ctx.json && !ctx.quiet {
        let newest = &installed[installed.len() - 1].version;
        println!(
            "{}",
            render_phase(&format!(
                "Upgrading {} {} -> {}",
                formula.name, newest, version
            ))
        );
    }

    let options = InstallOptions {
        force: false,
        run_tests: !args.no_test,
    };
    let outcome = installer.install(&formula, &options)?;

    if ctx.json {
        output_json(&outcome_view(&outcome));
    } else if !ctx.quiet {
        println!(
            "{} upgraded {} to {}",
            render_pass(ICON_PASS),
            outcome.name,
            outcome.version
        );
    }
    Ok(())
}
