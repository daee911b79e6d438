//! `keg test` -- run a formula's test block against its installed keg.

use anyhow::Result;

use keg_ui::styles::{ICON_PASS, render_pass, render_warning};

use crate::cli::TestArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg test` command.
pub fn run(ctx: &RuntimeContext, args: &TestArgs) -> Result<()> {
    let formula = ctx.resolve_formula(&args.formula)?;
    let installer = ctx.installer()?;

    let tests_run = installer.test(&formula)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "name": formula.name,
            "tests_run": tests_run,
        }));
        return Ok(());
    }

    if tests_run == 0 {
        eprintln!(
            "{}",
            render_warning(&format!("{} defines no test block", formula.name))
        );
    } else if !ctx.quiet {
        let plural = if tests_run == 1 { "" } else { "s" };
        println!(
            "{} {}: {} test step{} passed",
            render_pass(ICON_PASS),
            formula.name,
            tests_run,
            plural
        );
    }
    Ok(())
}
