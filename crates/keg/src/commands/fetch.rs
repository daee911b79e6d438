//! `keg fetch` -- download and verify a formula's archive without installing.

use anyhow::Result;

use keg_fetch::Verification;
use keg_ui::styles::{ICON_PASS, render_pass, render_phase, render_warning};

use crate::cli::FetchArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg fetch` command.
pub fn run(ctx: &RuntimeContext, args: &FetchArgs) -> Result<()> {
    let formula = ctx.resolve_formula(&args.formula)?;
    let installer = ctx.installer()?;

    if !ctx.json && !ctx.quiet {
        println!("{}", render_phase(&format!("Fetching {}", formula.url)));
    }

    let outcome = installer.fetch(&formula)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "name": formula.name,
            "path": outcome.path.display().to_string(),
            "verification": outcome.verification.as_str(),
            "from_cache": outcome.from_cache,
        }));
        return Ok(());
    }

    if let Verification::Skipped = outcome.verification {
        eprintln!(
            "{}",
            render_warning("no sha256 digest; archive was not verified")
        );
        // Print the digest so it can be pinned in the formula.
        let actual = keg_fetch::file_sha256(&outcome.path)?;
        if !ctx.quiet {
            println!("archive sha256 is {}", actual);
            println!("add `sha256 = \"{}\"` to the formula to verify it", actual);
        }
    }
    if !ctx.quiet {
        let cached = if outcome.from_cache { " (cached)" } else { "" };
        println!(
            "{} fetched {}{}",
            render_pass(ICON_PASS),
            outcome.path.display(),
            cached
        );
    }
    Ok(())
}
