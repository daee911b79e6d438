//! `keg audit` -- check formulas for problems without installing them.
//!
//! Errors always fail the audit. With `--strict`, warnings fail it too.

use anyhow::{Result, bail};

use keg_core::audit::{audit, has_errors};
use keg_ui::styles::{ICON_PASS, render_finding, render_pass};

use crate::cli::AuditArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg audit` command.
pub fn run(ctx: &RuntimeContext, args: &AuditArgs) -> Result<()> {
    let mut failures = 0usize;
    let mut reports = Vec::new();

    for spec in &args.formulas {
        let formula = ctx.resolve_formula(spec)?;
        let findings = audit(&formula);
        let failed = has_errors(&findings) || (args.strict && !findings.is_empty());
        if failed {
            failures += 1;
        }

        if ctx.json {
            reports.push(serde_json::json!({
                "formula": formula.name,
                "failed": failed,
                "findings": findings,
            }));
        } else if findings.is_empty() {
            if !ctx.quiet {
                println!("{} {}: no problems found", render_pass(ICON_PASS), formula.name);
            }
        } else {
            println!("{}:", formula.name);
            for finding in &findings {
                println!("  {}", render_finding(finding));
            }
        }
    }

    if ctx.json {
        output_json(&reports);
    }

    if failures > 0 {
        let plural = if failures == 1 { "" } else { "s" };
        bail!("audit failed for {} formula{}", failures, plural);
    }
    Ok(())
}
