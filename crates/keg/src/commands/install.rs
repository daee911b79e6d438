//! `keg install` -- fetch, verify, unpack, and run a formula's install steps.

use anyhow::Result;

use keg_fetch::Verification;
use keg_install::{InstallOptions, InstallOutcome};
use keg_ui::styles::{ICON_PASS, render_pass, render_phase, render_warning};

use crate::cli::InstallArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg install` command.
///
/// Formulas install in the order given. The first failure aborts the
/// run; formulas after it are not touched.
pub fn run(ctx: &RuntimeContext, args: &InstallArgs) -> Result<()> {
    let installer = ctx.installer()?;
    let options = InstallOptions {
        force: args.force,
        run_tests: !args.no_test,
    };

    let mut outcomes = Vec::new();
    for spec in &args.formulas {
        let formula = ctx.resolve_formula(spec)?;

        if !ctx.json && !ctx.quiet {
            match formula.resolved_version() {
                Some(version) => println!(
                    "{}",
                    render_phase(&format!("Installing {} {}", formula.name, version))
                ),
                None => println!("{}", render_phase(&format!("Installing {}", formula.name))),
            }
            for dep in installer.missing_required_dependencies(&formula) {
                eprintln!(
                    "{}",
                    render_warning(&format!("required dependency {} is not installed", dep))
                );
            }
        }

        let outcome = installer.install(&formula, &options)?;
        if !ctx.json {
            report(ctx, &outcome);
        }
        outcomes.push(outcome);
    }

    if ctx.json {
        let views: Vec<serde_json::Value> = outcomes.iter().map(outcome_view).collect();
        output_json(&views);
    }
    Ok(())
}

/// Print the human-readable result of one install.
fn report(ctx: &RuntimeContext, outcome: &InstallOutcome) {
    if let Verification::Skipped = outcome.verification {
        eprintln!(
            "{}",
            render_warning("no sha256 digest; archive was installed unverified")
        );
    }
    if ctx.quiet {
        return;
    }
    let mut summary = format!(
        "installed {} {} to {}",
        outcome.name,
        outcome.version,
        outcome.keg.display()
    );
    if outcome.tests_run > 0 {
        let plural = if outcome.tests_run == 1 { "" } else { "s" };
        summary.push_str(&format!(
            " ({} test step{} passed)",
            outcome.tests_run, plural
        ));
    }
    println!("{} {}", render_pass(ICON_PASS), summary);
}

/// JSON view of one install outcome.
pub(crate) fn outcome_view(outcome: &InstallOutcome) -> serde_json::Value {
    serde_json::json!({
        "name": outcome.name,
        "version": outcome.version,
        "keg": outcome.keg.display().to_string(),
        "verification": outcome.verification.as_str(),
        "from_cache": outcome.from_cache,
        "tests_run": outcome.tests_run,
    })
}
