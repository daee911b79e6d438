//! `keg info` -- show formula details and install status.

use anyhow::Result;

use keg_install::Cellar;

use crate::cli::InfoArgs;
use crate::context::RuntimeContext;
use crate::output::{format_formula_detail, output_json};

/// Execute the `keg info` command.
pub fn run(ctx: &RuntimeContext, args: &InfoArgs) -> Result<()> {
    let formula = ctx.resolve_formula(&args.formula)?;
    let cellar = Cellar::new(&ctx.paths.cellar);
    let installed = cellar.versions_of(&formula.name)?;

    if ctx.json {
        let versions: Vec<&str> = installed.iter().map(|k| k.version.as_str()).collect();
        output_json(&serde_json::json!({
            "formula": formula,
            "resolved_version": formula.resolved_version(),
            "installed": versions,
        }));
    } else {
        println!("{}", format_formula_detail(&formula, &installed));
    }
    Ok(())
}
