//! `keg` -- minimal formula-driven package installer.
//!
//! This is the entry point for the keg CLI. It parses CLI arguments with
//! clap, resolves the runtime context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

use cli::{Cli, Commands, GlobalArgs};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // Install signal handlers for graceful shutdown.
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            // Second signal: force exit
            std::process::exit(1);
        }
        // First signal: exit cleanly
        std::process::exit(0);
    });

    // Parse CLI arguments
    let cli = Cli::parse();

    // Completions are generated without touching the keg home.
    if let Some(Commands::Completion(args)) = &cli.command {
        if let Err(e) = commands::completion::run(args) {
            fail(&cli.global, &e);
        }
        return;
    }

    // Build runtime context from global args
    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => fail(&cli.global, &e),
    };

    // Set up logging based on verbosity
    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                "keg=debug,keg_core=debug,keg_config=debug,keg_fetch=debug,\
                 keg_archive=debug,keg_runner=debug,keg_install=debug",
            )
            .with_writer(std::io::stderr)
            .init();
    }

    // Dispatch to command handler
    let result = match cli.command {
        Some(Commands::Install(args)) => commands::install::run(&ctx, &args),
        Some(Commands::Uninstall(args)) => commands::uninstall::run(&ctx, &args),
        Some(Commands::Upgrade(args)) => commands::upgrade::run(&ctx, &args),
        Some(Commands::Fetch(args)) => commands::fetch::run(&ctx, &args),
        Some(Commands::Test(args)) => commands::test_cmd::run(&ctx, &args),
        Some(Commands::Info(args)) => commands::info::run(&ctx, &args),
        Some(Commands::Audit(args)) => commands::audit::run(&ctx, &args),
        Some(Commands::List(args)) => commands::list::run(&ctx, &args),
        Some(Commands::Completion(_)) => unreachable!("handled above"),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        fail(&cli.global, &e);
    }
}

/// Print an error in the requested format and exit with code 1.
fn fail(global: &GlobalArgs, err: &anyhow::Error) -> ! {
    if global.json {
        let err_json = serde_json::json!({
            "error": format!("{:#}", err),
        });
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{}", s);
        }
    } else {
        eprintln!("Error: {:#}", err);
    }
    std::process::exit(1)
}
