#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("refs error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    // Commands that need neither config nor a login.
    match &cli.command {
        cli::Commands::Schema(args) => return commands::schema::handle(args, &flags),
        cli::Commands::Guide => return commands::guide::handle(&flags),
        _ => {}
    }

    let config = bootstrap::load_config()?;
    context::warn_unconfigured(&config);

    if let cli::Commands::Shell = &cli.command {
        return commands::shell::handle(config, &flags).await;
    }

    let user = bootstrap::authenticate(&config, &flags)?;
    let mut ctx = context::AppContext::init(config, user)
        .await
        .context("failed to open the reference store")?;

    commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REFDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
