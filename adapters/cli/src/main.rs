#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for inspecting and simulating Path Defence waves.

mod args;
mod commands;
mod logging;

use std::{io, path::Path};

use anyhow::Context;
use clap::Parser;
use path_defence_roster::Roster;
use tracing::info;

use args::{Cli, CliCommand};

/// Entry point for the Path Defence command-line interface.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let roster = load_roster(cli.roster.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        CliCommand::Compose(args) => commands::compose(&roster, args, cli.json, &mut out),
        CliCommand::Damage(args) => commands::damage(&roster, args, cli.json, &mut out),
        CliCommand::Simulate(args) => commands::simulate(roster, args, cli.json, &mut out),
    }
}

fn load_roster(path: Option<&Path>) -> anyhow::Result<Roster> {
    let Some(path) = path else {
        return Ok(Roster::standard());
    };
    let roster = Roster::load(path)
        .with_context(|| format!("failed to load roster from {}", path.display()))?;
    info!(
        path = %path.display(),
        enemies = roster.enemies().len(),
        "loaded roster"
    );
    Ok(roster)
}
