use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use path_defence_core::{ArchetypeId, CategoryTag, Difficulty, TowerKindId};

/// Inspect and simulate Path Defence waves from the terminal.
#[derive(Debug, Parser)]
#[command(name = "path-defence", version, about)]
pub(crate) struct Cli {
    /// TOML roster replacing the built-in enemies and towers.
    #[arg(long, global = true)]
    pub(crate) roster: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub(crate) json: bool,

    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CliCommand {
    /// Print the spawn order composed for a range of waves.
    Compose(ComposeArgs),
    /// Resolve tower damage against enemies or tag combinations.
    Damage(DamageArgs),
    /// Run waves through the runtime and summarize the outcome.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
pub(crate) struct WaveArgs {
    /// Difficulty preset.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    pub(crate) difficulty: DifficultyArg,

    /// Seed for wave composition.
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,
}

#[derive(Debug, Args)]
pub(crate) struct ComposeArgs {
    /// First wave to compose.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) wave: u32,

    /// Number of consecutive waves to compose.
    #[arg(long, default_value_t = 1)]
    pub(crate) count: u32,

    #[command(flatten)]
    pub(crate) wave_args: WaveArgs,
}

#[derive(Debug, Args)]
pub(crate) struct DamageArgs {
    /// Tower kind firing the projectile.
    #[arg(long)]
    pub(crate) tower: TowerKindId,

    /// Unmodified projectile damage; defaults to the tower's base damage.
    #[arg(long)]
    pub(crate) base: Option<u32>,

    /// Enemy archetype to hit.
    #[arg(long, conflicts_with = "tags")]
    pub(crate) enemy: Option<ArchetypeId>,

    /// Comma-separated category tags to hit.
    #[arg(long, value_delimiter = ',')]
    pub(crate) tags: Vec<CategoryTag>,
}

#[derive(Debug, Args)]
pub(crate) struct SimulateArgs {
    /// Number of waves to run.
    #[arg(long, default_value_t = 5)]
    pub(crate) waves: u32,

    /// Game speed factor.
    #[arg(long, default_value_t = 1.0)]
    pub(crate) time_scale: f32,

    /// Wall-clock milliseconds per simulated tick.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) tick_ms: u64,

    /// Tower kind of a single turret shooting the leading enemy.
    #[arg(long)]
    pub(crate) tower: Option<TowerKindId>,

    #[command(flatten)]
    pub(crate) wave_args: WaveArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}
