#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only catalogs of enemy and tower archetypes.
//!
//! Catalogs are loaded once, either from the built-in data or from a TOML
//! roster file, and then injected into the wave composer and the runtime.

mod config;
mod enemies;
mod standard;
mod towers;

use std::{fs, path::Path, path::PathBuf};

use path_defence_system_damage_model::{DamageModel, ResistanceTable};
use thiserror::Error;

pub use enemies::{EnemyArchetype, EnemyCatalog, EnemyStats};
pub use towers::{TowerArchetype, TowerCatalog};

/// Errors raised while building or loading a roster.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The roster file could not be read.
    #[error("failed to read roster file {path}")]
    Io {
        /// Location of the roster file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The roster file is not valid TOML or does not match the schema.
    #[error("failed to parse roster file")]
    Parse(#[from] toml::de::Error),
    /// The roster declares no enemy archetypes.
    #[error("roster declares no enemy archetypes")]
    NoEnemies,
    /// An enemy archetype has no category tags.
    #[error("enemy archetype '{id}' declares no category tags")]
    EmptyTags {
        /// Identifier of the offending archetype.
        id: String,
    },
    /// An enemy archetype has an unusable statistic.
    #[error("enemy archetype '{id}' has an invalid {field}")]
    InvalidStat {
        /// Identifier of the offending archetype.
        id: String,
        /// Name of the invalid statistic.
        field: &'static str,
    },
    /// Two enemy archetypes share an identifier.
    #[error("enemy archetype '{id}' is declared more than once")]
    DuplicateEnemy {
        /// Repeated identifier.
        id: String,
    },
    /// Two tower archetypes share an identifier.
    #[error("tower archetype '{id}' is declared more than once")]
    DuplicateTower {
        /// Repeated identifier.
        id: String,
    },
    /// A tower's primary ratio lies outside `[0, 1]`.
    #[error("tower archetype '{id}' has primary ratio {ratio} outside [0, 1]")]
    InvalidRatio {
        /// Identifier of the offending tower.
        id: String,
        /// Ratio found in the file.
        ratio: f64,
    },
}

/// Enemy and tower catalogs loaded together.
#[derive(Clone, Debug, PartialEq)]
pub struct Roster {
    enemies: EnemyCatalog,
    towers: TowerCatalog,
}

impl Roster {
    /// Bundles two catalogs into a roster.
    #[must_use]
    pub fn new(enemies: EnemyCatalog, towers: TowerCatalog) -> Self {
        Self { enemies, towers }
    }

    /// Roster shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(EnemyCatalog::standard(), TowerCatalog::standard())
    }

    /// Parses a roster from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        config::RosterFile::parse(contents)?.into_roster()
    }

    /// Reads and parses a roster file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Enemy archetype catalog.
    #[must_use]
    pub fn enemies(&self) -> &EnemyCatalog {
        &self.enemies
    }

    /// Tower archetype catalog.
    #[must_use]
    pub fn towers(&self) -> &TowerCatalog {
        &self.towers
    }

    /// Damage calculator bound to this roster's towers.
    #[must_use]
    pub fn damage_model(&self, resistances: ResistanceTable) -> DamageModel {
        DamageModel::new(resistances, self.towers.damage_profiles())
    }

    /// Splits the roster into its catalogs.
    #[must_use]
    pub fn into_parts(self) -> (EnemyCatalog, TowerCatalog) {
        (self.enemies, self.towers)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}
