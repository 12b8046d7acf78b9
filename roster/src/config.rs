//! TOML representation of a roster file.

use path_defence_core::{ArchetypeId, CategoryTag, DamageType, TowerKindId};
use path_defence_system_damage_model::DamageProfile;
use serde::Deserialize;

use crate::{
    CatalogError, EnemyArchetype, EnemyCatalog, EnemyStats, Roster, TowerArchetype, TowerCatalog,
};

const DEFAULT_ESCAPE_DAMAGE: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RosterFile {
    #[serde(default, rename = "enemy")]
    enemies: Vec<EnemyRecord>,
    #[serde(default, rename = "tower")]
    towers: Vec<TowerRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnemyRecord {
    id: String,
    name: Option<String>,
    health: u32,
    speed: f32,
    reward: u32,
    #[serde(default = "default_escape_damage")]
    damage: u32,
    tags: Vec<CategoryTag>,
    #[serde(default = "default_unlock_wave")]
    unlock_wave: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TowerRecord {
    id: String,
    name: Option<String>,
    cost: u32,
    damage: u32,
    range: f32,
    fire_interval_ms: u32,
    primary: DamageType,
    secondary: Option<DamageType>,
    primary_ratio: Option<f64>,
}

fn default_escape_damage() -> u32 {
    DEFAULT_ESCAPE_DAMAGE
}

fn default_unlock_wave() -> u32 {
    1
}

impl RosterFile {
    pub(crate) fn parse(contents: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(contents)?)
    }

    pub(crate) fn into_roster(self) -> Result<Roster, CatalogError> {
        if self.enemies.is_empty() {
            return Err(CatalogError::NoEnemies);
        }

        let enemies = self
            .enemies
            .into_iter()
            .map(EnemyRecord::into_archetype)
            .collect::<Result<Vec<_>, _>>()?;
        let towers = self
            .towers
            .into_iter()
            .map(TowerRecord::into_archetype)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Roster::new(
            EnemyCatalog::new(enemies)?,
            TowerCatalog::new(towers)?,
        ))
    }
}

impl EnemyRecord {
    fn into_archetype(self) -> Result<EnemyArchetype, CatalogError> {
        let name = self.name.unwrap_or_else(|| self.id.clone());
        EnemyArchetype::new(
            ArchetypeId::new(self.id),
            name,
            EnemyStats {
                health: self.health,
                speed: self.speed,
                reward: self.reward,
                damage: self.damage,
            },
            self.tags,
            self.unlock_wave,
        )
    }
}

impl TowerRecord {
    fn into_archetype(self) -> Result<TowerArchetype, CatalogError> {
        if let Some(ratio) = self.primary_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(CatalogError::InvalidRatio { id: self.id, ratio });
            }
        }

        let profile = match self.secondary {
            Some(secondary) => {
                DamageProfile::blended(self.primary, secondary, self.primary_ratio.unwrap_or(1.0))
            }
            None => DamageProfile::single(self.primary),
        };
        let name = self.name.unwrap_or_else(|| self.id.clone());
        Ok(TowerArchetype::new(
            TowerKindId::new(self.id),
            name,
            self.cost,
            self.damage,
            self.range,
            self.fire_interval_ms,
            profile,
        ))
    }
}
