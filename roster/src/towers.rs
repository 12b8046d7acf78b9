//! Tower archetype catalog.

use std::collections::HashSet;

use path_defence_core::TowerKindId;
use path_defence_system_damage_model::DamageProfile;

use crate::CatalogError;

/// Named template of base stats for a tower.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerArchetype {
    id: TowerKindId,
    name: String,
    cost: u32,
    base_damage: u32,
    range: f32,
    fire_interval_ms: u32,
    profile: DamageProfile,
}

impl TowerArchetype {
    /// Creates a tower archetype.
    #[must_use]
    pub fn new(
        id: TowerKindId,
        name: impl Into<String>,
        cost: u32,
        base_damage: u32,
        range: f32,
        fire_interval_ms: u32,
        profile: DamageProfile,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            base_damage,
            range,
            fire_interval_ms,
            profile,
        }
    }

    /// Identifier of the tower kind.
    #[must_use]
    pub fn id(&self) -> &TowerKindId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gold required to build the tower.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Damage of a single projectile before resistances.
    #[must_use]
    pub const fn base_damage(&self) -> u32 {
        self.base_damage
    }

    /// Targeting radius in world units.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Time between two shots in milliseconds.
    #[must_use]
    pub const fn fire_interval_ms(&self) -> u32 {
        self.fire_interval_ms
    }

    /// Damage types carried by the tower's projectiles.
    #[must_use]
    pub const fn profile(&self) -> DamageProfile {
        self.profile
    }
}

/// Read-only catalog of tower archetypes in authoring order.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerCatalog {
    towers: Vec<TowerArchetype>,
}

impl TowerCatalog {
    /// Creates a catalog, rejecting duplicate identifiers.
    pub fn new(towers: Vec<TowerArchetype>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(towers.len());
        for tower in &towers {
            if !seen.insert(tower.id()) {
                return Err(CatalogError::DuplicateTower {
                    id: tower.id().as_str().to_owned(),
                });
            }
        }
        Ok(Self { towers })
    }

    /// Catalog shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            towers: crate::standard::towers(),
        }
    }

    /// Looks up a tower archetype by identifier.
    #[must_use]
    pub fn get(&self, id: &TowerKindId) -> Option<&TowerArchetype> {
        self.towers.iter().find(|tower| tower.id() == id)
    }

    /// Iterates every tower archetype in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerArchetype> {
        self.towers.iter()
    }

    /// Pairs of tower identifier and damage profile, ready for the damage model.
    pub fn damage_profiles(&self) -> impl Iterator<Item = (TowerKindId, DamageProfile)> + '_ {
        self.towers
            .iter()
            .map(|tower| (tower.id().clone(), tower.profile()))
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
