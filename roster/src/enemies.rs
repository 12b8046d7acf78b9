//! Enemy archetype catalog.

use std::collections::HashSet;

use path_defence_core::{ArchetypeId, CategoryTag, CategoryTagSet, WaveId};

use crate::CatalogError;

/// Base statistics of an enemy archetype before wave scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Health points.
    pub health: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Gold granted for destroying the unit.
    pub reward: u32,
    /// Damage dealt to the defender when the unit escapes.
    pub damage: u32,
}

/// Named template of base stats for an enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyArchetype {
    id: ArchetypeId,
    name: String,
    stats: EnemyStats,
    tags: Vec<CategoryTag>,
    tag_set: CategoryTagSet,
    unlock_wave: u32,
}

impl EnemyArchetype {
    /// Creates a validated archetype.
    ///
    /// Fails when the tag list is empty or a statistic is unusable.
    pub fn new(
        id: ArchetypeId,
        name: impl Into<String>,
        stats: EnemyStats,
        tags: Vec<CategoryTag>,
        unlock_wave: u32,
    ) -> Result<Self, CatalogError> {
        if tags.is_empty() {
            return Err(CatalogError::EmptyTags {
                id: id.as_str().to_owned(),
            });
        }
        if stats.health == 0 {
            return Err(CatalogError::InvalidStat {
                id: id.as_str().to_owned(),
                field: "health",
            });
        }
        if !stats.speed.is_finite() || stats.speed <= 0.0 {
            return Err(CatalogError::InvalidStat {
                id: id.as_str().to_owned(),
                field: "speed",
            });
        }

        Ok(Self::from_parts(id, name.into(), stats, tags, unlock_wave))
    }

    pub(crate) fn from_parts(
        id: ArchetypeId,
        name: String,
        stats: EnemyStats,
        tags: Vec<CategoryTag>,
        unlock_wave: u32,
    ) -> Self {
        let tag_set = CategoryTagSet::from_tags(&tags);
        Self {
            id,
            name,
            stats,
            tags,
            tag_set,
            unlock_wave,
        }
    }

    /// Archetype spawned whenever every resolved pool comes up empty.
    #[must_use]
    pub fn fallback() -> Self {
        Self::from_parts(
            ArchetypeId::new("grunt"),
            "Grunt".to_owned(),
            EnemyStats {
                health: 40,
                speed: 55.0,
                reward: 5,
                damage: 1,
            },
            vec![CategoryTag::Basic],
            1,
        )
    }

    /// Identifier of the archetype.
    #[must_use]
    pub fn id(&self) -> &ArchetypeId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unscaled statistics.
    #[must_use]
    pub const fn stats(&self) -> EnemyStats {
        self.stats
    }

    /// Ordered, non-empty list of category tags.
    #[must_use]
    pub fn tags(&self) -> &[CategoryTag] {
        &self.tags
    }

    /// Category tags as a set.
    #[must_use]
    pub const fn tag_set(&self) -> CategoryTagSet {
        self.tag_set
    }

    /// First wave in which the archetype may appear.
    #[must_use]
    pub const fn unlock_wave(&self) -> u32 {
        self.unlock_wave
    }

    /// Reports whether the archetype is a boss.
    #[must_use]
    pub const fn is_boss(&self) -> bool {
        self.tag_set.contains(CategoryTag::Boss)
    }

    /// Reports whether the archetype may appear in `wave`.
    #[must_use]
    pub const fn is_unlocked(&self, wave: WaveId) -> bool {
        self.unlock_wave <= wave.get()
    }
}

/// Read-only catalog of enemy archetypes in authoring order.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyCatalog {
    archetypes: Vec<EnemyArchetype>,
}

impl EnemyCatalog {
    /// Creates a catalog, rejecting duplicate identifiers.
    pub fn new(archetypes: Vec<EnemyArchetype>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(archetypes.len());
        for archetype in &archetypes {
            if !seen.insert(archetype.id()) {
                return Err(CatalogError::DuplicateEnemy {
                    id: archetype.id().as_str().to_owned(),
                });
            }
        }
        Ok(Self { archetypes })
    }

    /// Catalog shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            archetypes: crate::standard::enemies(),
        }
    }

    /// Looks up an archetype by identifier.
    #[must_use]
    pub fn get(&self, id: &ArchetypeId) -> Option<&EnemyArchetype> {
        self.archetypes
            .iter()
            .find(|archetype| archetype.id() == id)
    }

    /// Iterates every archetype in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemyArchetype> {
        self.archetypes.iter()
    }

    /// Number of archetypes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Reports whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Unlocked, non-boss archetypes eligible for regular spawning in `wave`.
    #[must_use]
    pub fn regular_pool(&self, wave: WaveId) -> Vec<&EnemyArchetype> {
        self.archetypes
            .iter()
            .filter(|archetype| archetype.is_unlocked(wave) && !archetype.is_boss())
            .collect()
    }

    /// Boss archetypes unlocked by `wave`.
    #[must_use]
    pub fn unlocked_bosses(&self, wave: WaveId) -> Vec<&EnemyArchetype> {
        self.archetypes
            .iter()
            .filter(|archetype| archetype.is_unlocked(wave) && archetype.is_boss())
            .collect()
    }

    /// Tags carried by archetypes whose unlock wave is exactly `wave`.
    #[must_use]
    pub fn newly_unlocked_tags(&self, wave: WaveId) -> CategoryTagSet {
        self.archetypes
            .iter()
            .filter(|archetype| archetype.unlock_wave() == wave.get())
            .fold(CategoryTagSet::EMPTY, |set, archetype| {
                set.union(archetype.tag_set())
            })
    }
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> EnemyStats {
        EnemyStats {
            health: 10,
            speed: 40.0,
            reward: 1,
            damage: 1,
        }
    }

    #[test]
    fn empty_tags_are_rejected() {
        let result = EnemyArchetype::new(
            ArchetypeId::new("ghost"),
            "Ghost",
            stats(),
            Vec::new(),
            1,
        );
        assert!(matches!(result, Err(CatalogError::EmptyTags { .. })));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let make = || {
            EnemyArchetype::new(
                ArchetypeId::new("rat"),
                "Rat",
                stats(),
                vec![CategoryTag::Swarm],
                1,
            )
            .expect("valid archetype")
        };
        let result = EnemyCatalog::new(vec![make(), make()]);
        assert!(matches!(result, Err(CatalogError::DuplicateEnemy { .. })));
    }

    #[test]
    fn bosses_never_enter_the_regular_pool() {
        let catalog = EnemyCatalog::standard();
        for wave in 1..=60 {
            let pool = catalog.regular_pool(WaveId::new(wave));
            assert!(pool.iter().all(|archetype| !archetype.is_boss()));
        }
    }

    #[test]
    fn regular_pool_grows_with_unlocks() {
        let catalog = EnemyCatalog::standard();
        let early = catalog.regular_pool(WaveId::new(1)).len();
        let late = catalog.regular_pool(WaveId::new(40)).len();
        assert!(early >= 1);
        assert!(late > early);
    }

    #[test]
    fn newly_unlocked_tags_only_cover_the_exact_wave() {
        let catalog = EnemyCatalog::standard();
        let tags = catalog.newly_unlocked_tags(WaveId::new(5));
        assert!(tags.contains(CategoryTag::Flying));
        assert!(!tags.contains(CategoryTag::Undead));
    }

    #[test]
    fn standard_catalog_has_valid_entries() {
        let catalog = EnemyCatalog::standard();
        assert!(!catalog.is_empty());
        for archetype in catalog.iter() {
            assert!(!archetype.tags().is_empty(), "{}", archetype.id());
            assert!(archetype.stats().health > 0, "{}", archetype.id());
        }
        assert!(EnemyCatalog::new(catalog.iter().cloned().collect()).is_ok());
    }
}
