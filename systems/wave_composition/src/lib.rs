#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic themed wave composition system.

mod scaling;
mod sequence;

use path_defence_core::{ArchetypeId, CategoryTagSet, DifficultyMultipliers, WaveId};
use path_defence_roster::{EnemyArchetype, EnemyCatalog};
use path_defence_system_theme_selection::ThemeLibrary;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

pub use scaling::{
    completion_bonus, spawn_interval_ms, WaveScaling, BASE_SPAWN_INTERVAL_MS,
    HARD_SPAWN_INTERVAL_FLOOR_MS, MAX_REWARD_MULTIPLIER, MIN_SPAWN_INTERVAL_MS,
};
pub use sequence::{ENEMIES_PER_SEGMENT, MAX_SEGMENTS};

const RNG_STREAM_COMPOSITION: &str = "wave-composition";

/// Waves per additional boss on boss waves.
pub const WAVES_PER_EXTRA_BOSS: u32 = 25;

/// Spawn order and scaling produced for a single wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveComposition {
    wave: WaveId,
    theme: String,
    sequence: Vec<ArchetypeId>,
    scaling: WaveScaling,
    boss: Option<ArchetypeId>,
    boss_count: u32,
}

impl WaveComposition {
    /// Wave the composition was built for.
    #[must_use]
    pub const fn wave(&self) -> WaveId {
        self.wave
    }

    /// Name of the theme that shaped the wave.
    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Archetypes in spawn order.
    #[must_use]
    pub fn sequence(&self) -> &[ArchetypeId] {
        &self.sequence
    }

    /// Scaling factors for every spawn of the wave.
    #[must_use]
    pub const fn scaling(&self) -> &WaveScaling {
        &self.scaling
    }

    /// Boss archetype inserted into the sequence, if any.
    #[must_use]
    pub fn boss(&self) -> Option<&ArchetypeId> {
        self.boss.as_ref()
    }

    /// Number of boss spawns in the sequence.
    #[must_use]
    pub const fn boss_count(&self) -> u32 {
        self.boss_count
    }

    /// Total number of spawns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Reports whether the composition holds no spawns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Pure system that turns a wave number into a themed spawn order.
#[derive(Clone, Debug)]
pub struct WaveComposer {
    themes: ThemeLibrary,
    seed: u64,
}

impl WaveComposer {
    /// Creates a composer drawing themes from `themes` and randomness from `seed`.
    #[must_use]
    pub fn new(themes: ThemeLibrary, seed: u64) -> Self {
        Self { themes, seed }
    }

    /// Theme library consulted for every wave.
    #[must_use]
    pub fn themes(&self) -> &ThemeLibrary {
        &self.themes
    }

    /// Seed every wave's random stream derives from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Composes `wave` from the archetypes in `catalog`.
    ///
    /// The result depends only on the seed, the wave, the difficulty and the
    /// catalog, so replaying the same inputs yields the same sequence.
    #[must_use]
    pub fn compose(
        &self,
        wave: WaveId,
        difficulty: DifficultyMultipliers,
        catalog: &EnemyCatalog,
    ) -> WaveComposition {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_wave_seed(self.seed, wave));

        let fallback = EnemyArchetype::fallback();
        let mut pool = catalog.regular_pool(wave);
        if pool.is_empty() {
            debug!(wave = wave.get(), "regular pool empty, using fallback archetype");
            pool.push(&fallback);
        }
        let pool_tags = pool
            .iter()
            .fold(CategoryTagSet::EMPTY, |tags, archetype| {
                tags.union(archetype.tag_set())
            });

        let bosses = if wave.is_boss_wave() {
            catalog.unlocked_bosses(wave)
        } else {
            Vec::new()
        };
        if wave.is_boss_wave() && bosses.is_empty() {
            debug!(wave = wave.get(), "no boss unlocked, composing a regular wave");
        }
        let boss_wave = !bosses.is_empty();

        let selected = self.themes.select(
            wave,
            boss_wave,
            catalog.newly_unlocked_tags(wave),
            pool_tags,
        );
        let source = selected.source();
        let theme = selected.into_theme();

        let scaling = WaveScaling::for_wave(wave, difficulty, theme.spawn_interval_multiplier());
        let total = scaling.enemy_count() as usize;

        let (boss, boss_count) = if boss_wave {
            let count = (wave.get() / WAVES_PER_EXTRA_BOSS).max(1) as usize;
            let boss = bosses
                .choose(&mut rng)
                .map(|archetype| archetype.id().clone());
            (boss, count.min(total))
        } else {
            (None, 0)
        };

        let mut spawn_order =
            sequence::themed_sequence(&pool, &theme, total - boss_count, &mut rng);
        if let Some(boss) = &boss {
            sequence::insert_bosses(&mut spawn_order, boss, boss_count);
        }

        info!(
            wave = wave.get(),
            theme = theme.name(),
            source = ?source,
            enemies = spawn_order.len(),
            bosses = boss_count,
            interval_ms = scaling.spawn_interval_ms(),
            "composed wave"
        );

        WaveComposition {
            wave,
            theme: theme.name().to_owned(),
            sequence: spawn_order,
            scaling,
            boss,
            boss_count: boss_count as u32,
        }
    }
}

impl Default for WaveComposer {
    fn default() -> Self {
        Self::new(ThemeLibrary::standard(), 0)
    }
}

fn derive_wave_seed(global_seed: u64, wave: WaveId) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    hasher.update(wave.get().to_le_bytes());
    hasher.update(RNG_STREAM_COMPOSITION.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_defence_core::CategoryTag;
    use pretty_assertions::assert_eq;

    #[test]
    fn wave_seeds_differ_per_wave_and_seed() {
        let base = derive_wave_seed(7, WaveId::new(1));
        assert_eq!(base, derive_wave_seed(7, WaveId::new(1)));
        assert_ne!(base, derive_wave_seed(7, WaveId::new(2)));
        assert_ne!(base, derive_wave_seed(8, WaveId::new(1)));
    }

    #[test]
    fn composer_exposes_its_configuration() {
        let flying = CategoryTagSet::from_tags(&[CategoryTag::Flying]);
        let themes = ThemeLibrary::standard().with_strategic_tags(flying);
        let composer = WaveComposer::new(themes, 42);

        assert_eq!(composer.seed(), 42);
        assert_eq!(composer.themes().strategic_tags(), flying);
        assert_eq!(WaveComposer::default().seed(), 0);
    }

    #[test]
    fn composition_replays_for_identical_inputs() {
        let composer = WaveComposer::new(ThemeLibrary::standard(), 42);
        let catalog = EnemyCatalog::standard();
        for wave in 1..=25 {
            let first =
                composer.compose(WaveId::new(wave), DifficultyMultipliers::NEUTRAL, &catalog);
            let second =
                composer.compose(WaveId::new(wave), DifficultyMultipliers::NEUTRAL, &catalog);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn empty_catalog_spawns_the_fallback() {
        let composer = WaveComposer::default();
        let catalog = EnemyCatalog::new(Vec::new()).expect("empty catalog");
        let composition =
            composer.compose(WaveId::new(3), DifficultyMultipliers::NEUTRAL, &catalog);
        let expected = composition.scaling().enemy_count() as usize;
        assert_eq!(composition.len(), expected);
        assert!(composition
            .sequence()
            .iter()
            .all(|id| id == EnemyArchetype::fallback().id()));
    }

    #[test]
    fn boss_waves_without_bosses_compose_a_regular_wave() {
        let composer = WaveComposer::default();
        let catalog = EnemyCatalog::new(vec![EnemyArchetype::fallback()]).expect("catalog");
        let composition =
            composer.compose(WaveId::new(10), DifficultyMultipliers::NEUTRAL, &catalog);
        assert_eq!(composition.boss(), None);
        assert_eq!(composition.boss_count(), 0);
        assert_eq!(composition.len(), 27);
    }
}
