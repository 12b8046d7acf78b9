#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Path Defence engine.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative wave runtime, and the pure systems. Hosts submit [`Command`]
//! values describing desired mutations, the runtime executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values that hosts
//! drain once per tick. The catalog vocabulary ([`CategoryTag`],
//! [`DamageType`]) and the difficulty bundle also live here so every system
//! speaks the same language.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

/// Number of waves between two boss waves.
pub const BOSS_WAVE_PERIOD: u32 = 10;

/// Semantic classification of an enemy archetype.
///
/// Tags drive both resistance lookups and thematic pool filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTag {
    /// Plain infantry without notable traits.
    Basic,
    /// Weak units that arrive in large numbers.
    Swarm,
    /// Units that outpace the rest of the wave.
    Fast,
    /// Heavily protected units.
    Armored,
    /// Airborne units.
    Flying,
    /// Reanimated units.
    Undead,
    /// Mechanical units.
    Construct,
    /// Slow, high-health units.
    Tank,
    /// Units made of raw elements.
    Elemental,
    /// Water-dwelling units.
    Aquatic,
    /// Animal units.
    Beast,
    /// Boss units; never part of the regular spawn pool.
    Boss,
}

impl CategoryTag {
    /// Number of category tags.
    pub const COUNT: usize = 12;

    /// Every category tag in declaration order.
    pub const ALL: [CategoryTag; Self::COUNT] = [
        Self::Basic,
        Self::Swarm,
        Self::Fast,
        Self::Armored,
        Self::Flying,
        Self::Undead,
        Self::Construct,
        Self::Tank,
        Self::Elemental,
        Self::Aquatic,
        Self::Beast,
        Self::Boss,
    ];

    /// Dense index of the tag, suitable for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name used in catalogs and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Swarm => "swarm",
            Self::Fast => "fast",
            Self::Armored => "armored",
            Self::Flying => "flying",
            Self::Undead => "undead",
            Self::Construct => "construct",
            Self::Tank => "tank",
            Self::Elemental => "elemental",
            Self::Aquatic => "aquatic",
            Self::Beast => "beast",
            Self::Boss => "boss",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryTag {
    type Err = UnknownName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownName::new("category tag", trimmed))
    }
}

/// Kind of damage carried by a tower's projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Arrows, shells and blades.
    Physical,
    /// Burning damage.
    Fire,
    /// Freezing damage.
    Ice,
    /// Electrical damage.
    Lightning,
    /// Toxic damage.
    Poison,
    /// Arcane damage.
    Magic,
    /// Radiant damage.
    Holy,
}

impl DamageType {
    /// Number of damage types.
    pub const COUNT: usize = 7;

    /// Every damage type in declaration order.
    pub const ALL: [DamageType; Self::COUNT] = [
        Self::Physical,
        Self::Fire,
        Self::Ice,
        Self::Lightning,
        Self::Poison,
        Self::Magic,
        Self::Holy,
    ];

    /// Dense index of the damage type, suitable for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name used in catalogs and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Fire => "fire",
            Self::Ice => "ice",
            Self::Lightning => "lightning",
            Self::Poison => "poison",
            Self::Magic => "magic",
            Self::Holy => "holy",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DamageType {
    type Err = UnknownName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownName::new("damage type", trimmed))
    }
}

/// Error returned when parsing an unknown tag or damage type name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownName {
    kind: &'static str,
    value: String,
}

impl UnknownName {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownName {}

/// Compact set of category tags backed by a bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryTagSet(u16);

impl CategoryTagSet {
    /// Set that contains no tags.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from the provided tags.
    #[must_use]
    pub fn from_tags(tags: &[CategoryTag]) -> Self {
        tags.iter().fold(Self::EMPTY, |set, tag| set.with(*tag))
    }

    /// Returns a copy of the set that additionally contains `tag`.
    #[must_use]
    pub const fn with(self, tag: CategoryTag) -> Self {
        Self(self.0 | (1 << tag.index()))
    }

    /// Reports whether `tag` is a member of the set.
    #[must_use]
    pub const fn contains(self, tag: CategoryTag) -> bool {
        self.0 & (1 << tag.index()) != 0
    }

    /// Reports whether the two sets share at least one tag.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Tags present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Tags present in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of tags in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = CategoryTag> {
        CategoryTag::ALL
            .into_iter()
            .filter(move |tag| self.contains(*tag))
    }
}

impl FromIterator<CategoryTag> for CategoryTagSet {
    fn from_iter<I: IntoIterator<Item = CategoryTag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, tag| set.with(tag))
    }
}

/// Identifier of an enemy archetype within the roster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeId(String);

impl ArchetypeId {
    /// Creates a new archetype identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the textual identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ArchetypeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of a tower archetype within the roster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TowerKindId(String);

impl TowerKindId {
    /// Creates a new tower kind identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the textual identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TowerKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TowerKindId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One-based wave number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveId(u32);

impl WaveId {
    /// Creates a new wave identifier with the provided number.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the wave number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier of the wave that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Reports whether this wave is a boss wave (every tenth wave).
    #[must_use]
    pub const fn is_boss_wave(self) -> bool {
        self.0 > 0 && self.0 % BOSS_WAVE_PERIOD == 0
    }
}

impl fmt::Display for WaveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier assigned to a spawned enemy unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyUnitId(u32);

impl EnemyUnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Externally supplied scalars describing the selected difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMultipliers {
    /// Scales gold rewards.
    pub reward: f64,
    /// Scales enemy health.
    pub health: f64,
    /// Scales the number of enemies per wave.
    pub count: f64,
    /// Scales enemy movement speed.
    pub speed: f64,
}

impl DifficultyMultipliers {
    /// Bundle that leaves every quantity unscaled.
    pub const NEUTRAL: Self = Self {
        reward: 1.0,
        health: 1.0,
        count: 1.0,
        speed: 1.0,
    };
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Named difficulty presets offered to players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Fewer, weaker enemies and more gold.
    Easy,
    /// Baseline tuning.
    #[default]
    Normal,
    /// More, tougher and faster enemies with reduced gold.
    Hard,
}

impl Difficulty {
    /// Multiplier bundle associated with the preset.
    #[must_use]
    pub const fn multipliers(self) -> DifficultyMultipliers {
        match self {
            Self::Easy => DifficultyMultipliers {
                reward: 1.2,
                health: 0.8,
                count: 0.85,
                speed: 0.9,
            },
            Self::Normal => DifficultyMultipliers::NEUTRAL,
            Self::Hard => DifficultyMultipliers {
                reward: 0.9,
                health: 1.35,
                count: 1.2,
                speed: 1.1,
            },
        }
    }
}

/// Point in world space along the enemy route.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Horizontal coordinate in world units.
    pub x: f32,
    /// Vertical coordinate in world units.
    pub y: f32,
}

impl PathPoint {
    /// Creates a new path point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Lifecycle state of a spawned enemy unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitState {
    /// The unit is walking the route.
    Alive,
    /// The unit was destroyed by the defender.
    Dead,
    /// The unit reached the end of the route.
    Escaped,
}

/// Immutable representation of a spawned unit used for events and queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Identifier allocated by the runtime.
    pub id: EnemyUnitId,
    /// Archetype the unit was spawned from.
    pub archetype: ArchetypeId,
    /// Category tags copied from the archetype.
    pub tags: Vec<CategoryTag>,
    /// Health at spawn time after wave scaling.
    pub max_health: u32,
    /// Current health.
    pub health: u32,
    /// Movement speed in world units per second after wave scaling.
    pub speed: f32,
    /// Gold granted when the unit is destroyed, after wave scaling.
    pub reward: u32,
    /// Damage dealt to the defender when the unit escapes.
    pub base_damage: u32,
    /// Distance travelled along the route in world units.
    pub distance: f32,
    /// Current position on the route.
    pub position: PathPoint,
    /// Lifecycle state.
    pub state: UnitState,
}

/// Commands that express all permissible runtime mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Replaces the route enemies follow; first point spawns, last point is the exit.
    ConfigureRoute {
        /// Ordered waypoints of the route.
        waypoints: Vec<PathPoint>,
    },
    /// Updates the difficulty bundle applied to waves started afterwards.
    SetDifficulty {
        /// Multipliers to apply.
        difficulty: DifficultyMultipliers,
    },
    /// Requests that the next wave begins spawning.
    StartNextWave {
        /// Game speed factor; spawn timers and movement run this much faster.
        time_scale: f32,
    },
    /// Changes the game speed of the wave in flight.
    SetTimeScale {
        /// New game speed factor.
        time_scale: f32,
    },
    /// Advances the runtime clock by the provided wall-clock delta.
    Tick {
        /// Wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Freezes all pending spawn timers.
    PauseSpawning,
    /// Resumes pending spawn timers where they were frozen.
    ResumeSpawning,
    /// Applies a resolved projectile hit to a unit.
    ResolveHit {
        /// Unit that was hit.
        unit: EnemyUnitId,
        /// Tower kind that fired the projectile.
        tower: TowerKindId,
        /// Unmodified damage of the projectile.
        base_damage: u32,
    },
    /// Notifies the runtime that a unit died outside of [`Command::ResolveHit`].
    ReportEnemyDied {
        /// Unit that died.
        unit: EnemyUnitId,
    },
    /// Cancels every pending spawn and destroys all active units.
    Clear,
}

/// Events broadcast by the runtime after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the runtime clock advanced.
    TimeAdvanced {
        /// Wall-clock duration of the tick.
        dt: Duration,
    },
    /// A new wave began spawning.
    WaveStarted {
        /// Number of the wave that started.
        wave: WaveId,
        /// Name of the theme that shaped the wave.
        theme: String,
        /// Total number of enemies scheduled.
        enemy_count: u32,
        /// Number of bosses among the scheduled enemies.
        boss_count: u32,
    },
    /// A start request was rejected because a wave is still in flight.
    WaveStartRejected {
        /// Wave that is currently in progress.
        active_wave: WaveId,
    },
    /// A unit entered the route.
    EnemySpawned {
        /// Snapshot of the unit at spawn time.
        unit: EnemySnapshot,
    },
    /// A unit took damage.
    EnemyDamaged {
        /// Unit that was hit.
        unit: EnemyUnitId,
        /// Damage applied after resistances.
        amount: u32,
        /// Health left after the hit.
        remaining: u32,
    },
    /// A unit was destroyed by the defender.
    EnemyDefeated {
        /// Unit that was destroyed.
        unit: EnemyUnitId,
        /// Gold granted for the kill.
        reward: u32,
    },
    /// A unit reached the end of the route.
    EnemyReachedBase {
        /// Snapshot of the unit when it escaped.
        unit: EnemySnapshot,
        /// Damage dealt to the defender.
        damage: u32,
    },
    /// Every scheduled unit of the wave has spawned.
    SpawningFinished {
        /// Wave whose spawning completed.
        wave: WaveId,
    },
    /// The wave was cleared.
    WaveComplete {
        /// Number of the wave that will start next.
        next_wave: WaveId,
        /// Gold bonus granted for clearing the wave.
        bonus_gold: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_waves_fall_on_multiples_of_ten() {
        for wave in [10, 20, 30] {
            assert!(WaveId::new(wave).is_boss_wave(), "wave {wave}");
        }
        for wave in (0..10).chain(11..20) {
            assert!(!WaveId::new(wave).is_boss_wave(), "wave {wave}");
        }
    }

    #[test]
    fn tag_set_membership_and_intersection() {
        let armored = CategoryTagSet::from_tags(&[CategoryTag::Armored, CategoryTag::Tank]);
        let flying = CategoryTagSet::from_tags(&[CategoryTag::Flying]);
        assert!(armored.contains(CategoryTag::Tank));
        assert!(!armored.contains(CategoryTag::Flying));
        assert!(!armored.intersects(flying));
        assert!(armored.intersects(armored.with(CategoryTag::Flying)));
        assert_eq!(armored.union(flying).len(), 3);
        assert_eq!(
            armored.iter().collect::<Vec<_>>(),
            vec![CategoryTag::Armored, CategoryTag::Tank]
        );
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Flying".parse::<CategoryTag>(), Ok(CategoryTag::Flying));
        assert_eq!(" holy ".parse::<DamageType>(), Ok(DamageType::Holy));
        assert!("laser".parse::<DamageType>().is_err());
    }

    #[test]
    fn tag_indices_match_declaration_order() {
        for (index, tag) in CategoryTag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), index);
        }
        for (index, kind) in DamageType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), index);
        }
    }

    #[test]
    fn wave_complete_event_round_trips_through_bincode() {
        let event = Event::WaveComplete {
            next_wave: WaveId::new(4),
            bonus_gold: 25,
        };
        let bytes = bincode::serialize(&event).expect("serialize");
        let restored: Event = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, event);
    }
}
