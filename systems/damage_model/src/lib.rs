#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure damage-type effectiveness calculator.
//!
//! A tower's projectile carries a [`DamageProfile`]: a primary damage type and
//! an optional secondary type blended by the primary ratio. Each category tag
//! of the target contributes a blended multiplier taken from the
//! [`ResistanceTable`]. Single-tag targets use that multiplier directly;
//! multi-tag targets use the mean of the best and worst per-tag multipliers so
//! that neither every weakness nor every resistance stacks.

mod resistances;

use std::collections::HashMap;

use path_defence_core::{CategoryTag, DamageType, TowerKindId};

pub use resistances::ResistanceTable;

/// Slack absorbed before flooring so representation error never costs a point.
const FLOOR_TOLERANCE: f64 = 1e-9;

/// Damage types carried by a tower's projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageProfile {
    primary: DamageType,
    secondary: Option<DamageType>,
    primary_ratio: f64,
}

impl DamageProfile {
    /// Profile dealing a single damage type.
    #[must_use]
    pub const fn single(primary: DamageType) -> Self {
        Self {
            primary,
            secondary: None,
            primary_ratio: 1.0,
        }
    }

    /// Profile blending two damage types; `primary_ratio` is clamped to `[0, 1]`.
    #[must_use]
    pub fn blended(primary: DamageType, secondary: DamageType, primary_ratio: f64) -> Self {
        let ratio = if primary_ratio.is_nan() {
            1.0
        } else {
            primary_ratio.clamp(0.0, 1.0)
        };
        Self {
            primary,
            secondary: Some(secondary),
            primary_ratio: ratio,
        }
    }

    /// Dominant damage type.
    #[must_use]
    pub const fn primary(&self) -> DamageType {
        self.primary
    }

    /// Optional secondary damage type.
    #[must_use]
    pub const fn secondary(&self) -> Option<DamageType> {
        self.secondary
    }

    /// Share of the damage dealt as the primary type.
    ///
    /// Profiles without a secondary type always report 1.
    #[must_use]
    pub const fn primary_ratio(&self) -> f64 {
        match self.secondary {
            Some(_) => self.primary_ratio,
            None => 1.0,
        }
    }

    fn multiplier_against(&self, table: &ResistanceTable, tag: CategoryTag) -> f64 {
        let primary = table.multiplier(tag, self.primary);
        match self.secondary {
            Some(secondary) => {
                let ratio = self.primary_ratio;
                primary * ratio + table.multiplier(tag, secondary) * (1.0 - ratio)
            }
            None => primary,
        }
    }
}

/// Combined multiplier of `profile` against a target carrying `tags`.
///
/// Returns 1 for an empty tag list.
#[must_use]
pub fn blended_multiplier(
    table: &ResistanceTable,
    profile: &DamageProfile,
    tags: &[CategoryTag],
) -> f64 {
    let mut per_tag = tags
        .iter()
        .map(|tag| profile.multiplier_against(table, *tag));
    let Some(first) = per_tag.next() else {
        return 1.0;
    };

    let (best, worst) = per_tag.fold((first, first), |(best, worst), value| {
        (best.max(value), worst.min(value))
    });

    if tags.len() == 1 {
        best
    } else {
        (best + worst) / 2.0
    }
}

/// Floors `base * multiplier`; a zero multiplier always yields zero.
#[must_use]
pub fn apply_multiplier(base_damage: u32, multiplier: f64) -> u32 {
    if multiplier <= 0.0 || multiplier.is_nan() {
        return 0;
    }

    let scaled = (f64::from(base_damage) * multiplier + FLOOR_TOLERANCE).floor();
    scaled.min(f64::from(u32::MAX)) as u32
}

/// Damage calculator bound to a resistance table and the tower roster.
#[derive(Clone, Debug, Default)]
pub struct DamageModel {
    resistances: ResistanceTable,
    profiles: HashMap<TowerKindId, DamageProfile>,
}

impl DamageModel {
    /// Creates a calculator from a resistance table and per-tower profiles.
    #[must_use]
    pub fn new(
        resistances: ResistanceTable,
        profiles: impl IntoIterator<Item = (TowerKindId, DamageProfile)>,
    ) -> Self {
        Self {
            resistances,
            profiles: profiles.into_iter().collect(),
        }
    }

    /// Resistance table used by the calculator.
    #[must_use]
    pub fn resistances(&self) -> &ResistanceTable {
        &self.resistances
    }

    /// Damage profile registered for `tower`, if any.
    #[must_use]
    pub fn profile(&self, tower: &TowerKindId) -> Option<&DamageProfile> {
        self.profiles.get(tower)
    }

    /// Multiplier `tower` applies against a target carrying `tags`.
    ///
    /// Unknown towers are neutral.
    #[must_use]
    pub fn multiplier(&self, tower: &TowerKindId, tags: &[CategoryTag]) -> f64 {
        self.profiles
            .get(tower)
            .map_or(1.0, |profile| {
                blended_multiplier(&self.resistances, profile, tags)
            })
    }

    /// Damage dealt by a hit of `base_damage` from `tower` against `tags`.
    ///
    /// Unknown towers pass the base damage through unchanged.
    #[must_use]
    pub fn effective_damage(
        &self,
        base_damage: u32,
        tower: &TowerKindId,
        tags: &[CategoryTag],
    ) -> u32 {
        match self.profiles.get(tower) {
            Some(profile) => apply_multiplier(
                base_damage,
                blended_multiplier(&self.resistances, profile, tags),
            ),
            None => base_damage,
        }
    }
}

/// Qualitative label describing a damage multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effectiveness {
    /// Multiplier of exactly zero.
    Immune,
    /// Multiplier below 0.6.
    StronglyResisted,
    /// Multiplier in `[0.6, 0.9)`.
    Resisted,
    /// Multiplier in `[0.9, 1.1)`.
    Normal,
    /// Multiplier in `[1.1, 1.4)`.
    SlightlyEffective,
    /// Multiplier in `[1.4, 1.8)`.
    Effective,
    /// Multiplier of 1.8 or more.
    SuperEffective,
}

impl Effectiveness {
    /// Classifies a multiplier.
    #[must_use]
    pub fn from_multiplier(multiplier: f64) -> Self {
        match multiplier {
            m if m <= 0.0 || m.is_nan() => Self::Immune,
            m if m < 0.6 => Self::StronglyResisted,
            m if m < 0.9 => Self::Resisted,
            m if m < 1.1 => Self::Normal,
            m if m < 1.4 => Self::SlightlyEffective,
            m if m < 1.8 => Self::Effective,
            _ => Self::SuperEffective,
        }
    }

    /// Text shown to players.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Immune => "immune",
            Self::StronglyResisted => "strongly resisted",
            Self::Resisted => "resisted",
            Self::Normal => "normal",
            Self::SlightlyEffective => "slightly effective",
            Self::Effective => "effective",
            Self::SuperEffective => "super effective",
        }
    }
}
