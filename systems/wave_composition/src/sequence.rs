//! Themed spawn order construction.

use path_defence_core::{ArchetypeId, CategoryTagSet};
use path_defence_roster::EnemyArchetype;
use path_defence_system_theme_selection::WaveTheme;
use rand::seq::SliceRandom;
use rand::Rng;

/// Hard cap on the number of segments in a wave.
pub const MAX_SEGMENTS: usize = 4;

/// Enemies required per additional segment.
pub const ENEMIES_PER_SEGMENT: usize = 8;

/// Archetypes resolved for each theme role.
#[derive(Debug)]
pub(crate) struct ThemePools<'a> {
    pub(crate) focus: Vec<&'a EnemyArchetype>,
    pub(crate) support: Vec<&'a EnemyArchetype>,
    pub(crate) wildcard: Vec<&'a EnemyArchetype>,
}

impl<'a> ThemePools<'a> {
    /// Splits `pool` by theme role; an empty role inherits the previous one.
    pub(crate) fn partition(pool: &[&'a EnemyArchetype], theme: &WaveTheme) -> Self {
        let matching = |tags: CategoryTagSet| -> Vec<&'a EnemyArchetype> {
            pool.iter()
                .copied()
                .filter(|archetype| archetype.tag_set().intersects(tags))
                .collect()
        };

        let mut focus = matching(theme.focus());
        if focus.is_empty() {
            focus = pool.to_vec();
        }
        let mut support = matching(theme.support());
        if support.is_empty() {
            support = focus.clone();
        }
        let mut wildcard = matching(theme.wildcard());
        if wildcard.is_empty() {
            wildcard = support.clone();
        }

        Self {
            focus,
            support,
            wildcard,
        }
    }
}

/// Number of enemies assigned to each theme role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Allocation {
    pub(crate) focus: usize,
    pub(crate) support: usize,
    pub(crate) wildcard: usize,
}

impl Allocation {
    /// Splits `total` across roles using normalized `ratios`.
    ///
    /// Flooring remainders go to focus, focus holds at least one enemy and a
    /// wildcard deficit is covered by support before focus.
    pub(crate) fn split(total: usize, ratios: [f64; 3]) -> Self {
        if total == 0 {
            return Self {
                focus: 0,
                support: 0,
                wildcard: 0,
            };
        }

        let total = total as i64;
        let share = |ratio: f64| (total as f64 * ratio).floor() as i64;
        let mut support = share(ratios[1]).clamp(0, total);
        let wildcard_share = share(ratios[2]).clamp(0, total);
        let mut focus = (total - support - wildcard_share).max(1);
        let mut wildcard = total - focus - support;
        if wildcard < 0 {
            let borrowed = (-wildcard).min(support);
            support -= borrowed;
            wildcard += borrowed;
            if wildcard < 0 {
                focus += wildcard;
                wildcard = 0;
            }
        }

        Self {
            focus: focus as usize,
            support: support as usize,
            wildcard: wildcard as usize,
        }
    }

    pub(crate) const fn total(&self) -> usize {
        self.focus + self.support + self.wildcard
    }
}

/// Pool role a segment draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    Focus,
    Support,
    Wildcard,
}

/// Number of segments a wave of `total` enemies is split into.
pub(crate) fn segment_count(requested: u8, total: usize) -> usize {
    let limit = MAX_SEGMENTS.min(total / ENEMIES_PER_SEGMENT + 1);
    usize::from(requested).clamp(1, limit)
}

/// Ordered `(role, length)` plan for the wave's segments.
pub(crate) fn segment_plan(segments: usize, allocation: Allocation) -> Vec<(Role, usize)> {
    let Allocation {
        focus,
        support,
        wildcard,
    } = allocation;
    let opening = focus.div_ceil(2);
    let closing = focus - opening;

    match segments {
        1 => vec![(Role::Focus, allocation.total())],
        2 => vec![(Role::Focus, focus), (Role::Support, support + wildcard)],
        3 => vec![
            (Role::Focus, opening),
            (Role::Support, support + wildcard),
            (Role::Focus, closing),
        ],
        _ => vec![
            (Role::Focus, opening),
            (Role::Support, support),
            (Role::Wildcard, wildcard),
            (Role::Focus, closing),
        ],
    }
}

/// Builds the themed sequence of `total` regular enemies.
pub(crate) fn themed_sequence<R: Rng + ?Sized>(
    pool: &[&EnemyArchetype],
    theme: &WaveTheme,
    total: usize,
    rng: &mut R,
) -> Vec<ArchetypeId> {
    let pools = ThemePools::partition(pool, theme);
    let allocation = Allocation::split(total, theme.normalized_ratios());
    let segments = segment_count(theme.segment_count(), total);

    let mut sequence = Vec::with_capacity(total);
    for (role, length) in segment_plan(segments, allocation) {
        let source = match role {
            Role::Focus => &pools.focus,
            Role::Support => &pools.support,
            Role::Wildcard => &pools.wildcard,
        };
        fill_segment(source, length, rng, &mut sequence);
    }

    while sequence.len() < total {
        match pools.focus.choose(rng) {
            Some(archetype) => sequence.push(archetype.id().clone()),
            None => break,
        }
    }
    sequence.truncate(total);
    sequence
}

/// Appends `length` picks made of whole shuffled passes over `source`.
///
/// A pass whose first pick repeats the previous spawn is rotated by one.
fn fill_segment<R: Rng + ?Sized>(
    source: &[&EnemyArchetype],
    length: usize,
    rng: &mut R,
    sequence: &mut Vec<ArchetypeId>,
) {
    if source.is_empty() || length == 0 {
        return;
    }

    let target = sequence.len() + length;
    let mut pass: Vec<&EnemyArchetype> = source.to_vec();
    while sequence.len() < target {
        pass.shuffle(rng);
        if pass.len() > 1 && sequence.last() == Some(pass[0].id()) {
            pass.rotate_left(1);
        }
        let remaining = target - sequence.len();
        sequence.extend(
            pass.iter()
                .take(remaining)
                .map(|archetype| archetype.id().clone()),
        );
    }
}

/// Inserts `count` copies of `boss` spread across `sequence`.
pub(crate) fn insert_bosses(sequence: &mut Vec<ArchetypeId>, boss: &ArchetypeId, count: usize) {
    let spacing = (sequence.len() / (count + 1)).max(1);
    for index in 0..count {
        let position = (spacing * (index + 1) + index).min(sequence.len());
        sequence.insert(position, boss.clone());
    }
}
