#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Thematic composition profiles and the rules that pick one per wave.

mod library;

use std::collections::BTreeMap;

use path_defence_core::{CategoryTag, CategoryTagSet, WaveId};

/// Last wave covered by hand-authored early themes; the cycle is indexed from here.
pub const EARLY_GAME_WAVES: u32 = 5;

/// Composition profile biasing which category tags dominate a wave.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveTheme {
    name: String,
    focus: CategoryTagSet,
    support: CategoryTagSet,
    wildcard: CategoryTagSet,
    ratios: [f64; 3],
    segment_count: u8,
    spawn_interval_multiplier: f64,
}

impl WaveTheme {
    /// Creates a theme with an even three-segment layout and neutral pacing.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        focus: CategoryTagSet,
        support: CategoryTagSet,
        wildcard: CategoryTagSet,
    ) -> Self {
        Self {
            name: name.into(),
            focus,
            support,
            wildcard,
            ratios: [0.6, 0.3, 0.1],
            segment_count: 3,
            spawn_interval_multiplier: 1.0,
        }
    }

    /// Sets the focus/support/wildcard shares. They need not sum to one.
    #[must_use]
    pub fn with_ratios(mut self, focus: f64, support: f64, wildcard: f64) -> Self {
        self.ratios = [focus, support, wildcard];
        self
    }

    /// Sets how many sequential phases the wave is split into.
    #[must_use]
    pub fn with_segments(mut self, segment_count: u8) -> Self {
        self.segment_count = segment_count;
        self
    }

    /// Sets the factor applied to the wave's base spawn interval.
    #[must_use]
    pub fn with_spawn_interval_multiplier(mut self, multiplier: f64) -> Self {
        self.spawn_interval_multiplier = multiplier;
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tags that dominate the wave.
    #[must_use]
    pub const fn focus(&self) -> CategoryTagSet {
        self.focus
    }

    /// Tags that back the focus group up.
    #[must_use]
    pub const fn support(&self) -> CategoryTagSet {
        self.support
    }

    /// Tags sprinkled in for variety.
    #[must_use]
    pub const fn wildcard(&self) -> CategoryTagSet {
        self.wildcard
    }

    /// Raw focus/support/wildcard shares as authored.
    #[must_use]
    pub const fn ratios(&self) -> [f64; 3] {
        self.ratios
    }

    /// Shares normalized to sum to one.
    ///
    /// Negative or non-finite shares count as zero; an all-zero profile puts
    /// the whole wave on the focus group.
    #[must_use]
    pub fn normalized_ratios(&self) -> [f64; 3] {
        let sanitized = self.ratios.map(|ratio| {
            if ratio.is_finite() {
                ratio.max(0.0)
            } else {
                0.0
            }
        });
        let total: f64 = sanitized.iter().sum();
        if total <= f64::EPSILON {
            return [1.0, 0.0, 0.0];
        }
        sanitized.map(|ratio| ratio / total)
    }

    /// Requested number of segments before size clamping.
    #[must_use]
    pub const fn segment_count(&self) -> u8 {
        self.segment_count
    }

    /// Factor applied to the wave's base spawn interval.
    #[must_use]
    pub const fn spawn_interval_multiplier(&self) -> f64 {
        self.spawn_interval_multiplier
    }
}

/// Rule that produced a theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeSource {
    /// Fixed theme escorting a boss.
    BossSupport,
    /// Hand-authored theme for an early wave.
    Early,
    /// Spotlight on archetypes unlocked this wave.
    NewThreat,
    /// Entry of the repeating library.
    Cycle,
}

/// Theme chosen for a wave together with the rule that chose it.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedTheme {
    theme: WaveTheme,
    source: ThemeSource,
}

impl SelectedTheme {
    /// Chosen theme.
    #[must_use]
    pub fn theme(&self) -> &WaveTheme {
        &self.theme
    }

    /// Rule that produced the theme.
    #[must_use]
    pub const fn source(&self) -> ThemeSource {
        self.source
    }

    /// Consumes the selection, yielding the theme.
    #[must_use]
    pub fn into_theme(self) -> WaveTheme {
        self.theme
    }
}

/// Read-only library of themes and the selection rules over it.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeLibrary {
    boss_support: WaveTheme,
    early: BTreeMap<u32, WaveTheme>,
    cycle: Vec<WaveTheme>,
    strategic: CategoryTagSet,
    new_threat_support: CategoryTagSet,
    new_threat_wildcard: CategoryTagSet,
}

impl ThemeLibrary {
    /// Creates a library with the provided boss theme and cycle and no early themes.
    ///
    /// An empty cycle is replaced by a single balanced theme.
    #[must_use]
    pub fn new(boss_support: WaveTheme, cycle: Vec<WaveTheme>) -> Self {
        let cycle = if cycle.is_empty() {
            vec![library::balanced()]
        } else {
            cycle
        };
        Self {
            boss_support,
            early: BTreeMap::new(),
            cycle,
            strategic: library::strategic_tags(),
            new_threat_support: CategoryTagSet::from_tags(&[
                CategoryTag::Basic,
                CategoryTag::Swarm,
            ]),
            new_threat_wildcard: CategoryTagSet::from_tags(&[CategoryTag::Fast]),
        }
    }

    /// Library shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        library::early_themes().into_iter().fold(
            Self::new(library::boss_escort(), library::cycle()),
            |themes, (wave, theme)| themes.with_early(wave, theme),
        )
    }

    /// Registers a hand-authored theme for an exact wave number.
    #[must_use]
    pub fn with_early(mut self, wave: u32, theme: WaveTheme) -> Self {
        let _ = self.early.insert(wave, theme);
        self
    }

    /// Replaces the set of tags worth a dedicated spotlight wave.
    #[must_use]
    pub fn with_strategic_tags(mut self, strategic: CategoryTagSet) -> Self {
        self.strategic = strategic;
        self
    }

    /// Tags worth a dedicated spotlight wave when first unlocked.
    #[must_use]
    pub const fn strategic_tags(&self) -> CategoryTagSet {
        self.strategic
    }

    /// Repeating themes used once the early game is over.
    #[must_use]
    pub fn cycle(&self) -> &[WaveTheme] {
        &self.cycle
    }

    /// Picks the theme for `wave`.
    ///
    /// `newly_unlocked` holds the tags of archetypes unlocked exactly this wave
    /// and `pool_tags` the tags present in the regular spawn pool.
    #[must_use]
    pub fn select(
        &self,
        wave: WaveId,
        is_boss_wave: bool,
        newly_unlocked: CategoryTagSet,
        pool_tags: CategoryTagSet,
    ) -> SelectedTheme {
        if is_boss_wave {
            return SelectedTheme {
                theme: self.boss_support.clone(),
                source: ThemeSource::BossSupport,
            };
        }

        if let Some(theme) = self.early.get(&wave.get()) {
            return SelectedTheme {
                theme: theme.clone(),
                source: ThemeSource::Early,
            };
        }

        let spotlight = newly_unlocked
            .intersection(self.strategic)
            .intersection(pool_tags);
        if !spotlight.is_empty() {
            return SelectedTheme {
                theme: self.new_threat(spotlight),
                source: ThemeSource::NewThreat,
            };
        }

        let index = wave.get().saturating_sub(EARLY_GAME_WAVES) as usize % self.cycle.len();
        SelectedTheme {
            theme: self.cycle[index].clone(),
            source: ThemeSource::Cycle,
        }
    }

    fn new_threat(&self, focus: CategoryTagSet) -> WaveTheme {
        let names: Vec<&str> = focus.iter().map(CategoryTag::name).collect();
        WaveTheme::new(
            format!("New Threat: {}", names.join(" & ")),
            focus,
            self.new_threat_support,
            self.new_threat_wildcard,
        )
        .with_ratios(0.65, 0.25, 0.10)
        .with_segments(3)
    }
}

impl Default for ThemeLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tags() -> CategoryTagSet {
        CategoryTag::ALL.into_iter().collect()
    }

    #[test]
    fn boss_waves_always_get_the_escort_theme() {
        let library = ThemeLibrary::standard();
        let selected = library.select(
            WaveId::new(10),
            true,
            CategoryTagSet::from_tags(&[CategoryTag::Flying]),
            all_tags(),
        );
        assert_eq!(selected.source(), ThemeSource::BossSupport);
        assert_eq!(selected.theme(), &library::boss_escort());
    }

    #[test]
    fn early_waves_use_the_authored_table() {
        let library = ThemeLibrary::standard();
        for wave in 1..=EARLY_GAME_WAVES {
            let selected = library.select(
                WaveId::new(wave),
                false,
                CategoryTagSet::from_tags(&[CategoryTag::Armored]),
                all_tags(),
            );
            assert_eq!(selected.source(), ThemeSource::Early, "wave {wave}");
        }
    }

    #[test]
    fn strategic_unlocks_get_a_spotlight() {
        let library = ThemeLibrary::standard();
        let unlocked = CategoryTagSet::from_tags(&[CategoryTag::Undead, CategoryTag::Swarm]);
        let selected = library.select(WaveId::new(6), false, unlocked, all_tags());

        assert_eq!(selected.source(), ThemeSource::NewThreat);
        let theme = selected.theme();
        assert_eq!(
            theme.focus(),
            CategoryTagSet::from_tags(&[CategoryTag::Undead])
        );
        assert_eq!(theme.ratios(), [0.65, 0.25, 0.10]);
        assert_eq!(theme.segment_count(), 3);
        assert_eq!(theme.name(), "New Threat: undead");
    }

    #[test]
    fn non_strategic_unlocks_fall_through_to_the_cycle() {
        let library = ThemeLibrary::standard();
        let unlocked = CategoryTagSet::from_tags(&[CategoryTag::Swarm]);
        let selected = library.select(WaveId::new(16), false, unlocked, all_tags());
        assert_eq!(selected.source(), ThemeSource::Cycle);
    }

    #[test]
    fn strategic_tags_can_be_replaced() {
        let swarm = CategoryTagSet::from_tags(&[CategoryTag::Swarm]);
        let library = ThemeLibrary::standard().with_strategic_tags(swarm);
        assert_eq!(library.strategic_tags(), swarm);

        let selected = library.select(WaveId::new(16), false, swarm, all_tags());
        assert_eq!(selected.source(), ThemeSource::NewThreat);
        assert_eq!(selected.theme().name(), "New Threat: swarm");

        let undead = CategoryTagSet::from_tags(&[CategoryTag::Undead]);
        let selected = library.select(WaveId::new(16), false, undead, all_tags());
        assert_eq!(selected.source(), ThemeSource::Cycle);
    }

    #[test]
    fn spotlight_requires_the_tag_in_the_regular_pool() {
        let library = ThemeLibrary::standard();
        let unlocked = CategoryTagSet::from_tags(&[CategoryTag::Aquatic]);
        let pool = CategoryTagSet::from_tags(&[CategoryTag::Basic]);
        let selected = library.select(WaveId::new(30 + 1), false, unlocked, pool);
        assert_eq!(selected.source(), ThemeSource::Cycle);
    }

    #[test]
    fn cycle_repeats_forever() {
        let library = ThemeLibrary::standard();
        let length = library.cycle().len() as u32;
        let pick = |wave: u32| {
            library
                .select(WaveId::new(wave), false, CategoryTagSet::EMPTY, all_tags())
                .into_theme()
        };
        assert_eq!(pick(7), library.cycle()[2]);
        assert_eq!(pick(7), pick(7 + length));
        assert_eq!(pick(13), pick(13 + 5 * length));
    }

    #[test]
    fn ratios_normalize_at_use_time() {
        let theme = WaveTheme::new(
            "Lopsided",
            CategoryTagSet::EMPTY,
            CategoryTagSet::EMPTY,
            CategoryTagSet::EMPTY,
        )
        .with_ratios(2.0, 1.0, 1.0);
        assert_eq!(theme.normalized_ratios(), [0.5, 0.25, 0.25]);

        let degenerate = theme.with_ratios(0.0, -1.0, f64::NAN);
        assert_eq!(degenerate.normalized_ratios(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_cycle_gets_a_balanced_default() {
        let library = ThemeLibrary::new(library::boss_escort(), Vec::new());
        let selected = library.select(WaveId::new(40), false, CategoryTagSet::EMPTY, all_tags());
        assert_eq!(selected.theme().name(), library::balanced().name());
    }
}
