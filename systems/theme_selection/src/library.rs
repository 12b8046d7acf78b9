//! Hand-authored themes.

use path_defence_core::{CategoryTag, CategoryTagSet};

use crate::WaveTheme;

use CategoryTag::{
    Aquatic, Armored, Basic, Beast, Construct, Elemental, Fast, Flying, Swarm, Tank, Undead,
};

fn tags(tags: &[CategoryTag]) -> CategoryTagSet {
    CategoryTagSet::from_tags(tags)
}

pub(crate) fn strategic_tags() -> CategoryTagSet {
    tags(&[
        Flying, Armored, Undead, Construct, Tank, Elemental, Aquatic, Beast,
    ])
}

pub(crate) fn boss_escort() -> WaveTheme {
    WaveTheme::new(
        "Boss Escort",
        tags(&[Armored, Tank]),
        tags(&[Basic, Swarm]),
        tags(&[Fast]),
    )
    .with_ratios(0.5, 0.35, 0.15)
    .with_segments(2)
    .with_spawn_interval_multiplier(1.1)
}

pub(crate) fn balanced() -> WaveTheme {
    WaveTheme::new(
        "Balanced Assault",
        tags(&[Basic, Armored]),
        tags(&[Swarm, Fast]),
        tags(&[Beast, Flying]),
    )
    .with_ratios(0.5, 0.3, 0.2)
    .with_segments(3)
}

pub(crate) fn early_themes() -> Vec<(u32, WaveTheme)> {
    vec![
        (
            1,
            WaveTheme::new(
                "First Contact",
                tags(&[Basic]),
                tags(&[Fast]),
                tags(&[Basic]),
            )
            .with_ratios(0.8, 0.2, 0.0)
            .with_segments(1)
            .with_spawn_interval_multiplier(1.2),
        ),
        (
            2,
            WaveTheme::new(
                "Scouting Party",
                tags(&[Fast]),
                tags(&[Basic]),
                tags(&[Swarm]),
            )
            .with_ratios(0.5, 0.4, 0.1)
            .with_segments(2)
            .with_spawn_interval_multiplier(1.1),
        ),
        (
            3,
            WaveTheme::new(
                "Swarm Warning",
                tags(&[Swarm]),
                tags(&[Basic]),
                tags(&[Fast]),
            )
            .with_ratios(0.55, 0.35, 0.10)
            .with_segments(2)
            .with_spawn_interval_multiplier(0.9),
        ),
        (
            4,
            WaveTheme::new(
                "Pack Hunt",
                tags(&[Beast, Fast]),
                tags(&[Swarm, Basic]),
                tags(&[Basic]),
            )
            .with_ratios(0.5, 0.35, 0.15)
            .with_segments(3),
        ),
        (
            5,
            WaveTheme::new(
                "Shield Wall",
                tags(&[Armored]),
                tags(&[Basic, Swarm]),
                tags(&[Fast, Beast]),
            )
            .with_ratios(0.45, 0.4, 0.15)
            .with_segments(3)
            .with_spawn_interval_multiplier(1.05),
        ),
    ]
}

pub(crate) fn cycle() -> Vec<WaveTheme> {
    vec![
        balanced(),
        WaveTheme::new(
            "Iron Vanguard",
            tags(&[Armored, Tank]),
            tags(&[Basic]),
            tags(&[Construct]),
        )
        .with_ratios(0.55, 0.3, 0.15)
        .with_segments(3)
        .with_spawn_interval_multiplier(1.15),
        WaveTheme::new(
            "Skyfall",
            tags(&[Flying]),
            tags(&[Fast, Beast]),
            tags(&[Elemental]),
        )
        .with_ratios(0.6, 0.25, 0.15)
        .with_segments(2)
        .with_spawn_interval_multiplier(0.95),
        WaveTheme::new(
            "Grave Tide",
            tags(&[Undead]),
            tags(&[Swarm, Basic]),
            tags(&[Flying]),
        )
        .with_ratios(0.6, 0.3, 0.1)
        .with_segments(3),
        WaveTheme::new(
            "Swarm Rush",
            tags(&[Swarm]),
            tags(&[Fast]),
            tags(&[Beast]),
        )
        .with_ratios(0.6, 0.3, 0.1)
        .with_segments(4)
        .with_spawn_interval_multiplier(0.7),
        WaveTheme::new(
            "Machine March",
            tags(&[Construct]),
            tags(&[Armored]),
            tags(&[Tank]),
        )
        .with_ratios(0.5, 0.35, 0.15)
        .with_segments(3)
        .with_spawn_interval_multiplier(1.2),
        WaveTheme::new(
            "Elemental Surge",
            tags(&[Elemental]),
            tags(&[Flying, Fast]),
            tags(&[Undead]),
        )
        .with_ratios(0.55, 0.3, 0.15)
        .with_segments(4)
        .with_spawn_interval_multiplier(0.9),
        WaveTheme::new(
            "Tidal Push",
            tags(&[Aquatic]),
            tags(&[Armored, Basic]),
            tags(&[Beast]),
        )
        .with_ratios(0.55, 0.3, 0.15)
        .with_segments(3)
        .with_spawn_interval_multiplier(1.05),
        WaveTheme::new(
            "Wild Hunt",
            tags(&[Beast]),
            tags(&[Fast, Swarm]),
            tags(&[Flying]),
        )
        .with_ratios(0.5, 0.35, 0.15)
        .with_segments(4)
        .with_spawn_interval_multiplier(0.85),
    ]
}
