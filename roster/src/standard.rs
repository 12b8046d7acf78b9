//! Built-in roster data.

use path_defence_core::{ArchetypeId, CategoryTag, DamageType, TowerKindId};
use path_defence_system_damage_model::DamageProfile;

use crate::{EnemyArchetype, EnemyStats, TowerArchetype};

use CategoryTag::{
    Aquatic, Armored, Basic, Beast, Boss, Construct, Elemental, Fast, Flying, Swarm, Tank, Undead,
};

struct EnemySeed {
    id: &'static str,
    name: &'static str,
    health: u32,
    speed: f32,
    reward: u32,
    damage: u32,
    tags: &'static [CategoryTag],
    unlock_wave: u32,
}

#[rustfmt::skip]
const ENEMIES: &[EnemySeed] = &[
    EnemySeed { id: "grunt", name: "Grunt", health: 40, speed: 55.0, reward: 5, damage: 1, tags: &[Basic], unlock_wave: 1 },
    EnemySeed { id: "scout", name: "Scout", health: 28, speed: 90.0, reward: 5, damage: 1, tags: &[Fast], unlock_wave: 1 },
    EnemySeed { id: "swarmling", name: "Swarmling", health: 16, speed: 70.0, reward: 2, damage: 1, tags: &[Swarm], unlock_wave: 2 },
    EnemySeed { id: "hound", name: "Hound", health: 34, speed: 95.0, reward: 6, damage: 1, tags: &[Beast, Fast], unlock_wave: 3 },
    EnemySeed { id: "knight", name: "Knight", health: 90, speed: 45.0, reward: 10, damage: 2, tags: &[Armored], unlock_wave: 4 },
    EnemySeed { id: "bat", name: "Cave Bat", health: 26, speed: 85.0, reward: 6, damage: 1, tags: &[Flying, Beast], unlock_wave: 5 },
    EnemySeed { id: "skeleton", name: "Skeleton", health: 55, speed: 50.0, reward: 7, damage: 1, tags: &[Undead], unlock_wave: 6 },
    EnemySeed { id: "golem", name: "Clay Golem", health: 150, speed: 35.0, reward: 14, damage: 2, tags: &[Construct, Armored], unlock_wave: 8 },
    EnemySeed { id: "wisp", name: "Ember Wisp", health: 45, speed: 75.0, reward: 8, damage: 1, tags: &[Elemental, Flying], unlock_wave: 9 },
    EnemySeed { id: "warlord", name: "Orc Warlord", health: 1_500, speed: 30.0, reward: 150, damage: 10, tags: &[Boss, Armored], unlock_wave: 10 },
    EnemySeed { id: "ogre", name: "Ogre", health: 260, speed: 32.0, reward: 20, damage: 3, tags: &[Tank], unlock_wave: 11 },
    EnemySeed { id: "crab", name: "Shellback Crab", health: 120, speed: 40.0, reward: 12, damage: 2, tags: &[Aquatic, Armored], unlock_wave: 12 },
    EnemySeed { id: "wraith", name: "Wraith", health: 70, speed: 80.0, reward: 12, damage: 2, tags: &[Undead, Flying], unlock_wave: 14 },
    EnemySeed { id: "imp", name: "Imp", health: 24, speed: 80.0, reward: 4, damage: 1, tags: &[Elemental, Swarm], unlock_wave: 16 },
    EnemySeed { id: "juggernaut", name: "Juggernaut", health: 420, speed: 28.0, reward: 30, damage: 4, tags: &[Tank, Construct], unlock_wave: 18 },
    EnemySeed { id: "lich", name: "Lich King", health: 2_600, speed: 34.0, reward: 250, damage: 15, tags: &[Boss, Undead], unlock_wave: 20 },
    EnemySeed { id: "leviathan", name: "Leviathan", health: 4_200, speed: 26.0, reward: 400, damage: 20, tags: &[Boss, Aquatic, Tank], unlock_wave: 30 },
];

pub(crate) fn enemies() -> Vec<EnemyArchetype> {
    ENEMIES
        .iter()
        .map(|seed| {
            EnemyArchetype::from_parts(
                ArchetypeId::new(seed.id),
                seed.name.to_owned(),
                EnemyStats {
                    health: seed.health,
                    speed: seed.speed,
                    reward: seed.reward,
                    damage: seed.damage,
                },
                seed.tags.to_vec(),
                seed.unlock_wave,
            )
        })
        .collect()
}

pub(crate) fn towers() -> Vec<TowerArchetype> {
    vec![
        tower(
            "archer",
            "Archer Tower",
            50,
            12,
            150.0,
            800,
            DamageProfile::single(DamageType::Physical),
        ),
        tower(
            "cannon",
            "Cannon",
            90,
            30,
            130.0,
            1_600,
            DamageProfile::blended(DamageType::Physical, DamageType::Fire, 0.7),
        ),
        tower(
            "frost",
            "Frost Spire",
            80,
            8,
            140.0,
            1_000,
            DamageProfile::blended(DamageType::Ice, DamageType::Magic, 0.8),
        ),
        tower(
            "tesla",
            "Tesla Coil",
            120,
            18,
            120.0,
            900,
            DamageProfile::single(DamageType::Lightning),
        ),
        tower(
            "alchemist",
            "Alchemist Lab",
            100,
            10,
            130.0,
            700,
            DamageProfile::blended(DamageType::Poison, DamageType::Fire, 0.6),
        ),
        tower(
            "chapel",
            "Chapel",
            110,
            16,
            160.0,
            1_100,
            DamageProfile::blended(DamageType::Holy, DamageType::Magic, 0.75),
        ),
        tower(
            "arcane",
            "Arcane Obelisk",
            140,
            22,
            180.0,
            1_200,
            DamageProfile::single(DamageType::Magic),
        ),
    ]
}

fn tower(
    id: &str,
    name: &str,
    cost: u32,
    damage: u32,
    range: f32,
    fire_interval_ms: u32,
    profile: DamageProfile,
) -> TowerArchetype {
    TowerArchetype::new(
        TowerKindId::new(id),
        name,
        cost,
        damage,
        range,
        fire_interval_ms,
        profile,
    )
}
