use path_defence_core::{ArchetypeId, CategoryTag, DamageType, TowerKindId, WaveId};
use path_defence_roster::{CatalogError, Roster};
use path_defence_system_damage_model::ResistanceTable;

const ROSTER: &str = r#"
[[enemy]]
id = "rat"
name = "Sewer Rat"
health = 12
speed = 80.0
reward = 1
tags = ["swarm", "beast"]

[[enemy]]
id = "sentinel"
health = 200
speed = 30.0
reward = 18
damage = 3
tags = ["construct", "armored"]
unlock_wave = 7

[[enemy]]
id = "titan"
health = 3000
speed = 20.0
reward = 300
damage = 12
tags = ["boss", "tank"]
unlock_wave = 10

[[tower]]
id = "ballista"
name = "Ballista"
cost = 70
damage = 25
range = 170.0
fire_interval_ms = 1400
primary = "physical"

[[tower]]
id = "brazier"
cost = 60
damage = 9
range = 110.0
fire_interval_ms = 600
primary = "fire"
secondary = "magic"
primary_ratio = 0.8
"#;

#[test]
fn parses_enemies_and_towers() {
    let roster = Roster::from_toml_str(ROSTER).expect("roster parses");

    let rat = roster
        .enemies()
        .get(&ArchetypeId::new("rat"))
        .expect("rat archetype");
    assert_eq!(rat.name(), "Sewer Rat");
    assert_eq!(rat.tags(), &[CategoryTag::Swarm, CategoryTag::Beast]);
    assert_eq!(rat.unlock_wave(), 1);
    assert_eq!(rat.stats().damage, 1);

    let sentinel = roster
        .enemies()
        .get(&ArchetypeId::new("sentinel"))
        .expect("sentinel archetype");
    assert_eq!(sentinel.name(), "sentinel");
    assert_eq!(sentinel.stats().damage, 3);

    let brazier = roster
        .towers()
        .get(&TowerKindId::new("brazier"))
        .expect("brazier tower");
    assert_eq!(brazier.profile().primary(), DamageType::Fire);
    assert_eq!(brazier.profile().secondary(), Some(DamageType::Magic));
    assert!((brazier.profile().primary_ratio() - 0.8).abs() < 1e-12);
}

#[test]
fn pools_follow_unlock_waves_and_boss_tags() {
    let roster = Roster::from_toml_str(ROSTER).expect("roster parses");
    let early: Vec<_> = roster
        .enemies()
        .regular_pool(WaveId::new(3))
        .into_iter()
        .map(|archetype| archetype.id().as_str().to_owned())
        .collect();
    assert_eq!(early, vec!["rat".to_owned()]);

    let late = roster.enemies().regular_pool(WaveId::new(12));
    assert_eq!(late.len(), 2);
    assert_eq!(roster.enemies().unlocked_bosses(WaveId::new(9)).len(), 0);
    assert_eq!(roster.enemies().unlocked_bosses(WaveId::new(10)).len(), 1);
}

#[test]
fn damage_model_uses_roster_towers() {
    let roster = Roster::from_toml_str(ROSTER).expect("roster parses");
    let model = roster.damage_model(ResistanceTable::neutral());
    assert_eq!(
        model.effective_damage(25, &TowerKindId::new("ballista"), &[CategoryTag::Tank]),
        25
    );
    assert!(model.profile(&TowerKindId::new("brazier")).is_some());
}

#[test]
fn rejects_out_of_range_ratio() {
    let text = r#"
[[enemy]]
id = "rat"
health = 12
speed = 80.0
reward = 1
tags = ["swarm"]

[[tower]]
id = "broken"
cost = 1
damage = 1
range = 1.0
fire_interval_ms = 1
primary = "fire"
secondary = "ice"
primary_ratio = 1.5
"#;
    let error = Roster::from_toml_str(text).expect_err("ratio must be rejected");
    assert!(matches!(error, CatalogError::InvalidRatio { .. }));
}

#[test]
fn rejects_missing_enemies_and_empty_tags() {
    assert!(matches!(
        Roster::from_toml_str(""),
        Err(CatalogError::NoEnemies)
    ));

    let text = r#"
[[enemy]]
id = "ghost"
health = 12
speed = 80.0
reward = 1
tags = []
"#;
    assert!(matches!(
        Roster::from_toml_str(text),
        Err(CatalogError::EmptyTags { .. })
    ));

    let text = r#"
[[enemy]]
id = "statue"
health = 40
speed = 0.0
reward = 1
tags = ["construct"]
"#;
    assert!(matches!(
        Roster::from_toml_str(text),
        Err(CatalogError::InvalidStat { field: "speed", .. })
    ));
}

#[test]
fn rejects_unknown_tags() {
    let text = r#"
[[enemy]]
id = "ghost"
health = 12
speed = 80.0
reward = 1
tags = ["spectral"]
"#;
    assert!(matches!(
        Roster::from_toml_str(text),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let error = Roster::load("does/not/exist.toml").expect_err("missing file");
    assert!(error.to_string().contains("does/not/exist.toml"));
}
