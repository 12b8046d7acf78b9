use std::{io::Write, time::Duration};

use anyhow::{bail, Context};
use path_defence_core::{
    ArchetypeId, CategoryTag, Command, Difficulty, Event, TowerKindId, UnitState, WaveId,
};
use path_defence_roster::Roster;
use path_defence_system_damage_model::{Effectiveness, ResistanceTable};
use path_defence_system_theme_selection::ThemeLibrary;
use path_defence_system_wave_composition::{WaveComposer, WaveComposition};
use path_defence_world::{apply, query, WavePhase, World, WorldConfig};
use serde::Serialize;
use tracing::debug;

use crate::args::{ComposeArgs, DamageArgs, SimulateArgs};

const MAX_TICKS_PER_WAVE: u64 = 5_000_000;

/// Prints the compositions of the requested wave range.
pub(crate) fn compose(
    roster: &Roster,
    args: &ComposeArgs,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let difficulty = Difficulty::from(args.wave_args.difficulty).multipliers();
    let composer = WaveComposer::new(ThemeLibrary::standard(), args.wave_args.seed);
    let compositions: Vec<WaveComposition> = (0..args.count)
        .map(|offset| {
            composer.compose(
                WaveId::new(args.wave.saturating_add(offset)),
                difficulty,
                roster.enemies(),
            )
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &compositions)
            .context("failed to encode compositions")?;
        writeln!(out)?;
        return Ok(());
    }

    for composition in &compositions {
        let scaling = composition.scaling();
        writeln!(
            out,
            "wave {} [{}]: {} enemies, {} boss, every {} ms, health x{:.3}, speed x{:.3}, reward x{:.3}",
            composition.wave(),
            composition.theme(),
            composition.len(),
            composition.boss_count(),
            scaling.spawn_interval_ms(),
            scaling.health(),
            scaling.speed(),
            scaling.reward(),
        )?;
        let order: Vec<&str> = composition
            .sequence()
            .iter()
            .map(ArchetypeId::as_str)
            .collect();
        writeln!(out, "  {}", order.join(" "))?;
    }
    Ok(())
}

/// Resolved hit of one tower against one target.
#[derive(Debug, Serialize)]
pub(crate) struct DamageReport {
    tower: TowerKindId,
    target: String,
    tags: Vec<CategoryTag>,
    base_damage: u32,
    multiplier: f64,
    damage: u32,
    effectiveness: &'static str,
}

/// Prints how much damage a tower deals to the selected targets.
///
/// Without an enemy or tags every archetype of the roster is listed.
pub(crate) fn damage(
    roster: &Roster,
    args: &DamageArgs,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let tower = roster
        .towers()
        .get(&args.tower)
        .with_context(|| format!("unknown tower `{}`", args.tower))?;
    let base_damage = args.base.unwrap_or_else(|| tower.base_damage());
    let model = roster.damage_model(ResistanceTable::standard());

    let targets: Vec<(String, Vec<CategoryTag>)> = if let Some(enemy) = &args.enemy {
        let archetype = roster
            .enemies()
            .get(enemy)
            .with_context(|| format!("unknown enemy `{enemy}`"))?;
        vec![(archetype.id().to_string(), archetype.tags().to_vec())]
    } else if !args.tags.is_empty() {
        vec![(join_tags(&args.tags), args.tags.clone())]
    } else {
        roster
            .enemies()
            .iter()
            .map(|archetype| (archetype.id().to_string(), archetype.tags().to_vec()))
            .collect()
    };

    let reports: Vec<DamageReport> = targets
        .into_iter()
        .map(|(target, tags)| {
            let multiplier = model.multiplier(tower.id(), &tags);
            DamageReport {
                tower: tower.id().clone(),
                damage: model.effective_damage(base_damage, tower.id(), &tags),
                effectiveness: Effectiveness::from_multiplier(multiplier).label(),
                target,
                tags,
                base_damage,
                multiplier,
            }
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &reports)
            .context("failed to encode damage report")?;
        writeln!(out)?;
        return Ok(());
    }

    for report in &reports {
        writeln!(
            out,
            "{} -> {} [{}]: x{:.2} ({}) {} => {}",
            report.tower,
            report.target,
            join_tags(&report.tags),
            report.multiplier,
            report.effectiveness,
            report.base_damage,
            report.damage,
        )?;
    }
    Ok(())
}

fn join_tags(tags: &[CategoryTag]) -> String {
    tags.iter()
        .map(|tag| tag.name())
        .collect::<Vec<_>>()
        .join(",")
}

/// Outcome of one simulated wave.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct WaveReport {
    pub(crate) wave: u32,
    pub(crate) theme: String,
    pub(crate) spawned: u32,
    pub(crate) bosses: u32,
    pub(crate) defeated: u32,
    pub(crate) escaped: u32,
    pub(crate) damage_taken: u32,
    pub(crate) gold: u32,
    pub(crate) bonus_gold: u32,
    pub(crate) duration_ms: u64,
}

impl WaveReport {
    fn record(&mut self, event: Event) {
        match event {
            Event::WaveStarted {
                wave,
                theme,
                boss_count,
                ..
            } => {
                self.wave = wave.get();
                self.theme = theme;
                self.bosses = boss_count;
            }
            Event::EnemySpawned { .. } => self.spawned += 1,
            Event::EnemyDefeated { reward, .. } => {
                self.defeated += 1;
                self.gold = self.gold.saturating_add(reward);
            }
            Event::EnemyReachedBase { damage, .. } => {
                self.escaped += 1;
                self.damage_taken = self.damage_taken.saturating_add(damage);
            }
            Event::WaveComplete { bonus_gold, .. } => {
                self.bonus_gold = bonus_gold;
                self.gold = self.gold.saturating_add(bonus_gold);
            }
            Event::TimeAdvanced { .. }
            | Event::WaveStartRejected { .. }
            | Event::EnemyDamaged { .. }
            | Event::SpawningFinished { .. } => {}
        }
    }
}

/// Single turret shooting the enemy furthest along the route.
#[derive(Clone, Debug)]
pub(crate) struct Turret {
    kind: TowerKindId,
    base_damage: u32,
    interval_ms: f64,
    cooldown_ms: f64,
}

impl Turret {
    pub(crate) fn from_roster(roster: &Roster, kind: &TowerKindId) -> anyhow::Result<Self> {
        let tower = roster
            .towers()
            .get(kind)
            .with_context(|| format!("unknown tower `{kind}`"))?;
        Ok(Self {
            kind: kind.clone(),
            base_damage: tower.base_damage(),
            interval_ms: f64::from(tower.fire_interval_ms().max(1)),
            cooldown_ms: 0.0,
        })
    }

    fn fire(&mut self, world: &mut World, elapsed_ms: f64, events: &mut Vec<Event>) {
        self.cooldown_ms -= elapsed_ms;
        while self.cooldown_ms <= 0.0 {
            let target = query::active_units(world)
                .into_iter()
                .filter(|unit| unit.state == UnitState::Alive)
                .max_by(|a, b| a.distance.total_cmp(&b.distance));
            let Some(target) = target else {
                self.cooldown_ms = 0.0;
                return;
            };
            apply(
                world,
                Command::ResolveHit {
                    unit: target.id,
                    tower: self.kind.clone(),
                    base_damage: self.base_damage,
                },
                events,
            );
            self.cooldown_ms += self.interval_ms;
        }
    }
}

/// Runs the requested waves and prints one summary per wave.
pub(crate) fn simulate(
    roster: Roster,
    args: &SimulateArgs,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let turret = args
        .tower
        .as_ref()
        .map(|kind| Turret::from_roster(&roster, kind))
        .transpose()?;
    let config = WorldConfig {
        seed: args.wave_args.seed,
        difficulty: Difficulty::from(args.wave_args.difficulty).multipliers(),
        ..WorldConfig::default()
    };
    let mut world = World::with_roster(roster, config);
    let reports = run_waves(
        &mut world,
        args.waves,
        args.time_scale,
        Duration::from_millis(args.tick_ms),
        turret,
    )?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &reports)
            .context("failed to encode wave reports")?;
        writeln!(out)?;
        return Ok(());
    }

    for report in &reports {
        writeln!(
            out,
            "wave {:>3} {:<24} spawned {:>3} (boss {}) defeated {:>3} escaped {:>3} damage {:>3} gold {:>5} ({:.1}s)",
            report.wave,
            report.theme,
            report.spawned,
            report.bosses,
            report.defeated,
            report.escaped,
            report.damage_taken,
            report.gold,
            report.duration_ms as f64 / 1_000.0,
        )?;
    }
    Ok(())
}

/// Plays `waves` consecutive waves to completion.
pub(crate) fn run_waves(
    world: &mut World,
    waves: u32,
    time_scale: f32,
    tick: Duration,
    mut turret: Option<Turret>,
) -> anyhow::Result<Vec<WaveReport>> {
    let mut reports = Vec::with_capacity(waves as usize);
    let mut events = Vec::new();

    for _ in 0..waves {
        if !world.start_next_wave(time_scale, &mut events) {
            bail!(
                "runtime refused to start wave {}",
                query::current_wave(world).next()
            );
        }

        let mut report = WaveReport::default();
        let mut ticks = 0_u64;
        while query::phase(world) != WavePhase::Idle {
            if ticks == MAX_TICKS_PER_WAVE {
                bail!(
                    "wave {} did not complete within {MAX_TICKS_PER_WAVE} ticks",
                    query::current_wave(world)
                );
            }
            ticks += 1;

            apply(world, Command::Tick { dt: tick }, &mut events);
            if let Some(turret) = turret.as_mut() {
                let elapsed_ms = tick.as_secs_f64() * 1_000.0 * f64::from(query::time_scale(world));
                turret.fire(world, elapsed_ms, &mut events);
            }
            for event in events.drain(..) {
                report.record(event);
            }
        }

        report.duration_ms = ticks.saturating_mul(tick.as_millis() as u64);
        debug!(wave = report.wave, ticks, "simulated wave");
        reports.push(report);
    }

    Ok(reports)
}
