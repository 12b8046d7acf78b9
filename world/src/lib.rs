#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative wave runtime for Path Defence.
//!
//! The world owns the wave counter, the spawn timers and every enemy on the
//! route. Hosts mutate it exclusively through [`apply`] and observe it through
//! the [`query`] module and the events pushed into the outbound queue.

mod route;
mod scheduler;
mod units;

use std::time::Duration;

use path_defence_core::{
    Command, DifficultyMultipliers, EnemyUnitId, Event, PathPoint, TowerKindId, UnitState, WaveId,
};
use path_defence_roster::{EnemyArchetype, EnemyCatalog, Roster};
use path_defence_system_damage_model::{DamageModel, ResistanceTable};
use path_defence_system_theme_selection::ThemeLibrary;
use path_defence_system_wave_composition::{completion_bonus, WaveComposer, WaveComposition};
use tracing::{debug, info, warn};

pub use route::Route;

use scheduler::SpawnScheduler;
use units::ActiveUnit;

/// Delay between the last spawn of a wave and its spawning-finished marker.
pub const SPAWN_FINISH_DELAY_MS: u32 = 500;

const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Lifecycle phase of the wave runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// No wave is in flight; the next wave may start.
    Idle,
    /// Spawn timers are still pending.
    Spawning,
    /// Every unit spawned; waiting for the route to clear.
    AwaitingClear,
}

/// Injected configuration of a runtime instance.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Seed every wave composition derives its randomness from.
    pub seed: u64,
    /// Waypoints of the enemy route.
    pub route: Vec<PathPoint>,
    /// Difficulty bundle applied to waves.
    pub difficulty: DifficultyMultipliers,
    /// Theme library consulted when composing waves.
    pub themes: ThemeLibrary,
    /// Resistance table used to resolve hits.
    pub resistances: ResistanceTable,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            route: Route::default().waypoints().collect(),
            difficulty: DifficultyMultipliers::NEUTRAL,
            themes: ThemeLibrary::standard(),
            resistances: ResistanceTable::standard(),
        }
    }
}

/// Represents the authoritative wave runtime state.
#[derive(Debug)]
pub struct World {
    enemies: EnemyCatalog,
    damage: DamageModel,
    composer: WaveComposer,
    route: Route,
    difficulty: DifficultyMultipliers,
    phase: WavePhase,
    wave: WaveId,
    wave_difficulty: DifficultyMultipliers,
    time_scale: f32,
    scheduler: SpawnScheduler,
    composition: Option<WaveComposition>,
    units: Vec<ActiveUnit>,
    next_unit: u32,
}

impl World {
    /// Creates a runtime backed by the built-in roster and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roster(Roster::standard(), WorldConfig::default())
    }

    /// Creates a runtime backed by `roster` and `config`.
    ///
    /// An unusable route in `config` is replaced by the default route.
    #[must_use]
    pub fn with_roster(roster: Roster, config: WorldConfig) -> Self {
        let damage = roster.damage_model(config.resistances);
        let (enemies, _) = roster.into_parts();
        let route = Route::new(&config.route).unwrap_or_else(|| {
            warn!(
                waypoints = config.route.len(),
                "configured route unusable, using default route"
            );
            Route::default()
        });

        Self {
            enemies,
            damage,
            composer: WaveComposer::new(config.themes, config.seed),
            route,
            difficulty: config.difficulty,
            phase: WavePhase::Idle,
            wave: WaveId::new(0),
            wave_difficulty: config.difficulty,
            time_scale: 1.0,
            scheduler: SpawnScheduler::default(),
            composition: None,
            units: Vec::new(),
            next_unit: 0,
        }
    }

    /// Starts the next wave; returns `false` while a wave is still in flight.
    ///
    /// A rejected request leaves the runtime untouched apart from the
    /// [`Event::WaveStartRejected`] notification.
    pub fn start_next_wave(&mut self, time_scale: f32, out_events: &mut Vec<Event>) -> bool {
        if self.phase != WavePhase::Idle {
            debug!(active_wave = self.wave.get(), "wave start rejected");
            out_events.push(Event::WaveStartRejected {
                active_wave: self.wave,
            });
            return false;
        }

        let wave = self.wave.next();
        let composition = self.composer.compose(wave, self.difficulty, &self.enemies);
        self.scheduler.start(
            composition.len(),
            composition.scaling().spawn_interval_ms(),
        );
        self.wave = wave;
        self.wave_difficulty = self.difficulty;
        self.time_scale = sanitize_time_scale(time_scale);
        self.phase = WavePhase::Spawning;

        info!(
            wave = wave.get(),
            theme = composition.theme(),
            enemies = composition.len(),
            time_scale = self.time_scale,
            "wave started"
        );
        out_events.push(Event::WaveStarted {
            wave,
            theme: composition.theme().to_owned(),
            enemy_count: composition.len() as u32,
            boss_count: composition.boss_count(),
        });
        self.composition = Some(composition);
        true
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });
        let scaled_seconds = dt.as_secs_f32() * self.time_scale;

        self.units.retain(|unit| unit.state != UnitState::Dead);
        self.advance_units(scaled_seconds, out_events);

        let due = self.scheduler.advance(f64::from(scaled_seconds) * 1_000.0);
        for index in due.spawns {
            self.spawn(index, out_events);
        }
        if due.finished && self.phase == WavePhase::Spawning {
            self.phase = WavePhase::AwaitingClear;
            debug!(wave = self.wave.get(), "spawning finished");
            out_events.push(Event::SpawningFinished { wave: self.wave });
        }

        if self.phase == WavePhase::AwaitingClear && self.units.is_empty() {
            self.complete_wave(out_events);
        }
    }

    fn advance_units(&mut self, seconds: f32, out_events: &mut Vec<Event>) {
        let route = &self.route;
        for unit in &mut self.units {
            if unit.advance(seconds, route) {
                out_events.push(Event::EnemyReachedBase {
                    unit: unit.snapshot(route),
                    damage: unit.base_damage,
                });
            }
        }
        self.units.retain(|unit| unit.state != UnitState::Escaped);
    }

    fn spawn(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let Some(composition) = self.composition.as_ref() else {
            return;
        };
        let Some(id) = composition.sequence().get(index) else {
            return;
        };

        let fallback;
        let archetype = match self.enemies.get(id) {
            Some(archetype) => archetype,
            None => {
                fallback = EnemyArchetype::fallback();
                &fallback
            }
        };

        let unit = ActiveUnit::spawn(
            EnemyUnitId::new(self.next_unit),
            archetype,
            composition.scaling(),
        );
        self.next_unit = self.next_unit.wrapping_add(1);
        out_events.push(Event::EnemySpawned {
            unit: unit.snapshot(&self.route),
        });
        self.units.push(unit);
    }

    fn complete_wave(&mut self, out_events: &mut Vec<Event>) {
        let bonus_gold = completion_bonus(self.wave, self.wave_difficulty.reward);
        self.phase = WavePhase::Idle;
        info!(wave = self.wave.get(), bonus_gold, "wave complete");
        out_events.push(Event::WaveComplete {
            next_wave: self.wave.next(),
            bonus_gold,
        });
    }

    fn resolve_hit(
        &mut self,
        id: EnemyUnitId,
        tower: &TowerKindId,
        base_damage: u32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(unit) = self
            .units
            .iter_mut()
            .find(|unit| unit.id == id && unit.is_alive())
        else {
            return;
        };

        let amount = self.damage.effective_damage(base_damage, tower, unit.tags());
        let killed = unit.take_damage(amount);
        out_events.push(Event::EnemyDamaged {
            unit: id,
            amount,
            remaining: unit.health,
        });
        if killed {
            out_events.push(Event::EnemyDefeated {
                unit: id,
                reward: unit.reward,
            });
        }
    }

    fn report_death(&mut self, id: EnemyUnitId, out_events: &mut Vec<Event>) {
        if let Some(unit) = self.units.iter_mut().find(|unit| unit.id == id) {
            if unit.kill() {
                out_events.push(Event::EnemyDefeated {
                    unit: id,
                    reward: unit.reward,
                });
            }
        }
    }

    fn clear(&mut self) {
        self.scheduler.cancel();
        self.units.clear();
        self.phase = WavePhase::Idle;
        debug!(wave = self.wave.get(), "runtime cleared");
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureRoute { waypoints } => match Route::new(&waypoints) {
            Some(route) => world.route = route,
            None => warn!(
                waypoints = waypoints.len(),
                "ignoring route with fewer than two usable waypoints"
            ),
        },
        Command::SetDifficulty { difficulty } => world.difficulty = difficulty,
        Command::StartNextWave { time_scale } => {
            let _ = world.start_next_wave(time_scale, out_events);
        }
        Command::SetTimeScale { time_scale } => world.time_scale = sanitize_time_scale(time_scale),
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::PauseSpawning => world.scheduler.pause(),
        Command::ResumeSpawning => world.scheduler.resume(),
        Command::ResolveHit {
            unit,
            tower,
            base_damage,
        } => world.resolve_hit(unit, &tower, base_damage, out_events),
        Command::ReportEnemyDied { unit } => world.report_death(unit, out_events),
        Command::Clear => world.clear(),
    }
}

fn sanitize_time_scale(time_scale: f32) -> f32 {
    if time_scale.is_finite() && time_scale > 0.0 {
        time_scale
    } else {
        1.0
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use path_defence_core::{DifficultyMultipliers, EnemySnapshot, EnemyUnitId, WaveId};
    use path_defence_roster::EnemyCatalog;
    use path_defence_system_damage_model::DamageModel;
    use path_defence_system_wave_composition::WaveComposition;

    use super::{Route, WavePhase, World};

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> WavePhase {
        world.phase
    }

    /// Number of the wave in flight, or of the last wave when idle.
    #[must_use]
    pub fn current_wave(world: &World) -> WaveId {
        world.wave
    }

    /// Snapshots of every unit on the route, in spawn order.
    #[must_use]
    pub fn active_units(world: &World) -> Vec<EnemySnapshot> {
        world
            .units
            .iter()
            .map(|unit| unit.snapshot(&world.route))
            .collect()
    }

    /// Snapshot of a single unit still tracked by the runtime.
    #[must_use]
    pub fn unit(world: &World, id: EnemyUnitId) -> Option<EnemySnapshot> {
        world
            .units
            .iter()
            .find(|unit| unit.id == id)
            .map(|unit| unit.snapshot(&world.route))
    }

    /// Spawns of the current wave still waiting for their timer.
    #[must_use]
    pub fn pending_spawns(world: &World) -> usize {
        world.scheduler.pending()
    }

    /// Reports whether spawn timers are frozen.
    #[must_use]
    pub fn spawning_paused(world: &World) -> bool {
        world.scheduler.is_paused()
    }

    /// Game time elapsed on the current wave's spawn clock.
    #[must_use]
    pub fn wave_clock(world: &World) -> Duration {
        Duration::from_secs_f64(world.scheduler.clock_ms().max(0.0) / 1_000.0)
    }

    /// Game speed factor applied to timers and movement.
    #[must_use]
    pub fn time_scale(world: &World) -> f32 {
        world.time_scale
    }

    /// Difficulty bundle applied to the next wave.
    #[must_use]
    pub fn difficulty(world: &World) -> DifficultyMultipliers {
        world.difficulty
    }

    /// Composition of the most recently started wave.
    #[must_use]
    pub fn composition(world: &World) -> Option<&WaveComposition> {
        world.composition.as_ref()
    }

    /// Route enemies follow.
    #[must_use]
    pub fn route(world: &World) -> &Route {
        &world.route
    }

    /// Enemy archetypes the runtime spawns from.
    #[must_use]
    pub fn enemies(world: &World) -> &EnemyCatalog {
        &world.enemies
    }

    /// Damage model used to resolve hits.
    #[must_use]
    pub fn damage_model(world: &World) -> &DamageModel {
        &world.damage
    }
}
