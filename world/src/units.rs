use path_defence_core::{ArchetypeId, CategoryTag, EnemySnapshot, EnemyUnitId, UnitState};
use path_defence_roster::EnemyArchetype;
use path_defence_system_wave_composition::WaveScaling;

use crate::route::Route;

/// Enemy walking the route.
#[derive(Clone, Debug)]
pub(crate) struct ActiveUnit {
    pub(crate) id: EnemyUnitId,
    archetype: ArchetypeId,
    tags: Vec<CategoryTag>,
    max_health: u32,
    pub(crate) health: u32,
    speed: f32,
    pub(crate) reward: u32,
    pub(crate) base_damage: u32,
    distance: f32,
    pub(crate) state: UnitState,
}

impl ActiveUnit {
    /// Instantiates `archetype` with the wave's scaling applied.
    ///
    /// Health never drops below one.
    pub(crate) fn spawn(
        id: EnemyUnitId,
        archetype: &EnemyArchetype,
        scaling: &WaveScaling,
    ) -> Self {
        let stats = archetype.stats();
        let health = round_to_u32(f64::from(stats.health) * scaling.health()).max(1);
        let speed = (f64::from(stats.speed) * scaling.speed()) as f32;
        let speed = if speed.is_finite() {
            speed.max(0.0)
        } else {
            0.0
        };

        Self {
            id,
            archetype: archetype.id().clone(),
            tags: archetype.tags().to_vec(),
            max_health: health,
            health,
            speed,
            reward: round_to_u32(f64::from(stats.reward) * scaling.reward()),
            base_damage: stats.damage,
            distance: 0.0,
            state: UnitState::Alive,
        }
    }

    pub(crate) fn tags(&self) -> &[CategoryTag] {
        &self.tags
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.state == UnitState::Alive
    }

    /// Walks the unit forward; reports whether it reached the end of the route.
    pub(crate) fn advance(&mut self, seconds: f32, route: &Route) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.distance += self.speed * seconds;
        if self.distance >= route.length() {
            self.distance = route.length();
            self.state = UnitState::Escaped;
            return true;
        }
        false
    }

    /// Applies `amount` damage; reports whether the hit killed the unit.
    pub(crate) fn take_damage(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.state = UnitState::Dead;
            return true;
        }
        false
    }

    /// Marks the unit dead; reports whether it was alive before.
    pub(crate) fn kill(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = 0;
        self.state = UnitState::Dead;
        true
    }

    pub(crate) fn snapshot(&self, route: &Route) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            archetype: self.archetype.clone(),
            tags: self.tags.clone(),
            max_health: self.max_health,
            health: self.health,
            speed: self.speed,
            reward: self.reward,
            base_damage: self.base_damage,
            distance: self.distance,
            position: route.point_at(self.distance),
            state: self.state,
        }
    }
}

fn round_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.round() as u32
    }
}
