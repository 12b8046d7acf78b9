use std::ops::Range;

use crate::SPAWN_FINISH_DELAY_MS;

/// Virtual timer that releases a wave's spawns on a logical clock.
///
/// Spawn `i` is due at `i * interval`; the finish marker follows the last
/// spawn after [`SPAWN_FINISH_DELAY_MS`]. While paused the clock stands still.
#[derive(Clone, Debug, Default)]
pub(crate) struct SpawnScheduler {
    clock_ms: f64,
    interval_ms: u32,
    total: usize,
    released: usize,
    armed: bool,
    paused: bool,
}

/// Work that became due during a clock advance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DueWork {
    pub(crate) spawns: Range<usize>,
    pub(crate) finished: bool,
}

impl SpawnScheduler {
    /// Arms the timer for `total` spawns. The pause state carries over.
    pub(crate) fn start(&mut self, total: usize, interval_ms: u32) {
        *self = Self {
            interval_ms,
            total,
            armed: true,
            paused: self.paused,
            ..Self::default()
        };
    }

    /// Advances the logical clock and reports everything that fell due.
    pub(crate) fn advance(&mut self, logical_ms: f64) -> DueWork {
        if !self.armed || self.paused {
            return DueWork::default();
        }
        if logical_ms.is_finite() && logical_ms > 0.0 {
            self.clock_ms += logical_ms;
        }

        let first = self.released;
        while self.released < self.total && self.clock_ms >= self.spawn_time(self.released) {
            self.released += 1;
        }

        let finished = self.released == self.total && self.clock_ms >= self.finish_time();
        if finished {
            self.armed = false;
        }

        DueWork {
            spawns: first..self.released,
            finished,
        }
    }

    /// Drops every pending timer and lifts the pause.
    pub(crate) fn cancel(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn pause(&mut self) {
        self.paused = true;
    }

    pub(crate) fn resume(&mut self) {
        self.paused = false;
    }

    pub(crate) const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Spawns still waiting for their timer.
    pub(crate) fn pending(&self) -> usize {
        if self.armed {
            self.total - self.released
        } else {
            0
        }
    }

    /// Logical milliseconds elapsed since the wave started.
    pub(crate) const fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    fn spawn_time(&self, index: usize) -> f64 {
        index as f64 * f64::from(self.interval_ms)
    }

    fn finish_time(&self) -> f64 {
        self.spawn_time(self.total.saturating_sub(1)) + f64::from(SPAWN_FINISH_DELAY_MS)
    }
}
