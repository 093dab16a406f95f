//! # Effects Frame Driver
//!
//! ```text
//! Frame N:
//! 1. ADVANCE   level clock += dt
//! 2. REMOVE    objects whose deadline has passed (ObjectRemoved events)
//! 3. TICK      remaining objects, registration order
//! 4. MEASURE   live objects, live particles, update time
//! ```
//!
//! Spawning happens between ticks through [`FxLoop::parts_mut`].

use std::time::{Duration, Instant};

use ember_world::World;

use crate::events::{EventBus, EventReceiver, FxEvent, DEFAULT_EVENT_CAPACITY};
use crate::settings::EffectSettings;
use crate::spawner::Spawner;

/// Update budget for one effects tick.
pub const UPDATE_BUDGET: Duration = Duration::from_micros(UPDATE_BUDGET_US);

/// [`UPDATE_BUDGET`] in microseconds.
pub const UPDATE_BUDGET_US: u64 = 2_000;

/// Statistics for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Level time after the tick (ms).
    pub level_time_ms: u64,
    /// Objects alive after the tick.
    pub live_objects: usize,
    /// Live particles across every effect.
    pub live_particles: usize,
    /// Objects destroyed this tick.
    pub removed: usize,
    /// Wall time spent in the tick (µs).
    pub update_us: u64,
}

/// Owns the world, the spawner and the event bus.
pub struct FxLoop {
    world: World,
    spawner: Spawner,
    bus: EventBus,
    frame: u64,
    stats: FrameStatsAccumulator,
}

impl FxLoop {
    /// Creates a loop from settings. A configured seed makes the world's
    /// random source reproducible.
    #[must_use]
    pub fn new(settings: EffectSettings) -> Self {
        Self::with_capacity(settings, DEFAULT_EVENT_CAPACITY)
    }

    /// Creates a loop whose event channel holds `event_capacity` events.
    #[must_use]
    pub fn with_capacity(settings: EffectSettings, event_capacity: usize) -> Self {
        let world = settings.seed.map_or_else(World::new, World::with_seed);
        let bus = EventBus::new(event_capacity);
        let spawner = Spawner::new(settings, bus.sender());
        Self {
            world,
            spawner,
            bus,
            frame: 0,
            stats: FrameStatsAccumulator::new(),
        }
    }

    /// The world.
    #[inline]
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The spawner.
    #[inline]
    #[must_use]
    pub const fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Mutable world and spawner together, for spawning between ticks.
    #[inline]
    pub fn parts_mut(&mut self) -> (&mut World, &mut Spawner) {
        (&mut self.world, &mut self.spawner)
    }

    /// A receiver for this loop's events.
    #[must_use]
    pub fn events(&self) -> EventReceiver {
        self.bus.receiver()
    }

    /// Frames ticked so far.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Accumulated statistics.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// Advances everything by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: u64) -> FrameStats {
        let start = Instant::now();

        let removed = self.world.advance(dt_ms);
        for &id in &removed {
            self.spawner.publish(FxEvent::ObjectRemoved { id });
        }

        let live_particles = self
            .world
            .iter()
            .filter_map(|object| object.particles())
            .map(|system| system.live_count())
            .sum();

        #[allow(clippy::cast_possible_truncation)]
        let update_us = start.elapsed().as_micros() as u64;
        let stats = FrameStats {
            frame: self.frame,
            level_time_ms: self.world.level_time(),
            live_objects: self.world.len(),
            live_particles,
            removed: removed.len(),
            update_us,
        };

        if update_us > UPDATE_BUDGET_US {
            tracing::warn!(
                "Effects frame {} exceeded budget: {}us with {} objects",
                self.frame,
                update_us,
                stats.live_objects
            );
        }

        self.frame += 1;
        self.stats.record(stats);
        stats
    }
}

/// Aggregate of [`FrameStats`] over many ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStatsAccumulator {
    /// Frames recorded.
    pub frames_recorded: u64,
    /// Sum of update times (µs).
    pub update_us_sum: u64,
    /// Fastest update (µs).
    pub min_update_us: u64,
    /// Slowest update (µs).
    pub max_update_us: u64,
    /// Updates that exceeded [`UPDATE_BUDGET`].
    pub frames_over_budget: u64,
    /// Most objects alive at once.
    pub peak_objects: usize,
    /// Most particles alive at once.
    pub peak_particles: usize,
    /// Objects destroyed over all frames.
    pub total_removed: u64,
}

impl FrameStatsAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames_recorded: 0,
            update_us_sum: 0,
            min_update_us: u64::MAX,
            max_update_us: 0,
            frames_over_budget: 0,
            peak_objects: 0,
            peak_particles: 0,
            total_removed: 0,
        }
    }

    /// Records one frame.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.update_us_sum += stats.update_us;
        self.min_update_us = self.min_update_us.min(stats.update_us);
        self.max_update_us = self.max_update_us.max(stats.update_us);
        self.peak_objects = self.peak_objects.max(stats.live_objects);
        self.peak_particles = self.peak_particles.max(stats.live_particles);
        self.total_removed += stats.removed as u64;

        if stats.update_us > UPDATE_BUDGET_US {
            self.frames_over_budget += 1;
        }
    }

    /// Average update time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_update_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.update_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Fraction of frames over budget.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Logs a one-line summary.
    pub fn log_summary(&self) {
        tracing::info!(
            "Effects: {} frames, avg {:.3}ms, max {}us, {:.1}% over budget, peak {} objects / {} particles, {} removed",
            self.frames_recorded,
            self.avg_update_ms(),
            self.max_update_us,
            self.over_budget_ratio() * 100.0,
            self.peak_objects,
            self.peak_particles,
            self.total_removed
        );
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn seeded() -> FxLoop {
        FxLoop::new(EffectSettings {
            seed: Some(9),
            ..EffectSettings::default()
        })
    }

    #[test]
    fn test_empty_tick() {
        let mut fx = seeded();
        let stats = fx.tick(16);
        assert_eq!(stats.frame, 0);
        assert_eq!(stats.level_time_ms, 16);
        assert_eq!(stats.live_objects, 0);
        assert_eq!(stats.live_particles, 0);
        assert_eq!(fx.frame_count(), 1);
    }

    #[test]
    fn test_counts_particles() {
        let mut fx = seeded();
        let (world, spawner) = fx.parts_mut();
        spawner.spawn_rocket(world, Vec3::ZERO, Vec3::NEG_Z);
        spawner.spawn_explosion(world, Vec3::ZERO, Vec3::Z, None);

        let stats = fx.tick(16);
        assert_eq!(stats.live_objects, 2);
        assert_eq!(stats.live_particles, 33);
    }

    #[test]
    fn test_removal_publishes_event() {
        let mut fx = seeded();
        let rx = fx.events();
        let (world, spawner) = fx.parts_mut();
        let id = spawner.spawn_rocket(world, Vec3::ZERO, Vec3::NEG_Z);
        rx.drain();

        let mut removed_at = None;
        for _ in 0..40 {
            let stats = fx.tick(16);
            if stats.removed > 0 {
                removed_at = Some(stats.level_time_ms);
                break;
            }
        }
        assert_eq!(removed_at, Some(512));
        assert_eq!(rx.drain(), vec![FxEvent::ObjectRemoved { id }]);
        assert!(fx.world().is_empty());
    }

    #[test]
    fn test_accumulator() {
        let mut acc = FrameStatsAccumulator::new();
        assert_eq!(acc.avg_update_ms(), 0.0);
        acc.record(FrameStats {
            update_us: 1000,
            live_objects: 3,
            live_particles: 40,
            removed: 1,
            ..FrameStats::default()
        });
        acc.record(FrameStats {
            update_us: 3000,
            live_objects: 1,
            live_particles: 8,
            removed: 2,
            ..FrameStats::default()
        });
        assert_eq!(acc.frames_recorded, 2);
        assert!((acc.avg_update_ms() - 2.0).abs() < 1e-9);
        assert_eq!(acc.min_update_us, 1000);
        assert_eq!(acc.max_update_us, 3000);
        assert_eq!(acc.frames_over_budget, 1);
        assert_eq!(acc.peak_objects, 3);
        assert_eq!(acc.peak_particles, 40);
        assert_eq!(acc.total_removed, 3);
        assert!((acc.over_budget_ratio() - 0.5).abs() < 1e-9);
    }
}
