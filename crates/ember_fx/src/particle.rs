//! # Particle Record
//!
//! The per-particle state unit. Start values are kept next to the current
//! values so the fade can be recomputed at any tick from
//! `lifetime / total_lifetime` alone.

use glam::Vec3;

/// A single simulated point-sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// Velocity in world units per second.
    pub velocity: Vec3,
    /// Tint, unit white for every built-in effect.
    pub color: Vec3,
    /// Current size.
    pub size: f32,
    /// Size at (re)spawn.
    pub start_size: f32,
    /// Current alpha.
    pub alpha: f32,
    /// Alpha at (re)spawn.
    pub start_alpha: f32,
    /// Remaining lifetime in seconds.
    pub lifetime: f32,
    /// Lifetime at (re)spawn in seconds.
    pub total_lifetime: f32,
    /// Reinitialize in place on expiry instead of dying.
    pub respawn: bool,
    /// False once a non-respawning particle has expired.
    pub alive: bool,
}

impl Particle {
    /// Creates a dead particle (used for pool initialization).
    #[must_use]
    pub const fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: Vec3::ONE,
            size: 0.0,
            start_size: 0.0,
            alpha: 0.0,
            start_alpha: 0.0,
            lifetime: 0.0,
            total_lifetime: 0.0,
            respawn: false,
            alive: false,
        }
    }

    /// Is this particle alive?
    #[inline]
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Remaining fraction of life in `[0, 1]`; 1 at spawn, 0 at expiry.
    #[inline]
    #[must_use]
    pub fn life_fraction(&self) -> f32 {
        if self.total_lifetime <= 0.0 {
            0.0
        } else {
            (self.lifetime / self.total_lifetime).clamp(0.0, 1.0)
        }
    }

    /// Recomputes `alpha` and `size` from their start values.
    ///
    /// Both fall linearly to zero as the lifetime runs out.
    #[inline]
    pub fn apply_fade(&mut self) {
        let t = self.life_fraction();
        self.alpha = self.start_alpha * t;
        self.size = self.start_size * t;
    }

    /// Marks the particle as permanently dead.
    #[inline]
    pub fn kill(&mut self) {
        self.alive = false;
        self.lifetime = 0.0;
        self.alpha = 0.0;
        self.size = 0.0;
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::dead()
    }
}
