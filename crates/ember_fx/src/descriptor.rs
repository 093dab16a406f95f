//! # Effect Descriptors
//!
//! Every built-in effect is one row of designer data: particle count, spawn
//! geometry, sampling ranges and respawn policy. A single generator
//! ([`crate::EffectGenerator`]) reads the row, so adding an effect means
//! adding a descriptor, not a type.
//!
//! | Effect    | Tag     | Count | Dir. scale | Guard | Respawn |
//! |-----------|---------|-------|------------|-------|---------|
//! | Blood     | `blood` | 8     | 6.0        | yes   | no      |
//! | Dust      | `dust`  | 6     | 12.0       | no    | no      |
//! | Explosion | `expl`  | 1     | 22.0       | no    | no      |
//! | Rocket    | `rock`  | 32    | 5.0        | yes   | yes     |

use std::fmt;
use std::ops::RangeInclusive;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{ParamKey, ParamSpec};

/// Squared direction magnitude at or below which guarded effects skip
/// normalization.
pub const DIRECTION_GUARD_SQ: f32 = 0.1;

/// The built-in effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Blood spatter.
    Blood,
    /// Dust puff.
    Dust,
    /// Stationary explosion flash.
    Explosion,
    /// Continuous rocket trail.
    Rocket,
}

impl EffectKind {
    /// All kinds, in tag order.
    pub const ALL: [Self; 4] = [Self::Blood, Self::Dust, Self::Explosion, Self::Rocket];

    /// Tag used in effect identities (`<tag>|<config>`).
    #[inline]
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Blood => "blood",
            Self::Dust => "dust",
            Self::Explosion => "expl",
            Self::Rocket => "rock",
        }
    }

    /// Texture file stem under the FX directory.
    #[inline]
    #[must_use]
    pub const fn texture_name(self) -> &'static str {
        self.tag()
    }

    /// Parses a tag back into a kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// The designer data for this kind.
    #[inline]
    #[must_use]
    pub fn descriptor(self) -> &'static EffectDescriptor {
        match self {
            Self::Blood => &BLOOD,
            Self::Dust => &DUST,
            Self::Explosion => &EXPLOSION,
            Self::Rocket => &ROCKET,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How a particle's start size is chosen.
#[derive(Clone, Debug, PartialEq)]
pub enum SizeModel {
    /// The decoded `size` parameter.
    Param,
    /// Uniform sample in the range.
    Range(RangeInclusive<f32>),
}

/// How a particle's velocity is derived from the effect direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VelocityModel {
    /// `normalize(direction + jitter) * speed`.
    Normalized {
        /// Final speed in world units per second.
        speed: f32,
    },
    /// `direction + jitter`, unnormalized.
    Raw,
    /// Zero; the particle fades in place.
    Stationary,
}

/// Phase offsets applied to initial lifetimes so a trail is continuous
/// from the first frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailStagger {
    /// Lifetime spread across the whole particle set.
    pub span: f32,
    /// Lifetime of particle 0.
    pub base: f32,
}

impl TrailStagger {
    /// Initial lifetime of particle `index` out of `count`.
    #[inline]
    #[must_use]
    pub fn initial_lifetime(&self, index: usize, count: usize) -> f32 {
        index as f32 / count as f32 * self.span + self.base
    }
}

/// Designer data for one effect kind.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectDescriptor {
    /// Fixed number of particles.
    pub particle_count: usize,
    /// Config keys, defaults and precisions.
    pub params: &'static [ParamSpec],
    /// Length the direction is normalized to.
    pub direction_scale: f32,
    /// Skip normalization for near-zero directions.
    pub zero_guard: bool,
    /// Half-extents of the random spawn box around the owner.
    pub spawn_extents: Vec3,
    /// Fraction of the scaled direction added to the spawn position.
    pub direction_offset: f32,
    /// Half-extents of the random jitter added to the direction.
    pub jitter: Vec3,
    /// Start alpha range.
    pub alpha: RangeInclusive<f32>,
    /// Lifetime range in seconds, used for every (re)spawn.
    pub lifetime: RangeInclusive<f32>,
    /// Start size model.
    pub size: SizeModel,
    /// Velocity model.
    pub velocity: VelocityModel,
    /// Reinitialize expired particles in place.
    pub respawn: bool,
    /// Construction-time lifetime staggering.
    pub stagger: Option<TrailStagger>,
}

impl EffectDescriptor {
    /// Default for `key`, if this effect encodes it.
    #[must_use]
    pub fn default_for(&self, key: ParamKey) -> Option<f32> {
        self.params.iter().find(|spec| spec.key == key).map(|spec| spec.default)
    }

    /// Applies this effect's normalization policy to a raw direction.
    ///
    /// Guarded effects leave directions with `|d|² <= 0.1` untouched.
    /// Unguarded effects always normalize; a zero direction then yields NaN.
    #[must_use]
    pub fn scale_direction(&self, direction: Vec3) -> Vec3 {
        if self.zero_guard && direction.length_squared() <= DIRECTION_GUARD_SQ {
            return direction;
        }
        direction.normalize() * self.direction_scale
    }
}

const BLOOD_PARAMS: [ParamSpec; 4] = [
    ParamSpec::new(ParamKey::Dx, 0.0, 3),
    ParamSpec::new(ParamKey::Dy, 0.0, 3),
    ParamSpec::new(ParamKey::Dz, -1.0, 3),
    ParamSpec::new(ParamKey::Size, 4.8, 2),
];

const DUST_PARAMS: [ParamSpec; 4] = [
    ParamSpec::new(ParamKey::Dx, 0.0, 3),
    ParamSpec::new(ParamKey::Dy, 0.0, 3),
    ParamSpec::new(ParamKey::Dz, -1.0, 3),
    ParamSpec::new(ParamKey::Size, 2.4, 2),
];

const EXPLOSION_PARAMS: [ParamSpec; 4] = [
    ParamSpec::new(ParamKey::Dx, 0.0, 3),
    ParamSpec::new(ParamKey::Dy, 0.0, 3),
    ParamSpec::new(ParamKey::Dz, -1.0, 3),
    ParamSpec::new(ParamKey::Size, 8.0, 2),
];

const ROCKET_PARAMS: [ParamSpec; 3] = [
    ParamSpec::new(ParamKey::Dx, 0.0, 4),
    ParamSpec::new(ParamKey::Dy, 0.0, 4),
    ParamSpec::new(ParamKey::Dz, -1.0, 4),
];

static BLOOD: EffectDescriptor = EffectDescriptor {
    particle_count: 8,
    params: &BLOOD_PARAMS,
    direction_scale: 6.0,
    zero_guard: true,
    spawn_extents: Vec3::new(0.8, 0.4, 0.8),
    direction_offset: 0.5,
    jitter: Vec3::new(2.0, 2.0, 2.0),
    alpha: 0.2..=0.6,
    lifetime: 0.4..=0.8,
    size: SizeModel::Param,
    velocity: VelocityModel::Normalized { speed: 10.0 },
    respawn: false,
    stagger: None,
};

static DUST: EffectDescriptor = EffectDescriptor {
    particle_count: 6,
    params: &DUST_PARAMS,
    direction_scale: 12.0,
    zero_guard: false,
    spawn_extents: Vec3::new(0.05, 0.05, 0.05),
    direction_offset: 0.0,
    // wider on the vertical axis
    jitter: Vec3::new(3.0, 3.0, 6.0),
    alpha: 1.0..=1.0,
    lifetime: 0.3..=0.6,
    size: SizeModel::Param,
    velocity: VelocityModel::Normalized { speed: 10.0 },
    respawn: false,
    stagger: None,
};

static EXPLOSION: EffectDescriptor = EffectDescriptor {
    particle_count: 1,
    params: &EXPLOSION_PARAMS,
    direction_scale: 22.0,
    zero_guard: false,
    spawn_extents: Vec3::ZERO,
    direction_offset: 0.0,
    jitter: Vec3::ZERO,
    alpha: 0.6..=0.6,
    lifetime: 0.1..=0.3,
    size: SizeModel::Param,
    velocity: VelocityModel::Stationary,
    respawn: false,
    stagger: None,
};

static ROCKET: EffectDescriptor = EffectDescriptor {
    particle_count: 32,
    params: &ROCKET_PARAMS,
    direction_scale: 5.0,
    zero_guard: true,
    spawn_extents: Vec3::new(0.3, 0.1, 0.3),
    direction_offset: 0.0,
    jitter: Vec3::new(1.0, 1.0, 1.0),
    alpha: 0.1..=0.5,
    lifetime: 0.4..=2.0,
    size: SizeModel::Range(0.9..=4.9),
    velocity: VelocityModel::Raw,
    respawn: true,
    stagger: Some(TrailStagger {
        span: 1.5,
        base: 0.1,
    }),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for kind in EffectKind::ALL {
            assert_eq!(EffectKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(EffectKind::from_tag("smoke"), None);
    }

    #[test]
    fn test_particle_counts() {
        assert_eq!(EffectKind::Blood.descriptor().particle_count, 8);
        assert_eq!(EffectKind::Dust.descriptor().particle_count, 6);
        assert_eq!(EffectKind::Explosion.descriptor().particle_count, 1);
        assert_eq!(EffectKind::Rocket.descriptor().particle_count, 32);
    }

    #[test]
    fn test_param_sized_kinds_have_size_row() {
        for kind in EffectKind::ALL {
            let desc = kind.descriptor();
            if desc.size == SizeModel::Param {
                assert!(desc.default_for(ParamKey::Size).is_some(), "{kind}");
            }
        }
    }

    #[test]
    fn test_guard_leaves_small_direction() {
        let desc = EffectKind::Blood.descriptor();
        let small = Vec3::new(0.1, 0.1, 0.1);
        assert_eq!(desc.scale_direction(small), small);
    }

    #[test]
    fn test_guarded_scale() {
        let desc = EffectKind::Rocket.descriptor();
        let scaled = desc.scale_direction(Vec3::new(3.0, 0.0, 4.0));
        assert!((scaled.length() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_unguarded_zero_direction_is_nan() {
        let desc = EffectKind::Dust.descriptor();
        assert!(desc.scale_direction(Vec3::ZERO).x.is_nan());
    }

    #[test]
    fn test_stagger() {
        let stagger = TrailStagger { span: 1.5, base: 0.1 };
        assert!((stagger.initial_lifetime(0, 32) - 0.1).abs() < 1e-6);
        assert!((stagger.initial_lifetime(16, 32) - 0.85).abs() < 1e-6);
    }
}
