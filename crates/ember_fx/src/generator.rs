//! # Effect Generator
//!
//! The single initializer behind every built-in effect. It is always built
//! from a config string, even on the sending side, so both ends of a
//! network link see the same rounded parameters.

use std::ops::RangeInclusive;

use glam::Vec3;
use rand::Rng;

use crate::config::{encode, EffectParams, ParamKey};
use crate::descriptor::{EffectDescriptor, EffectKind, SizeModel, VelocityModel};
use crate::particle::Particle;
use crate::system::{ParticleInit, IDENTITY_SEPARATOR};

/// Initializes particles for one effect kind from decoded parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectGenerator {
    kind: EffectKind,
    /// Parameters exactly as decoded from the config string.
    params: EffectParams,
    /// Direction after the kind's normalization policy.
    direction: Vec3,
    /// Resolved size for [`SizeModel::Param`] kinds.
    size: f32,
}

impl EffectGenerator {
    /// Builds a generator by decoding `config` with `kind`'s table.
    #[must_use]
    pub fn from_config(kind: EffectKind, config: &str) -> Self {
        let desc = kind.descriptor();
        let params = EffectParams::decode(desc.params, config);
        let direction = desc.scale_direction(params.direction);
        if !direction.is_finite() {
            tracing::warn!(
                "{} effect got degenerate direction ({:.3}, {:.3}, {:.3}); normalization is unguarded",
                kind,
                params.direction.x,
                params.direction.y,
                params.direction.z
            );
        }
        let size = params
            .size
            .or_else(|| desc.default_for(ParamKey::Size))
            .unwrap_or(1.0);

        Self {
            kind,
            params,
            direction,
            size,
        }
    }

    /// Builds a generator from raw parameters.
    ///
    /// The parameters are encoded and decoded once, so the result is
    /// identical to what a receiver rebuilds from [`Self::identity`].
    #[must_use]
    pub fn new(kind: EffectKind, params: &EffectParams) -> Self {
        Self::from_config(kind, &encode(kind.descriptor().params, params))
    }

    /// The effect kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        self.kind
    }

    /// The kind's designer data.
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &'static EffectDescriptor {
        self.kind.descriptor()
    }

    /// Decoded parameters.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> &EffectParams {
        &self.params
    }

    /// Direction after normalization.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Resolved size parameter.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Canonical config string for these parameters.
    #[must_use]
    pub fn config(&self) -> String {
        encode(self.descriptor().params, &self.params)
    }

    /// `<tag>|<config>`.
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{}{}{}", self.kind.tag(), IDENTITY_SEPARATOR, self.config())
    }
}

impl ParticleInit for EffectGenerator {
    fn init_particle<R: Rng + ?Sized>(&self, particle: &mut Particle, origin: Vec3, rng: &mut R) {
        let desc = self.descriptor();

        let mut position = origin + sample_box(desc.spawn_extents, rng);
        if desc.direction_offset != 0.0 {
            position += self.direction * desc.direction_offset;
        }

        let velocity = match desc.velocity {
            VelocityModel::Normalized { speed } => {
                (self.direction + sample_box(desc.jitter, rng)).normalize_or_zero() * speed
            }
            VelocityModel::Raw => self.direction + sample_box(desc.jitter, rng),
            VelocityModel::Stationary => Vec3::ZERO,
        };

        let start_size = match &desc.size {
            SizeModel::Param => self.size,
            SizeModel::Range(range) => sample(range, rng),
        };
        let start_alpha = sample(&desc.alpha, rng);
        let lifetime = sample(&desc.lifetime, rng);

        *particle = Particle {
            position,
            velocity,
            color: Vec3::ONE,
            size: start_size,
            start_size,
            alpha: start_alpha,
            start_alpha,
            lifetime,
            total_lifetime: lifetime,
            respawn: desc.respawn,
            alive: true,
        };
    }
}

/// Uniform sample in a closed range; degenerate ranges return their start.
fn sample<R: Rng + ?Sized>(range: &RangeInclusive<f32>, rng: &mut R) -> f32 {
    let (lo, hi) = (*range.start(), *range.end());
    if lo >= hi {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Uniform sample in the box `[-half, half]`.
fn sample_box<R: Rng + ?Sized>(half: Vec3, rng: &mut R) -> Vec3 {
    Vec3::new(
        sample(&(-half.x..=half.x), rng),
        sample(&(-half.y..=half.y), rng),
        sample(&(-half.z..=half.z), rng),
    )
}
