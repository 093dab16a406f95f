//! # Particle System
//!
//! A fixed-length set of particles plus the generator that (re)initializes
//! them. The per-tick contract:
//!
//! 1. Age every live particle by `dt`
//! 2. Expired particles respawn in place or die, per their `respawn` flag
//! 3. Survivors move by `velocity * dt` and fade linearly toward zero
//!
//! A system with no live particles is finished and may be dropped by its
//! owner. Trail systems respawn forever and never finish on their own.

use glam::Vec3;
use rand::Rng;

use crate::config::EffectParams;
use crate::descriptor::EffectKind;
use crate::error::{FxError, FxResult};
use crate::generator::EffectGenerator;
use crate::particle::Particle;
use crate::texture::TextureHandle;

/// Separator between tag and config string in an effect identity.
pub const IDENTITY_SEPARATOR: char = '|';

/// Fills one particle's complete initial state.
pub trait ParticleInit {
    /// Initializes `particle` around `origin`, sampling from `rng`.
    fn init_particle<R: Rng + ?Sized>(&self, particle: &mut Particle, origin: Vec3, rng: &mut R);
}

/// Owns a fixed set of particles and advances them in time.
#[derive(Clone, Debug)]
pub struct ParticleSystem<G: ParticleInit = EffectGenerator> {
    generator: G,
    particles: Vec<Particle>,
    texture: TextureHandle,
}

impl<G: ParticleInit> ParticleSystem<G> {
    /// Creates a system of `count` particles, all initialized by `generator`.
    pub fn with_generator<R: Rng + ?Sized>(
        generator: G,
        count: usize,
        origin: Vec3,
        texture: TextureHandle,
        rng: &mut R,
    ) -> Self {
        let mut particles = vec![Particle::dead(); count];
        for particle in &mut particles {
            generator.init_particle(particle, origin, rng);
        }
        Self {
            generator,
            particles,
            texture,
        }
    }

    /// Advances every particle by `dt` seconds.
    ///
    /// `origin` is the owner's current position, used for respawns.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, origin: Vec3, rng: &mut R) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }

            particle.lifetime -= dt;
            if particle.lifetime <= 0.0 {
                if particle.respawn {
                    self.generator.init_particle(particle, origin, rng);
                } else {
                    particle.kill();
                }
                continue;
            }

            particle.position += particle.velocity * dt;
            particle.apply_fade();
        }
    }

    /// All particle records, live and dead, in construction order.
    #[inline]
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    /// True when no particle is alive.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.particles.iter().any(|p| p.alive)
    }

    /// The texture this system is drawn with.
    #[inline]
    #[must_use]
    pub const fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// The particle initializer.
    #[inline]
    #[must_use]
    pub const fn generator(&self) -> &G {
        &self.generator
    }
}

impl ParticleSystem<EffectGenerator> {
    /// Builds the effect `kind` from raw parameters.
    pub fn spawn<R: Rng + ?Sized>(
        kind: EffectKind,
        params: &EffectParams,
        origin: Vec3,
        texture: TextureHandle,
        rng: &mut R,
    ) -> Self {
        Self::from_generator(EffectGenerator::new(kind, params), origin, texture, rng)
    }

    /// Builds the effect `kind` by decoding `config`.
    pub fn from_config<R: Rng + ?Sized>(
        kind: EffectKind,
        config: &str,
        origin: Vec3,
        texture: TextureHandle,
        rng: &mut R,
    ) -> Self {
        Self::from_generator(EffectGenerator::from_config(kind, config), origin, texture, rng)
    }

    /// Rebuilds an effect from a `<tag>|<config>` identity.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::MissingSeparator`] if there is no `|`, and
    /// [`FxError::UnknownTag`] if the tag names no effect kind. The config
    /// part itself never fails to decode.
    pub fn from_identity<R: Rng + ?Sized>(
        identity: &str,
        origin: Vec3,
        texture: TextureHandle,
        rng: &mut R,
    ) -> FxResult<Self> {
        let (kind, config) = parse_identity(identity)?;
        Ok(Self::from_config(kind, config, origin, texture, rng))
    }

    fn from_generator<R: Rng + ?Sized>(
        generator: EffectGenerator,
        origin: Vec3,
        texture: TextureHandle,
        rng: &mut R,
    ) -> Self {
        let desc = generator.descriptor();
        let count = desc.particle_count;
        let stagger = desc.stagger;
        let mut system = Self::with_generator(generator, count, origin, texture, rng);

        // Phase-offset the trail so it is continuous from the first frame.
        // Respawns draw from the regular lifetime range.
        if let Some(stagger) = stagger {
            for (i, particle) in system.particles.iter_mut().enumerate() {
                let lifetime = stagger.initial_lifetime(i, count);
                particle.lifetime = lifetime;
                particle.total_lifetime = lifetime;
                particle.apply_fade();
            }
        }
        system
    }

    /// The effect kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        self.generator.kind()
    }

    /// Decoded parameters.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> &EffectParams {
        self.generator.params()
    }

    /// `<tag>|<config>`, enough to rebuild this effect elsewhere.
    #[must_use]
    pub fn identity(&self) -> String {
        self.generator.identity()
    }
}

/// Splits an identity into its kind and config string.
///
/// # Errors
///
/// See [`ParticleSystem::from_identity`].
pub fn parse_identity(identity: &str) -> FxResult<(EffectKind, &str)> {
    let (tag, config) = identity
        .split_once(IDENTITY_SEPARATOR)
        .ok_or_else(|| FxError::MissingSeparator(identity.to_owned()))?;
    let kind = EffectKind::from_tag(tag).ok_or_else(|| FxError::UnknownTag(tag.to_owned()))?;
    Ok((kind, config))
}
