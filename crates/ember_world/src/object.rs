//! # Game Objects
//!
//! The world's unit of ownership. A transient effect object is just a game
//! object with zero radius, `NO_GRAVITY`, and an attached particle system or
//! sound.

use bitflags::bitflags;
use ember_fx::ParticleSystem;
use glam::Vec3;
use rand::Rng;

use crate::id::ObjectId;

/// Health every object starts with.
pub const DEFAULT_HEALTH: i32 = 100;

bitflags! {
    /// Physics and visibility flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u32 {
        /// Not affected by gravity.
        const NO_GRAVITY = 1;
        /// Neither collides nor renders.
        const GHOST = 1 << 1;
    }
}

/// Audio resource carried by a sound-emitter object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundEmitter {
    /// Resource path of the sound, resolved by the audio system.
    pub resource_path: String,
}

/// What an object hosts.
#[derive(Clone, Debug, Default)]
pub enum Attachment {
    /// Nothing.
    #[default]
    None,
    /// A particle effect, ticked with the object.
    Particles(ParticleSystem),
    /// A sound emitter.
    Sound(SoundEmitter),
}

/// An object registered (or about to be registered) with the world.
#[derive(Clone, Debug)]
pub struct GameObject {
    id: ObjectId,
    /// World-space position.
    pub position: Vec3,
    /// Collision radius; zero for transient objects.
    pub radius: f32,
    /// Physics and visibility flags.
    pub flags: ObjectFlags,
    health: i32,
    attachment: Attachment,
    remove_at: Option<u64>,
}

impl GameObject {
    /// Creates an object at `position` with default health and no flags.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            id: ObjectId::NULL,
            position,
            radius: 0.5,
            flags: ObjectFlags::empty(),
            health: DEFAULT_HEALTH,
            attachment: Attachment::None,
            remove_at: None,
        }
    }

    /// A zero-radius, gravity-free object at `position`.
    #[must_use]
    pub fn transient(position: Vec3) -> Self {
        Self::new(position)
            .with_radius(0.0)
            .with_flags(ObjectFlags::NO_GRAVITY)
    }

    /// Sets the collision radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Adds flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Sets starting health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Attaches a particle system.
    #[must_use]
    pub fn with_particles(mut self, system: ParticleSystem) -> Self {
        self.attachment = Attachment::Particles(system);
        self
    }

    /// Attaches a sound emitter.
    #[must_use]
    pub fn with_sound(mut self, resource_path: impl Into<String>) -> Self {
        self.attachment = Attachment::Sound(SoundEmitter {
            resource_path: resource_path.into(),
        });
        self
    }

    /// World-assigned ID; [`ObjectId::NULL`] until registered.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    /// Current health. May be negative.
    #[inline]
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// True once health has dropped to zero or below.
    #[inline]
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Level time (ms) at which the world destroys this object.
    #[inline]
    #[must_use]
    pub const fn remove_at(&self) -> Option<u64> {
        self.remove_at
    }

    /// Sets the removal deadline. An existing earlier deadline wins, so a
    /// scheduled removal can never be postponed or cancelled.
    pub(crate) fn schedule_removal(&mut self, deadline: u64) {
        self.remove_at = Some(self.remove_at.map_or(deadline, |t| t.min(deadline)));
    }

    /// What this object hosts.
    #[inline]
    #[must_use]
    pub const fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    /// The attached particle system, if any.
    #[must_use]
    pub fn particles(&self) -> Option<&ParticleSystem> {
        match &self.attachment {
            Attachment::Particles(system) => Some(system),
            _ => None,
        }
    }

    /// The attached sound, if any.
    #[must_use]
    pub fn sound(&self) -> Option<&SoundEmitter> {
        match &self.attachment {
            Attachment::Sound(sound) => Some(sound),
            _ => None,
        }
    }

    /// Applies damage and reports whether this hit killed the object.
    ///
    /// The kill is reported only on the transition from positive health to
    /// zero or below; hitting a dead object never reports a second kill.
    /// Health is reduced unconditionally and may go negative; it saturates
    /// at the `i32` bounds instead of wrapping. `hitpoint`,
    /// `direction` and `dealer` are carried for callers (blood effects,
    /// kill feeds) and do not affect the result.
    pub fn apply_damage(
        &mut self,
        amount: i32,
        hitpoint: Vec3,
        direction: Vec3,
        dealer: ObjectId,
    ) -> bool {
        let remaining = self.health.saturating_sub(amount);
        let killed = self.health > 0 && remaining <= 0;
        self.health = remaining;

        if killed {
            tracing::debug!(
                "Object {:?} killed by {:?} at ({:.1}, {:.1}, {:.1}) heading ({:.2}, {:.2}, {:.2})",
                self.id,
                dealer,
                hitpoint.x,
                hitpoint.y,
                hitpoint.z,
                direction.x,
                direction.y,
                direction.z
            );
        }
        killed
    }

    /// Per-frame update: advances the attached particle system.
    pub fn think<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        if let Attachment::Particles(system) = &mut self.attachment {
            system.update(dt, self.position, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_fx::{EffectKind, EffectParams, TextureHandle};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hit(object: &mut GameObject, amount: i32) -> bool {
        object.apply_damage(amount, Vec3::ZERO, Vec3::X, ObjectId::NULL)
    }

    #[test]
    fn test_lethal_hit() {
        let mut object = GameObject::new(Vec3::ZERO);
        assert!(hit(&mut object, 150));
        assert_eq!(object.health(), -50);
        assert!(object.is_dead());
    }

    #[test]
    fn test_partial_hit() {
        let mut object = GameObject::new(Vec3::ZERO);
        assert!(!hit(&mut object, 50));
        assert_eq!(object.health(), 50);
    }

    #[test]
    fn test_exact_lethal_hit() {
        let mut object = GameObject::new(Vec3::ZERO);
        assert!(hit(&mut object, 100));
        assert_eq!(object.health(), 0);
    }

    #[test]
    fn test_no_second_kill() {
        let mut object = GameObject::new(Vec3::ZERO).with_health(0);
        assert!(!hit(&mut object, 10));
        assert_eq!(object.health(), -10);

        let mut object = GameObject::new(Vec3::ZERO);
        assert!(hit(&mut object, 100));
        assert!(!hit(&mut object, 100));
    }

    #[test]
    fn test_damage_saturates() {
        let mut object = GameObject::new(Vec3::ZERO);
        assert!(hit(&mut object, i32::MAX));
        assert!(!hit(&mut object, i32::MAX));
        assert_eq!(object.health(), i32::MIN);
        assert!(!hit(&mut object, i32::MAX));
        assert_eq!(object.health(), i32::MIN);
        assert!(object.is_dead());
    }

    #[test]
    fn test_transient_defaults() {
        let object = GameObject::transient(Vec3::ONE);
        assert_eq!(object.radius, 0.0);
        assert!(object.flags.contains(ObjectFlags::NO_GRAVITY));
        assert!(!object.flags.contains(ObjectFlags::GHOST));
        assert!(object.id().is_null());
        assert_eq!(object.health(), DEFAULT_HEALTH);
    }

    #[test]
    fn test_removal_cannot_be_postponed() {
        let mut object = GameObject::transient(Vec3::ZERO);
        object.schedule_removal(500);
        object.schedule_removal(900);
        assert_eq!(object.remove_at(), Some(500));
        object.schedule_removal(200);
        assert_eq!(object.remove_at(), Some(200));
    }

    #[test]
    fn test_think_advances_particles() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let system = ParticleSystem::spawn(
            EffectKind::Explosion,
            &EffectParams::new(Vec3::Z),
            Vec3::ZERO,
            TextureHandle::NONE,
            &mut rng,
        );
        let mut object = GameObject::transient(Vec3::ZERO).with_particles(system);
        for _ in 0..30 {
            object.think(1.0 / 60.0, &mut rng);
        }
        assert!(object.particles().is_some_and(ParticleSystem::is_finished));
    }

    #[test]
    fn test_sound_attachment() {
        let object = GameObject::transient(Vec3::ZERO).with_sound("sound/boom.wav");
        assert_eq!(
            object.sound().map(|s| s.resource_path.as_str()),
            Some("sound/boom.wav")
        );
        assert!(object.particles().is_none());
    }
}
