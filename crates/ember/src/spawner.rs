//! # Transient Spawner
//!
//! One call per effect. Each call:
//! 1. Encodes the parameters and builds the effect from the encoded string
//! 2. Resolves the effect texture through the session cache
//! 3. Wraps the system in a zero-radius, gravity-free object
//! 4. Registers the object and schedules its removal
//! 5. Publishes an [`FxEvent`]
//!
//! Spawning is never idempotent: every call creates a new object.

use ember_fx::{
    parse_identity, texture_path, EffectKind, EffectParams, FxResult, ParticleSystem,
    TextureHandle, TextureResolver,
};
use ember_world::{GameObject, ObjectId, World};
use glam::Vec3;

use crate::events::{EventSender, FxEvent};
use crate::resources::TextureCache;
use crate::settings::EffectSettings;

/// Builds and registers transient effect objects.
pub struct Spawner {
    settings: EffectSettings,
    textures: TextureCache,
    events: EventSender,
}

impl Spawner {
    /// Creates a spawner publishing to `events`.
    #[must_use]
    pub fn new(settings: EffectSettings, events: EventSender) -> Self {
        Self {
            settings,
            textures: TextureCache::new(),
            events,
        }
    }

    /// Active settings.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    /// The session texture cache.
    #[inline]
    #[must_use]
    pub const fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Publishes an event on the spawner's bus.
    pub fn publish(&self, event: FxEvent) -> bool {
        self.events.send(event)
    }

    /// Blood spray at `location`; `direction` defaults to straight down.
    pub fn spawn_blood(
        &mut self,
        world: &mut World,
        location: Vec3,
        direction: Vec3,
        size: Option<f32>,
    ) -> ObjectId {
        let params = EffectParams { direction, size };
        self.spawn_effect(world, EffectKind::Blood, location, &params)
    }

    /// Dust puff at `location`.
    pub fn spawn_dust(
        &mut self,
        world: &mut World,
        location: Vec3,
        direction: Vec3,
        size: Option<f32>,
    ) -> ObjectId {
        let params = EffectParams { direction, size };
        self.spawn_effect(world, EffectKind::Dust, location, &params)
    }

    /// Rocket exhaust trail at `location`; `direction` points backward.
    pub fn spawn_rocket(&mut self, world: &mut World, location: Vec3, direction: Vec3) -> ObjectId {
        self.spawn_effect(world, EffectKind::Rocket, location, &EffectParams::new(direction))
    }

    /// Explosion flash at `location`.
    pub fn spawn_explosion(
        &mut self,
        world: &mut World,
        location: Vec3,
        direction: Vec3,
        size: Option<f32>,
    ) -> ObjectId {
        let params = EffectParams { direction, size };
        self.spawn_effect(world, EffectKind::Explosion, location, &params)
    }

    /// Spawns any effect kind from raw parameters.
    pub fn spawn_effect(
        &mut self,
        world: &mut World,
        kind: EffectKind,
        location: Vec3,
        params: &EffectParams,
    ) -> ObjectId {
        let texture = self.texture(kind);
        let system = ParticleSystem::spawn(kind, params, location, texture, world.rng());
        self.register_effect(world, location, system)
    }

    /// Spawns an effect from a transmitted `<tag>|<config>` identity.
    ///
    /// # Errors
    ///
    /// Fails if the identity has no separator or names an unknown effect.
    /// Nothing is registered in that case.
    pub fn spawn_from_identity(
        &mut self,
        world: &mut World,
        location: Vec3,
        identity: &str,
    ) -> FxResult<ObjectId> {
        let (kind, config) = parse_identity(identity)?;
        let texture = self.texture(kind);
        let system = ParticleSystem::from_config(kind, config, location, texture, world.rng());
        Ok(self.register_effect(world, location, system))
    }

    /// Sound emitter at `location`, removed after `lifetime_ms`.
    ///
    /// The object is a ghost: it neither collides nor renders.
    pub fn spawn_sound(
        &mut self,
        world: &mut World,
        location: Vec3,
        resource_path: &str,
        lifetime_ms: u64,
    ) -> ObjectId {
        let object = GameObject::transient(location).with_sound(resource_path);
        let id = world.add_obj(object, true);
        world.schedule_removal(id, world.level_time().saturating_add(lifetime_ms));

        tracing::debug!(
            "Spawned sound {} as {:?}, removal in {}ms",
            resource_path,
            id,
            lifetime_ms
        );
        self.events.send(FxEvent::SoundSpawned {
            id,
            resource_path: resource_path.to_string(),
            position: location,
        });
        id
    }

    fn texture(&mut self, kind: EffectKind) -> TextureHandle {
        let path = texture_path(&self.settings.fx_directory, kind);
        self.textures.resolve(&path)
    }

    fn register_effect(
        &mut self,
        world: &mut World,
        location: Vec3,
        system: ParticleSystem,
    ) -> ObjectId {
        let kind = system.kind();
        let identity = system.identity();
        let lifetime_ms = self.settings.lifetime_ms(kind);

        let object = GameObject::transient(location).with_particles(system);
        let id = world.add_obj(object, false);
        world.schedule_removal(id, world.level_time().saturating_add(lifetime_ms));

        tracing::debug!("Spawned {} as {:?}, removal in {}ms", identity, id, lifetime_ms);
        self.events.send(FxEvent::EffectSpawned {
            id,
            kind,
            identity,
            position: location,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use ember_world::ObjectFlags;

    fn setup() -> (Spawner, World, crate::events::EventReceiver) {
        let (tx, rx) = EventBus::create_pair(64);
        (Spawner::new(EffectSettings::default(), tx), World::with_seed(11), rx)
    }

    #[test]
    fn test_blood_object_shape() {
        let (mut spawner, mut world, _rx) = setup();
        let id = spawner.spawn_blood(&mut world, Vec3::ONE, Vec3::NEG_Z, None);

        let object = world.get(id).unwrap();
        assert_eq!(object.radius, 0.0);
        assert_eq!(object.position, Vec3::ONE);
        assert!(object.flags.contains(ObjectFlags::NO_GRAVITY));
        assert!(!object.flags.contains(ObjectFlags::GHOST));
        assert_eq!(object.remove_at(), Some(1000));

        let system = object.particles().unwrap();
        assert_eq!(system.kind(), EffectKind::Blood);
        assert_eq!(system.particles().len(), 8);
        assert!(!system.texture().is_none());
    }

    #[test]
    fn test_lifetimes_per_kind() {
        let (mut spawner, mut world, _rx) = setup();
        let dust = spawner.spawn_dust(&mut world, Vec3::ZERO, Vec3::Z, Some(2.0));
        let rocket = spawner.spawn_rocket(&mut world, Vec3::ZERO, Vec3::NEG_X);
        let expl = spawner.spawn_explosion(&mut world, Vec3::ZERO, Vec3::Z, None);

        assert_eq!(world.get(dust).and_then(GameObject::remove_at), Some(600));
        assert_eq!(world.get(rocket).and_then(GameObject::remove_at), Some(500));
        assert_eq!(world.get(expl).and_then(GameObject::remove_at), Some(800));
    }

    #[test]
    fn test_deadline_relative_to_level_time() {
        let (mut spawner, mut world, _rx) = setup();
        world.advance(250);
        let id = spawner.spawn_blood(&mut world, Vec3::ZERO, Vec3::NEG_Z, None);
        assert_eq!(world.get(id).and_then(GameObject::remove_at), Some(1250));
    }

    #[test]
    fn test_sound_is_ghost() {
        let (mut spawner, mut world, rx) = setup();
        let id = spawner.spawn_sound(&mut world, Vec3::X, "sound/boom.wav", 3000);

        let object = world.get(id).unwrap();
        assert!(object.flags.contains(ObjectFlags::NO_GRAVITY | ObjectFlags::GHOST));
        assert_eq!(object.radius, 0.0);
        assert_eq!(object.remove_at(), Some(3000));
        assert!(object.particles().is_none());
        assert_eq!(
            rx.try_recv(),
            Some(FxEvent::SoundSpawned {
                id,
                resource_path: "sound/boom.wav".to_string(),
                position: Vec3::X,
            })
        );
    }

    #[test]
    fn test_unbounded_lifetimes_saturate() {
        let (tx, _rx) = EventBus::create_pair(8);
        let mut settings = EffectSettings::default();
        settings.lifetimes.rocket_ms = u64::MAX;
        let mut spawner = Spawner::new(settings, tx);
        let mut world = World::with_seed(1);
        world.advance(16);

        let sound = spawner.spawn_sound(&mut world, Vec3::ZERO, "sound/loop.wav", u64::MAX);
        let trail = spawner.spawn_rocket(&mut world, Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(world.get(sound).and_then(GameObject::remove_at), Some(u64::MAX));
        assert_eq!(world.get(trail).and_then(GameObject::remove_at), Some(u64::MAX));

        world.advance(10_000);
        assert!(world.contains(sound));
        assert!(world.contains(trail));
    }

    #[test]
    fn test_not_idempotent() {
        let (mut spawner, mut world, rx) = setup();
        let a = spawner.spawn_dust(&mut world, Vec3::ZERO, Vec3::Z, None);
        let b = spawner.spawn_dust(&mut world, Vec3::ZERO, Vec3::Z, None);
        assert_ne!(a, b);
        assert_eq!(world.len(), 2);
        assert_eq!(rx.pending_count(), 2);
        assert_eq!(spawner.textures().len(), 1);
    }

    #[test]
    fn test_event_carries_identity() {
        let (mut spawner, mut world, rx) = setup();
        let id = spawner.spawn_blood(&mut world, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Some(3.0));
        match rx.try_recv() {
            Some(FxEvent::EffectSpawned {
                id: event_id,
                kind,
                identity,
                ..
            }) => {
                assert_eq!(event_id, id);
                assert_eq!(kind, EffectKind::Blood);
                assert_eq!(identity, "blood|dx=0.000,dy=0.000,dz=-1.000,size=3.00");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_spawn_from_identity() {
        let (mut spawner, mut world, _rx) = setup();
        let id = spawner
            .spawn_from_identity(&mut world, Vec3::ZERO, "rock|dx=1.0000,dy=0.0000,dz=0.0000")
            .unwrap();
        let system = world.get(id).and_then(GameObject::particles).unwrap();
        assert_eq!(system.kind(), EffectKind::Rocket);
        assert_eq!(system.particles().len(), 32);
        assert_eq!(world.get(id).and_then(GameObject::remove_at), Some(500));
    }

    #[test]
    fn test_bad_identity_registers_nothing() {
        let (mut spawner, mut world, rx) = setup();
        assert!(spawner.spawn_from_identity(&mut world, Vec3::ZERO, "smoke|dx=1").is_err());
        assert!(spawner.spawn_from_identity(&mut world, Vec3::ZERO, "blood").is_err());
        assert!(world.is_empty());
        assert_eq!(rx.pending_count(), 0);
    }

    #[test]
    fn test_custom_lifetimes() {
        let (tx, _rx) = EventBus::create_pair(8);
        let mut settings = EffectSettings::default();
        settings.lifetimes.blood_ms = 50;
        let mut spawner = Spawner::new(settings, tx);
        let mut world = World::with_seed(1);
        let id = spawner.spawn_blood(&mut world, Vec3::ZERO, Vec3::NEG_Z, None);
        assert_eq!(world.get(id).and_then(GameObject::remove_at), Some(50));
    }
}
