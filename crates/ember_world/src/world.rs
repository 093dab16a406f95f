//! # World
//!
//! The registry that owns every live object, the level clock, and the
//! removal scheduler. From `add_obj` on, the world is the object's only
//! owner; everything else refers to it by [`ObjectId`].
//!
//! Each call to [`World::advance`]:
//! 1. Moves the level clock forward
//! 2. Destroys every object whose removal deadline has been reached
//! 3. Ticks the remaining objects in registration order

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::id::ObjectId;
use crate::object::{GameObject, ObjectFlags};

/// One slot of the registry.
#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    object: Option<GameObject>,
}

/// The object registry and level clock.
#[derive(Debug)]
pub struct World {
    /// Slot table, recycled through `free_indices`.
    slots: Vec<Slot>,
    /// Free slot indices for reuse.
    free_indices: Vec<u32>,
    /// Live objects in registration order.
    order: Vec<ObjectId>,
    /// Level time in milliseconds.
    level_time: u64,
    /// Random source handed to particle systems.
    rng: ChaCha8Rng,
}

impl World {
    /// Creates an empty world seeded from the system clock.
    #[must_use]
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self::with_seed(seed)
    }

    /// Creates an empty world with a reproducible random source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            slots: Vec::new(),
            free_indices: Vec::new(),
            order: Vec::new(),
            level_time: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Current level time in milliseconds.
    #[inline]
    #[must_use]
    pub const fn level_time(&self) -> u64 {
        self.level_time
    }

    /// The world's random source.
    #[inline]
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Number of live objects.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no object is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registers `object`, taking ownership, and returns its new ID.
    ///
    /// `ghost` adds [`ObjectFlags::GHOST`].
    pub fn add_obj(&mut self, mut object: GameObject, ghost: bool) -> ObjectId {
        if ghost {
            object.flags |= ObjectFlags::GHOST;
        }

        let index = self.free_indices.pop().unwrap_or_else(|| {
            self.slots.push(Slot::default());
            (self.slots.len() - 1) as u32
        });
        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        let id = ObjectId::new(index, slot.generation);

        object.set_id(id);
        tracing::debug!(
            "Object {:?} registered at t={}ms (flags: {:?}, remove at: {:?})",
            id,
            self.level_time,
            object.flags,
            object.remove_at()
        );
        slot.object = Some(object);
        self.order.push(id);
        id
    }

    /// Returns the object with `id`, if it is still registered.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.object.as_ref()
    }

    /// Mutable access to the object with `id`.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.object.as_mut()
    }

    /// True if `id` refers to a registered object.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Live objects in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.order.iter().filter_map(|&id| self.get(id))
    }

    /// Schedules `id` for destruction at level time `deadline` (ms).
    ///
    /// There is no way to cancel or postpone a removal; an earlier deadline
    /// always wins. Returns `false` if the object is not registered.
    pub fn schedule_removal(&mut self, id: ObjectId, deadline: u64) -> bool {
        match self.get_mut(id) {
            Some(object) => {
                object.schedule_removal(deadline);
                true
            }
            None => false,
        }
    }

    /// Applies damage to `id`. Returns `None` if the object is not
    /// registered, otherwise whether this hit killed it.
    pub fn apply_damage(
        &mut self,
        id: ObjectId,
        amount: i32,
        hitpoint: Vec3,
        direction: Vec3,
        dealer: ObjectId,
    ) -> Option<bool> {
        self.get_mut(id)
            .map(|object| object.apply_damage(amount, hitpoint, direction, dealer))
    }

    /// Advances the level clock by `dt_ms`, destroys expired objects and
    /// ticks the rest. Returns the IDs destroyed this call.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<ObjectId> {
        self.level_time = self.level_time.saturating_add(dt_ms);
        let now = self.level_time;

        let expired: Vec<ObjectId> = self
            .iter()
            .filter(|object| object.remove_at().is_some_and(|t| t <= now))
            .map(GameObject::id)
            .collect();
        for &id in &expired {
            self.destroy(id);
        }

        let dt = dt_ms as f32 / 1000.0;
        for id in &self.order {
            if let Some(object) = self.slots[id.index() as usize].object.as_mut() {
                object.think(dt, &mut self.rng);
            }
        }

        expired
    }

    /// Destroys `id`, freeing its slot.
    fn destroy(&mut self, id: ObjectId) {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return;
        };
        if slot.generation != id.generation() || slot.object.take().is_none() {
            return;
        }
        self.free_indices.push(id.index());
        self.order.retain(|&other| other != id);
        tracing::debug!("Object {:?} removed at t={}ms", id, self.level_time);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
