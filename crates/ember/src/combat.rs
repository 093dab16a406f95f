//! # Combat Hits
//!
//! Applies a hit to a world object and produces the visual feedback:
//! a blood spray at the hitpoint, and a kill event on the killing blow.

use ember_world::{ObjectId, World};
use glam::Vec3;

use crate::events::FxEvent;
use crate::spawner::Spawner;

/// A single damaging hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Damage amount.
    pub amount: i32,
    /// Where the hit landed.
    pub hitpoint: Vec3,
    /// Direction the hit travelled.
    pub direction: Vec3,
    /// Who dealt it; [`ObjectId::NULL`] for world damage.
    pub dealer: ObjectId,
}

impl Hit {
    /// Creates a hit.
    #[must_use]
    pub const fn new(amount: i32, hitpoint: Vec3, direction: Vec3, dealer: ObjectId) -> Self {
        Self {
            amount,
            hitpoint,
            direction,
            dealer,
        }
    }
}

/// Applies `hit` to `target`.
///
/// Returns `None` if `target` is not registered. Otherwise sprays blood at
/// the hitpoint along the hit direction and returns whether this hit killed
/// the target; on a kill, [`FxEvent::ObjectKilled`] is published.
pub fn apply_hit(
    world: &mut World,
    spawner: &mut Spawner,
    target: ObjectId,
    hit: Hit,
) -> Option<bool> {
    let killed = world.apply_damage(target, hit.amount, hit.hitpoint, hit.direction, hit.dealer)?;

    spawner.spawn_blood(world, hit.hitpoint, hit.direction, None);

    if killed {
        tracing::info!("{:?} killed by {:?} ({} damage)", target, hit.dealer, hit.amount);
        spawner.publish(FxEvent::ObjectKilled {
            victim: target,
            dealer: hit.dealer,
            hitpoint: hit.hitpoint,
        });
    }
    Some(killed)
}
