//! # EMBER Effects
//!
//! Short-lived particle effects attached to transient world objects.
//!
//! ## Design Principles
//!
//! 1. **One generator, many descriptors** - Blood, dust, explosion and rocket
//!    trails are rows in a table, not four types
//! 2. **Injected randomness** - Every sampling call takes the caller's RNG
//! 3. **Strings on the wire** - Effect parameters travel as `key=value` lists
//!    with a fixed precision per key, so sender and receiver agree exactly
//!
//! ## Example
//!
//! ```rust,ignore
//! use ember_fx::{EffectKind, EffectParams, ParticleSystem, TextureHandle};
//!
//! let params = EffectParams::new(Vec3::new(0.0, 0.0, -1.0));
//! let system = ParticleSystem::spawn(EffectKind::Blood, &params, origin, texture, &mut rng);
//!
//! // Ship `system.identity()` across the network, then on the other side:
//! let copy = ParticleSystem::from_identity(&identity, origin, texture, &mut rng)?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod particle;
pub mod system;
pub mod texture;

pub use config::{decode, encode, EffectParams, ParamKey, ParamSpec};
pub use descriptor::{
    EffectDescriptor, EffectKind, SizeModel, TrailStagger, VelocityModel, DIRECTION_GUARD_SQ,
};
pub use error::{FxError, FxResult};
pub use generator::EffectGenerator;
pub use particle::Particle;
pub use system::{parse_identity, ParticleInit, ParticleSystem, IDENTITY_SEPARATOR};
pub use texture::{texture_path, TextureHandle, TextureResolver};
