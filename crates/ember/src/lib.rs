//! # EMBER
//!
//! Transient visual effects: blood sprays, dust puffs, explosion flashes,
//! rocket trails and one-shot sounds, spawned into the world as short-lived
//! objects that remove themselves.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────────┐
//! │ Spawner  │──>│  World   │──>│ ParticleSys. │
//! └────┬─────┘   └────┬─────┘   └──────────────┘
//!      │              │ removal deadlines
//!      └──> FxEvent <─┘ (crossbeam channel)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut fx = FxLoop::new(EffectSettings::load("ember.toml")?);
//! let (world, spawner) = fx.parts_mut();
//! spawner.spawn_blood(world, hitpoint, direction, None);
//! let stats = fx.tick(16);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod combat;
pub mod events;
pub mod game_loop;
pub mod resources;
pub mod settings;
pub mod spawner;

pub use combat::{apply_hit, Hit};
pub use events::{EventBus, EventReceiver, EventSender, FxEvent, DEFAULT_EVENT_CAPACITY};
pub use game_loop::{FrameStats, FrameStatsAccumulator, FxLoop, UPDATE_BUDGET, UPDATE_BUDGET_US};
pub use resources::TextureCache;
pub use settings::{EffectSettings, Lifetimes, SettingsError, SettingsResult};
pub use spawner::Spawner;

pub use ember_fx;
pub use ember_world;
