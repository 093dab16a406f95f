//! # EMBER World
//!
//! Owns every registered object, the level clock and the removal scheduler.
//!
//! ## Ownership
//!
//! Objects are built by value, handed to [`World::add_obj`], and from then
//! on reachable only through their [`ObjectId`]. Transient effects are not
//! tracked anywhere else; the world destroys them when their removal
//! deadline passes.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod id;
pub mod object;
pub mod world;

pub use id::ObjectId;
pub use object::{Attachment, GameObject, ObjectFlags, SoundEmitter, DEFAULT_HEALTH};
pub use world::World;
