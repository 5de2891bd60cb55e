//! Fortress engine for RAMPART.
//!
//! Owns placed structures, passability memory and companions; resolves
//! hostile units in a caller-owned hecs world against them each tick.

pub mod companion;
pub mod engine;
pub mod guidance;
pub mod layout;
pub mod passability;
pub mod pool;
pub mod registry;
pub mod structure;
pub mod systems;
pub mod world_setup;

pub use engine::{FortressEngine, SimConfig};
pub use rampart_core as core;
