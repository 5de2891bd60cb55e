//! Per-tick systems.
//!
//! Systems are free functions over the world, the structure list and the
//! projectile pool. They do not own state.

pub mod collision;
pub mod dispatch;
pub mod projectiles;
pub mod targeting;
