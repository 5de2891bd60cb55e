//! ECS components for hostile mobile units.
//!
//! Components are plain data structs with no methods.
//! The wave collaborator spawns and owns these entities. The fortress engine
//! writes back position and speed during collision, and health and the dying
//! flag when a friendly projectile lands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::UnitClass;

/// World position of a mobile unit's center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Per-frame displacement of a mobile unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Collision radius and movement speed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Locomotion {
    pub radius: f32,
    /// Effective speed this frame, after structure slows.
    pub speed: f32,
    /// Unmodified speed. Collision resolution resets `speed` to this each frame.
    pub base_speed: f32,
}

/// Health state of a mobile unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    /// Playing its death animation. Ignored by targeting and collisions.
    pub dying: bool,
}

/// Marker for hostile units, with the fields target priority needs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hostile {
    pub class: UnitClass,
    pub elite: bool,
}
