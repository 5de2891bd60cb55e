//! Entity spawn factories for hostile mobile units.
//!
//! The wave collaborator normally spawns units itself; these helpers build
//! the component bundle the fortress engine expects.

use glam::Vec2;
use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::UnitClass;

/// Everything needed to spawn one hostile unit.
#[derive(Debug, Clone, Copy)]
pub struct HostileSpec {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub class: UnitClass,
    pub elite: bool,
}

impl Default for HostileSpec {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: 10.0,
            speed: 1.0,
            health: 3.0,
            class: UnitClass::Normal,
            elite: false,
        }
    }
}

/// Spawn a hostile unit at full health.
pub fn spawn_hostile(world: &mut World, spec: HostileSpec) -> hecs::Entity {
    world.spawn((
        Position(spec.position),
        Velocity(spec.velocity),
        Locomotion {
            radius: spec.radius,
            speed: spec.speed,
            base_speed: spec.speed,
        },
        Vitals {
            health: spec.health,
            max_health: spec.health,
            dying: false,
        },
        Hostile {
            class: spec.class,
            elite: spec.elite,
        },
    ))
}
