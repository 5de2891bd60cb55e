//! Unit-vs-structure collision: fence pass-through, slow, push-out, contact damage.
//!
//! Multiple overlapping structures apply cumulatively; a unit touching two
//! walls is slowed and pushed by both.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use rampart_core::components::{Hostile, Locomotion, Position, Vitals};
use rampart_core::constants::{BLOCKAGE_PUSH_FACTOR, STRUCTURE_CONTACT_FACTOR};
use rampart_core::enums::{Passage, StructureKind};
use rampart_core::events::FortressEvent;

use crate::passability::PassabilityMemory;
use crate::structure::Structure;

/// Per-tick inputs shared by every unit.
#[derive(Debug, Clone, Copy)]
pub struct ContactRules {
    pub pass_through_chance: f64,
    pub contact_damage_per_frame: f32,
}

/// Mutable view of one mobile unit.
pub struct UnitBody<'a> {
    pub entity: Entity,
    pub position: &'a mut Vec2,
    pub locomotion: &'a mut Locomotion,
}

/// Resolve one unit against every structure.
pub fn resolve<R: Rng>(
    unit: UnitBody<'_>,
    structures: &mut [Structure],
    memory: &mut PassabilityMemory,
    rules: ContactRules,
    rng: &mut R,
    events: &mut Vec<FortressEvent>,
) {
    let UnitBody {
        entity,
        position,
        locomotion,
    } = unit;
    locomotion.speed = locomotion.base_speed;
    let radius = locomotion.radius;

    for structure in structures.iter_mut() {
        if !structure.is_active() {
            continue;
        }
        let id = structure.id();
        let bounds = *structure.bounds();

        if !bounds.overlaps_circle(*position, radius) {
            memory.clear_permitted(entity, id);
            continue;
        }

        let passage = if structure.kind() == StructureKind::Fence {
            let (passage, rolled) =
                memory.resolve(entity, id, rules.pass_through_chance, rng);
            if rolled {
                let permitted = passage == Passage::Permitted;
                tracing::debug!(unit = ?entity, structure = %id, permitted, "passage resolved");
                events.push(FortressEvent::PassageResolved {
                    unit: entity.to_bits().get(),
                    structure: id,
                    permitted,
                });
            }
            passage
        } else {
            Passage::Blocked
        };

        if passage == Passage::Permitted {
            if bounds.clears_circle(*position, radius) {
                memory.clear_permitted(entity, id);
            }
        } else {
            locomotion.speed *= 1.0 - structure.slow_factor();
            push_out(position, radius, structure);
        }

        let outcome =
            structure.take_damage(rules.contact_damage_per_frame * STRUCTURE_CONTACT_FACTOR);
        if outcome.absorbed > 0.0 {
            events.push(FortressEvent::DamageBlocked {
                structure: id,
                absorbed: outcome.absorbed,
            });
        }
    }
}

/// Push a blocked unit away from the structure center, then snap it to the
/// nearest edge if it is still inside.
fn push_out(position: &mut Vec2, radius: f32, structure: &Structure) {
    let strength = structure.blockage_strength();
    if strength <= 0.0 {
        return;
    }
    let bounds = structure.bounds();
    let away = *position - bounds.center();
    // A unit exactly on the center has no push direction; snap straight out.
    if let Some(dir) = away.try_normalize() {
        *position += dir * strength * BLOCKAGE_PUSH_FACTOR;
    }
    if bounds.overlaps_circle(*position, radius) {
        *position = bounds.snap_outside(*position, radius);
    }
}

/// Resolve every live hostile unit in `world`.
pub fn run<R: Rng>(
    world: &mut World,
    structures: &mut [Structure],
    memory: &mut PassabilityMemory,
    rules: ContactRules,
    rng: &mut R,
    events: &mut Vec<FortressEvent>,
) {
    for (entity, (pos, locomotion, vitals, _)) in
        world.query_mut::<(&mut Position, &mut Locomotion, &Vitals, &Hostile)>()
    {
        if vitals.dying {
            continue;
        }
        resolve(
            UnitBody {
                entity,
                position: &mut pos.0,
                locomotion,
            },
            structures,
            memory,
            rules,
            rng,
            events,
        );
    }
}
